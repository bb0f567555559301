use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use eduflexcli::{
    cli, config, error,
    types::{ItemType, Permission},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with email and password
    Login(LoginOptions),

    /// Create an account and sign in
    Register(RegisterOptions),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Update your profile
    Profile(ProfileOptions),

    /// Upgrade your account to a creator account
    BecomeCreator,

    /// Manage your playlists
    Playlists(PlaylistsOptions),

    /// Browse public playlists
    Discover(DiscoverOptions),

    /// Learning progress and analytics
    Progress(ProgressOptions),

    /// Notes on playlist items
    Notes(NotesOptions),

    /// Comments on playlist items
    Comments(CommentsOptions),

    /// Discussion threads on playlists
    Discussions(DiscussionsOptions),

    /// Knowledge capsules: summaries of what you learned
    Capsules(CapsulesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    #[clap(long)]
    pub email: String,

    /// Prompted for when omitted
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RegisterOptions {
    #[clap(long)]
    pub email: String,

    #[clap(long)]
    pub username: String,

    /// Prompted for (twice) when omitted
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    #[clap(long)]
    pub username: Option<String>,

    #[clap(long)]
    pub bio: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage your playlists")]
pub struct PlaylistsOptions {
    /// Subcommands under `playlists`; lists playlists when omitted
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Show a playlist with its items and your progress
    Show { id: u64 },

    /// Create a playlist
    Create {
        title: String,
        #[clap(long)]
        description: Option<String>,
        /// Make the playlist discoverable by everyone
        #[clap(long)]
        public: bool,
    },

    /// Delete a playlist
    Delete { id: u64 },

    /// Add a video, article or resource to a playlist
    AddItem {
        playlist_id: u64,
        title: String,
        url: String,
        #[clap(long = "type", value_enum, default_value_t = ItemType::Video)]
        item_type: ItemType,
        #[clap(long)]
        description: Option<String>,
        /// Duration in minutes
        #[clap(long)]
        duration: Option<u32>,
    },

    /// Remove an item from its playlist
    RemoveItem { item_id: u64 },

    /// Set the item order of a playlist
    Reorder {
        playlist_id: u64,
        /// All item ids in the new order, comma separated
        #[clap(value_delimiter = ',', num_args = 1..)]
        item_ids: Vec<u64>,
    },

    /// Share a playlist with another user
    Share {
        playlist_id: u64,
        email: String,
        #[clap(long, value_enum, default_value_t = Permission::View)]
        permission: Permission,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Search public playlists by title or description
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Learning progress and analytics")]
pub struct ProgressOptions {
    #[command(subcommand)]
    pub command: ProgressSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProgressSubcommand {
    /// Overall completion and time spent
    Stats,

    /// Current and longest learning streak
    Streaks,

    /// Minutes learned per day over the last week
    Weekly,

    /// Progress of a single playlist
    Playlist { id: u64 },

    /// Record watch time for an item
    Record {
        item_id: u64,
        /// Minutes spent in this session
        #[clap(long, default_value_t = 0)]
        minutes: u64,
        /// Mark the item as completed
        #[clap(long)]
        completed: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Notes on playlist items")]
pub struct NotesOptions {
    #[command(subcommand)]
    pub command: NotesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotesSubcommand {
    /// List notes of an item
    List { item_id: u64 },

    /// Add a note to an item
    Add {
        item_id: u64,
        content: String,
        #[clap(long)]
        title: Option<String>,
        /// Video position, e.g. 83, 1:23 or 1:02:03
        #[clap(long, value_parser = utils::parse_timestamp)]
        at: Option<u32>,
        /// Also attach the note to a playlist
        #[clap(long)]
        playlist: Option<u64>,
    },

    /// Edit a note
    Edit {
        id: u64,
        #[clap(long)]
        content: Option<String>,
        #[clap(long)]
        title: Option<String>,
        #[clap(long, value_parser = utils::parse_timestamp)]
        at: Option<u32>,
    },

    /// Delete a note
    Delete { id: u64 },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Comments on playlist items")]
pub struct CommentsOptions {
    #[command(subcommand)]
    pub command: CommentsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CommentsSubcommand {
    /// List comments of an item with their replies
    List { item_id: u64 },

    /// Comment on an item
    Add {
        item_id: u64,
        content: String,
        /// Reply to an existing comment
        #[clap(long)]
        reply_to: Option<u64>,
    },

    /// Edit one of your comments
    Edit { id: u64, content: String },

    /// Delete one of your comments
    Delete { id: u64 },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Discussion threads on playlists")]
pub struct DiscussionsOptions {
    #[command(subcommand)]
    pub command: DiscussionsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DiscussionsSubcommand {
    /// List discussions of a playlist
    List { playlist_id: u64 },

    /// Show a discussion with its replies
    Show { id: u64 },

    /// Start a discussion on a playlist
    Start {
        playlist_id: u64,
        title: String,
        content: String,
    },

    /// Reply to a discussion
    Reply { id: u64, content: String },

    /// Delete a discussion
    Delete { id: u64 },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Knowledge capsules")]
pub struct CapsulesOptions {
    #[command(subcommand)]
    pub command: CapsulesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CapsulesSubcommand {
    /// List your capsules
    List {
        /// Browse public capsules instead, most liked first
        #[clap(long)]
        public: bool,
    },

    /// Capsules written for an item
    Item { item_id: u64 },

    /// Show a capsule
    Show { id: u64 },

    /// Summarize what you learned from an item
    Create {
        item_id: u64,
        summary: String,
        /// Key takeaway, repeatable
        #[clap(long = "point")]
        points: Vec<String>,
        #[clap(long)]
        mistakes: Option<String>,
        /// File holding a code example
        #[clap(long)]
        code: Option<PathBuf>,
        /// Language of the code example
        #[clap(long)]
        language: Option<String>,
        /// Let other learners see the capsule
        #[clap(long)]
        public: bool,
    },

    /// Delete one of your capsules
    Delete { id: u64 },

    /// Like a public capsule, or remove your like
    Like { id: u64 },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Login(opt) => cli::login(opt.email, opt.password).await,
        Command::Register(opt) => cli::register(opt.email, opt.username, opt.password).await,
        Command::Logout => cli::logout().await,
        Command::Whoami => cli::whoami().await,
        Command::Profile(opt) => cli::update_profile(opt.username, opt.bio).await,
        Command::BecomeCreator => cli::become_creator().await,

        Command::Playlists(opt) => match opt.command {
            None => cli::list_playlists().await,
            Some(PlaylistsSubcommand::Show { id }) => cli::show_playlist(id).await,
            Some(PlaylistsSubcommand::Create {
                title,
                description,
                public,
            }) => cli::create_playlist(title, description, public).await,
            Some(PlaylistsSubcommand::Delete { id }) => cli::delete_playlist(id).await,
            Some(PlaylistsSubcommand::AddItem {
                playlist_id,
                title,
                url,
                item_type,
                description,
                duration,
            }) => cli::add_item(playlist_id, title, url, item_type, description, duration).await,
            Some(PlaylistsSubcommand::RemoveItem { item_id }) => cli::remove_item(item_id).await,
            Some(PlaylistsSubcommand::Reorder {
                playlist_id,
                item_ids,
            }) => cli::reorder_items(playlist_id, item_ids).await,
            Some(PlaylistsSubcommand::Share {
                playlist_id,
                email,
                permission,
            }) => cli::share_playlist(playlist_id, email, permission).await,
        },

        Command::Discover(opt) => cli::discover(opt.search).await,

        Command::Progress(opt) => match opt.command {
            ProgressSubcommand::Stats => cli::stats().await,
            ProgressSubcommand::Streaks => cli::streaks().await,
            ProgressSubcommand::Weekly => cli::weekly().await,
            ProgressSubcommand::Playlist { id } => cli::show_playlist(id).await,
            ProgressSubcommand::Record {
                item_id,
                minutes,
                completed,
            } => cli::record_progress(item_id, minutes, completed).await,
        },

        Command::Notes(opt) => match opt.command {
            NotesSubcommand::List { item_id } => cli::list_notes(item_id).await,
            NotesSubcommand::Add {
                item_id,
                content,
                title,
                at,
                playlist,
            } => cli::add_note(item_id, content, title, at, playlist).await,
            NotesSubcommand::Edit {
                id,
                content,
                title,
                at,
            } => cli::edit_note(id, content, title, at).await,
            NotesSubcommand::Delete { id } => cli::delete_note(id).await,
        },

        Command::Comments(opt) => match opt.command {
            CommentsSubcommand::List { item_id } => cli::list_comments(item_id).await,
            CommentsSubcommand::Add {
                item_id,
                content,
                reply_to,
            } => cli::add_comment(item_id, content, reply_to).await,
            CommentsSubcommand::Edit { id, content } => cli::edit_comment(id, content).await,
            CommentsSubcommand::Delete { id } => cli::delete_comment(id).await,
        },

        Command::Discussions(opt) => match opt.command {
            DiscussionsSubcommand::List { playlist_id } => cli::list_discussions(playlist_id).await,
            DiscussionsSubcommand::Show { id } => cli::show_discussion(id).await,
            DiscussionsSubcommand::Start {
                playlist_id,
                title,
                content,
            } => cli::start_discussion(playlist_id, title, content).await,
            DiscussionsSubcommand::Reply { id, content } => cli::reply_discussion(id, content).await,
            DiscussionsSubcommand::Delete { id } => cli::delete_discussion(id).await,
        },

        Command::Capsules(opt) => match opt.command {
            CapsulesSubcommand::List { public } => cli::list_capsules(public).await,
            CapsulesSubcommand::Item { item_id } => cli::item_capsules(item_id).await,
            CapsulesSubcommand::Show { id } => cli::show_capsule(id).await,
            CapsulesSubcommand::Create {
                item_id,
                summary,
                points,
                mistakes,
                code,
                language,
                public,
            } => {
                cli::create_capsule(item_id, summary, points, mistakes, code, language, public)
                    .await
            }
            CapsulesSubcommand::Delete { id } => cli::delete_capsule(id).await,
            CapsulesSubcommand::Like { id } => cli::like_capsule(id).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
