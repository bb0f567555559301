//! # CLI Module
//!
//! User-facing commands of the EduFlex CLI. Every command builds an
//! [`ApiClient`] backed by the on-disk token store, calls one or more
//! [`crate::eduflex`] wrappers and renders the result as tables or status
//! lines.
//!
//! ## Command Categories
//!
//! ### Account
//!
//! - [`login`], [`register`], [`logout`] - manage the stored session
//! - [`whoami`] - validate the stored session against `/auth/me/`
//! - [`update_profile`], [`become_creator`] - account changes
//!
//! ### Playlists
//!
//! - [`list_playlists`], [`show_playlist`], [`discover`]
//! - [`create_playlist`], [`delete_playlist`], [`share_playlist`]
//! - [`add_item`], [`remove_item`], [`reorder_items`]
//!
//! ### Progress and Analytics
//!
//! - [`stats`], [`streaks`], [`weekly`] - learning analytics
//! - [`record_progress`] - log watch time for an item
//!
//! ### Notes
//!
//! - [`list_notes`], [`add_note`], [`edit_note`], [`delete_note`]
//!
//! ### Comments and Discussions
//!
//! - [`list_comments`], [`add_comment`], [`edit_comment`], [`delete_comment`]
//! - [`list_discussions`], [`show_discussion`], [`start_discussion`],
//!   [`reply_discussion`], [`delete_discussion`]
//!
//! ### Knowledge Capsules
//!
//! - [`list_capsules`], [`item_capsules`], [`show_capsule`]
//! - [`create_capsule`], [`delete_capsule`], [`like_capsule`]
//!
//! ## Session Expiry
//!
//! When a refresh fails the client clears the stored tokens and fires the
//! session-expired notifier. The CLI's notifier prints a pointer to
//! `eduflexcli login`, the terminal equivalent of redirecting to a login page.
//!
//! ## Error Handling
//!
//! API failures terminate the command with a non-zero exit code. Field-level
//! validation messages returned by the server are printed before the final
//! error line.

mod auth;
mod capsules;
mod comments;
mod notes;
mod playlists;
mod progress;

pub use auth::{become_creator, login, logout, register, update_profile, whoami};
pub use capsules::{
    create_capsule, delete_capsule, item_capsules, like_capsule, list_capsules, show_capsule,
};
pub use comments::{
    add_comment, delete_comment, delete_discussion, edit_comment, list_comments,
    list_discussions, reply_discussion, show_discussion, start_discussion,
};
pub use notes::{add_note, delete_note, edit_note, list_notes};
pub use playlists::{
    add_item, create_playlist, delete_playlist, discover, list_playlists, remove_item,
    reorder_items, share_playlist, show_playlist,
};
pub use progress::{record_progress, stats, streaks, weekly};

use std::sync::Arc;

use crate::{
    api::{ApiClient, ApiError},
    config, error,
    management::FileTokenStore,
    utils, warning,
};

/// Client for commands that act on an existing session.
async fn client() -> ApiClient {
    build_client(true).await
}

/// Client for sign-in commands. A 401 there means bad credentials, not an
/// expired session, so no login hint is printed.
async fn anonymous_client() -> ApiClient {
    build_client(false).await
}

async fn build_client(notify_expiry: bool) -> ApiClient {
    let store = match FileTokenStore::open().await {
        Ok(store) => store,
        Err(e) => error!(
            "Cannot open token storage at {}. Err: {}",
            config::token_path().display(),
            e
        ),
    };

    let mut builder = ApiClient::from_env(Arc::new(store));
    if notify_expiry {
        builder = builder.on_session_expired(|| {
            warning!("Your session has expired. Please run eduflexcli login");
        });
    }

    match builder.build() {
        Ok(client) => client,
        Err(e) => error!("Cannot create API client. Err: {}", e),
    }
}

/// Reports an API failure and exits.
fn fail(context: &str, err: ApiError) -> ! {
    if let Some(data) = err.data() {
        for line in utils::describe_field_errors(data) {
            warning!("{}", line);
        }
    }

    match err {
        ApiError::SessionExpired => error!("{}: you are not signed in.", context),
        ApiError::Transport(e) => error!(
            "{}: could not reach the EduFlex API at {}. Err: {}",
            context,
            config::api_base_url(),
            e
        ),
        ApiError::Status {
            status, message, ..
        } => error!("{}: {} ({})", context, message, status.as_u16()),
        other => error!("{}: {}", context, other),
    }
}
