//! # EduFlex Endpoint Wrappers
//!
//! Typed functions over the EduFlex REST API. Each wrapper builds the endpoint
//! path, hands the call to [`ApiClient`](crate::api::ApiClient) and decodes the
//! normalized response into the types in [`crate::types`]. Token injection,
//! refresh-and-retry and error normalization all happen in the client; the
//! wrappers add nothing to that behavior.
//!
//! ## Modules
//!
//! - [`auth`] - login, registration, profile and session restore
//!   (`/auth/login/`, `/auth/register/`, `/auth/me/`, `/auth/become-creator/`)
//! - [`playlists`] - playlist and item CRUD, reordering, sharing and public
//!   discovery (`/playlists/...`)
//! - [`progress`] - watch progress and learning analytics: stats, streaks and
//!   weekly insights (`/progress/...`)
//! - [`notes`] - timestamped notes on playlist items (`/notes/...`)
//! - [`comments`] - threaded item comments and playlist discussions
//!   (`/comments/...`)
//! - [`capsules`] - knowledge capsules: learner summaries of an item, with
//!   likes (`/capsules/...`)
//!
//! ## List Responses
//!
//! List endpoints may answer with a bare JSON array or a paginated
//! `{"results": [...]}` envelope depending on server configuration. Both are
//! accepted via [`Listing`](crate::types::Listing).
//!
//! ## Usage
//!
//! ```rust
//! let client = ApiClient::new("http://localhost:8000/api")?;
//! auth::login(&client, "ada@example.com", "secret").await?;
//!
//! for playlist in playlists::list(&client).await? {
//!     let summary = progress::for_playlist(&client, playlist.id).await?;
//!     println!("{}: {:.1}%", playlist.title, summary.progress_percentage);
//! }
//! ```

pub mod auth;
pub mod capsules;
pub mod comments;
pub mod notes;
pub mod playlists;
pub mod progress;
