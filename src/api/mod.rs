//! # API Client
//!
//! The single point of contact between the application and the EduFlex REST
//! API. Every endpoint wrapper in [`crate::eduflex`] and every CLI command goes
//! through [`ApiClient`]; nothing else talks HTTP.
//!
//! ## Request lifecycle
//!
//! ```text
//! RequestDescriptor
//!      ↓  base URL + endpoint, Content-Type, Bearer <access_token>
//! Attempt::Initial ──2xx/4xx/5xx──→ normalize → ApiResponse | ApiError::Status
//!      │ 401
//!      ↓
//! Refresher (single flight) ──failed──→ clear tokens, notify → ApiError::SessionExpired
//!      │ refreshed
//!      ↓
//! Attempt::RetryAfterRefresh ──any status──→ normalize
//! ```
//!
//! A call is retried at most once, and never before the refresh outcome is
//! known. The refresh request itself bypasses the 401 handling.
//!
//! ## Capabilities
//!
//! - [`TokenStore`] holds the `access_token` / `refresh_token` pair. The
//!   in-memory [`MemoryTokenStore`] is the default; the CLI persists tokens
//!   with [`crate::management::FileTokenStore`].
//! - [`SessionExpiredNotifier`] is invoked once per failed refresh, after the
//!   tokens are cleared. Any `Fn() + Send + Sync` closure qualifies.
//!
//! ## Errors
//!
//! | Situation                         | Result                               |
//! |-----------------------------------|--------------------------------------|
//! | connection refused, DNS, timeout  | [`ApiError::Transport`], no status   |
//! | non-2xx                           | [`ApiError::Status`] with body       |
//! | 401, refresh failed               | [`ApiError::SessionExpired`]         |
//! | 2xx with non-JSON body            | `ApiResponse { data: Null, .. }`     |

mod client;
mod error;
mod refresh;
mod response;
mod session;
mod store;

pub use client::{ApiClient, ApiClientBuilder, RequestDescriptor};
pub use error::{ApiError, GENERIC_FAILURE};
pub use refresh::{REFRESH_ENDPOINT, RefreshOutcome, Refresher};
pub use response::ApiResponse;
pub use session::{IgnoreSessionExpiry, SessionExpiredNotifier};
pub use store::{ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY, StoreError, TokenStore};
