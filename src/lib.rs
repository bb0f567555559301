//! EduFlex CLI Library
//!
//! Client-side plumbing for the EduFlex learning platform: an authenticated
//! REST client with transparent token renewal, typed wrappers for the
//! playlist, progress and notes endpoints, durable token storage, and the
//! command-line front end built on top of them.
//!
//! # Modules
//!
//! - `api` - Authenticated HTTP client, refresh-and-retry, error normalization
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `eduflex` - Typed EduFlex endpoint wrappers
//! - `management` - Durable token storage on disk
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting and parsing helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eduflexcli::{api::ApiClient, config, eduflex, management::FileTokenStore};
//!
//! #[tokio::main]
//! async fn main() -> eduflexcli::Res<()> {
//!     config::load_env().await?;
//!     let store = Arc::new(FileTokenStore::open().await?);
//!     let client = ApiClient::from_env(store).build()?;
//!     let stats = eduflex::progress::stats(&client).await?;
//!     println!("{} items completed", stats.total_items_completed);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod eduflex;
pub mod management;
pub mod types;
pub mod utils;

/// A convenient Result type alias for application-level operations.
///
/// Library code returns typed errors (`api::ApiError`, `api::StoreError`);
/// the CLI layer collects them behind this boxed trait object.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} notes", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the command cannot recover from; code after the macro
/// does not run.
///
/// # Example
///
/// ```
/// error!("Failed to open token storage: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
