//! Configuration management for the EduFlex CLI.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults
//!
//! | Variable                        | Default                      |
//! |---------------------------------|------------------------------|
//! | `EDUFLEX_API_URL`               | `http://localhost:8000/api`  |
//! | `EDUFLEX_REQUEST_TIMEOUT_SECS`  | `30` (`0` disables)          |
//! | `EDUFLEX_TOKEN_PATH`            | `<data dir>/cache/tokens.json` |

use std::{env, path::PathBuf, time::Duration};

pub const APP_DIR: &str = "eduflexcli";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from `<data_local_dir>/eduflexcli/.env`.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// every setting has a default; a malformed one is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/eduflexcli/.env`
/// - macOS: `~/Library/Application Support/eduflexcli/.env`
/// - Windows: `%LOCALAPPDATA%/eduflexcli/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Base URL every endpoint path is appended to, e.g. `https://eduflex.example/api`.
pub fn api_base_url() -> String {
    env::var("EDUFLEX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Per-request timeout. `EDUFLEX_REQUEST_TIMEOUT_SECS=0` disables it.
pub fn request_timeout() -> Option<Duration> {
    let secs = env::var("EDUFLEX_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Location of the persisted access/refresh token pair.
pub fn token_path() -> PathBuf {
    match env::var("EDUFLEX_TOKEN_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("cache").join("tokens.json"),
    }
}
