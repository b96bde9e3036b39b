//! MusicBuzz Playlist Builder Library
//!
//! This library implements a small web service that turns a pasted or
//! uploaded list of "song — artist" lines into a Spotify playlist. Raw text
//! or CSV records are normalized into rows, each row is matched against the
//! Spotify search API, matches are deduplicated by ISRC, and the selected
//! tracks are committed to a freshly created playlist in ordered batches.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web endpoints
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared across all layers
//! - `management` - Match orchestration, selection state, playlist commits,
//!   and per-browser-session token management
//! - `server` - The axum HTTP server
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Pure helpers: row normalization, best-match selection, PKCE
//!
//! # Example
//!
//! ```
//! use musicbuzz::{config, management::SessionStore, server};
//!
//! #[tokio::main]
//! async fn main() -> musicbuzz::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(SessionStore::default(), None).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations in this crate report failures through the
/// [`error::Error`] taxonomy so the HTTP boundary can map each failure class
/// to the right status code.
///
/// # Example
///
/// ```
/// use musicbuzz::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Session authenticated as {}", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1, so this is only for unrecoverable startup
/// failures. Request-scoped failures go through [`error::Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
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
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Could not fetch the user profile: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
