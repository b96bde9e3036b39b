//! Error taxonomy shared across the web boundary, the match pipeline, and
//! the Spotify client.
//!
//! The variants mirror how a failure is handled: `Validation` and
//! `Authentication` are rejected before any remote call, `Upstream` and
//! `Network` describe a failed Spotify call, and `PartialCommit` marks the
//! one state that needs special care — the playlist was created but not all
//! track batches made it in.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing input at a boundary; no remote call was made.
    #[error("{0}")]
    Validation(String),

    /// Missing or expired session credential.
    #[error("Not authenticated")]
    Authentication,

    /// Spotify answered with a non-success status.
    #[error("Spotify responded {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure reaching Spotify.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A track batch failed after the playlist was already created. The
    /// playlist exists with `applied` of `total` batches; no rollback is
    /// attempted.
    #[error(
        "playlist {playlist_id} was created but only {applied} of {total} track batches were added: {source}"
    )]
    PartialCommit {
        playlist_id: String,
        applied: usize,
        total: usize,
        source: Box<Error>,
    },
}
