//! # API Module
//!
//! This module provides the HTTP endpoints of the MusicBuzz web server. It
//! wires the match-and-select pipeline and the session layer to the outside
//! world; no decision logic lives here.
//!
//! ## Endpoints
//!
//! ### Pages
//!
//! - [`index`] - The embedded single-page client
//!
//! ### Authentication
//!
//! - [`login`] - Starts the OAuth 2.0 PKCE flow and sets the session cookie
//! - [`callback`] - Completes the code exchange and stores the token
//! - [`logout`] - Drops the server-side session and clears the cookie
//! - [`whoami`] - Reports whether the session is authenticated; never errors
//!
//! ### Pipeline
//!
//! - [`normalize`] - Raw text or CSV content to normalized rows
//! - [`match_rows`] - Rows to per-row match results plus summary
//! - [`create_playlist`] - Selected URIs to a freshly created playlist
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version for probes
//!
//! ## Error Mapping
//!
//! Handlers return `Res<Json<…>>`; the [`Error`] taxonomy maps onto status
//! codes here (validation 400, missing/expired credential 401, upstream and
//! transport failures 502) with a JSON `{ "error": … }` body in every case.

use axum::{
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::Error;

mod auth;
mod health;
mod index;
mod matches;
mod normalize;
mod playlist;
mod whoami;

pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use health::health;
pub use index::index;
pub use matches::match_rows;
pub use normalize::normalize;
pub use playlist::create_playlist;
pub use whoami::whoami;

/// Name of the session cookie tying a browser to its server-side OAuth state.
pub const SESSION_COOKIE: &str = "musicbuzz_session";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Authentication => StatusCode::UNAUTHORIZED,
            Error::Upstream { .. } | Error::Network(_) | Error::PartialCommit { .. } => {
                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// The session id from the request's cookie header, if any.
pub(crate) fn session_id(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
