//! # Spotify Integration Module
//!
//! This module is the integration layer between MusicBuzz and the Spotify
//! Web API. It handles the HTTP communication, OAuth token exchange, and
//! response decoding, and exposes the narrow client surface the match
//! pipeline consumes.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: authorize-URL construction, code
//!   exchange, and token refresh. PKCE keeps the client-secret out of the
//!   deployment entirely.
//! - [`search`] - Track search with the structured `track:`/`artist:` query
//!   used by the candidate resolver.
//! - [`playlist`] - Current-user lookup, playlist creation, and batched
//!   track insertion.
//!
//! ## API Coverage
//!
//! - `GET  /search` - Track candidates for one normalized row
//! - `GET  /me` - Profile of the authenticated user
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Append up to 100 track URIs
//! - `POST /api/token` - Token exchange and refresh (accounts host)
//!
//! ## Error Handling
//!
//! Every call maps a non-success status to [`Error::Upstream`] carrying the
//! status code and raw body, and transport failures to [`Error::Network`].
//! There is no retry or backoff in this layer; callers decide whether a
//! failure is row-scoped (the match orchestrator) or fatal (the playlist
//! committer).
//!
//! ## Seams
//!
//! The [`TrackSearch`] and [`PlaylistService`] traits describe the two
//! operations the management layer needs; [`Spotify`] implements both over
//! the real API so orchestration code can be exercised against in-memory
//! fakes in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    Res,
    error::Error,
    types::{CreatePlaylistRequest, CreatePlaylistResponse, TrackCandidate, UserProfile},
};

pub mod auth;
pub mod playlist;
pub mod search;

/// Candidate lookup for one normalized row.
#[async_trait]
pub trait TrackSearch {
    async fn search_tracks(
        &self,
        song: &str,
        artist: &str,
        token: &str,
    ) -> Res<Vec<TrackCandidate>>;
}

/// The three remote operations a playlist commit performs, in call order.
#[async_trait]
pub trait PlaylistService {
    async fn current_user(&self, token: &str) -> Res<UserProfile>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
        token: &str,
    ) -> Res<CreatePlaylistResponse>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String], token: &str) -> Res<()>;
}

/// The live Spotify Web API client.
pub struct Spotify;

#[async_trait]
impl TrackSearch for Spotify {
    async fn search_tracks(
        &self,
        song: &str,
        artist: &str,
        token: &str,
    ) -> Res<Vec<TrackCandidate>> {
        search::search_tracks(song, artist, token).await
    }
}

#[async_trait]
impl PlaylistService for Spotify {
    async fn current_user(&self, token: &str) -> Res<UserProfile> {
        playlist::current_user(token).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
        token: &str,
    ) -> Res<CreatePlaylistResponse> {
        playlist::create_playlist(user_id, request, token).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String], token: &str) -> Res<()> {
        playlist::add_tracks(playlist_id, uris, token).await
    }
}

/// Decodes a response, mapping any non-success status to
/// [`Error::Upstream`] with the raw body preserved for diagnostics.
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Res<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}
