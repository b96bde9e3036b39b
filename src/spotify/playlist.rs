use reqwest::Client;
use serde_json::Value;

use crate::{
    Res, config,
    spotify::decode,
    types::{AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, UserProfile},
};

/// Resolves the profile of the user the token belongs to.
///
/// The returned id owns playlists created afterwards; display name and
/// email feed the session's `whoami` view.
pub async fn current_user(token: &str) -> Res<UserProfile> {
    let client = Client::new();
    let response = client
        .get(format!("{}/me", config::spotify_apiurl()))
        .bearer_auth(token)
        .send()
        .await?;

    decode(response).await
}

/// Creates an empty playlist owned by `user_id`.
pub async fn create_playlist(
    user_id: &str,
    request: &CreatePlaylistRequest,
    token: &str,
) -> Res<CreatePlaylistResponse> {
    let client = Client::new();
    let response = client
        .post(format!(
            "{uri}/users/{user_id}/playlists",
            uri = config::spotify_apiurl()
        ))
        .bearer_auth(token)
        .json(request)
        .send()
        .await?;

    decode(response).await
}

/// Appends up to 100 track URIs to a playlist, preserving their order.
pub async fn add_tracks(playlist_id: &str, uris: &[String], token: &str) -> Res<()> {
    let client = Client::new();
    let response = client
        .post(format!(
            "{uri}/playlists/{playlist_id}/tracks",
            uri = config::spotify_apiurl()
        ))
        .bearer_auth(token)
        .json(&AddTracksRequest {
            uris: uris.to_vec(),
        })
        .send()
        .await?;

    // Only the snapshot id comes back; nothing in it is needed here.
    let _: Value = decode(response).await?;
    Ok(())
}
