use reqwest::Client;

use crate::{
    Res, config,
    error::Error,
    spotify::decode,
    types::{SearchTracksResponse, TrackCandidate},
};

/// Search page size. Five hits give the selector enough to disambiguate
/// without paging.
const SEARCH_LIMIT: u32 = 5;

/// Retrieves track candidates for one normalized row from the Spotify Web API.
///
/// When both song and artist are present the query combines a `track:` and
/// an `artist:` filter; otherwise whichever field is non-empty is sent as a
/// free-text query. Percent-encoding is handled by the query-string builder.
///
/// # Arguments
///
/// * `song` - Wanted song title, may be empty
/// * `artist` - Wanted artist name, may be empty
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// The candidates in Spotify's relevance order, capped at [`SEARCH_LIMIT`].
///
/// # Errors
///
/// A row with neither field is a `Validation` error (no request is sent).
/// Non-success responses map to `Upstream` with status and body; transport
/// failures map to `Network`. No retry; the caller decides how to treat
/// failures.
pub async fn search_tracks(song: &str, artist: &str, token: &str) -> Res<Vec<TrackCandidate>> {
    let song = song.trim();
    let artist = artist.trim();

    let query = if !song.is_empty() && !artist.is_empty() {
        format!("track:{song} artist:{artist}")
    } else if !song.is_empty() {
        song.to_string()
    } else if !artist.is_empty() {
        artist.to_string()
    } else {
        return Err(Error::Validation(
            "row needs a song or an artist to search for".to_string(),
        ));
    };

    let limit = SEARCH_LIMIT.to_string();
    let client = Client::new();
    let response = client
        .get(format!("{}/search", config::spotify_apiurl()))
        .query(&[
            ("q", query.as_str()),
            ("type", "track"),
            ("limit", limit.as_str()),
        ])
        .bearer_auth(token)
        .send()
        .await?;

    let json: SearchTracksResponse = decode(response).await?;
    Ok(json.tracks.items)
}
