use crate::{
    Res,
    error::Error,
    spotify::PlaylistService,
    types::{CreatePlaylistRequest, PlaylistCommitResult},
};

/// Spotify caps playlist-track insertion at 100 URIs per request.
const PLAYLIST_BATCH_SIZE: usize = 100;

const DEFAULT_DESCRIPTION: &str = "Created by MusicBuzz";

/// Creates a playlist and appends the given track URIs in ordered batches.
///
/// Validates before touching the remote service: the trimmed name and the
/// URI list must both be non-empty. Then resolves the current user, creates
/// the playlist, and appends batches of at most [`PLAYLIST_BATCH_SIZE`]
/// URIs strictly in sequence so the playlist track order matches the input
/// order.
///
/// # Errors
///
/// Any failure aborts the commit. A batch failure after the playlist was
/// created maps to `PartialCommit` naming the playlist and how many batches
/// made it in; earlier batches are not rolled back.
pub async fn commit_playlist<P: PlaylistService>(
    service: &P,
    name: &str,
    uris: &[String],
    is_public: bool,
    description: Option<String>,
    token: &str,
) -> Res<PlaylistCommitResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation(
            "name and non-empty uris[] are required".to_string(),
        ));
    }
    if uris.is_empty() {
        return Err(Error::Validation(
            "name and non-empty uris[] are required".to_string(),
        ));
    }

    let me = service.current_user(token).await?;

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        public: is_public,
        collaborative: false,
    };
    let playlist = service.create_playlist(&me.id, &request, token).await?;

    let total_batches = uris.len().div_ceil(PLAYLIST_BATCH_SIZE);
    for (index, batch) in uris.chunks(PLAYLIST_BATCH_SIZE).enumerate() {
        if let Err(e) = service.add_tracks(&playlist.id, batch, token).await {
            return Err(Error::PartialCommit {
                playlist_id: playlist.id.clone(),
                applied: index,
                total: total_batches,
                source: Box::new(e),
            });
        }
    }

    Ok(PlaylistCommitResult {
        id: playlist.id,
        url: playlist.external_urls.spotify,
        name: playlist.name,
        added: uris.len(),
        batches: total_batches,
    })
}
