use axum::{Extension, http::HeaderMap, response::Json};

use crate::{
    Res,
    error::Error,
    management::{SessionStore, playlist},
    spotify::Spotify,
    types::{PlaylistCommitResult, PlaylistRequest},
};

/// Creates a playlist from the selected track URIs.
///
/// Requires an authenticated session. Name and URI validation happens in
/// the committer before any remote call; a batch failure after creation
/// surfaces as a partial-commit error so the caller knows the playlist
/// exists but is incomplete.
pub async fn create_playlist(
    headers: HeaderMap,
    Extension(sessions): Extension<SessionStore>,
    Json(request): Json<PlaylistRequest>,
) -> Res<Json<PlaylistCommitResult>> {
    let sid = super::session_id(&headers).ok_or(Error::Authentication)?;
    let token = sessions.valid_token(&sid).await?;

    let result = playlist::commit_playlist(
        &Spotify,
        &request.name,
        &request.uris,
        request.is_public,
        request.description.clone(),
        &token,
    )
    .await?;

    Ok(Json(result))
}
