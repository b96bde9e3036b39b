use axum::{Extension, http::HeaderMap, response::Json};

use crate::{
    management::SessionStore,
    types::WhoamiResponse,
};

/// Reports whether the request's session is authenticated.
///
/// Never errors; an unknown or pending session simply reads as
/// unauthenticated with a null user.
pub async fn whoami(
    headers: HeaderMap,
    Extension(sessions): Extension<SessionStore>,
) -> Json<WhoamiResponse> {
    let user = match super::session_id(&headers) {
        Some(sid) => sessions.authenticated_user(&sid).await,
        None => None,
    };

    Json(WhoamiResponse {
        authenticated: user.is_some(),
        user,
    })
}
