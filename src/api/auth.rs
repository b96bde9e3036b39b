use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::{SESSION_COOKIE, session_id},
    management::SessionStore,
    spotify,
    types::SessionUser,
    utils, warning,
};

/// Starts the OAuth 2.0 PKCE flow for a fresh session.
///
/// Generates the code verifier and challenge, stores the verifier in a
/// pending session, sets the session cookie, and redirects the browser to
/// Spotify's authorize URL. The session id rides along as the `state`
/// parameter so the callback can find the verifier again.
pub async fn login(Extension(sessions): Extension<SessionStore>) -> impl IntoResponse {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let sid = sessions.begin(code_verifier).await;
    let auth_url = spotify::auth::authorize_url(&code_challenge, &sid);

    let cookie = format!("{SESSION_COOKIE}={sid}; Path=/; HttpOnly; SameSite=Lax");
    ([(header::SET_COOKIE, cookie)], Redirect::temporary(&auth_url))
}

/// Completes the OAuth flow when Spotify redirects back.
///
/// Exchanges the authorization code with the session's stored verifier,
/// fetches the user profile for the `whoami` view, and sends the browser
/// back to the app. Failure branches render a short HTML notice instead of
/// a JSON error because the viewer is a browser mid-redirect.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(sessions): Extension<SessionStore>,
) -> Response {
    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        return Html("<h4>Missing authorization code.</h4>").into_response();
    };

    let Some(verifier) = sessions.verifier(state).await else {
        return Html("<h4>Unknown login session. Start again from the app.</h4>").into_response();
    };

    match spotify::auth::exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            let user = match spotify::playlist::current_user(&token.access_token).await {
                Ok(profile) => SessionUser {
                    name: profile.display_name,
                    email: profile.email,
                },
                Err(e) => {
                    warning!("Could not fetch the user profile: {}", e);
                    SessionUser {
                        name: None,
                        email: None,
                    }
                }
            };

            if sessions.complete(state, token, user).await.is_err() {
                return Html("<h4>Login session expired during the exchange.</h4>")
                    .into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>").into_response()
        }
    }
}

/// Drops the server-side session and expires the cookie.
pub async fn logout(
    headers: HeaderMap,
    Extension(sessions): Extension<SessionStore>,
) -> impl IntoResponse {
    if let Some(sid) = session_id(&headers) {
        sessions.remove(&sid).await;
    }

    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/"))
}
