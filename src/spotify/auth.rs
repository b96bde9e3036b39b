use chrono::Utc;
use reqwest::Client;

use crate::{
    Res, config,
    spotify::decode,
    types::{Token, TokenResponse},
};

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// The `state` value is the session id of the pending login; Spotify echoes
/// it back to the `/callback` route so the code exchange can find the
/// matching code verifier.
pub fn authorize_url(code_challenge: &str, state: &str) -> String {
    format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}&state={state}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope().replace(' ', "%20"),
        state = state
    )
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token. The code verifier proves
/// that the same client that initiated the auth flow is completing it.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier generated at the start of the flow
///
/// # Errors
///
/// Fails with `Upstream` when the token endpoint rejects the code (it is
/// single-use and expires within minutes) and `Network` on transport
/// failures.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", &config::spotify_client_id()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &config::spotify_redirect_uri()),
        ])
        .send()
        .await?;

    let response: TokenResponse = decode(res).await?;
    Ok(token_from_response(response, None))
}

/// Refreshes an expired access token using a refresh token.
///
/// The refresh grant may rotate the refresh token; when Spotify omits it,
/// the previous one is carried over into the returned [`Token`].
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::spotify_client_id()),
        ])
        .send()
        .await?;

    let response: TokenResponse = decode(res).await?;
    Ok(token_from_response(response, Some(refresh_token)))
}

fn token_from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
