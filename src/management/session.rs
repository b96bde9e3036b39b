use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    Res,
    error::Error,
    spotify,
    types::{SessionUser, Token},
    utils,
};

/// One browser session: the PKCE verifier created at login, and the token
/// plus user profile filled in by the callback. Nothing here survives a
/// server restart; Spotify is the only durable store.
#[derive(Debug, Clone)]
struct Session {
    code_verifier: String,
    token: Option<Token>,
    user: Option<SessionUser>,
}

/// In-memory store mapping session-cookie ids to their OAuth state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Creates a pending session holding the PKCE verifier and returns its id.
    pub async fn begin(&self, code_verifier: String) -> String {
        let sid = utils::generate_session_id();
        let mut sessions = self.inner.lock().await;
        sessions.insert(
            sid.clone(),
            Session {
                code_verifier,
                token: None,
                user: None,
            },
        );
        sid
    }

    /// The PKCE verifier of a pending session, if the id is known.
    pub async fn verifier(&self, sid: &str) -> Option<String> {
        let sessions = self.inner.lock().await;
        sessions.get(sid).map(|s| s.code_verifier.clone())
    }

    /// Stores the token and user profile obtained by the OAuth callback.
    pub async fn complete(&self, sid: &str, token: Token, user: SessionUser) -> Res<()> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.get_mut(sid).ok_or(Error::Authentication)?;
        session.token = Some(token);
        session.user = Some(user);
        Ok(())
    }

    /// The session's user profile, present only once the login completed.
    pub async fn authenticated_user(&self, sid: &str) -> Option<SessionUser> {
        let sessions = self.inner.lock().await;
        sessions
            .get(sid)
            .filter(|s| s.token.is_some())
            .and_then(|s| s.user.clone())
    }

    /// Drops a session, if present.
    pub async fn remove(&self, sid: &str) {
        let mut sessions = self.inner.lock().await;
        sessions.remove(sid);
    }

    /// Returns a currently valid access token for the session, refreshing it
    /// first when it is about to expire.
    ///
    /// Fails with `Authentication` when the session is unknown, never
    /// completed its login, or the refresh is rejected.
    pub async fn valid_token(&self, sid: &str) -> Res<String> {
        let token = {
            let sessions = self.inner.lock().await;
            sessions
                .get(sid)
                .and_then(|s| s.token.clone())
                .ok_or(Error::Authentication)?
        };

        if !is_expired(&token) {
            return Ok(token.access_token);
        }

        // Lock released across the refresh call; the session is single-writer
        // per browser, so the worst case is a redundant refresh.
        let refreshed = spotify::auth::refresh_token(&token.refresh_token)
            .await
            .map_err(|_| Error::Authentication)?;
        let access_token = refreshed.access_token.clone();

        let mut sessions = self.inner.lock().await;
        let session = sessions.get_mut(sid).ok_or(Error::Authentication)?;
        session.token = Some(refreshed);

        Ok(access_token)
    }
}

// Four-minute buffer so a token never expires mid-run.
fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now >= (token.obtained_at + token.expires_in).saturating_sub(240)
}
