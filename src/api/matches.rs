use axum::{Extension, http::HeaderMap, response::Json};
use serde_json::Value;

use crate::{
    Res,
    error::Error,
    management::{SessionStore, matcher, selection},
    spotify::Spotify,
    types::{MatchResponse, Row},
};

/// Matches a sequence of rows against the Spotify catalog.
///
/// Requires an authenticated session; the credential is validated once
/// before any row is processed. The body must carry a `rows` array; the
/// shape is checked on the raw JSON so a malformed body yields a 400 with
/// the same message the validation of a missing field would.
pub async fn match_rows(
    headers: HeaderMap,
    Extension(sessions): Extension<SessionStore>,
    Json(body): Json<Value>,
) -> Res<Json<MatchResponse>> {
    let sid = super::session_id(&headers).ok_or(Error::Authentication)?;
    let token = sessions.valid_token(&sid).await?;

    let rows_value = body
        .get("rows")
        .filter(|value| value.is_array())
        .cloned()
        .ok_or_else(|| Error::Validation("rows must be an array".to_string()))?;
    let rows: Vec<Row> = serde_json::from_value(rows_value)
        .map_err(|e| Error::Validation(format!("invalid rows: {e}")))?;

    let outcome = matcher::run_match(&Spotify, &rows, &token).await;
    let selected = selection::seed(&outcome.results);

    Ok(Json(MatchResponse {
        results: outcome.results,
        summary: outcome.summary,
        selected,
    }))
}
