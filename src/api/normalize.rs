use axum::response::Json;

use crate::{
    Res,
    error::Error,
    types::{NormalizeRequest, NormalizeResponse},
    utils,
};

/// Normalizes pasted text or uploaded CSV content into rows.
///
/// `text` takes precedence when both inputs are present; `order` defaults
/// to artist-song. Needs no session: normalization is pure and the parsed
/// list stays on the client until the user triggers a match.
pub async fn normalize(Json(request): Json<NormalizeRequest>) -> Res<Json<NormalizeResponse>> {
    let order = request.order.unwrap_or_default();

    let rows = if let Some(text) = request.text.as_deref() {
        utils::normalize_lines(text, order)
    } else if let Some(csv) = request.csv.as_deref() {
        utils::normalize_csv(&utils::csv_records(csv))
    } else {
        return Err(Error::Validation(
            "either text or csv is required".to_string(),
        ));
    };

    Ok(Json(NormalizeResponse { rows }))
}
