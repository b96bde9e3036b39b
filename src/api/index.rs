use axum::response::Html;

/// Serves the embedded single-page client.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
