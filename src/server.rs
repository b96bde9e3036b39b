use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr};

use crate::{api, config, error, info, management::SessionStore};

/// Builds the router and serves it until the process exits.
///
/// `address` overrides the configured `SERVER_ADDRESS` when given.
pub async fn start_api_server(sessions: SessionStore, address: Option<String>) {
    let app = Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/api/whoami", get(api::whoami))
        .route("/api/normalize", post(api::normalize))
        .route("/api/match", post(api::match_rows))
        .route("/api/playlist", post(api::create_playlist))
        .layer(Extension(sessions));

    let addr = match SocketAddr::from_str(&address.unwrap_or_else(config::server_addr)) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
