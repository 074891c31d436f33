pub mod clients;
pub mod config;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod routes;
pub mod variables;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::clients::ChessComClient;
use crate::config::Config;
use crate::lookup::LastLookup;

/// HTTP host: lookup, last-lookup and leaderboard routes over one Chess.com client.
pub fn app(client: Arc<ChessComClient>, config: Config) -> Router {
    let last_lookup = LastLookup::new(config.last_lookup_username.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/last-game", get(routes::last_game::get_last_game))
        .route("/api/last-lookup", get(routes::last_game::get_last_lookup))
        .route("/api/leaderboards", get(routes::leaderboards::get_leaderboards))
        .layer(Extension(client))
        .layer(Extension(config))
        .layer(Extension(last_lookup))
        .layer(cors)
}
