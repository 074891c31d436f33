use std::sync::Arc;

use lastgame_server::clients::ChessComClient;
use lastgame_server::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();
    if config.username.is_empty() {
        tracing::info!("CHESS_USERNAME not set - lookups must name a user");
    }

    let client = Arc::new(ChessComClient::with_base_url(&config.chess_com_api_url)?);
    let app = lastgame_server::app(client, config.clone());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
