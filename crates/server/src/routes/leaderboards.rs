use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::Value as JsonValue;

use crate::clients::ChessComClient;
use crate::error::AppError;

/// GET /api/leaderboards
/// Proxies the current Chess.com leaderboards, trimmed to name/rating/rank/url.
pub async fn get_leaderboards(
    Extension(client): Extension<Arc<ChessComClient>>,
) -> Result<Json<JsonValue>, AppError> {
    let boards = client.fetch_leaderboards().await?;
    tracing::info!("Fetched {} leaderboards", boards.len());
    Ok(Json(serde_json::json!({ "leaderboards": boards })))
}
