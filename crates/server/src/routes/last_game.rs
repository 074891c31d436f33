use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use chess_core::TimeClass;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::clients::ChessComClient;
use crate::config::Config;
use crate::error::AppError;
use crate::lookup::{self, LastLookup, LookupOutcome, LookupRequest};

#[derive(Deserialize)]
pub struct LastGameQuery {
    pub username: Option<String>,
    pub category: Option<String>,
    pub template: Option<String>,
}

/// Blank and "any" mean no filter.
fn parse_category(raw: Option<&str>) -> Result<Option<TimeClass>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("any") => Ok(None),
        Some(s) => s
            .parse::<TimeClass>()
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("{e}"))),
    }
}

/// GET /api/last-game
pub async fn get_last_game(
    Extension(client): Extension<Arc<ChessComClient>>,
    Extension(config): Extension<Config>,
    Extension(last_lookup): Extension<LastLookup>,
    Query(q): Query<LastGameQuery>,
) -> Result<Json<LookupOutcome>, AppError> {
    let request = LookupRequest {
        category: parse_category(q.category.as_deref())?,
        username: q.username,
        template: q.template,
    };

    let outcome = lookup::lookup(client.as_ref(), &config, request).await?;
    last_lookup.set(&outcome.username);

    Ok(Json(outcome))
}

/// GET /api/last-lookup
pub async fn get_last_lookup(Extension(last_lookup): Extension<LastLookup>) -> Json<JsonValue> {
    Json(serde_json::json!({ "username": last_lookup.get() }))
}
