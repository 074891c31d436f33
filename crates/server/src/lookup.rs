//! One end-to-end lookup: pick the target, resolve, build variables, render.

use std::sync::{Arc, RwLock};

use chess_core::template::render;
use chess_core::{TemplateVariables, TimeClass};
use serde::Serialize;

use crate::clients::ArchiveSource;
use crate::config::Config;
use crate::error::AppError;
use crate::resolver::resolve_latest;
use crate::variables::build_variables;

#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    /// Blank means the configured user
    pub username: Option<String>,
    /// `None` matches any time class
    pub category: Option<TimeClass>,
    /// Overrides the configured template
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupOutcome {
    pub username: String,
    pub text: String,
    pub variables: TemplateVariables,
}

pub async fn lookup<S: ArchiveSource + ?Sized>(
    source: &S,
    config: &Config,
    request: LookupRequest,
) -> Result<LookupOutcome, AppError> {
    let target = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.username.trim())
        .to_string();

    if target.is_empty() {
        return Err(AppError::BadRequest("No username configured".into()));
    }

    tracing::info!(
        username = %target,
        category = request.category.map(|c| c.as_str()).unwrap_or("any"),
        "Looking up latest game"
    );

    let resolved = resolve_latest(source, &target, request.category)
        .await?
        .ok_or_else(AppError::no_recent_games)?;

    let variables = build_variables(source, &resolved, &target, &config.formats()).await;

    let template = request
        .template
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| config.template_for(&target));

    Ok(LookupOutcome {
        text: render(template, &variables),
        username: target,
        variables,
    })
}

/// Most recent lookup target, shared between requests.
#[derive(Clone, Default)]
pub struct LastLookup(Arc<RwLock<Option<String>>>);

impl LastLookup {
    pub fn new(initial: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, username: &str) {
        if let Ok(mut guard) = self.0.write() {
            *guard = Some(username.to_string());
        }
    }
}
