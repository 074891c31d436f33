//! In-memory archive source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chess_core::Game;

use super::archive_source::ArchiveSource;
use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ArchiveIndex(String),
    ArchiveGames(String),
}

#[derive(Default)]
pub struct MockArchiveSource {
    indexes: HashMap<String, Vec<String>>,
    months: HashMap<String, Vec<Game>>,
    failing: Vec<String>,
    call_log: Mutex<Vec<MockCall>>,
}

impl MockArchiveSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a month of games for `username`. Months are published in call order.
    pub fn with_month(mut self, username: &str, location: &str, games: Vec<Game>) -> Self {
        self.indexes
            .entry(username.to_lowercase())
            .or_default()
            .push(location.to_string());
        self.months.insert(location.to_string(), games);
        self
    }

    /// Make any request for `key` (username or location) answer HTTP 500.
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.push(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(call);
        }
    }

    fn check(&self, key: &str) -> Result<(), FetchError> {
        if self.failing.iter().any(|f| f == key) {
            return Err(FetchError::Status {
                status: 500,
                url: key.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ArchiveSource for MockArchiveSource {
    async fn archive_index(&self, username: &str) -> Result<Vec<String>, FetchError> {
        self.record(MockCall::ArchiveIndex(username.to_string()));
        self.check(username)?;
        Ok(self.indexes.get(username).cloned().unwrap_or_default())
    }

    async fn archive_games(&self, location: &str) -> Result<Vec<Game>, FetchError> {
        self.record(MockCall::ArchiveGames(location.to_string()));
        self.check(location)?;
        Ok(self.months.get(location).cloned().unwrap_or_default())
    }
}
