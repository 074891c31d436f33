//! Read-only access to a player's monthly game archives.

use async_trait::async_trait;
use chess_core::Game;

use crate::error::FetchError;

#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Archive locations for a (normalized) username, oldest first.
    async fn archive_index(&self, username: &str) -> Result<Vec<String>, FetchError>;

    /// Games stored at one archive location, in published order.
    async fn archive_games(&self, location: &str) -> Result<Vec<Game>, FetchError>;
}
