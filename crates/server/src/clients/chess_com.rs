use std::collections::BTreeMap;

use async_trait::async_trait;
use chess_core::Game;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::archive_source::ArchiveSource;
use crate::error::FetchError;

pub const DEFAULT_API_URL: &str = "https://api.chess.com/pub";

#[derive(Deserialize)]
struct ArchivesResponse {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Deserialize)]
struct GamesResponse {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub rating: Option<i64>,
    pub rank: Option<i64>,
    pub url: Option<String>,
}

pub struct ChessComClient {
    client: Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Client against a different API root, e.g. a local stand-in.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("LastGame/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// API root with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let url_str = url.to_string();
        tracing::debug!("GET {url_str}");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url_str.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url: url_str,
            });
        }

        resp.json().await.map_err(|source| FetchError::Request {
            url: url_str,
            source,
        })
    }

    /// Current leaderboards: category name → ranked players.
    pub async fn fetch_leaderboards(
        &self,
    ) -> Result<BTreeMap<String, Vec<LeaderboardEntry>>, FetchError> {
        let data: Value = self.get_json(self.endpoint(&["leaderboards"])?).await?;

        let Some(categories) = data.as_object() else {
            return Ok(BTreeMap::new());
        };

        Ok(categories
            .iter()
            .filter_map(|(name, players)| {
                let entries = players
                    .as_array()?
                    .iter()
                    .filter_map(|p| {
                        Some(LeaderboardEntry {
                            username: p.get("username")?.as_str()?.to_string(),
                            rating: p.get("score").and_then(|v| v.as_i64()),
                            rank: p.get("rank").and_then(|v| v.as_i64()),
                            url: p.get("url").and_then(|v| v.as_str()).map(String::from),
                        })
                    })
                    .collect();
                Some((name.clone(), entries))
            })
            .collect())
    }
}

#[async_trait]
impl ArchiveSource for ChessComClient {
    async fn archive_index(&self, username: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&["player", username, "games", "archives"])?;
        let data: ArchivesResponse = self.get_json(url).await?;
        Ok(data.archives)
    }

    async fn archive_games(&self, location: &str) -> Result<Vec<Game>, FetchError> {
        let url = Url::parse(location).map_err(|_| FetchError::InvalidUrl(location.to_string()))?;
        let data: GamesResponse = self.get_json(url).await?;
        Ok(data.games)
    }
}
