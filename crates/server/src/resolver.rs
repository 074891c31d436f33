//! Archive traversal: newest month first, one month at a time.

use chess_core::{normalize_username, Game, ResolvedGame, TimeClass};
use tracing::{debug, info};

use crate::clients::ArchiveSource;
use crate::error::FetchError;

/// Latest game `username` played, optionally restricted to one time class.
///
/// Months are fetched newest first and the walk stops at the first month whose
/// latest candidate has the user on one side. `Ok(None)` means no such game.
pub async fn resolve_latest<S: ArchiveSource + ?Sized>(
    source: &S,
    username: &str,
    category: Option<TimeClass>,
) -> Result<Option<ResolvedGame>, FetchError> {
    let normalized = normalize_username(username);
    if normalized.is_empty() {
        return Ok(None);
    }

    let archives = source.archive_index(&normalized).await?;
    info!(username = %normalized, archives = archives.len(), "Resolving latest game");

    for location in archives.iter().rev() {
        let games = source.archive_games(location).await?;
        let Some(latest) = latest_game(&games, |g| category.is_none_or(|c| g.is_category(c)))
        else {
            debug!(%location, "No candidate games in archive");
            continue;
        };

        match latest.color_of(&normalized) {
            Some(color) => {
                return Ok(Some(ResolvedGame {
                    game: latest.clone(),
                    color,
                }))
            }
            None => debug!(%location, url = %latest.url, "Latest game has neither side matching user"),
        }
    }

    Ok(None)
}

/// Latest game of `category` for `username` that ended strictly before `cutoff`.
/// A missing end time counts as 0.
pub async fn find_before<S: ArchiveSource + ?Sized>(
    source: &S,
    username: &str,
    category: TimeClass,
    cutoff: i64,
) -> Result<Option<Game>, FetchError> {
    let normalized = normalize_username(username);
    if normalized.is_empty() {
        return Ok(None);
    }

    let archives = source.archive_index(&normalized).await?;

    for location in archives.iter().rev() {
        let games = source.archive_games(location).await?;
        let found = latest_game(&games, |g| {
            g.is_category(category) && g.end_time.unwrap_or(0) < cutoff
        });
        if let Some(game) = found {
            debug!(%location, url = %game.url, "Found previous game");
            return Ok(Some(game.clone()));
        }
    }

    Ok(None)
}

/// Single pass running max over end time among games passing `keep`.
/// The first game seen wins ties; a later one must end strictly later to replace it.
pub fn latest_game<'a>(games: &'a [Game], mut keep: impl FnMut(&Game) -> bool) -> Option<&'a Game> {
    let mut best: Option<&Game> = None;
    for game in games {
        if !keep(game) {
            continue;
        }
        match best {
            Some(b) if game.end_time.unwrap_or(0) <= b.end_time.unwrap_or(0) => {}
            _ => best = Some(game),
        }
    }
    best
}
