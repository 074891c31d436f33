use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Pacing category of a game, as published in the archive's `time_class` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeClass {
    Bullet,
    Blitz,
    Rapid,
    Daily,
}

impl TimeClass {
    pub const ALL: [TimeClass; 4] = [
        TimeClass::Bullet,
        TimeClass::Blitz,
        TimeClass::Rapid,
        TimeClass::Daily,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeClass::Bullet => "bullet",
            TimeClass::Blitz => "blitz",
            TimeClass::Rapid => "rapid",
            TimeClass::Daily => "daily",
        }
    }
}

impl fmt::Display for TimeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time class: {0}")]
pub struct UnknownTimeClass(pub String);

impl FromStr for TimeClass {
    type Err = UnknownTimeClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TimeClass::ALL
            .into_iter()
            .find(|tc| tc.as_str() == lower)
            .ok_or(UnknownTimeClass(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Explicit `null` reads as the field's default, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One player's side of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Side {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    /// Raw result code, e.g. "win", "checkmated", "agreed"
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl Side {
    pub fn profile_url(&self) -> String {
        if self.username.is_empty() {
            String::new()
        } else {
            format!("https://www.chess.com/member/{}", self.username)
        }
    }

    pub fn is_user(&self, normalized: &str) -> bool {
        !normalized.is_empty() && normalize_username(&self.username) == normalized
    }
}

/// A single game record from a monthly archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Epoch seconds
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Epoch seconds (daily games only, in practice)
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub time_class: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rated: bool,
    #[serde(default)]
    pub pgn: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub white: Side,
    #[serde(default, deserialize_with = "null_as_default")]
    pub black: Side,
}

impl Game {
    /// Parsed time class; `None` when absent or not one of the known classes.
    pub fn category(&self) -> Option<TimeClass> {
        self.time_class.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn is_category(&self, category: TimeClass) -> bool {
        self.category() == Some(category)
    }

    pub fn side(&self, color: Color) -> &Side {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Which color the (already normalized) username played, white checked first.
    pub fn color_of(&self, normalized: &str) -> Option<Color> {
        if self.white.is_user(normalized) {
            Some(Color::White)
        } else if self.black.is_user(normalized) {
            Some(Color::Black)
        } else {
            None
        }
    }
}

/// A game located for a user, together with the color that user played.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGame {
    pub game: Game,
    pub color: Color,
}

impl ResolvedGame {
    pub fn player(&self) -> &Side {
        self.game.side(self.color)
    }
}

/// Trim and lowercase a username for comparison.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}
