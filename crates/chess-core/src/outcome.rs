//! Result-code classification.

use serde::Serialize;

const DRAW_CODES: &[&str] = &[
    "stalemate",
    "agreed",
    "repetition",
    "insufficient",
    "50move",
    "timevsinsufficient",
    "draw",
];

const LOSS_CODES: &[&str] = &["checkmated", "resigned", "timeout", "abandoned", "lose"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Unknown,
}

impl Outcome {
    /// Past-tense label used in rendered text; empty for `Unknown`.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Outcome::Win => "Won",
            Outcome::Loss => "Lost",
            Outcome::Draw => "Drew",
            Outcome::Unknown => "",
        }
    }
}

/// Map a raw result code to an outcome. Total: anything unrecognized is `Unknown`.
pub fn classify(code: Option<&str>) -> Outcome {
    let Some(code) = code else {
        return Outcome::Unknown;
    };
    let code = code.trim().to_lowercase();

    if code == "win" {
        Outcome::Win
    } else if DRAW_CODES.contains(&code.as_str()) {
        Outcome::Draw
    } else if LOSS_CODES.contains(&code.as_str()) {
        Outcome::Loss
    } else {
        Outcome::Unknown
    }
}
