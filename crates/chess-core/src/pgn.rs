//! PGN utilities. Lightweight and regex-based, best effort; no move validation.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("valid regex"));
static VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid regex"));
static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:1-0|0-1|1/2-1/2|\*)\s*$").expect("valid regex")
});

const RESULT_TOKENS: &[&str] = &["1-0", "0-1", "1/2-1/2", "*"];

/// Placeholder returned when moves can't be counted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Full-move count of a game's movetext, or `"N/A"` when there is no text to count.
pub fn count_full_moves(pgn: Option<&str>) -> String {
    let Some(pgn) = pgn.filter(|p| !p.trim().is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    match count_plies(pgn) {
        Some(plies) => plies.div_ceil(2).max(1).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Count half-moves in the movetext section (the part after the last blank line).
pub fn count_plies(pgn: &str) -> Option<usize> {
    let movetext = movetext(pgn)?;
    Some(
        movetext
            .split_whitespace()
            .filter(|token| is_move_token(token))
            .count(),
    )
}

/// Movetext with comments, variations and the trailing result removed.
fn movetext(pgn: &str) -> Option<String> {
    let section = BLANK_LINE_RE.split(pgn.trim()).last()?;

    // Remove comments
    let mut text = COMMENT_RE.replace_all(section, " ").into_owned();

    // Remove variations, innermost first so nesting collapses
    while VARIATION_RE.is_match(&text) {
        text = VARIATION_RE.replace_all(&text, " ").into_owned();
    }

    Some(RESULT_RE.replace(&text, "").into_owned())
}

fn is_move_token(token: &str) -> bool {
    if RESULT_TOKENS.contains(&token) {
        return false;
    }
    let token = strip_move_number(token);
    if token.is_empty() {
        return false;
    }
    // Numeric annotation glyphs ($1, $14)
    if let Some(n) = token.strip_prefix('$') {
        if n.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    !token.chars().all(|c| matches!(c, '!' | '?' | '+' | '#'))
}

/// Drop a leading "12." / "12..." marker, also when glued to the move ("1.e4").
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}
