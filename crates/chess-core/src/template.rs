//! `{{ name }}` substitution for user-written templates.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::pgn::NOT_AVAILABLE;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid regex"));

/// Every variable a rendered game exposes.
pub const VARIABLE_KEYS: &[&str] = &[
    "rated",
    "rules",
    "start_timestamp",
    "end_timestamp",
    "start_date",
    "end_date",
    "start_time",
    "end_time",
    "moves",
    "time",
    "url",
    "game_type",
    "white",
    "white_url",
    "white_rating",
    "white_result",
    "black",
    "black_url",
    "black_rating",
    "black_result",
    "winner",
    "winner_url",
    "winner_rating",
    "loser",
    "loser_url",
    "loser_rating",
    "focus",
    "focus_url",
    "focus_rating",
    "focus_result",
    "foe",
    "foe_url",
    "foe_rating",
    "foe_result",
    "rating_change",
];

/// Removed vocabulary. Always rendered as "N/A" so old templates don't leak `{{...}}`.
pub const LEGACY_KEYS: &[&str] = &[
    "start",
    "end",
    "time_class",
    "timeClass",
    "lookup",
    "lookup_url",
    "lookup_rating",
    "lookup_result",
    "other",
    "other_url",
    "other_rating",
    "other_result",
];

/// Named string values for one rendered game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateVariables(BTreeMap<String, String>);

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Substitute `vars` into `template` in a single pass and trim the result.
///
/// Known keys that are missing or empty render as "N/A", legacy keys always do,
/// and placeholders naming anything else are left untouched. Substituted values
/// are never re-scanned.
pub fn render(template: &str, vars: &TemplateVariables) -> String {
    let rendered = TOKEN_RE.replace_all(template, |caps: &Captures| {
        let key = &caps[1];
        if LEGACY_KEYS.contains(&key) {
            return NOT_AVAILABLE.to_string();
        }
        match vars.get(key) {
            Some(value) if !value.is_empty() => value.to_string(),
            Some(_) => NOT_AVAILABLE.to_string(),
            None if VARIABLE_KEYS.contains(&key) => NOT_AVAILABLE.to_string(),
            None => caps[0].to_string(),
        }
    });

    rendered.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> TemplateVariables {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_missing_known_key_is_not_available() {
        let v = vars(&[("focus", "hikaru")]);
        assert_eq!(
            render("{{focus}} rating {{focus_rating}}", &v),
            "hikaru rating N/A"
        );
    }

    #[test]
    fn test_empty_value_is_not_available() {
        let v = vars(&[("rating_change", "")]);
        assert_eq!(render("({{rating_change}})", &v), "(N/A)");
    }

    #[test]
    fn test_whitespace_tolerant_and_repeated() {
        let v = vars(&[("white", "a"), ("black", "b")]);
        assert_eq!(
            render("{{ white }} vs {{black  }}, {{white}} again", &v),
            "a vs b, a again"
        );
    }

    #[test]
    fn test_legacy_keys_always_blank() {
        let v = vars(&[("lookup", "someone"), ("other_rating", "1500")]);
        assert_eq!(render("{{lookup}}", &v), "N/A");
        assert_eq!(render("{{ other_rating }} {{timeClass}}", &v), "N/A N/A");
        assert_eq!(render("{{lookup}}", &TemplateVariables::new()), "N/A");
    }

    #[test]
    fn test_unknown_placeholder_left_alone() {
        let v = vars(&[("url", "https://x")]);
        assert_eq!(render("{{nope}} {{url}}", &v), "{{nope}} https://x");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let v = vars(&[("white", "{{black}}"), ("black", "b")]);
        assert_eq!(render("{{white}}", &v), "{{black}}");
    }

    #[test]
    fn test_result_is_trimmed() {
        let v = vars(&[("moves", "12")]);
        assert_eq!(render("  \n{{moves}} moves\n ", &v), "12 moves");
    }

    #[test]
    fn test_rendering_is_pure() {
        let v = vars(&[("focus", "a"), ("foe", "b")]);
        let t = "{{focus}} beat {{foe}} {{lookup}}";
        assert_eq!(render(t, &v), render(t, &v));
    }
}
