//! Builds the template variables for a resolved game.

use chess_core::datefmt::Formats;
use chess_core::outcome::{classify, Outcome};
use chess_core::pgn::count_full_moves;
use chess_core::{normalize_username, Color, Game, ResolvedGame, Side, TemplateVariables, TimeClass};

use crate::clients::ArchiveSource;
use crate::resolver::find_before;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Every key in [`chess_core::template::VARIABLE_KEYS`] for `resolved`, all as strings.
///
/// `queried_username` is the focus player when non-blank; otherwise the player
/// the game was resolved for. The only network step is the rating-change lookup,
/// which degrades to an empty value on any failure.
pub async fn build_variables<S: ArchiveSource + ?Sized>(
    source: &S,
    resolved: &ResolvedGame,
    queried_username: &str,
    formats: &Formats,
) -> TemplateVariables {
    let game = &resolved.game;
    let mut vars = TemplateVariables::new();

    vars.set("rated", if game.rated { "Rated" } else { "Unrated" });
    vars.set("rules", game.rules.clone().unwrap_or_default());

    vars.set("start_timestamp", formats.timestamp(game.start_time));
    vars.set("end_timestamp", formats.timestamp(game.end_time));
    vars.set("start_date", formats.date(game.start_time));
    vars.set("end_date", formats.date(game.end_time));
    vars.set("start_time", formats.time(game.start_time));
    vars.set("end_time", formats.time(game.end_time));

    vars.set("moves", count_full_moves(game.pgn.as_deref()));
    vars.set("time", duration_label(game));
    vars.set("url", game.url.clone());
    vars.set(
        "game_type",
        game.time_class.as_deref().map(title_case).unwrap_or_default(),
    );

    set_player(&mut vars, "white", Some(&game.white), true);
    set_player(&mut vars, "black", Some(&game.black), true);

    let winner = side_with_outcome(game, Outcome::Win);
    let loser = side_with_outcome(game, Outcome::Loss);
    set_player(&mut vars, "winner", winner, false);
    set_player(&mut vars, "loser", loser, false);

    let focus_name = match queried_username.trim() {
        "" => resolved.player().username.clone(),
        name => name.to_string(),
    };
    let focus_color = game
        .color_of(&normalize_username(&focus_name))
        .unwrap_or(resolved.color);
    set_player(&mut vars, "focus", Some(game.side(focus_color)), true);
    set_player(&mut vars, "foe", Some(game.side(focus_color.opposite())), true);

    let change = rating_change(source, game, &focus_name, focus_color).await;
    vars.set("rating_change", change.map(format_delta).unwrap_or_default());

    vars
}

/// Focus rating now minus focus rating in the previous game of the same class.
/// `None` whenever any piece is missing or the lookup fails.
pub async fn rating_change<S: ArchiveSource + ?Sized>(
    source: &S,
    game: &Game,
    focus_name: &str,
    focus_color: Color,
) -> Option<i64> {
    let end_time = game.end_time?;
    let category = game.category()?;
    if focus_name.trim().is_empty() {
        return None;
    }

    let previous = match find_before(source, focus_name, category, end_time).await {
        Ok(found) => found?,
        Err(e) => {
            tracing::warn!("Rating change lookup failed for {focus_name}: {e}");
            return None;
        }
    };

    let current = game.side(focus_color).rating?;
    let previous_color = previous.color_of(&normalize_username(focus_name))?;
    let before = previous.side(previous_color).rating?;
    current.checked_sub(before)
}

pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Elapsed time between start and end. Daily games count whole days; everything
/// else is wall-clock `HH:MM`, with hours allowed past 24.
pub fn duration_label(game: &Game) -> String {
    let (Some(start), Some(end)) = (game.start_time, game.end_time) else {
        return String::new();
    };
    if end < start {
        return String::new();
    }
    let Some(elapsed) = end.checked_sub(start) else {
        return String::new();
    };

    if game.is_category(TimeClass::Daily) {
        let days = (elapsed as f64 / SECONDS_PER_DAY).round() as i64;
        if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        }
    } else {
        format!("{:02}:{:02}", elapsed / 3600, (elapsed % 3600) / 60)
    }
}

fn side_with_outcome(game: &Game, outcome: Outcome) -> Option<&Side> {
    [&game.white, &game.black]
        .into_iter()
        .find(|side| classify(side.result.as_deref()) == outcome)
}

fn set_player(vars: &mut TemplateVariables, prefix: &str, side: Option<&Side>, with_result: bool) {
    let username = side.map(|s| s.username.clone()).unwrap_or_default();
    let url = side.map(Side::profile_url).unwrap_or_default();
    let rating = side
        .and_then(|s| s.rating)
        .map(|r| r.to_string())
        .unwrap_or_default();

    vars.set(prefix, username);
    vars.set(&format!("{prefix}_url"), url);
    vars.set(&format!("{prefix}_rating"), rating);
    if with_result {
        let result = side
            .map(|s| classify(s.result.as_deref()).past_tense())
            .unwrap_or_default();
        vars.set(&format!("{prefix}_result"), result);
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
