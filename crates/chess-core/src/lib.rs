//! Network-free core: archive game model, result classification, move counting,
//! date patterns and template rendering.

pub mod datefmt;
pub mod game_data;
pub mod outcome;
pub mod pgn;
pub mod template;

pub use game_data::{normalize_username, Color, Game, ResolvedGame, Side, TimeClass};
pub use outcome::Outcome;
pub use template::TemplateVariables;
