pub mod health;
pub mod last_game;
pub mod leaderboards;
