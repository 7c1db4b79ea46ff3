pub mod client;
pub mod config;
pub mod game;
pub mod leaderboard;
