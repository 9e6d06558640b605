pub mod events;
pub mod leaderboard;
