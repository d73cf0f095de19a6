//! Core data models for the pick'em engine.

mod game;
mod ids;
mod leaderboard;
mod pick;
mod summary;
mod warning;

pub use game::*;
pub use ids::*;
pub use leaderboard::*;
pub use pick::*;
pub use summary::*;
pub use warning::*;
