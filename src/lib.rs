//! # Pick'em Engine
//!
//! Scoring and leaderboards for a weekly pick'em pool played against the
//! point spread.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, picks, tallies, leaderboard rows)
//! - **calculate**: Grading, reconciliation, aggregation and ranking
//! - **engine**: Leaderboard operations over a pluggable pick/game source
//! - **storage**: Filesystem JSONL source for games and picks
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod engine;
pub mod models;
pub mod storage;

pub use models::*;
