//! Scoring and ranking engine.
//!
//! Turns picks and game results into standings:
//! - Grading a pick against the spread (`outcome`)
//! - Merging pick origins per user and week (`reconcile`)
//! - Folding graded picks into summaries (`aggregate`)
//! - Competition ranking (`rank`)
//! - Best-finish standings over fixed weeks (`best_finish`)
//!
//! Everything here is synchronous and works only on the snapshots passed in.

pub mod aggregate;
pub mod best_finish;
pub mod outcome;
pub mod rank;
pub mod reconcile;

pub use aggregate::{aggregate, aggregate_season, aggregate_week, summarize_week};
pub use best_finish::{select_best_finish, BestFinishSummary};
pub use outcome::{is_attainable, score, score_final, ScoreError};
pub use rank::{rank, Standing};
pub use reconcile::{reconcile, reconcile_week, PickSet, Reconciled};
