//! User picks and their graded form.

use serde::{Deserialize, Serialize};

use super::{pick_id, GameId, PickId, UserId};

/// Where a pick came from.
///
/// Registered picks were entered by a signed-in user. Anonymous picks were
/// submitted without an account and later attributed to a user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickOrigin {
    #[default]
    Registered,
    AnonymousAttributed { anonymous_id: String },
}

/// Result of a pick against the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickResult {
    Win,
    Loss,
    Push,
}

impl std::fmt::Display for PickResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickResult::Win => write!(f, "win"),
            PickResult::Loss => write!(f, "loss"),
            PickResult::Push => write!(f, "push"),
        }
    }
}

/// A graded result with its point award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickOutcome {
    pub result: PickResult,
    pub points: u32,
}

impl PickOutcome {
    pub fn new(result: PickResult, points: u32) -> Self {
        Self { result, points }
    }
}

/// One user's prediction for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub user_id: UserId,

    pub season: u32,

    pub week: u32,

    pub game_id: GameId,

    /// Team the user picked to cover
    pub selected_team: String,

    #[serde(default)]
    pub is_lock: bool,

    #[serde(default)]
    pub origin: PickOrigin,

    /// Grade recorded upstream, if the pick was already scored
    #[serde(default)]
    pub outcome: Option<PickOutcome>,
}

impl Pick {
    /// Create an ungraded registered pick.
    pub fn new(
        user_id: UserId,
        season: u32,
        week: u32,
        game_id: GameId,
        selected_team: String,
    ) -> Self {
        Self {
            user_id,
            season,
            week,
            game_id,
            selected_team,
            is_lock: false,
            origin: PickOrigin::Registered,
            outcome: None,
        }
    }

    pub fn with_lock(mut self) -> Self {
        self.is_lock = true;
        self
    }

    /// Builder method to mark this pick as an attributed anonymous submission.
    pub fn anonymous(mut self, anonymous_id: impl Into<String>) -> Self {
        self.origin = PickOrigin::AnonymousAttributed {
            anonymous_id: anonymous_id.into(),
        };
        self
    }

    /// Builder method to attach an upstream grade.
    pub fn with_outcome(mut self, result: PickResult, points: u32) -> Self {
        self.outcome = Some(PickOutcome::new(result, points));
        self
    }

    pub fn id(&self) -> PickId {
        pick_id(self.season, self.week, &self.user_id, &self.game_id)
    }
}

/// Whether a pick has been graded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickStatus {
    Scored,
    Pending,
}

/// A pick with its resolved grade.
///
/// Derived on every request and never stored. Pending picks carry no result
/// and zero points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPick {
    pub pick: Pick,
    pub status: PickStatus,
    pub result: Option<PickResult>,
    pub points: u32,
}

impl ScoredPick {
    pub fn scored(pick: Pick, outcome: PickOutcome) -> Self {
        Self {
            pick,
            status: PickStatus::Scored,
            result: Some(outcome.result),
            points: outcome.points,
        }
    }

    pub fn pending(pick: Pick) -> Self {
        Self {
            pick,
            status: PickStatus::Pending,
            result: None,
            points: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PickStatus::Pending
    }

    pub fn outcome(&self) -> Option<PickOutcome> {
        self.result.map(|result| PickOutcome::new(result, self.points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_builder() {
        let pick = Pick::new("bob".into(), 2024, 5, "g-7".into(), "Detroit".to_string())
            .with_lock()
            .anonymous("anon-9")
            .with_outcome(PickResult::Win, 25);

        assert!(pick.is_lock);
        assert_eq!(
            pick.origin,
            PickOrigin::AnonymousAttributed {
                anonymous_id: "anon-9".to_string()
            }
        );
        assert_eq!(pick.outcome, Some(PickOutcome::new(PickResult::Win, 25)));
    }

    #[test]
    fn test_pick_id_same_across_origins() {
        let registered = Pick::new("bob".into(), 2024, 5, "g-7".into(), "Detroit".to_string());
        let anonymous = registered.clone().anonymous("anon-1");
        assert_eq!(registered.id(), anonymous.id());
    }

    #[test]
    fn test_pending_pick_has_no_points() {
        let pick = Pick::new("bob".into(), 2024, 5, "g-7".into(), "Detroit".to_string());
        let scored = ScoredPick::pending(pick);
        assert!(scored.is_pending());
        assert_eq!(scored.points, 0);
        assert!(scored.outcome().is_none());
    }

    #[test]
    fn test_origin_serialization() {
        let pick = Pick::new("bob".into(), 2024, 5, "g-7".into(), "Detroit".to_string())
            .anonymous("anon-3");
        let json = serde_json::to_value(&pick).unwrap();
        assert_eq!(json["origin"]["kind"], "anonymous_attributed");
        assert_eq!(json["origin"]["anonymous_id"], "anon-3");

        let back: Pick = serde_json::from_value(json).unwrap();
        assert_eq!(back, pick);
    }

    #[test]
    fn test_pick_deserialize_defaults() {
        let json = r#"{
            "user_id": "carol", "season": 2024, "week": 1, "game_id": "g-1",
            "selected_team": "Buffalo", "origin": {"kind": "registered"}
        }"#;
        let pick: Pick = serde_json::from_str(json).unwrap();
        assert!(!pick.is_lock);
        assert!(pick.outcome.is_none());
        assert_eq!(pick.origin, PickOrigin::Registered);
    }
}
