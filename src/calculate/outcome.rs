//! Grading a single pick against a final score.
//!
//! The home team's score is adjusted by the spread. A pick covers when its
//! side comes out ahead after the adjustment; an exact tie is a push.

use thiserror::Error;

use crate::models::{FinalScore, GameId, GameResult, Pick, PickOutcome, PickResult, Side};

/// Flat award for a push, locked or not.
pub const PUSH_POINTS: u32 = 10;

/// Award for any winning pick before the margin bonus.
pub const WIN_BASE_POINTS: u32 = 20;

/// Margin bonus thresholds, checked from the top down.
const MARGIN_BONUS: [(f64, u32); 3] = [(29.0, 5), (20.0, 3), (11.0, 1)];

/// Why a pick could not be graded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("game {0} is not final")]
    NotFinal(GameId),

    #[error("team '{team}' does not play in game {game_id}")]
    UnknownTeam { game_id: GameId, team: String },
}

/// Bonus for a winning pick, given how far the result landed past the spread.
pub fn margin_bonus(margin: f64) -> u32 {
    MARGIN_BONUS
        .iter()
        .find(|(threshold, _)| margin >= *threshold)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

/// Whether some final score could produce `outcome` for a pick with this
/// lock flag.
pub fn is_attainable(outcome: PickOutcome, is_lock: bool) -> bool {
    match outcome.result {
        PickResult::Push => outcome.points == PUSH_POINTS,
        PickResult::Loss => outcome.points == 0,
        PickResult::Win => match outcome.points.checked_sub(WIN_BASE_POINTS) {
            Some(0) => true,
            Some(bonus) => MARGIN_BONUS.iter().any(|&(_, b)| {
                let earned = if is_lock { b * 2 } else { b };
                earned == bonus
            }),
            None => false,
        },
    }
}

/// Grade a pick for `side` against a final score.
pub fn score_final(side: Side, is_lock: bool, score: FinalScore) -> PickOutcome {
    let home_adjusted = f64::from(score.home) + score.spread;
    let away = f64::from(score.away);

    if home_adjusted == away {
        return PickOutcome::new(PickResult::Push, PUSH_POINTS);
    }

    let covering = if home_adjusted > away {
        Side::Home
    } else {
        Side::Away
    };
    if side != covering {
        return PickOutcome::new(PickResult::Loss, 0);
    }

    let mut bonus = margin_bonus((home_adjusted - away).abs());
    if is_lock {
        bonus *= 2;
    }
    PickOutcome::new(PickResult::Win, WIN_BASE_POINTS + bonus)
}

/// Grade a pick against its game.
///
/// Fails when the game has no final score yet or the pick names a team that
/// is not playing in it.
pub fn score(pick: &Pick, game: &GameResult) -> Result<PickOutcome, ScoreError> {
    let side = game
        .side_of(&pick.selected_team)
        .ok_or_else(|| ScoreError::UnknownTeam {
            game_id: game.id.clone(),
            team: pick.selected_team.clone(),
        })?;
    let final_score = game
        .final_score()
        .ok_or_else(|| ScoreError::NotFinal(game.id.clone()))?;

    Ok(score_final(side, pick.is_lock, final_score))
}
