//! Round scoring: meld + trick tallies per side, the bid sign-flip, and
//! game-end detection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards_logic::cards_points;
use super::cards_types::Card;
use super::melds::meld_points;
use super::rules::LAST_TRICK_BONUS;
use super::state::{
    all_sides, require_bid_winner, side_for_player, GameState, Phase, Side,
};
use crate::errors::domain::DomainError;

/// Scores keyed by side. The key domain (players vs teams) is fixed once
/// by the player count and never mixed.
pub type ScoreMap = BTreeMap<Side, i32>;

/// One side's share of a scored round, as carried by the score event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScoreEntry {
    pub side: Side,
    pub points: i32,
}

/// Outcome of scoring a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub scores: ScoreMap,
    /// Whether the bid-winning side reached its bid. Always false for a
    /// round the declarer went out of.
    pub bid_met: bool,
}

impl RoundResult {
    /// Event payload form, ordered by side key.
    pub fn entries(&self) -> Vec<RoundScoreEntry> {
        self.scores
            .iter()
            .map(|(&side, &points)| RoundScoreEntry { side, points })
            .collect()
    }
}

/// Compute the round outcome from a fully played (or conceded) round.
///
/// Requires the unfiltered state: the discard pile must be visible to
/// count toward the declarer's tricks. For the bid-winning side, melds +
/// tricks at or above the bid score the actual total; below the bid the
/// side scores exactly minus twice its bid (a sign flip, not a clamp).
/// Going out costs the single bid. A side without a trick in a played-out
/// round scores no meld points.
pub fn compute_round_result(state: &GameState) -> Result<RoundResult, DomainError> {
    if state.phase != Phase::Scoring {
        return Err(DomainError::invariant(format!(
            "round scoring outside the scoring phase ({:?})",
            state.phase
        )));
    }
    let declarer = require_bid_winner(state, "compute_round_result")?;
    let declarer_side = side_for_player(state.player_count, declarer);
    let bid = state.round.current_bid as i32;

    let mut scores: ScoreMap = all_sides(state.player_count)
        .into_iter()
        .map(|side| (side, 0))
        .collect();

    if state.round.went_out.is_some() {
        // Conceding after seeing the dabb costs the single bid; nobody
        // else scores for the round.
        scores.insert(declarer_side, -bid);
        return Ok(RoundResult {
            scores,
            bid_met: false,
        });
    }

    let mut meld_totals: ScoreMap = scores.clone();
    let mut trick_totals: ScoreMap = scores.clone();
    let mut took_trick: BTreeMap<Side, bool> = scores.keys().map(|&s| (s, false)).collect();

    for player in 0..state.player_count {
        let side = side_for_player(state.player_count, player);
        let taken = &state.round.tricks_taken[player as usize];
        if !taken.is_empty() {
            took_trick.insert(side, true);
        }
        *trick_totals.entry(side).or_default() += cards_points(taken) as i32;
        *meld_totals.entry(side).or_default() +=
            meld_points(&state.round.declared_melds[player as usize]) as i32;
    }

    // The discard counts toward the declarer's tricks.
    let discarded: Vec<Card> = state
        .round
        .discarded
        .iter()
        .map(|view| {
            view.card().ok_or_else(|| {
                DomainError::invariant("scoring requires the unfiltered discard pile")
            })
        })
        .collect::<Result<_, _>>()?;
    *trick_totals.entry(declarer_side).or_default() += cards_points(&discarded) as i32;

    if let Some(last_winner) = state.round.last_trick_winner {
        let side = side_for_player(state.player_count, last_winner);
        *trick_totals.entry(side).or_default() += LAST_TRICK_BONUS as i32;
    }

    let mut bid_met = false;
    for (&side, score) in scores.iter_mut() {
        let total = if took_trick[&side] {
            meld_totals[&side] + trick_totals[&side]
        } else {
            0
        };
        if side == declarer_side {
            if total >= bid {
                bid_met = true;
                *score = total;
            } else {
                *score = -2 * bid;
            }
        } else {
            *score = total;
        }
    }

    Ok(RoundResult { scores, bid_met })
}

/// The side that ends the game, if any: highest cumulative total at or
/// above the target. The declarer's side wins ties it is part of;
/// otherwise the lowest side key wins deterministically.
pub fn winning_side(state: &GameState) -> Option<Side> {
    let best = state
        .total_scores
        .values()
        .copied()
        .max()
        .filter(|&top| top >= state.target_score)?;

    let declarer_side = state
        .round
        .bid_winner
        .map(|p| side_for_player(state.player_count, p));
    let tied: Vec<Side> = state
        .total_scores
        .iter()
        .filter(|&(_, &points)| points == best)
        .map(|(&side, _)| side)
        .collect();

    if let Some(side) = declarer_side {
        if tied.contains(&side) {
            return Some(side);
        }
    }
    tied.into_iter().next()
}
