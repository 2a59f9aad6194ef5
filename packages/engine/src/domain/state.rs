//! Game state: phases, players, sides, and the derived state container.
//!
//! `GameState` is never authoritative on its own; it is always a pure fold
//! over a prefix of the event log (see `reducer`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, CardView, Suit};
use super::melds::Meld;
use super::rules::DEFAULT_TARGET_SCORE;
use super::scoring::ScoreMap;
use super::tricks::Trick;
use crate::errors::domain::DomainError;

pub type PlayerIndex = u8; // 0..=3
pub type TeamId = u8; // 0 | 1

/// The scoring unit: an individual seat (2/3 players) or a team of two
/// opposite seats (4 players). Score maps are keyed by exactly one of the
/// two domains, chosen once from the player count.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player(PlayerIndex),
    Team(TeamId),
}

/// The side a seat scores for under the given player count.
pub fn side_for_player(player_count: u8, player: PlayerIndex) -> Side {
    if player_count == 4 {
        Side::Team(player % 2)
    } else {
        Side::Player(player)
    }
}

/// All sides present under the given player count.
pub fn all_sides(player_count: u8) -> Vec<Side> {
    if player_count == 4 {
        vec![Side::Team(0), Side::Team(1)]
    } else {
        (0..player_count).map(Side::Player).collect()
    }
}

/// A seated participant. The index is assigned at join time and is
/// immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub index: PlayerIndex,
    pub nickname: String,
    pub team: Option<TeamId>,
    pub connected: bool,
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Session created; players may join.
    Waiting,
    /// Game started; waiting for the deal.
    Dealing,
    /// Players bid in fixed turn order.
    Bidding,
    /// Bid winner picks up and returns the dabb.
    Dabb,
    /// Bid winner declares trump (or goes out).
    Trump,
    /// All players declare their melds.
    Melding,
    /// Trick play until the round's tricks are exhausted.
    Tricks,
    /// Round finished; waiting for the score fact.
    Scoring,
    /// A side reached the target score.
    Finished,
    /// Session aborted; absorbing.
    Terminated,
}

/// Per-round state, cleared wholesale at round boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Per-player hands as card views, so a state can also be derived from
    /// a per-viewer filtered log.
    pub hands: Vec<Vec<CardView>>,
    /// Undealt remainder, claimed by the bid winner.
    pub dabb: Vec<CardView>,
    /// Cards the bid winner returned face down; they count toward the
    /// declarer side's trick points.
    pub discarded: Vec<CardView>,
    /// Highest bid so far (0 = no bid yet).
    pub current_bid: u16,
    /// Seat expected to bid or pass next.
    pub current_bidder: Option<PlayerIndex>,
    /// Seats that have passed this auction.
    pub passed_players: BTreeSet<PlayerIndex>,
    /// Auction winner, once determined.
    pub bid_winner: Option<PlayerIndex>,
    /// Trump for this round.
    pub trump: Option<Suit>,
    /// Trick in progress.
    pub current_trick: Trick,
    /// Cards captured per seat.
    pub tricks_taken: Vec<Vec<Card>>,
    /// Completed tricks this round.
    pub completed_tricks: u8,
    /// Winner of the most recent completed trick.
    pub last_trick_winner: Option<PlayerIndex>,
    /// Declared melds per seat.
    pub declared_melds: Vec<Vec<Meld>>,
    /// Seats that have declared (possibly empty) melds.
    pub melded_players: BTreeSet<PlayerIndex>,
    /// Bid winner who conceded after seeing the dabb.
    pub went_out: Option<PlayerIndex>,
    /// Scores credited for this round, once scored.
    pub round_scores: ScoreMap,
}

impl RoundState {
    pub fn empty(player_count: u8) -> Self {
        let n = player_count as usize;
        Self {
            hands: vec![Vec::new(); n],
            dabb: Vec::new(),
            discarded: Vec::new(),
            current_bid: 0,
            current_bidder: None,
            passed_players: BTreeSet::new(),
            bid_winner: None,
            trump: None,
            current_trick: Trick::new(),
            tricks_taken: vec![Vec::new(); n],
            completed_tricks: 0,
            last_trick_winner: None,
            declared_melds: vec![Vec::new(); n],
            melded_players: BTreeSet::new(),
            went_out: None,
            round_scores: ScoreMap::new(),
        }
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Current phase.
    pub phase: Phase,
    /// Number of seats (2..=4); fixed at game start.
    pub player_count: u8,
    /// Seated participants in join order.
    pub players: Vec<Player>,
    /// Seat expected to act (None when nobody can act).
    pub turn: Option<PlayerIndex>,
    /// Dealer seat for the current round.
    pub dealer: PlayerIndex,
    /// Round number, 1-based.
    pub round_no: u32,
    /// Cumulative score at which the game ends.
    pub target_score: i32,
    /// Cumulative scores across rounds.
    pub total_scores: ScoreMap,
    /// Winning side once the game finished.
    pub winner: Option<Side>,
    /// Per-round container.
    pub round: RoundState,
}

impl GameState {
    /// Empty state at session start.
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            player_count: 0,
            players: Vec::new(),
            turn: None,
            dealer: 0,
            round_no: 0,
            target_score: DEFAULT_TARGET_SCORE,
            total_scores: ScoreMap::new(),
            winner: None,
            round: RoundState::empty(0),
        }
    }

    /// Fresh-round transform: rotate the dealer, bump the round counter,
    /// clear per-round state, keep players and cumulative totals.
    pub fn reset_for_new_round(&self) -> Self {
        let mut next = self.clone();
        next.phase = Phase::Dealing;
        next.turn = None;
        next.dealer = next_seat(self.dealer, self.player_count);
        next.round_no = self.round_no + 1;
        next.round = RoundState::empty(self.player_count);
        next
    }

    /// The fully visible hand of a seat. Errors if any card is redacted,
    /// i.e. when called on a state derived from another viewer's log.
    pub fn visible_hand(&self, player: PlayerIndex) -> Result<Vec<Card>, DomainError> {
        self.round.hands[player as usize]
            .iter()
            .map(|view| {
                view.card().ok_or_else(|| {
                    DomainError::invariant(format!(
                        "hand of player {player} is redacted; full state required"
                    ))
                })
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Seat / turn math (2..=4 seats, clockwise is +1).
#[inline]
pub fn seat_offset(seat: PlayerIndex, delta: i8, player_count: u8) -> PlayerIndex {
    debug_assert!(player_count >= 1);
    let n = player_count as i16;
    ((seat as i16 + delta as i16).rem_euclid(n)) as PlayerIndex
}

/// Next seat clockwise.
#[inline]
pub fn next_seat(seat: PlayerIndex, player_count: u8) -> PlayerIndex {
    seat_offset(seat, 1, player_count)
}

pub fn require_bid_winner(state: &GameState, ctx: &'static str) -> Result<PlayerIndex, DomainError> {
    state.round.bid_winner.ok_or_else(|| {
        DomainError::invariant(format!("bid_winner must be set ({ctx})"))
    })
}

pub fn require_trump(state: &GameState, ctx: &'static str) -> Result<Suit, DomainError> {
    state.round.trump.ok_or_else(|| {
        DomainError::invariant(format!("trump must be set ({ctx})"))
    })
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<PlayerIndex, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::invariant(format!("turn must be set ({ctx})"))
    })
}

pub fn require_current_bidder(
    state: &GameState,
    ctx: &'static str,
) -> Result<PlayerIndex, DomainError> {
    state.round.current_bidder.ok_or_else(|| {
        DomainError::invariant(format!("current_bidder must be set ({ctx})"))
    })
}
