//! Bidding rules: bid validity, bidder rotation, auction completion.
//!
//! The auction is a pure function of (current bid, passed set, seat
//! order); all mutation lives in the reducer.

use std::collections::BTreeSet;

use super::rules::{BID_STEP, MIN_BID};
use super::state::{next_seat, seat_offset, PlayerIndex};

/// Lowest acceptable next bid given the current one (0 = no bid yet).
pub fn min_bid(current_bid: u16) -> u16 {
    if current_bid == 0 {
        MIN_BID
    } else {
        current_bid + BID_STEP
    }
}

/// A bid is valid only at or above the minimum and on the bidding step;
/// amounts between steps are rejected, not rounded.
pub fn is_valid_bid(amount: u16, current_bid: u16) -> bool {
    amount >= min_bid(current_bid) && amount % BID_STEP == 0
}

/// The player immediately after the dealer opens the auction.
pub fn first_bidder(dealer: PlayerIndex, player_count: u8) -> PlayerIndex {
    next_seat(dealer, player_count)
}

/// Scan forward from `current` in turn order, skipping passed seats and
/// wrapping at most once. `None` once every seat has passed.
pub fn next_bidder(
    current: PlayerIndex,
    passed: &BTreeSet<PlayerIndex>,
    player_count: u8,
) -> Option<PlayerIndex> {
    for step in 1..=player_count {
        let candidate = seat_offset(current, step as i8, player_count);
        if !passed.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Bidding is complete once at most one active seat remains.
pub fn is_bidding_complete(passed: &BTreeSet<PlayerIndex>, player_count: u8) -> bool {
    passed.len() >= player_count.saturating_sub(1) as usize
}

/// The sole remaining seat, if any. With every seat passed there is no
/// winner and the round must be re-dealt or abandoned by the caller.
pub fn bidding_winner(
    passed: &BTreeSet<PlayerIndex>,
    player_count: u8,
) -> Option<PlayerIndex> {
    if !is_bidding_complete(passed, player_count) {
        return None;
    }
    (0..player_count).find(|seat| !passed.contains(seat))
}

/// Amount the auction closes at: the standing bid, or the opening minimum
/// when every other seat passed before a bid was placed.
pub fn winning_amount(current_bid: u16) -> u16 {
    if current_bid == 0 {
        MIN_BID
    } else {
        current_bid
    }
}
