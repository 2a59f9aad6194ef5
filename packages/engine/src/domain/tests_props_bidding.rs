//! Property tests for the auction predicates (pure domain).
//!
//! Ruleset contract:
//! - Opening bids start at 150; raises land on steps of 10
//! - In-between amounts are rejected, not rounded
//! - Rotation skips passed seats and wraps at most once
//! - The auction completes with at most one active seat; the survivor,
//!   if any, is the winner

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::domain::bidding::{
    bidding_winner, first_bidder, is_bidding_complete, is_valid_bid, min_bid, next_bidder,
};
use crate::domain::rules::{BID_STEP, MIN_BID};
use crate::domain::test_prelude;

fn passed_set(mask: u8, player_count: u8) -> BTreeSet<u8> {
    (0..player_count).filter(|i| mask & (1 << i) != 0).collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: off-step amounts are always rejected.
    #[test]
    fn prop_off_step_bids_rejected(
        current in prop_oneof![Just(0u16), (15u16..60).prop_map(|x| x * 10)],
        amount in 0u16..1000,
    ) {
        if amount % BID_STEP != 0 {
            prop_assert!(!is_valid_bid(amount, current));
        }
    }

    /// Property: an on-step amount is valid iff it reaches the minimum.
    #[test]
    fn prop_on_step_bids_follow_the_minimum(
        current in prop_oneof![Just(0u16), (15u16..60).prop_map(|x| x * 10)],
        steps in 0u16..100,
    ) {
        let amount = steps * BID_STEP;
        prop_assert_eq!(is_valid_bid(amount, current), amount >= min_bid(current));
    }

    /// Property: the minimum opens at 150 and then climbs by 10.
    #[test]
    fn prop_min_bid_shape(current in 1u16..800) {
        prop_assert_eq!(min_bid(0), MIN_BID);
        prop_assert_eq!(min_bid(current), current + BID_STEP);
    }

    /// Property: rotation never lands on a passed seat, and finds nobody
    /// only once every seat has passed.
    #[test]
    fn prop_next_bidder_skips_passed(
        player_count in 2u8..=4,
        mask in 0u8..16,
        current in 0u8..4,
    ) {
        let current = current % player_count;
        let passed = passed_set(mask, player_count);
        match next_bidder(current, &passed, player_count) {
            Some(seat) => {
                prop_assert!(seat < player_count);
                prop_assert!(!passed.contains(&seat));
            }
            None => prop_assert_eq!(passed.len(), player_count as usize),
        }
    }

    /// Property: complete iff at most one active seat remains; the
    /// survivor is the winner, and a dead auction has none.
    #[test]
    fn prop_completion_and_winner(
        player_count in 2u8..=4,
        mask in 0u8..16,
    ) {
        let passed = passed_set(mask, player_count);
        let active = player_count as usize - passed.len();
        prop_assert_eq!(is_bidding_complete(&passed, player_count), active <= 1);

        match bidding_winner(&passed, player_count) {
            Some(winner) => {
                prop_assert_eq!(active, 1);
                prop_assert!(!passed.contains(&winner));
            }
            None => prop_assert!(active != 1),
        }
    }

    /// Property: the opener always sits directly left of the dealer.
    #[test]
    fn prop_first_bidder_left_of_dealer(
        player_count in 2u8..=4,
        dealer in 0u8..4,
    ) {
        let dealer = dealer % player_count;
        let opener = first_bidder(dealer, player_count);
        prop_assert_eq!(opener, (dealer + 1) % player_count);
    }
}
