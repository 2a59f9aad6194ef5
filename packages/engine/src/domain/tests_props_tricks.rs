//! Property tests for trick comparison and legal-move derivation.

use proptest::prelude::*;

use crate::domain::cards_logic::card_beats;
use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::dealing::{create_deck, shuffle_deck_seeded};
use crate::domain::state::PlayerIndex;
use crate::domain::test_prelude;
use crate::domain::tricks::{trick_winner, valid_plays, Trick};

fn suit(index: u8) -> Suit {
    Suit::ALL[index as usize % 4]
}

fn rank(index: u8) -> Rank {
    Rank::ALL[index as usize % 5]
}

/// A random complete trick plus a leftover hand, all cards distinct.
fn trick_and_hand(
    seed: u64,
    player_count: u8,
    hand_len: usize,
) -> (Trick, Vec<Card>, Suit) {
    let deck = shuffle_deck_seeded(&create_deck(), seed);
    let plays: Vec<(PlayerIndex, Card)> = deck[..player_count as usize]
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as PlayerIndex, c))
        .collect();
    let lead = plays[0].1.suit;
    let trump = deck[player_count as usize].suit;
    let hand = deck[player_count as usize..player_count as usize + hand_len].to_vec();
    (
        Trick {
            plays,
            lead: Some(lead),
            winner: None,
        },
        hand,
        trump,
    )
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: any trump card beats any non-trump card, regardless of
    /// rank, and never the other way around.
    #[test]
    fn prop_trump_beats_any_other_suit(
        trump_rank in 0u8..5,
        other_rank in 0u8..5,
        trump_idx in 0u8..4,
        other_idx in 0u8..4,
        lead_idx in 0u8..4,
    ) {
        prop_assume!(trump_idx != other_idx);
        let trump = suit(trump_idx);
        let lead = suit(lead_idx);
        prop_assume!(lead != trump);
        let trump_card = Card { suit: trump, rank: rank(trump_rank), copy: 0 };
        let other_card = Card { suit: suit(other_idx), rank: rank(other_rank), copy: 0 };
        prop_assert!(card_beats(trump_card, other_card, lead, trump));
        prop_assert!(!card_beats(other_card, trump_card, lead, trump));
    }

    /// Property: two distinct off-suit, non-trump cards never out-rank
    /// each other in either direction; the earlier play stands.
    #[test]
    fn prop_distinct_offsuits_never_beat(
        rank_a in 0u8..5,
        rank_b in 0u8..5,
    ) {
        let lead = Suit::Kreuz;
        let trump = Suit::Schippe;
        let a = Card { suit: Suit::Herz, rank: rank(rank_a), copy: 0 };
        let b = Card { suit: Suit::Bollen, rank: rank(rank_b), copy: 0 };
        prop_assert!(!card_beats(a, b, lead, trump));
        prop_assert!(!card_beats(b, a, lead, trump));
    }

    /// Property: the trick winner played the highest trump if any trump
    /// was played, otherwise the highest lead-suit card; among equal
    /// copies the earlier play stands.
    #[test]
    fn prop_winner_plays_the_best_card(
        seed in any::<u64>(),
        player_count in 2u8..=4,
    ) {
        let (trick, _, trump) = trick_and_hand(seed, player_count, 0);
        let lead = trick.lead.unwrap();
        let winner = trick_winner(&trick, trump, player_count).unwrap();
        let winning_card = trick
            .plays
            .iter()
            .find(|&&(p, _)| p == winner)
            .map(|&(_, c)| c)
            .unwrap();

        let trumps: Vec<&(PlayerIndex, Card)> =
            trick.plays.iter().filter(|(_, c)| c.suit == trump).collect();
        if let Some(best) = trumps.iter().map(|(_, c)| c.rank).max() {
            prop_assert_eq!(winning_card.suit, trump);
            prop_assert_eq!(winning_card.rank, best);
            // Earliest play of the top rank wins.
            let first = trumps.iter().find(|(_, c)| c.rank == best).unwrap();
            prop_assert_eq!(winner, first.0);
        } else {
            let leads: Vec<&(PlayerIndex, Card)> =
                trick.plays.iter().filter(|(_, c)| c.suit == lead).collect();
            let best = leads.iter().map(|(_, c)| c.rank).max().unwrap();
            prop_assert_eq!(winning_card.suit, lead);
            prop_assert_eq!(winning_card.rank, best);
            let first = leads.iter().find(|(_, c)| c.rank == best).unwrap();
            prop_assert_eq!(winner, first.0);
        }
    }

    /// Property: legal plays are always drawn from the hand, and when the
    /// hand holds the lead suit no off-suit card is ever offered.
    #[test]
    fn prop_valid_plays_subset_and_follow(
        seed in any::<u64>(),
        player_count in 2u8..=4,
        hand_len in 1usize..=10,
    ) {
        let (trick, hand, trump) = trick_and_hand(seed, player_count, hand_len);
        let lead = trick.lead.unwrap();
        let legal = valid_plays(&hand, &trick, trump);

        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
        if hand.iter().any(|c| c.suit == lead) {
            prop_assert!(legal.iter().all(|c| c.suit == lead));
        } else if hand.iter().any(|c| c.suit == trump) {
            prop_assert!(legal.iter().all(|c| c.suit == trump));
        }

        // Derivation is deterministic.
        prop_assert_eq!(legal.clone(), valid_plays(&hand, &trick, trump));
    }

    /// Property: when a legal set is restricted to beating cards, every
    /// offered card actually beats the previously winning play.
    #[test]
    fn prop_offered_beaters_do_beat(
        seed in any::<u64>(),
        player_count in 2u8..=4,
        hand_len in 1usize..=10,
    ) {
        let (trick, hand, trump) = trick_and_hand(seed, player_count, hand_len);
        let lead = trick.lead.unwrap();
        let legal = valid_plays(&hand, &trick, trump);
        let best = crate::domain::tricks::current_best(&trick, trump).unwrap().1;

        let any_beater = legal.iter().any(|&c| card_beats(c, best, lead, trump));
        if any_beater {
            // Either the whole legal set beats, or beating was impossible
            // to require (free discard case).
            let follows = hand.iter().any(|c| c.suit == lead)
                || hand.iter().any(|c| c.suit == trump);
            if follows {
                prop_assert!(legal.iter().all(|&c| card_beats(c, best, lead, trump)));
            }
        }
    }
}
