//! Card game logic: suits in hands, trick comparison, card points

use super::cards_types::{Card, Rank, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Trick points of a single card.
pub fn card_points(card: Card) -> u16 {
    card.rank.points()
}

/// Trick points of a set of cards.
pub fn cards_points(cards: &[Card]) -> u16 {
    cards.iter().map(|&c| card_points(c)).sum()
}

/// Whether `a` beats `b` in a trick led in `lead` with `trump` declared.
///
/// Trump beats non-trump unconditionally; within trump, rank strength
/// decides. Among non-trump cards the lead suit beats off-suit; within a
/// suit, rank strength decides. Two distinct off-suit non-trump cards
/// never out-rank each other: the earlier play stands. Equal ranks (the
/// deck holds every card twice) never beat the earlier copy.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }
    // Neither is trump
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    // Both off-suit: compare only within the same suit
    if a.suit == b.suit {
        return a.rank > b.rank;
    }
    false
}
