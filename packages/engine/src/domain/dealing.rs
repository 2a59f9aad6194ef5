//! Deck construction, shuffling and dealing.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards_types::{Card, Rank, Suit};
use super::rules::{hand_size_for_players, DECK_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate the full 40-card deck in canonical order.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            for copy in 0..2u8 {
                deck.push(Card { suit, rank, copy });
            }
        }
    }
    deck
}

/// Return a new permutation of `deck`; the input is left untouched.
///
/// Fisher-Yates from the last index down to 1, swap partner drawn
/// uniformly from [0, i].
pub fn shuffle_deck<R: Rng>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Deterministic shuffle for reproducible deals (tests, simulations).
pub fn shuffle_deck_seeded(deck: &[Card], seed: u64) -> Vec<Card> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffle_deck(deck, &mut rng)
}

/// Result of dealing a shuffled deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub dabb: Vec<Card>,
}

/// Partition an already shuffled deck into per-player hands plus the dabb.
///
/// Consumes the deck left to right in contiguous chunks; no card is
/// duplicated or dropped, and hand sizes plus dabb size always sum to the
/// deck size.
pub fn deal_cards(deck: &[Card], player_count: u8) -> Result<Deal, DomainError> {
    let hand_size = hand_size_for_players(player_count).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be 2..=4, got {player_count}"),
        )
    })? as usize;
    let dabb_size = DECK_SIZE - player_count as usize * hand_size;

    if deck.len() != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "deal_cards requires a full deck of {DECK_SIZE} cards, got {}",
            deck.len()
        )));
    }

    let mut hands = Vec::with_capacity(player_count as usize);
    for player in 0..player_count as usize {
        let start = player * hand_size;
        hands.push(deck[start..start + hand_size].to_vec());
    }
    let dabb = deck[player_count as usize * hand_size..].to_vec();
    debug_assert_eq!(dabb.len(), dabb_size);

    Ok(Deal { hands, dabb })
}

/// Stable display ordering: canonical suit order, then natural rank order
/// within the suit. This is not the trick-strength ordering.
pub fn sort_hand(cards: &[Card]) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort();
    sorted
}
