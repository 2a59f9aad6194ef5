//! Meld patterns, values, and copy-aware detection.
//!
//! Detection runs over a player's hand (for the bid winner including the
//! dabb acquisitions) after trump is declared. A physical card instance
//! (suit, rank, copy) is consumed by at most one meld: higher-value melds
//! claim their copies first and lower ones may only use what remains.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Ranks that form four/eight-of-a-kind melds. Zehnen score nothing.
const KIND_RANKS: [Rank; 4] = [Rank::Ass, Rank::Koenig, Rank::Ober, Rank::Unter];

/// A scoring card combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeldKind {
    /// Koenig + Ober of one suit.
    Pair { suit: Suit },
    /// Ass, Zehn, Koenig, Ober, Unter of one suit.
    Family { suit: Suit },
    /// Both copies of the full family.
    DoubleFamily { suit: Suit },
    /// Schippe-Ober + Bollen-Unter.
    Binokel,
    /// Both copies of each.
    DoubleBinokel,
    /// One card of the rank per suit.
    FourOfRank { rank: Rank },
    /// All eight cards of the rank.
    EightOfRank { rank: Rank },
}

/// A detected or declared meld: the pattern, the physical cards claimed,
/// and the point value (already trump-adjusted for suit melds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    #[serde(flatten)]
    pub kind: MeldKind,
    pub cards: Vec<Card>,
    pub points: u16,
}

/// Point value of a meld kind under the declared trump. Suit-specific
/// melds (pair, family) are boosted in the trump suit.
pub fn meld_value(kind: MeldKind, trump: Suit) -> u16 {
    match kind {
        MeldKind::Pair { suit } => {
            if suit == trump {
                40
            } else {
                20
            }
        }
        MeldKind::Family { suit } => {
            if suit == trump {
                150
            } else {
                100
            }
        }
        MeldKind::DoubleFamily { .. } => 1500,
        MeldKind::Binokel => 40,
        MeldKind::DoubleBinokel => 300,
        MeldKind::FourOfRank { rank } => match rank {
            Rank::Ass => 100,
            Rank::Koenig => 80,
            Rank::Ober => 60,
            Rank::Unter => 40,
            Rank::Zehn => 0,
        },
        MeldKind::EightOfRank { rank } => match rank {
            Rank::Ass => 1000,
            Rank::Koenig => 800,
            Rank::Ober => 600,
            Rank::Unter => 400,
            Rank::Zehn => 0,
        },
    }
}

/// The (suit, rank) multiset a meld kind is made of.
pub fn required_cards(kind: MeldKind) -> Vec<(Suit, Rank)> {
    match kind {
        MeldKind::Pair { suit } => vec![(suit, Rank::Koenig), (suit, Rank::Ober)],
        MeldKind::Family { suit } => Rank::ALL.iter().map(|&r| (suit, r)).collect(),
        MeldKind::DoubleFamily { suit } => Rank::ALL
            .iter()
            .flat_map(|&r| [(suit, r), (suit, r)])
            .collect(),
        MeldKind::Binokel => vec![(Suit::Schippe, Rank::Ober), (Suit::Bollen, Rank::Unter)],
        MeldKind::DoubleBinokel => vec![
            (Suit::Schippe, Rank::Ober),
            (Suit::Schippe, Rank::Ober),
            (Suit::Bollen, Rank::Unter),
            (Suit::Bollen, Rank::Unter),
        ],
        MeldKind::FourOfRank { rank } => Suit::ALL.iter().map(|&s| (s, rank)).collect(),
        MeldKind::EightOfRank { rank } => Suit::ALL
            .iter()
            .flat_map(|&s| [(s, rank), (s, rank)])
            .collect(),
    }
}

/// Every meld kind worth points, in the fixed enumeration order used to
/// break value ties deterministically.
fn candidate_kinds() -> Vec<MeldKind> {
    let mut kinds = Vec::new();
    for suit in Suit::ALL {
        kinds.push(MeldKind::DoubleFamily { suit });
    }
    for rank in KIND_RANKS {
        kinds.push(MeldKind::EightOfRank { rank });
    }
    kinds.push(MeldKind::DoubleBinokel);
    for suit in Suit::ALL {
        kinds.push(MeldKind::Family { suit });
    }
    for rank in KIND_RANKS {
        kinds.push(MeldKind::FourOfRank { rank });
    }
    kinds.push(MeldKind::Binokel);
    for suit in Suit::ALL {
        kinds.push(MeldKind::Pair { suit });
    }
    kinds
}

/// Remove the required cards from `available`, lowest copy index first.
/// Returns the claimed cards, or None if the requirement cannot be met.
fn try_claim(required: &[(Suit, Rank)], available: &mut Vec<Card>) -> Option<Vec<Card>> {
    let mut working = available.clone();
    let mut claimed = Vec::with_capacity(required.len());
    for &(suit, rank) in required {
        let pick = working
            .iter()
            .enumerate()
            .filter(|(_, c)| c.suit == suit && c.rank == rank)
            .min_by_key(|(_, c)| c.copy)
            .map(|(i, _)| i)?;
        claimed.push(working.remove(pick));
    }
    *available = working;
    claimed.sort();
    Some(claimed)
}

/// Detect all melds in a set of cards, greedily by descending value, with
/// copy-aware exclusivity. Deterministic: equal values fall back to the
/// fixed kind enumeration order, and claimed copies are always the lowest
/// free copy index.
pub fn detect_melds(cards: &[Card], trump: Suit) -> Vec<Meld> {
    let mut kinds = candidate_kinds();
    kinds.sort_by_key(|&kind| std::cmp::Reverse(meld_value(kind, trump)));

    let mut available = cards.to_vec();
    available.sort();
    let mut melds = Vec::new();

    for kind in kinds {
        let points = meld_value(kind, trump);
        if points == 0 {
            continue;
        }
        let required = required_cards(kind);
        // The two-copy deck admits the same meld twice (e.g. both pairs
        // of a suit), so claim until the cards run out.
        while let Some(claimed) = try_claim(&required, &mut available) {
            melds.push(Meld {
                kind,
                cards: claimed,
                points,
            });
        }
    }

    melds
}

/// Total point value of a set of melds.
pub fn meld_points(melds: &[Meld]) -> u16 {
    melds.iter().map(|m| m.points).sum()
}

/// Validate a player's declared melds against their cards.
///
/// Every meld must match its pattern exactly, carry the correct point
/// value for the declared trump, and claim only cards the player holds;
/// no physical card instance may be claimed twice across the declaration.
pub fn validate_declared_melds(
    hand: &[Card],
    melds: &[Meld],
    trump: Suit,
) -> Result<(), DomainError> {
    let mut available = hand.to_vec();
    for meld in melds {
        let expected = meld_value(meld.kind, trump);
        if expected == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidMeld,
                format!("{:?} scores nothing and cannot be declared", meld.kind),
            ));
        }
        if meld.points != expected {
            return Err(DomainError::validation(
                ValidationKind::InvalidMeld,
                format!(
                    "{:?} is worth {expected}, declared {}",
                    meld.kind, meld.points
                ),
            ));
        }

        let mut required = required_cards(meld.kind);
        if meld.cards.len() != required.len() {
            return Err(DomainError::validation(
                ValidationKind::InvalidMeld,
                format!("{:?} needs {} cards", meld.kind, required.len()),
            ));
        }
        for &card in &meld.cards {
            let pos = required
                .iter()
                .position(|&(s, r)| s == card.suit && r == card.rank)
                .ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::InvalidMeld,
                        format!("{card} does not belong to {:?}", meld.kind),
                    )
                })?;
            required.remove(pos);

            let held = available.iter().position(|&c| c == card).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidMeld,
                    format!("{card} is not held or already claimed by another meld"),
                )
            })?;
            available.remove(held);
        }
    }
    Ok(())
}
