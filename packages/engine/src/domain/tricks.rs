//! Trick-taking engine: the trick container, legal-move derivation and
//! winner resolution.

use super::cards_logic::{card_beats, cards_points, hand_has_suit};
use super::cards_types::{Card, Suit};
use super::state::PlayerIndex;
use crate::errors::domain::DomainError;

/// One round of card play: ordered plays, the suit led, and the winner
/// once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    /// Ordered plays (who, card).
    pub plays: Vec<(PlayerIndex, Card)>,
    /// Suit of the first card, None until led.
    pub lead: Option<Suit>,
    /// Winner, None until resolved.
    pub winner: Option<PlayerIndex>,
}

impl Trick {
    pub fn new() -> Self {
        Self {
            plays: Vec::with_capacity(4),
            lead: None,
            winner: None,
        }
    }

    pub fn is_complete(&self, player_count: u8) -> bool {
        self.plays.len() == player_count as usize
    }

    /// Trick points of the cards played so far.
    pub fn points(&self) -> u16 {
        let cards: Vec<Card> = self.plays.iter().map(|&(_, c)| c).collect();
        cards_points(&cards)
    }
}

impl Default for Trick {
    fn default() -> Self {
        Self::new()
    }
}

/// The play currently winning the trick, if any card has been played.
pub fn current_best(trick: &Trick, trump: Suit) -> Option<(PlayerIndex, Card)> {
    let lead = trick.lead?;
    let mut best = *trick.plays.first()?;
    for &(player, card) in &trick.plays[1..] {
        if card_beats(card, best.1, lead, trump) {
            best = (player, card);
        }
    }
    Some(best)
}

/// Resolve the winner of a complete trick.
///
/// Asking for the winner of an empty or incomplete trick is a caller bug
/// and fails loudly.
pub fn trick_winner(
    trick: &Trick,
    trump: Suit,
    player_count: u8,
) -> Result<PlayerIndex, DomainError> {
    if trick.plays.is_empty() {
        return Err(DomainError::invariant("winner of an empty trick"));
    }
    if !trick.is_complete(player_count) {
        return Err(DomainError::invariant(format!(
            "winner of an incomplete trick ({}/{player_count} plays)",
            trick.plays.len()
        )));
    }
    let (winner, _) = current_best(trick, trump)
        .ok_or_else(|| DomainError::invariant("complete trick without a lead"))?;
    Ok(winner)
}

/// Legal cards for a hand facing the trick in progress.
///
/// Four rules, checked in order: leading allows anything; a held lead
/// suit must be played, over-heading the winning lead-suit card when
/// possible; without lead suit, held trump must be played, over-trumping
/// when possible; with neither, anything goes. Strict "must follow and
/// must beat if possible", not merely "follow suit".
pub fn valid_plays(hand: &[Card], trick: &Trick, trump: Suit) -> Vec<Card> {
    let Some(lead) = trick.lead else {
        // Leading: anything is legal.
        let mut any = hand.to_vec();
        any.sort();
        return any;
    };

    let Some((_, best)) = current_best(trick, trump) else {
        let mut any = hand.to_vec();
        any.sort();
        return any;
    };

    if hand_has_suit(hand, lead) {
        let lead_cards: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
        return prefer_beating(lead_cards, best, lead, trump);
    }

    if hand_has_suit(hand, trump) {
        let trumps: Vec<Card> = hand.iter().copied().filter(|c| c.suit == trump).collect();
        return prefer_beating(trumps, best, lead, trump);
    }

    let mut any = hand.to_vec();
    any.sort();
    any
}

fn prefer_beating(candidates: Vec<Card>, best: Card, lead: Suit, trump: Suit) -> Vec<Card> {
    let mut beating: Vec<Card> = candidates
        .iter()
        .copied()
        .filter(|&c| card_beats(c, best, lead, trump))
        .collect();
    if beating.is_empty() {
        let mut all = candidates;
        all.sort();
        return all;
    }
    beating.sort();
    beating
}

/// Membership predicate over [`valid_plays`].
pub fn is_valid_play(card: Card, hand: &[Card], trick: &Trick, trump: Suit) -> bool {
    valid_plays(hand, trick, trump).contains(&card)
}
