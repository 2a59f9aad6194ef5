//! Card parsing from stable id tokens (e.g., "AK0", "ZB1")
//!
//! The token is the card's identity across events: rank char, suit char,
//! copy digit. It is the only form a card takes on the wire.

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, CardView, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Token used for a redacted card. Carries no suit/rank/copy information.
pub const REDACTED_TOKEN: &str = "XX";

const fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Unter => 'U',
        Rank::Ober => 'O',
        Rank::Koenig => 'K',
        Rank::Zehn => 'Z',
        Rank::Ass => 'A',
    }
}

const fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Kreuz => 'K',
        Suit::Schippe => 'S',
        Suit::Herz => 'H',
        Suit::Bollen => 'B',
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            rank_char(self.rank),
            suit_char(self.suit),
            self.copy
        )
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::Visible(card) => card.fmt(f),
            CardView::Redacted => f.write_str(REDACTED_TOKEN),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || {
            DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
        };
        let mut chars = s.chars();
        let rank_ch = chars.next().ok_or_else(parse_err)?;
        let suit_ch = chars.next().ok_or_else(parse_err)?;
        let copy_ch = chars.next().ok_or_else(parse_err)?;
        if chars.next().is_some() {
            return Err(parse_err());
        }
        let rank = match rank_ch {
            'U' => Rank::Unter,
            'O' => Rank::Ober,
            'K' => Rank::Koenig,
            'Z' => Rank::Zehn,
            'A' => Rank::Ass,
            _ => return Err(parse_err()),
        };
        let suit = match suit_ch {
            'K' => Suit::Kreuz,
            'S' => Suit::Schippe,
            'H' => Suit::Herz,
            'B' => Suit::Bollen,
            _ => return Err(parse_err()),
        };
        let copy = match copy_ch {
            '0' => 0,
            '1' => 1,
            _ => return Err(parse_err()),
        };
        Ok(Card { suit, rank, copy })
    }
}

impl FromStr for CardView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == REDACTED_TOKEN {
            return Ok(CardView::Redacted);
        }
        s.parse::<Card>().map(CardView::Visible)
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
