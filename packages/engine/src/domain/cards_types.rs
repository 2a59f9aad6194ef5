//! Core card-related types: Card, Rank, Suit, CardView

/// The four Binokel suits, in canonical display order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Kreuz,
    Schippe,
    Herz,
    Bollen,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Kreuz, Suit::Schippe, Suit::Herz, Suit::Bollen];
}

/// The five ranks of the 40-card deck.
///
/// Derived `Ord` is trick strength: Unter < Ober < Koenig < Zehn < Ass.
/// Display ordering within a suit is different (the Zehn sorts below the
/// face cards); see [`Card::cmp`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Unter,
    Ober,
    Koenig,
    Zehn,
    Ass,
}

impl Rank {
    pub const ALL: [Rank; 5] = [Rank::Unter, Rank::Ober, Rank::Koenig, Rank::Zehn, Rank::Ass];

    /// Trick points carried by a card of this rank.
    pub const fn points(self) -> u16 {
        match self {
            Rank::Unter => 2,
            Rank::Ober => 3,
            Rank::Koenig => 4,
            Rank::Zehn => 10,
            Rank::Ass => 11,
        }
    }

    /// Position in the natural display order within a suit.
    ///
    /// The Zehn sorts below the face cards here while ranking directly
    /// under the Ass in trick strength; the two orderings must not be
    /// conflated.
    pub const fn display_order(self) -> u8 {
        match self {
            Rank::Zehn => 0,
            Rank::Unter => 1,
            Rank::Ober => 2,
            Rank::Koenig => 3,
            Rank::Ass => 4,
        }
    }
}

/// Which of the two physical copies of a (suit, rank) pair a card is.
pub type CopyIndex = u8; // 0 | 1

/// A physical card. Every (suit, rank) pair exists exactly twice; `copy`
/// distinguishes the two instances so events can reference a card without
/// ambiguity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub copy: CopyIndex,
}

// Note: Ord on Card is only for stable display sorting: canonical suit
// order, then natural rank order, then copy. Do not use for trick
// resolution or any comparison involving trump/lead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.suit, self.rank.display_order(), self.copy).cmp(&(
            other.suit,
            other.rank.display_order(),
            other.copy,
        ))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A card as seen by a particular viewer.
///
/// Redaction is type-checked: a `Redacted` view carries no suit, rank or
/// copy anywhere, so hidden cards cannot leak through derived data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardView {
    Visible(Card),
    Redacted,
}

impl CardView {
    pub const fn card(self) -> Option<Card> {
        match self {
            CardView::Visible(card) => Some(card),
            CardView::Redacted => None,
        }
    }

    pub const fn is_redacted(self) -> bool {
        matches!(self, CardView::Redacted)
    }
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        CardView::Visible(card)
    }
}
