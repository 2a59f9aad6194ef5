//! The closed event union and its stamped envelope.
//!
//! Events are immutable facts; the append-only log is the single source
//! of truth and `GameState` is always a pure fold over a prefix of it.
//! Constructors stamp identity, sequence and time but never validate game
//! rules — validation happens before an event is accepted into the log.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::cards_types::{Card, CardView, Suit};
use super::melds::Meld;
use super::scoring::RoundScoreEntry;
use super::state::{PlayerIndex, Side, TeamId};

pub type EventId = Uuid;
pub type SessionId = Uuid;

/// Minimal context a caller supplies to stamp a new event. `sequence`
/// must be strictly increasing per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub session_id: SessionId,
    pub sequence: u64,
}

/// A stamped, immutable game fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub session_id: SessionId,
    pub sequence: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub kind: GameEventKind,
}

impl GameEvent {
    /// Stamp a fact with a fresh id and the current time. Performs no
    /// rule validation.
    pub fn stamp(ctx: EventContext, kind: GameEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: ctx.session_id,
            sequence: ctx.sequence,
            timestamp: OffsetDateTime::now_utc(),
            kind,
        }
    }
}

/// The closed set of fact types that can occur in a game. Consumers must
/// match exhaustively; adding a variant is a deliberate, reviewed change
/// that surfaces every place needing an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEventKind {
    // Lifecycle & presence
    PlayerJoined {
        player: PlayerIndex,
        nickname: String,
        team: Option<TeamId>,
    },
    PlayerDisconnected {
        player: PlayerIndex,
    },
    PlayerReconnected {
        player: PlayerIndex,
    },
    GameStarted {
        player_count: u8,
        target_score: i32,
    },

    // Dealing
    CardsDealt {
        hands: Vec<Vec<CardView>>,
        dabb: Vec<CardView>,
    },

    // Bidding
    BidPlaced {
        player: PlayerIndex,
        amount: u16,
    },
    BidPassed {
        player: PlayerIndex,
    },
    BiddingWon {
        player: PlayerIndex,
        amount: u16,
    },

    // Dabb
    DabbTaken {
        player: PlayerIndex,
        /// The dabb is revealed publicly when picked up.
        cards: Vec<Card>,
    },
    CardsDiscarded {
        player: PlayerIndex,
        cards: Vec<CardView>,
    },
    WentOut {
        player: PlayerIndex,
    },

    // Trump & melds
    TrumpDeclared {
        player: PlayerIndex,
        trump: Suit,
    },
    MeldsDeclared {
        player: PlayerIndex,
        melds: Vec<Meld>,
    },
    MeldingComplete,

    // Tricks
    CardPlayed {
        player: PlayerIndex,
        card: Card,
    },
    TrickCompleted {
        winner: PlayerIndex,
        points: u16,
    },

    // Scoring & termination
    RoundScored {
        scores: Vec<RoundScoreEntry>,
        bid_met: bool,
    },
    GameFinished {
        winner: Side,
    },
    GameTerminated {
        reason: String,
    },
}

/// Drop events whose id was already seen, keeping the first occurrence.
///
/// The reducer assumes a de-duplicated log; re-folding a duplicated event
/// would double-apply its effect.
pub fn dedup_events(events: Vec<GameEvent>) -> Vec<GameEvent> {
    let mut seen: HashSet<EventId> = HashSet::with_capacity(events.len());
    events
        .into_iter()
        .filter(|event| seen.insert(event.id))
        .collect()
}
