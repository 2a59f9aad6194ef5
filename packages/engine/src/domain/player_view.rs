//! Anti-cheat view filter: what information a viewer may see.
//!
//! Every event reaching a client must pass through here first. The filter
//! is stateless and per-event; only deals and discards carry hidden
//! information, everything else passes unchanged. Redaction replaces a
//! card with [`CardView::Redacted`], which carries no suit/rank/copy in
//! any field, so a derived state can never leak a hidden card.

use super::cards_types::CardView;
use super::events::{GameEvent, GameEventKind};
use super::state::PlayerIndex;

/// Redact a single event for a viewer.
pub fn filter_event_for_player(event: &GameEvent, viewer: PlayerIndex) -> GameEvent {
    let kind = match &event.kind {
        GameEventKind::CardsDealt { hands, dabb } => {
            let hands = hands
                .iter()
                .enumerate()
                .map(|(seat, hand)| {
                    if seat == viewer as usize {
                        hand.clone()
                    } else {
                        vec![CardView::Redacted; hand.len()]
                    }
                })
                .collect();
            // The dabb stays hidden from every viewer until it is taken.
            GameEventKind::CardsDealt {
                hands,
                dabb: vec![CardView::Redacted; dabb.len()],
            }
        }
        GameEventKind::CardsDiscarded { player, cards } => {
            if *player == viewer {
                event.kind.clone()
            } else {
                GameEventKind::CardsDiscarded {
                    player: *player,
                    cards: vec![CardView::Redacted; cards.len()],
                }
            }
        }
        other => other.clone(),
    };

    GameEvent {
        id: event.id,
        session_id: event.session_id,
        sequence: event.sequence,
        timestamp: event.timestamp,
        kind,
    }
}

/// Redact a whole log for a viewer.
pub fn filter_events_for_player(events: &[GameEvent], viewer: PlayerIndex) -> Vec<GameEvent> {
    events
        .iter()
        .map(|event| filter_event_for_player(event, viewer))
        .collect()
}
