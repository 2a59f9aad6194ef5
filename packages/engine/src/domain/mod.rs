//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod events;
pub mod melds;
pub mod player_view;
pub mod reducer;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_bidding;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_reducer;

// Re-exports for ergonomics
pub use actions::PlayerAction;
pub use cards_logic::{card_beats, card_points, cards_points, hand_has_suit};
pub use cards_types::{Card, CardView, CopyIndex, Rank, Suit};
pub use dealing::{create_deck, deal_cards, shuffle_deck, shuffle_deck_seeded, sort_hand, Deal};
pub use events::{dedup_events, EventContext, EventId, GameEvent, GameEventKind, SessionId};
pub use melds::{detect_melds, meld_points, Meld, MeldKind};
pub use player_view::{filter_event_for_player, filter_events_for_player};
pub use reducer::{apply_event, apply_events};
pub use scoring::{compute_round_result, winning_side, RoundResult, RoundScoreEntry, ScoreMap};
pub use state::{GameState, Phase, Player, PlayerIndex, Side, TeamId};
pub use tricks::{is_valid_play, trick_winner, valid_plays, Trick};
