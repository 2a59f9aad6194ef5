//! Player actions: the tagged action union, validation against the
//! current state, and the mapping from a validated action to the event it
//! becomes.
//!
//! Rejected actions never reach the log; they surface as
//! `DomainError::Validation` whose kind maps to a stable `ErrorCode` the
//! transport layer can localize.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bidding::is_valid_bid;
use super::cards_types::{Card, CardView, Suit};
use super::melds::{validate_declared_melds, Meld};
use super::rules::dabb_size_for_players;
use super::state::{GameState, Phase, PlayerIndex};
use super::tricks::is_valid_play;
use super::events::GameEventKind;
use crate::errors::domain::{DomainError, ValidationKind};

/// One tagged action a (human or AI) player may attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    Bid { amount: u16 },
    Pass,
    TakeDabb,
    DiscardCards { cards: Vec<Card> },
    GoOut,
    DeclareTrump { trump: Suit },
    DeclareMelds { melds: Vec<Meld> },
    PlayCard { card: Card },
}

/// Validate an action against the current phase, turn and payload.
pub fn validate_action(
    state: &GameState,
    player: PlayerIndex,
    action: &PlayerAction,
) -> Result<(), DomainError> {
    let result = match action {
        PlayerAction::Bid { amount } => validate_bid(state, player, *amount),
        PlayerAction::Pass => validate_pass(state, player),
        PlayerAction::TakeDabb => validate_take_dabb(state, player),
        PlayerAction::DiscardCards { cards } => validate_discard(state, player, cards),
        PlayerAction::GoOut => validate_go_out(state, player),
        PlayerAction::DeclareTrump { .. } => validate_declare_trump(state, player),
        PlayerAction::DeclareMelds { melds } => validate_melds(state, player, melds),
        PlayerAction::PlayCard { card } => validate_play(state, player, *card),
    };
    if let Err(err) = &result {
        debug!(player, ?action, %err, "action rejected");
    }
    result
}

/// Validate an action and return the event kind it maps to. The caller
/// stamps the kind with its `EventContext` and appends it to the log.
pub fn action_event_kind(
    state: &GameState,
    player: PlayerIndex,
    action: &PlayerAction,
) -> Result<GameEventKind, DomainError> {
    validate_action(state, player, action)?;
    let kind = match action {
        PlayerAction::Bid { amount } => GameEventKind::BidPlaced {
            player,
            amount: *amount,
        },
        PlayerAction::Pass => GameEventKind::BidPassed { player },
        PlayerAction::TakeDabb => {
            // Taking the dabb reveals it publicly, so the event needs the
            // unfiltered state.
            let cards = state
                .round
                .dabb
                .iter()
                .map(|view| {
                    view.card().ok_or_else(|| {
                        DomainError::invariant("taking the dabb requires the unfiltered state")
                    })
                })
                .collect::<Result<Vec<Card>, _>>()?;
            GameEventKind::DabbTaken { player, cards }
        }
        PlayerAction::DiscardCards { cards } => GameEventKind::CardsDiscarded {
            player,
            cards: cards.iter().map(|&c| CardView::Visible(c)).collect(),
        },
        PlayerAction::GoOut => GameEventKind::WentOut { player },
        PlayerAction::DeclareTrump { trump } => GameEventKind::TrumpDeclared {
            player,
            trump: *trump,
        },
        PlayerAction::DeclareMelds { melds } => GameEventKind::MeldsDeclared {
            player,
            melds: melds.clone(),
        },
        PlayerAction::PlayCard { card } => GameEventKind::CardPlayed {
            player,
            card: *card,
        },
    };
    Ok(kind)
}

fn validate_bid(state: &GameState, player: PlayerIndex, amount: u16) -> Result<(), DomainError> {
    expect_phase(state, Phase::Bidding)?;
    expect_bid_turn(state, player)?;
    if !is_valid_bid(amount, state.round.current_bid) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!(
                "bid {amount} below minimum or off the step (current {})",
                state.round.current_bid
            ),
        ));
    }
    Ok(())
}

fn validate_pass(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    expect_phase(state, Phase::Bidding)?;
    expect_bid_turn(state, player)
}

fn validate_take_dabb(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    expect_phase(state, Phase::Dabb)?;
    expect_bid_winner(state, player)?;
    if state.round.dabb.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "dabb already taken",
        ));
    }
    Ok(())
}

fn validate_discard(
    state: &GameState,
    player: PlayerIndex,
    cards: &[Card],
) -> Result<(), DomainError> {
    expect_phase(state, Phase::Dabb)?;
    expect_bid_winner(state, player)?;
    if !state.round.dabb.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            "take the dabb before discarding",
        ));
    }
    if !state.round.discarded.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            "already discarded",
        ));
    }
    let expected = dabb_size_for_players(state.player_count)
        .ok_or_else(|| DomainError::invariant("discard without a player count"))?
        as usize;
    if cards.len() != expected {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            format!("discard {} cards, got {}", expected, cards.len()),
        ));
    }
    let hand = state.visible_hand(player)?;
    let mut remaining = hand;
    for &card in cards {
        let pos = remaining.iter().position(|&c| c == card).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("card {card} not in hand"),
            )
        })?;
        remaining.remove(pos);
    }
    Ok(())
}

fn validate_go_out(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    if state.phase != Phase::Dabb && state.phase != Phase::Trump {
        return Err(phase_mismatch(state));
    }
    expect_bid_winner(state, player)
}

fn validate_declare_trump(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    expect_phase(state, Phase::Trump)?;
    expect_bid_winner(state, player)
}

fn validate_melds(
    state: &GameState,
    player: PlayerIndex,
    melds: &[Meld],
) -> Result<(), DomainError> {
    if state.phase != Phase::Melding {
        return Err(DomainError::validation(
            ValidationKind::NotInMeldingPhase,
            format!("melds declared in phase {:?}", state.phase),
        ));
    }
    if state.round.melded_players.contains(&player) {
        return Err(DomainError::validation(
            ValidationKind::InvalidMeld,
            "melds already declared",
        ));
    }
    let trump = state
        .round
        .trump
        .ok_or_else(|| DomainError::invariant("melding phase without trump"))?;
    let hand = state.visible_hand(player)?;
    validate_declared_melds(&hand, melds, trump)
}

fn validate_play(state: &GameState, player: PlayerIndex, card: Card) -> Result<(), DomainError> {
    expect_phase(state, Phase::Tricks)?;
    if state.turn != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("not seat {player}'s turn"),
        ));
    }
    let hand = state.visible_hand(player)?;
    if !hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card} not in hand"),
        ));
    }
    let trump = state
        .round
        .trump
        .ok_or_else(|| DomainError::invariant("trick play without trump"))?;
    if !is_valid_play(card, &hand, &state.round.current_trick, trump) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            format!("card {card} violates the follow/beat discipline"),
        ));
    }
    Ok(())
}

fn expect_phase(state: &GameState, phase: Phase) -> Result<(), DomainError> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(phase_mismatch(state))
    }
}

fn phase_mismatch(state: &GameState) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("action not allowed in phase {:?}", state.phase),
    )
}

fn expect_bid_turn(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    if state.round.current_bidder != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("not seat {player}'s turn to bid"),
        ));
    }
    if state.round.passed_players.contains(&player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {player} already passed"),
        ));
    }
    Ok(())
}

fn expect_bid_winner(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    if state.round.bid_winner != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::NotBidWinner,
            format!("seat {player} did not win the bidding"),
        ));
    }
    Ok(())
}
