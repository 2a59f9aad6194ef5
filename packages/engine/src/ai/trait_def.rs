//! AI player trait definition.

use std::fmt;

use crate::domain::actions::PlayerAction;
use crate::domain::events::SessionId;
use crate::domain::state::{GameState, PlayerIndex};

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI failed to make a decision within its budget
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced no usable move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// Read-only context an AI receives at its decision point.
///
/// The state handed in must be derived from the events the seat is
/// allowed to see (see `player_view`), so an AI can never act on hidden
/// cards.
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    pub game_state: &'a GameState,
    pub player_index: PlayerIndex,
    pub session_id: SessionId,
}

/// Trait for AI players.
///
/// Implementations choose one tagged action for the current decision
/// point; the engine validates it like any player action and rejects
/// illegal moves before they can become events.
pub trait AiPlayer: Send {
    fn choose_action(&mut self, ctx: &AiContext<'_>) -> Result<PlayerAction, AiError>;
}
