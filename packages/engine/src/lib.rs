//! Pure, deterministic rules engine for Binokel: a four-suit, two-deck
//! trick-taking card game for 2 to 4 players.
//!
//! The engine derives the authoritative `GameState` by folding an ordered
//! log of immutable `GameEvent` facts, validates every player action
//! against the current phase before it may become an event, and redacts
//! the log per viewer so hidden cards never leak. It performs no I/O,
//! holds no shared mutable state and never blocks; transport, persistence
//! and session lifecycle live outside.

pub mod ai;
pub mod domain;
pub mod errors;

pub use domain::{GameEvent, GameEventKind, GameState, Phase, PlayerAction};
pub use errors::{DomainError, ErrorCode};
