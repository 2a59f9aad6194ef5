//! Error codes for the Binokel engine.
//!
//! This module defines all error codes surfaced to callers when an action
//! is rejected. Add new codes here; never pass ad-hoc strings as error
//! codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings a
//! transport layer may localize from.

use core::fmt;

use crate::errors::domain::{DomainError, ValidationKind};

/// Centralized error codes for rejected player actions.
///
/// This enum ensures type safety and prevents the use of ad-hoc error
/// codes. Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn & phase
    /// Action attempted by a player who is not to act
    NotYourTurn,
    /// Action does not belong to the current phase
    PhaseMismatch,
    /// Meld declaration outside the melding phase
    NotInMeldingPhase,
    /// Action reserved for the bid winner
    NotBidWinner,

    // Payload validation
    /// Bid below the minimum or off the bidding step
    InvalidBidAmount,
    /// Card is not in the acting player's hand
    CardNotInHand,
    /// Play violates the follow/beat discipline
    MustFollowSuit,
    /// Declared meld does not match its pattern or value
    InvalidMeld,
    /// Discard has the wrong size or repeats a card
    InvalidDiscard,
    /// Player count outside 2..=4
    InvalidPlayerCount,
    /// Malformed card token
    ParseCard,
    /// Seat already occupied or player already present
    DuplicatePlayer,
    /// General validation error
    ValidationError,

    // Caller bugs
    /// Internal invariant violated; fatal for the session
    InvariantViolation,
}

impl ErrorCode {
    /// Canonical string form of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::NotInMeldingPhase => "NOT_IN_MELDING_PHASE",
            ErrorCode::NotBidWinner => "NOT_BID_WINNER",
            ErrorCode::InvalidBidAmount => "INVALID_BID_AMOUNT",
            ErrorCode::CardNotInHand => "CARD_NOT_IN_HAND",
            ErrorCode::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ErrorCode::InvalidMeld => "INVALID_MELD",
            ErrorCode::InvalidDiscard => "INVALID_DISCARD",
            ErrorCode::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            ErrorCode::ParseCard => "PARSE_CARD",
            ErrorCode::DuplicatePlayer => "DUPLICATE_PLAYER",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvariantViolation => "INVARIANT_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::OutOfTurn => ErrorCode::NotYourTurn,
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::NotInMeldingPhase => ErrorCode::NotInMeldingPhase,
                ValidationKind::NotBidWinner => ErrorCode::NotBidWinner,
                ValidationKind::InvalidBid => ErrorCode::InvalidBidAmount,
                ValidationKind::CardNotInHand => ErrorCode::CardNotInHand,
                ValidationKind::MustFollowSuit => ErrorCode::MustFollowSuit,
                ValidationKind::InvalidMeld => ErrorCode::InvalidMeld,
                ValidationKind::InvalidDiscard => ErrorCode::InvalidDiscard,
                ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
                ValidationKind::ParseCard => ErrorCode::ParseCard,
                ValidationKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Invariant(_) => ErrorCode::InvariantViolation,
        }
    }
}
