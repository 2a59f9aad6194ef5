//! Domain-level error type used across the engine.
//!
//! This error type is transport-agnostic. Illegal player actions are
//! `Validation` errors carrying a machine-readable kind; internally
//! inconsistent calls (caller bugs) are `Invariant` errors and should be
//! treated as fatal for the session.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failure kinds for rejected actions and malformed events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    PhaseMismatch,
    NotInMeldingPhase,
    NotBidWinner,
    InvalidBid,
    CardNotInHand,
    MustFollowSuit,
    InvalidMeld,
    InvalidDiscard,
    InvalidPlayerCount,
    ParseCard,
    DuplicatePlayer,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Internally inconsistent call; can never occur under correct
    /// orchestration and is fatal for the session
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
}
