//! Rejections returned by the turn pipeline and ledger errors.
//!
//! A `Rejection` is an ordinary, expected outcome: the caller submitted an
//! action the rules do not allow right now. The state values passed to
//! `apply()` are never touched when one is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardType;
use crate::core::{PlayerKey, Pos};

/// Why an action was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("{pos} is not a legal placement")]
    IllegalMove { pos: Pos },

    #[error("cannot pass while a legal move or usable card exists")]
    IllegalPass,

    #[error("no pending selection matches this action")]
    NoPendingEffectMatch { card: Option<CardType> },

    #[error("invalid target for {card}")]
    InvalidTarget { card: CardType },

    #[error("{card} costs {cost}, only {available} charge available")]
    InsufficientCurrency { card: CardType, cost: u32, available: u32 },

    #[error("a card was already used this turn")]
    CardAlreadyUsedThisTurn,

    #[error("it is {current}'s turn")]
    NotYourTurn { current: PlayerKey },

    #[error("the game is over")]
    GameOver,

    #[error("{card} is not in hand")]
    CardNotInHand { card: CardType },
}

impl Rejection {
    /// Machine-readable code for this rejection.
    #[must_use]
    pub const fn code(&self) -> RejectionCode {
        match self {
            Rejection::IllegalMove { .. } => RejectionCode::IllegalMove,
            Rejection::IllegalPass => RejectionCode::IllegalPass,
            Rejection::NoPendingEffectMatch { .. } => RejectionCode::NoPendingEffectMatch,
            Rejection::InvalidTarget { .. } => RejectionCode::InvalidTarget,
            Rejection::InsufficientCurrency { .. } => RejectionCode::InsufficientCurrency,
            Rejection::CardAlreadyUsedThisTurn => RejectionCode::CardAlreadyUsedThisTurn,
            Rejection::NotYourTurn { .. } => RejectionCode::NotYourTurn,
            Rejection::GameOver => RejectionCode::GameOver,
            Rejection::CardNotInHand { .. } => RejectionCode::CardNotInHand,
        }
    }
}

/// Stable rejection codes, serialized as `ILLEGAL_MOVE` and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    IllegalMove,
    IllegalPass,
    NoPendingEffectMatch,
    InvalidTarget,
    InsufficientCurrency,
    CardAlreadyUsedThisTurn,
    NotYourTurn,
    GameOver,
    CardNotInHand,
}

/// Result type for pipeline operations.
pub type EngineResult<T> = Result<T, Rejection>;

/// Failures while importing or replaying a ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("malformed action ledger: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action {action_id} was rejected during replay: {rejection}")]
    Rejected { action_id: u64, rejection: Rejection },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
