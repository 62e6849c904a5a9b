//! Objective validation errors.

use crate::core::{ErrorSeverity, PlayerId, TacticsError};

use super::objective::ObjectiveId;

/// Reasons an objective is rejected by validation or list editing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObjectiveError {
    /// Threshold criteria need a positive amount.
    #[error("Objective amount must be greater than zero")]
    InvalidAmount,

    /// Label criteria need at least one label.
    #[error("Objective requires at least one label")]
    MissingLabels,

    /// Escort criteria need at least one target position.
    #[error("Escort objective requires at least one position")]
    MissingPositions,

    /// More units to escort than there are positions to escort them to.
    #[error("Escort amount {amount} exceeds {positions} target positions")]
    AmountExceedsPositions { amount: u32, positions: usize },

    #[error("Survival objective requires at least one round")]
    InvalidRounds,

    #[error("{0} is not part of this match")]
    UnknownPlayer(PlayerId),

    #[error("The neutral player cannot be assigned an objective")]
    NeutralPlayer,

    /// No objective id is left to assign.
    #[error("Objective id space exhausted after {0}")]
    IdOverflow(ObjectiveId),
}

impl TacticsError for ObjectiveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ObjectiveError::IdOverflow(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ObjectiveError::InvalidAmount => "OBJECTIVE_INVALID_AMOUNT",
            ObjectiveError::MissingLabels => "OBJECTIVE_MISSING_LABELS",
            ObjectiveError::MissingPositions => "OBJECTIVE_MISSING_POSITIONS",
            ObjectiveError::AmountExceedsPositions { .. } => "OBJECTIVE_AMOUNT_EXCEEDS_POSITIONS",
            ObjectiveError::InvalidRounds => "OBJECTIVE_INVALID_ROUNDS",
            ObjectiveError::UnknownPlayer(_) => "OBJECTIVE_UNKNOWN_PLAYER",
            ObjectiveError::NeutralPlayer => "OBJECTIVE_NEUTRAL_PLAYER",
            ObjectiveError::IdOverflow(_) => "OBJECTIVE_ID_OVERFLOW",
        }
    }
}
