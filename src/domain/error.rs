//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("participant is absent: {0}")]
    ParticipantAbsent(String),

    #[error("participant name must not be empty")]
    EmptyName,
}
