use thiserror::Error;

use crate::models::{ParticipantId, Side};

/// Errors raised while building populations or running the engine
///
/// Everything except `ProposalsExhausted` is a configuration problem in the
/// caller's input. `ProposalsExhausted` means the engine broke its own
/// invariant and should be treated as a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(String),

    #[error("No ranking supplied for {0}")]
    MissingRanking(String),

    #[error("Invalid ranking for {participant}: {reason}")]
    InvalidRanking { participant: String, reason: String },

    #[error("Cannot partner two {0}s")]
    SameSide(Side),

    #[error("{0} is already matched")]
    AlreadyMatched(ParticipantId),

    #[error("Proposer {proposer} ran out of candidates while unmatched")]
    ProposalsExhausted { proposer: ParticipantId },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<validator::ValidationErrors> for MatchError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MatchError::InvalidRequest(errors.to_string())
    }
}
