use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the market a participant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Proposer,
    Responder,
}

impl Side {
    /// The side a participant of this side ranks
    pub fn opposite(self) -> Self {
        match self {
            Side::Proposer => Side::Responder,
            Side::Responder => Side::Proposer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => write!(f, "proposer"),
            Side::Responder => write!(f, "responder"),
        }
    }
}

/// Handle to a participant inside a `Population`
///
/// The index is the participant's position within its own side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId {
    pub side: Side,
    pub index: usize,
}

impl ParticipantId {
    pub fn proposer(index: usize) -> Self {
        Self { side: Side::Proposer, index }
    }

    pub fn responder(index: usize) -> Self {
        Self { side: Side::Responder, index }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// Matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Deferred acceptance, proposer-optimal and stable
    #[default]
    GaleShapley,
    /// Proposer `i` paired with responder `i`; a baseline for experiments
    Naive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::GaleShapley => write!(f, "gale_shapley"),
            Strategy::Naive => write!(f, "naive"),
        }
    }
}

/// What happened to a single proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ProposalOutcome {
    /// The responder was free
    Accepted,
    /// The responder left `displaced` for the proposer
    Switched { displaced: ParticipantId },
    /// The responder kept its current partner
    Rejected,
}

/// One step of the deferred acceptance loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposer: ParticipantId,
    pub responder: ParticipantId,
    pub outcome: ProposalOutcome,
}

impl Proposal {
    pub fn accepted(&self) -> bool {
        !matches!(self.outcome, ProposalOutcome::Rejected)
    }
}
