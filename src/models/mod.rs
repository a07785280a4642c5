// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Side, ParticipantId, Strategy, Proposal, ProposalOutcome};
pub use requests::{PreferenceProfile, ExperimentRequest};
pub use responses::{MatchReport, PartnershipQuality, ExperimentResult};
