// Core algorithm exports
pub mod error;
pub mod experiment;
pub mod matcher;
pub mod metrics;
pub mod population;
pub mod preferences;
pub mod state;

pub use error::MatchError;
pub use experiment::run_experiment;
pub use matcher::{Matcher, MatchResult, Session};
pub use metrics::{average_satisfaction, blocking_pairs, is_stable, normalized_satisfaction, overall_satisfaction, satisfaction, unfairness};
pub use population::{Participant, Population};
pub use preferences::{FixedPreferences, PreferenceList, PreferenceSource, RandomPreferences};
pub use state::MatchingState;
