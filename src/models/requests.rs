use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::domain::Strategy;

/// A full preference profile, as read from a JSON or TOML file
///
/// Every ranking is ordered from least to most preferred.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreferenceProfile {
    #[validate(length(min = 1))]
    pub proposers: Vec<String>,
    #[validate(length(min = 1))]
    pub responders: Vec<String>,
    #[serde(default)]
    pub rankings: BTreeMap<String, Vec<String>>,
}

/// Request to run a randomized matching experiment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExperimentRequest {
    /// Participants per side
    #[validate(range(min = 2, max = 10_000))]
    #[serde(default = "default_count", alias = "student_count")]
    pub count: usize,
    /// Number of randomized trials
    #[validate(range(min = 1))]
    #[serde(default = "default_runs", alias = "run_count")]
    pub runs: usize,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_count() -> usize {
    10
}

fn default_runs() -> usize {
    10
}

fn default_seed() -> u64 {
    42
}

impl Default for ExperimentRequest {
    fn default() -> Self {
        Self {
            count: default_count(),
            runs: default_runs(),
            strategy: Strategy::default(),
            seed: default_seed(),
        }
    }
}
