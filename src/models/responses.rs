use serde::{Deserialize, Serialize};
use crate::models::domain::Strategy;

/// How happy both ends of a partnership are
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnershipQuality {
    pub proposer: String,
    #[serde(rename = "proposerRank")]
    pub proposer_rank: usize,
    pub responder: String,
    #[serde(rename = "responderRank")]
    pub responder_rank: usize,
}

/// Report for a single matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub strategy: Strategy,
    pub partnerships: Vec<PartnershipQuality>,
    pub unmatched: Vec<String>,
    #[serde(rename = "proposerHappiness")]
    pub proposer_happiness: f64,
    #[serde(rename = "responderHappiness")]
    pub responder_happiness: f64,
    #[serde(rename = "totalHappiness")]
    pub total_happiness: f64,
    pub unfairness: Option<f64>,
    #[serde(rename = "blockingPairs")]
    pub blocking_pairs: Vec<(String, String)>,
    pub proposals: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Averages over a randomized experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub strategy: Strategy,
    pub count: usize,
    pub runs: usize,
    #[serde(rename = "proposerHappiness")]
    pub proposer_happiness: f64,
    #[serde(rename = "responderHappiness")]
    pub responder_happiness: f64,
    #[serde(rename = "totalHappiness")]
    pub total_happiness: f64,
    /// Proposer happiness over responder happiness; 1 is perfectly fair
    pub unfairness: Option<f64>,
    /// Mean wall time per run in milliseconds
    #[serde(rename = "timeMs")]
    pub time_ms: f64,
}
