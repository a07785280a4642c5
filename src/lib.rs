//! Stable Pairs - stable matching between two sides of a market
//!
//! This library implements the Gale-Shapley deferred acceptance algorithm:
//! given two disjoint groups where every member strictly ranks the other
//! group, it pairs them so that no two people would both rather be with each
//! other than with their assigned partners. Around the engine it provides
//! satisfaction metrics, randomized experiments and profile loading.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, MatchError, MatchingState, Population, FixedPreferences, RandomPreferences, run_experiment};
pub use crate::models::{Side, ParticipantId, Strategy, PreferenceProfile, ExperimentRequest, ExperimentResult, MatchReport};
