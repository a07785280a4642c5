use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use validator::Validate;

use crate::core::{
    error::MatchError,
    matcher::Matcher,
    metrics::{average_satisfaction, overall_satisfaction, unfairness},
    population::Population,
    preferences::RandomPreferences,
};
use crate::models::{ExperimentRequest, ExperimentResult, Side};

/// Names `A0..A{count}` and `B0..B{count}`
pub fn numbered_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Run the requested strategy over `runs` freshly randomized populations
///
/// The same request (including seed) always draws the same preferences, so
/// happiness figures are reproducible; only `time_ms` varies.
pub fn run_experiment(request: &ExperimentRequest) -> Result<ExperimentResult, MatchError> {
    request.validate()?;

    tracing::info!(
        "Running experiment: {} per side, {} runs, strategy {}",
        request.count,
        request.runs,
        request.strategy
    );

    let mut source = RandomPreferences::new(ChaCha8Rng::seed_from_u64(request.seed));
    let mut population = Population::build(
        &numbered_names("A", request.count),
        &numbered_names("B", request.count),
        &mut source,
    )?;
    let mut rng = source.into_inner();
    let matcher = Matcher::new(request.strategy);

    let mut total_a = 0.0;
    let mut total_b = 0.0;
    let mut total_all = 0.0;

    let start = Instant::now();
    for run in 0..request.runs {
        if run > 0 {
            population.randomize(&mut rng);
        }
        let result = matcher.run(&population)?;

        total_a += average_satisfaction(&population, &result.state, Side::Proposer);
        total_b += average_satisfaction(&population, &result.state, Side::Responder);
        total_all += overall_satisfaction(&population, &result.state);
    }
    let elapsed = start.elapsed();

    let runs = request.runs as f64;
    let result = ExperimentResult {
        strategy: request.strategy,
        count: request.count,
        runs: request.runs,
        proposer_happiness: total_a / runs,
        responder_happiness: total_b / runs,
        total_happiness: total_all / runs,
        unfairness: unfairness(total_a, total_b),
        time_ms: elapsed.as_secs_f64() * 1_000.0 / runs,
    };

    tracing::info!(
        "Experiment done: A {:.3}, B {:.3}, all {:.3}, {:.4} ms/run",
        result.proposer_happiness,
        result.responder_happiness,
        result.total_happiness,
        result.time_ms
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;

    #[test]
    fn test_numbered_names() {
        assert_eq!(numbered_names("A", 3), vec!["A0", "A1", "A2"]);
        assert!(numbered_names("B", 0).is_empty());
    }

    #[test]
    fn test_experiment_is_reproducible() {
        let request = ExperimentRequest {
            count: 12,
            runs: 5,
            strategy: Strategy::GaleShapley,
            seed: 1234,
        };

        let first = run_experiment(&request).unwrap();
        let second = run_experiment(&request).unwrap();

        assert_eq!(first.proposer_happiness, second.proposer_happiness);
        assert_eq!(first.responder_happiness, second.responder_happiness);
        assert_eq!(first.unfairness, second.unfairness);
    }

    #[test]
    fn test_experiment_values_in_range() {
        let request = ExperimentRequest {
            count: 20,
            runs: 10,
            strategy: Strategy::Naive,
            seed: 5,
        };
        let result = run_experiment(&request).unwrap();

        for value in [result.proposer_happiness, result.responder_happiness, result.total_happiness] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(result.time_ms >= 0.0);
    }

    #[test]
    fn test_experiment_rejects_invalid_request() {
        let request = ExperimentRequest {
            count: 1,
            ..ExperimentRequest::default()
        };
        assert!(matches!(run_experiment(&request), Err(MatchError::InvalidRequest(_))));
    }
}
