use std::fmt::Write as _;

use crate::core::{
    average_satisfaction, blocking_pairs, overall_satisfaction, satisfaction, unfairness,
    MatchResult, MatchingState, Population,
};
use crate::models::{ExperimentResult, MatchReport, ParticipantId, PartnershipQuality, Side};

/// `"Jason (Riley)"`, or `"Jason (no-one)"` when unmatched
pub fn describe(population: &Population, state: &MatchingState, id: ParticipantId) -> String {
    let partner = state
        .current_partner(id)
        .map(|p| population.name_of(p))
        .unwrap_or("no-one");
    format!("{} ({})", population.name_of(id), partner)
}

/// Summarise a finished run
pub fn build_report(population: &Population, result: &MatchResult) -> MatchReport {
    let state = &result.state;

    let partnerships = state
        .partnerships()
        .into_iter()
        .map(|(proposer, responder)| PartnershipQuality {
            proposer: population.name_of(proposer).to_string(),
            proposer_rank: satisfaction(population, state, proposer).unwrap_or_default(),
            responder: population.name_of(responder).to_string(),
            responder_rank: satisfaction(population, state, responder).unwrap_or_default(),
        })
        .collect();

    let unmatched = state
        .unmatched_proposers()
        .into_iter()
        .chain(state.unmatched_responders())
        .map(|id| population.name_of(id).to_string())
        .collect();

    let blocking = blocking_pairs(population, state)
        .into_iter()
        .map(|(p, r)| (population.name_of(p).to_string(), population.name_of(r).to_string()))
        .collect();

    let proposer_happiness = average_satisfaction(population, state, Side::Proposer);
    let responder_happiness = average_satisfaction(population, state, Side::Responder);

    MatchReport {
        strategy: result.strategy,
        partnerships,
        unmatched,
        proposer_happiness,
        responder_happiness,
        total_happiness: overall_satisfaction(population, state),
        unfairness: unfairness(proposer_happiness, responder_happiness),
        blocking_pairs: blocking,
        proposals: result.proposals.len(),
        generated_at: chrono::Utc::now(),
    }
}

/// Human readable partnership table
pub fn render_text(report: &MatchReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Strategy: {} ({} proposals)", report.strategy, report.proposals);
    for p in &report.partnerships {
        let _ = writeln!(
            out,
            "{:10}({}) {:10}({})",
            p.proposer, p.proposer_rank, p.responder, p.responder_rank
        );
    }
    let _ = writeln!(out, "Unpartnered: {}", report.unmatched.join(", "));
    let _ = writeln!(out, "Group A happiness = {:.3}", report.proposer_happiness);
    let _ = writeln!(out, "Group B happiness = {:.3}", report.responder_happiness);
    let _ = writeln!(out, "  Total happiness = {:.3}", report.total_happiness);
    let _ = writeln!(out, "       Unfairness = {}", format_ratio(report.unfairness));

    if report.blocking_pairs.is_empty() {
        let _ = writeln!(out, "Stable: yes");
    } else {
        let pairs: Vec<String> = report
            .blocking_pairs
            .iter()
            .map(|(p, r)| format!("{}-{}", p, r))
            .collect();
        let _ = writeln!(out, "Stable: no (blocking pairs: {})", pairs.join(", "));
    }

    out
}

pub fn render_json(report: &MatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Human readable experiment summary
pub fn render_experiment(result: &ExperimentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Experiment with {} per side for {} runs ({})",
        result.count, result.runs, result.strategy
    );
    let _ = writeln!(out, "\tA happiness:       {:.2}", result.proposer_happiness);
    let _ = writeln!(out, "\tB happiness:       {:.2}", result.responder_happiness);
    let _ = writeln!(out, "\tAverage happiness: {:.2}", result.total_happiness);
    let _ = writeln!(
        out,
        "\tUnfairness:        {} (1 is perfectly fair)",
        format_ratio(result.unfairness)
    );
    let _ = writeln!(out, "\tTime per run: {:.4} milliseconds", result.time_ms);
    out
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "n/a".to_string())
}
