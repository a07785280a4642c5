use crate::core::{population::Population, state::MatchingState};
use crate::models::{ParticipantId, Side};

/// Rank `id` gives its current partner, `None` when unmatched
///
/// Also `None` when `id` or its partner lies outside `population`.
pub fn satisfaction(population: &Population, state: &MatchingState, id: ParticipantId) -> Option<usize> {
    let partner = state.current_partner(id)?;
    population.get(partner)?;
    population.get(id)?.preferences.rank_of(partner.index)
}

/// Satisfaction scaled to [0, 1]
///
/// Unmatched participants score 0. With a single candidate on the other
/// side, being matched at all is the best possible outcome and scores 1.
pub fn normalized_satisfaction(population: &Population, state: &MatchingState, id: ParticipantId) -> f64 {
    let Some(rank) = satisfaction(population, state, id) else {
        return 0.0;
    };
    let options = population.side_len(id.side.opposite());
    if options <= 1 {
        return 1.0;
    }
    rank as f64 / (options - 1) as f64
}

/// Mean normalized satisfaction over one side (0 for an empty side)
pub fn average_satisfaction(population: &Population, state: &MatchingState, side: Side) -> f64 {
    mean(population.ids(side).map(|id| normalized_satisfaction(population, state, id)))
}

/// Mean normalized satisfaction over every participant of both sides
pub fn overall_satisfaction(population: &Population, state: &MatchingState) -> f64 {
    mean(
        population
            .ids(Side::Proposer)
            .chain(population.ids(Side::Responder))
            .map(|id| normalized_satisfaction(population, state, id)),
    )
}

/// How much happier proposers are than responders (1.0 is perfectly fair)
pub fn unfairness(proposer_happiness: f64, responder_happiness: f64) -> Option<f64> {
    if responder_happiness > 0.0 {
        Some(proposer_happiness / responder_happiness)
    } else {
        None
    }
}

/// Pairs that would both rather be with each other than where they are
///
/// Being unmatched is worse than any partner.
pub fn blocking_pairs(population: &Population, state: &MatchingState) -> Vec<(ParticipantId, ParticipantId)> {
    let mut pairs = Vec::new();

    for (p, proposer_entry) in population.proposers().iter().enumerate() {
        let proposer = ParticipantId::proposer(p);
        let proposer_current = state.current_partner(proposer);

        for (r, responder_entry) in population.responders().iter().enumerate() {
            let responder = ParticipantId::responder(r);
            if proposer_current == Some(responder) {
                continue;
            }

            let proposer_wants = match proposer_current {
                None => true,
                Some(current) => proposer_entry.preferences.prefers(r, current.index),
            };
            if !proposer_wants {
                continue;
            }

            let responder_wants = match state.current_partner(responder) {
                None => true,
                Some(current) => responder_entry.preferences.prefers(p, current.index),
            };
            if responder_wants {
                pairs.push((proposer, responder));
            }
        }
    }

    pairs
}

pub fn is_stable(population: &Population, state: &MatchingState) -> bool {
    blocking_pairs(population, state).is_empty()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
