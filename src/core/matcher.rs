use crate::core::{error::MatchError, population::Population, state::MatchingState};
use crate::models::{ParticipantId, Proposal, ProposalOutcome, Side, Strategy};

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub strategy: Strategy,
    pub state: MatchingState,
    /// Every proposal in the order it was made (empty for the naive strategy)
    pub proposals: Vec<Proposal>,
    pub rejections: usize,
    pub switches: usize,
    /// Leftovers when the sides differ in size
    pub unmatched_proposers: Vec<ParticipantId>,
    pub unmatched_responders: Vec<ParticipantId>,
}

impl MatchResult {
    pub fn partner_of(&self, id: ParticipantId) -> Option<ParticipantId> {
        self.state.current_partner(id)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }
}

/// A deferred acceptance run in progress
///
/// Holds the live matching state and each proposer's queue of responders it
/// has not proposed to yet, least preferred first so the next candidate is
/// popped from the end. A responder leaves a queue exactly once.
#[derive(Debug)]
pub struct Session<'a> {
    population: &'a Population,
    state: MatchingState,
    queues: Vec<Vec<usize>>,
    proposals: Vec<Proposal>,
    rejections: usize,
    switches: usize,
}

impl<'a> Session<'a> {
    /// Start from scratch: nobody matched, every queue a full copy of the ranking
    pub fn new(population: &'a Population) -> Self {
        let queues = population
            .proposers()
            .iter()
            .map(|p| p.preferences.as_slice().to_vec())
            .collect();

        Self {
            population,
            state: MatchingState::new(
                population.side_len(Side::Proposer),
                population.side_len(Side::Responder),
            ),
            queues,
            proposals: Vec::new(),
            rejections: 0,
            switches: 0,
        }
    }

    pub fn state(&self) -> &MatchingState {
        &self.state
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Responders `proposer` has not proposed to yet, least preferred first
    pub fn remaining(&self, proposer: ParticipantId) -> &[usize] {
        self.queues
            .get(proposer.index)
            .filter(|_| proposer.side == Side::Proposer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First unmatched proposer that still has someone to propose to
    pub fn next_proposer(&self) -> Option<ParticipantId> {
        self.state
            .unmatched_proposers()
            .into_iter()
            .find(|p| !self.queues[p.index].is_empty())
    }

    /// `proposer` proposes to its most preferred remaining responder
    ///
    /// Returns `None` when the proposer has nobody left to ask. A proposer
    /// that already holds a partner is refused and its queue is left alone.
    pub fn propose(&mut self, proposer: ParticipantId) -> Result<Option<Proposal>, MatchError> {
        if proposer.side != Side::Proposer || proposer.index >= self.queues.len() {
            return Err(MatchError::UnknownParticipant(proposer.to_string()));
        }
        if self.state.is_matched(proposer) {
            return Err(MatchError::AlreadyMatched(proposer));
        }

        let Some(candidate) = self.queues[proposer.index].pop() else {
            return Ok(None);
        };
        let responder = ParticipantId::responder(candidate);

        let outcome = match self.state.current_partner(responder) {
            None => {
                self.state.set_partnership(proposer, responder)?;
                ProposalOutcome::Accepted
            }
            Some(current) => {
                let preferences = &self.population.participant(responder).preferences;
                if preferences.prefers(proposer.index, current.index) {
                    self.state.set_partnership(proposer, responder)?;
                    self.switches += 1;
                    ProposalOutcome::Switched { displaced: current }
                } else {
                    self.rejections += 1;
                    ProposalOutcome::Rejected
                }
            }
        };

        tracing::trace!(
            "{} -> {}: {:?}",
            self.population.name_of(proposer),
            self.population.name_of(responder),
            outcome
        );

        let proposal = Proposal {
            proposer,
            responder,
            outcome,
        };
        self.proposals.push(proposal);
        Ok(Some(proposal))
    }

    /// Keep proposing until no unmatched proposer has options left
    pub fn run_to_completion(mut self) -> Result<MatchResult, MatchError> {
        while let Some(proposer) = self.next_proposer() {
            self.propose(proposer)?;
        }
        self.finish()
    }

    fn finish(self) -> Result<MatchResult, MatchError> {
        let proposers = self.population.side_len(Side::Proposer);
        let responders = self.population.side_len(Side::Responder);
        debug_assert!(self.proposals.len() <= proposers * responders);

        let unmatched_proposers = self.state.unmatched_proposers();

        // With at least as many responders as proposers every proposer must
        // end up matched
        if proposers <= responders {
            if let Some(&proposer) = unmatched_proposers.first() {
                tracing::error!(
                    "Proposer {} exhausted its ranking while unmatched",
                    self.population.name_of(proposer)
                );
                return Err(MatchError::ProposalsExhausted { proposer });
            }
        }

        Ok(MatchResult {
            strategy: Strategy::GaleShapley,
            unmatched_responders: self.state.unmatched_responders(),
            unmatched_proposers,
            state: self.state,
            proposals: self.proposals,
            rejections: self.rejections,
            switches: self.switches,
        })
    }
}

/// Main matching orchestrator
///
/// Runs the configured strategy over a population. The proposing side is
/// whatever the population calls `Proposer`; use `Population::reversed` to
/// let the other side propose.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    strategy: Strategy,
}

impl Matcher {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn gale_shapley() -> Self {
        Self::new(Strategy::GaleShapley)
    }

    pub fn naive() -> Self {
        Self::new(Strategy::Naive)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Match a population from a clean slate
    ///
    /// Deterministic: the same population always yields the same result.
    pub fn run(&self, population: &Population) -> Result<MatchResult, MatchError> {
        let result = match self.strategy {
            Strategy::GaleShapley => Session::new(population).run_to_completion()?,
            Strategy::Naive => naive_partnerships(population)?,
        };

        tracing::debug!(
            "{} matching done: {} pairs, {} proposals, {} rejections, {} switches",
            self.strategy,
            result.state.matched_count(),
            result.proposals.len(),
            result.rejections,
            result.switches
        );

        Ok(result)
    }
}

/// Pair proposer `i` with responder `i`
fn naive_partnerships(population: &Population) -> Result<MatchResult, MatchError> {
    let proposers = population.side_len(Side::Proposer);
    let responders = population.side_len(Side::Responder);
    let mut state = MatchingState::new(proposers, responders);

    for i in 0..proposers.min(responders) {
        state.set_partnership(ParticipantId::proposer(i), ParticipantId::responder(i))?;
    }

    Ok(MatchResult {
        strategy: Strategy::Naive,
        unmatched_proposers: state.unmatched_proposers(),
        unmatched_responders: state.unmatched_responders(),
        state,
        proposals: Vec::new(),
        rejections: 0,
        switches: 0,
    })
}
