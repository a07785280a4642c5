use crate::core::error::MatchError;
use crate::models::{ParticipantId, Side};

/// Current partner assignment for every participant
///
/// The mapping is kept symmetric: whenever proposer `p` points at responder
/// `r`, `r` points back at `p`. All mutation goes through
/// `set_partnership` and `dissolve`, which update both ends together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingState {
    proposer_partner: Vec<Option<usize>>,
    responder_partner: Vec<Option<usize>>,
}

impl MatchingState {
    /// Everyone unmatched
    pub fn new(proposers: usize, responders: usize) -> Self {
        Self {
            proposer_partner: vec![None; proposers],
            responder_partner: vec![None; responders],
        }
    }

    /// Dissolve every partnership
    pub fn reset(&mut self) {
        self.proposer_partner.iter_mut().for_each(|p| *p = None);
        self.responder_partner.iter_mut().for_each(|p| *p = None);
    }

    pub fn current_partner(&self, id: ParticipantId) -> Option<ParticipantId> {
        let slot = self.slots(id.side).get(id.index).copied().flatten()?;
        Some(ParticipantId {
            side: id.side.opposite(),
            index: slot,
        })
    }

    pub fn is_matched(&self, id: ParticipantId) -> bool {
        self.current_partner(id).is_some()
    }

    /// Partner `a` with `b`, breaking up any existing partnership of either
    pub fn set_partnership(&mut self, a: ParticipantId, b: ParticipantId) -> Result<(), MatchError> {
        if a.side == b.side {
            return Err(MatchError::SameSide(a.side));
        }
        let (proposer, responder) = match a.side {
            Side::Proposer => (a, b),
            Side::Responder => (b, a),
        };
        if proposer.index >= self.proposer_partner.len() {
            return Err(MatchError::UnknownParticipant(proposer.to_string()));
        }
        if responder.index >= self.responder_partner.len() {
            return Err(MatchError::UnknownParticipant(responder.to_string()));
        }

        if self.proposer_partner[proposer.index] == Some(responder.index) {
            return Ok(());
        }

        self.dissolve(proposer);
        self.dissolve(responder);
        self.proposer_partner[proposer.index] = Some(responder.index);
        self.responder_partner[responder.index] = Some(proposer.index);
        Ok(())
    }

    /// Break `id`'s partnership, clearing the partner's side as well
    ///
    /// Returns the former partner, if any.
    pub fn dissolve(&mut self, id: ParticipantId) -> Option<ParticipantId> {
        let partner = self.current_partner(id)?;
        self.slots_mut(id.side)[id.index] = None;
        self.slots_mut(partner.side)[partner.index] = None;
        Some(partner)
    }

    /// Proposers without a partner, computed from the live state
    pub fn unmatched_proposers(&self) -> Vec<ParticipantId> {
        self.unmatched(Side::Proposer)
    }

    pub fn unmatched_responders(&self) -> Vec<ParticipantId> {
        self.unmatched(Side::Responder)
    }

    /// Every partnership as `(proposer, responder)`, in proposer order
    pub fn partnerships(&self) -> Vec<(ParticipantId, ParticipantId)> {
        self.proposer_partner
            .iter()
            .enumerate()
            .filter_map(|(p, r)| r.map(|r| (ParticipantId::proposer(p), ParticipantId::responder(r))))
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.proposer_partner.iter().filter(|p| p.is_some()).count()
    }

    fn unmatched(&self, side: Side) -> Vec<ParticipantId> {
        self.slots(side)
            .iter()
            .enumerate()
            .filter(|(_, partner)| partner.is_none())
            .map(|(index, _)| ParticipantId { side, index })
            .collect()
    }

    fn slots(&self, side: Side) -> &[Option<usize>] {
        match side {
            Side::Proposer => &self.proposer_partner,
            Side::Responder => &self.responder_partner,
        }
    }

    fn slots_mut(&mut self, side: Side) -> &mut [Option<usize>] {
        match side {
            Side::Proposer => &mut self.proposer_partner,
            Side::Responder => &mut self.responder_partner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> ParticipantId {
        ParticipantId::proposer(i)
    }

    fn r(i: usize) -> ParticipantId {
        ParticipantId::responder(i)
    }

    fn assert_symmetric(state: &MatchingState) {
        for (a, b) in state.partnerships() {
            assert_eq!(state.current_partner(b), Some(a));
        }
        for responder in 0..state.responder_partner.len() {
            if let Some(a) = state.current_partner(r(responder)) {
                assert_eq!(state.current_partner(a), Some(r(responder)));
            }
        }
    }

    #[test]
    fn test_set_partnership_is_symmetric() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(1)).unwrap();

        assert_eq!(state.current_partner(p(0)), Some(r(1)));
        assert_eq!(state.current_partner(r(1)), Some(p(0)));
        assert!(state.is_matched(p(0)));
        assert!(!state.is_matched(p(1)));
    }

    #[test]
    fn test_set_partnership_either_argument_order() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(r(0), p(1)).unwrap();

        assert_eq!(state.current_partner(p(1)), Some(r(0)));
        assert_symmetric(&state);
    }

    #[test]
    fn test_set_partnership_breaks_previous_pairs() {
        // Jason-Riley, then Riley dumps Jason for Joy
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(0)).unwrap();
        state.set_partnership(r(0), p(1)).unwrap();

        assert!(!state.is_matched(p(0)));
        assert_eq!(state.current_partner(r(0)), Some(p(1)));

        // Riley goes back to Jason, Joy is left alone
        state.set_partnership(r(0), p(0)).unwrap();
        assert!(!state.is_matched(p(1)));
        assert_symmetric(&state);
    }

    #[test]
    fn test_set_partnership_when_both_are_taken() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(0)).unwrap();
        state.set_partnership(p(1), r(1)).unwrap();
        state.set_partnership(p(0), r(1)).unwrap();

        assert_eq!(state.current_partner(p(0)), Some(r(1)));
        assert!(!state.is_matched(p(1)));
        assert!(!state.is_matched(r(0)));
        assert_symmetric(&state);
    }

    #[test]
    fn test_set_partnership_idempotent() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(0)).unwrap();
        let snapshot = state.clone();
        state.set_partnership(p(0), r(0)).unwrap();
        state.set_partnership(r(0), p(0)).unwrap();

        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_set_partnership_rejects_same_side_and_unknown() {
        let mut state = MatchingState::new(2, 2);
        assert_eq!(state.set_partnership(p(0), p(1)), Err(MatchError::SameSide(Side::Proposer)));
        assert!(state.set_partnership(p(5), r(0)).is_err());
        assert!(state.set_partnership(p(0), r(5)).is_err());
        assert_eq!(state.matched_count(), 0);
    }

    #[test]
    fn test_dissolve() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(1)).unwrap();

        assert_eq!(state.dissolve(r(1)), Some(p(0)));
        assert!(!state.is_matched(p(0)));
        assert!(!state.is_matched(r(1)));

        // No-op when unmatched
        assert_eq!(state.dissolve(p(0)), None);
    }

    #[test]
    fn test_unmatched_proposers_reflect_live_state() {
        let mut state = MatchingState::new(3, 3);
        assert_eq!(state.unmatched_proposers().len(), 3);

        state.set_partnership(p(1), r(2)).unwrap();
        assert_eq!(state.unmatched_proposers(), vec![p(0), p(2)]);
        assert_eq!(state.unmatched_responders(), vec![r(0), r(1)]);

        state.dissolve(p(1));
        assert_eq!(state.unmatched_proposers().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut state = MatchingState::new(2, 2);
        state.set_partnership(p(0), r(0)).unwrap();
        state.set_partnership(p(1), r(1)).unwrap();
        state.reset();

        assert_eq!(state, MatchingState::new(2, 2));
    }
}
