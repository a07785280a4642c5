use std::collections::HashMap;

use rand::Rng;

use crate::core::error::MatchError;
use crate::core::preferences::{resolve_ranking, FixedPreferences, PreferenceList, PreferenceSource};
use crate::models::{ParticipantId, PreferenceProfile, Side};

/// A named participant and its ranking of the opposite side
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub side: Side,
    pub preferences: PreferenceList,
}

/// Both sides of a matching market with validated preferences
///
/// Every participant's ranking is a permutation of the full opposite side.
/// Names are unique across both sides.
#[derive(Debug, Clone)]
pub struct Population {
    proposers: Vec<Participant>,
    responders: Vec<Participant>,
    proposer_index: HashMap<String, usize>,
    responder_index: HashMap<String, usize>,
}

impl Population {
    /// Build a population, asking `source` for every participant's ranking
    pub fn build<S: PreferenceSource + ?Sized>(
        proposer_names: &[String],
        responder_names: &[String],
        source: &mut S,
    ) -> Result<Self, MatchError> {
        let proposer_index = index_names(proposer_names)?;
        let responder_index = index_names(responder_names)?;

        if let Some(name) = proposer_names
            .iter()
            .find(|name| responder_index.contains_key(*name))
        {
            return Err(MatchError::DuplicateParticipant(name.clone()));
        }

        let proposers = build_side(Side::Proposer, proposer_names, responder_names, &responder_index, source)?;
        let responders = build_side(Side::Responder, responder_names, proposer_names, &proposer_index, source)?;

        tracing::debug!(
            "Built population: {} proposers, {} responders",
            proposers.len(),
            responders.len()
        );

        Ok(Self {
            proposers,
            responders,
            proposer_index,
            responder_index,
        })
    }

    /// Build a population from an explicit profile
    pub fn from_profile(profile: &PreferenceProfile) -> Result<Self, MatchError> {
        let mut source = FixedPreferences::from(profile.rankings.clone());
        Self::build(&profile.proposers, &profile.responders, &mut source)
    }

    pub fn proposers(&self) -> &[Participant] {
        &self.proposers
    }

    pub fn responders(&self) -> &[Participant] {
        &self.responders
    }

    pub fn side(&self, side: Side) -> &[Participant] {
        match side {
            Side::Proposer => &self.proposers,
            Side::Responder => &self.responders,
        }
    }

    pub fn side_len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    /// All ids of one side, in index order
    pub fn ids(&self, side: Side) -> impl Iterator<Item = ParticipantId> {
        (0..self.side_len(side)).map(move |index| ParticipantId { side, index })
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.side(id.side).get(id.index)
    }

    /// Participant behind `id`
    ///
    /// # Panics
    /// If `id` was not produced by this population.
    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.side(id.side)[id.index]
    }

    pub fn name_of(&self, id: ParticipantId) -> &str {
        &self.participant(id).name
    }

    /// Look a participant up by name on either side
    pub fn id_of(&self, name: &str) -> Result<ParticipantId, MatchError> {
        if let Some(&index) = self.proposer_index.get(name) {
            return Ok(ParticipantId::proposer(index));
        }
        if let Some(&index) = self.responder_index.get(name) {
            return Ok(ParticipantId::responder(index));
        }
        Err(MatchError::UnknownParticipant(name.to_string()))
    }

    /// How much `id` wants to be paired with `other` (higher is better)
    ///
    /// Fails if `other` is not a member of the opposite side.
    pub fn rank_of(&self, id: ParticipantId, other: &str) -> Result<usize, MatchError> {
        let participant = self
            .get(id)
            .ok_or_else(|| MatchError::UnknownParticipant(id.to_string()))?;
        let other_index = self
            .index_for(id.side.opposite())
            .get(other)
            .ok_or_else(|| MatchError::UnknownParticipant(other.to_string()))?;
        participant
            .preferences
            .rank_of(*other_index)
            .ok_or_else(|| MatchError::UnknownParticipant(other.to_string()))
    }

    /// Replace rankings by participant name
    ///
    /// Every ranking is validated before any is applied, so a bad entry
    /// leaves the population untouched.
    pub fn set_rankings<'a, I>(&mut self, rankings: I) -> Result<(), MatchError>
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
    {
        let mut resolved = Vec::new();
        for (name, ranking) in rankings {
            let id = self.id_of(name)?;
            let list = resolve_ranking(name, ranking, self.index_for(id.side.opposite()))?;
            resolved.push((id, list));
        }

        for (id, list) in resolved {
            self.side_mut(id.side)[id.index].preferences = list;
        }
        Ok(())
    }

    /// Reshuffle every participant's ranking
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for participant in self.proposers.iter_mut().chain(self.responders.iter_mut()) {
            participant.preferences.shuffle(rng);
        }
    }

    /// Swap the roles so the responder side proposes
    pub fn reversed(&self) -> Self {
        let retag = |side: &[Participant], to: Side| -> Vec<Participant> {
            side.iter()
                .map(|p| Participant { side: to, ..p.clone() })
                .collect()
        };

        Self {
            proposers: retag(&self.responders, Side::Proposer),
            responders: retag(&self.proposers, Side::Responder),
            proposer_index: self.responder_index.clone(),
            responder_index: self.proposer_index.clone(),
        }
    }

    fn index_for(&self, side: Side) -> &HashMap<String, usize> {
        match side {
            Side::Proposer => &self.proposer_index,
            Side::Responder => &self.responder_index,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut [Participant] {
        match side {
            Side::Proposer => &mut self.proposers,
            Side::Responder => &mut self.responders,
        }
    }
}

fn index_names(names: &[String]) -> Result<HashMap<String, usize>, MatchError> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            return Err(MatchError::DuplicateParticipant(name.clone()));
        }
    }
    Ok(index)
}

fn build_side<S: PreferenceSource + ?Sized>(
    side: Side,
    names: &[String],
    opposite_names: &[String],
    opposite_index: &HashMap<String, usize>,
    source: &mut S,
) -> Result<Vec<Participant>, MatchError> {
    names
        .iter()
        .map(|name| {
            let ranking = source.ranking_for(name, side, opposite_names)?;
            let preferences = resolve_ranking(name, &ranking, opposite_index)?;
            Ok(Participant {
                name: name.clone(),
                side,
                preferences,
            })
        })
        .collect()
}
