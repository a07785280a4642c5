use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::MatchError;
use crate::models::Side;

/// A strict total order over the opposite side
///
/// `order` lists opposite-side indices from least to most preferred, so the
/// rank of a candidate is its position and higher is better. `ranks` is the
/// inverse permutation for O(1) lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceList {
    order: Vec<usize>,
    ranks: Vec<usize>,
}

impl PreferenceList {
    /// Build a list from opposite-side indices, least preferred first
    ///
    /// Returns `None` unless `order` is a permutation of `0..order.len()`.
    pub fn from_indices(order: Vec<usize>) -> Option<Self> {
        let mut ranks = vec![usize::MAX; order.len()];
        for (rank, &candidate) in order.iter().enumerate() {
            if candidate >= ranks.len() || ranks[candidate] != usize::MAX {
                return None;
            }
            ranks[candidate] = rank;
        }
        Some(Self { order, ranks })
    }

    /// Rank of `candidate` (higher = more preferred)
    #[inline]
    pub fn rank_of(&self, candidate: usize) -> Option<usize> {
        self.ranks.get(candidate).copied()
    }

    /// True if `a` is strictly preferred over `b`
    #[inline]
    pub fn prefers(&self, a: usize, b: usize) -> bool {
        match (self.rank_of(a), self.rank_of(b)) {
            (Some(ra), Some(rb)) => ra > rb,
            _ => false,
        }
    }

    pub fn most_preferred(&self) -> Option<usize> {
        self.order.last().copied()
    }

    /// Opposite-side indices, least preferred first
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replace the order with a uniformly random permutation
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
        for (rank, &candidate) in self.order.iter().enumerate() {
            self.ranks[candidate] = rank;
        }
    }
}

/// Resolve a ranking of names into a validated `PreferenceList`
///
/// `opposite` maps every opposite-side name to its index. The ranking must
/// name each of them exactly once.
pub fn resolve_ranking(
    participant: &str,
    ranking: &[String],
    opposite: &HashMap<String, usize>,
) -> Result<PreferenceList, MatchError> {
    let invalid = |reason: String| MatchError::InvalidRanking {
        participant: participant.to_string(),
        reason,
    };

    let mut seen = vec![false; opposite.len()];
    let mut order = Vec::with_capacity(ranking.len());

    for name in ranking {
        let index = *opposite
            .get(name)
            .ok_or_else(|| invalid(format!("unknown entry '{}'", name)))?;
        if seen[index] {
            return Err(invalid(format!("duplicate entry '{}'", name)));
        }
        seen[index] = true;
        order.push(index);
    }

    if order.len() != opposite.len() {
        let mut missing: Vec<&str> = opposite
            .iter()
            .filter(|(_, index)| !seen[**index])
            .map(|(name, _)| name.as_str())
            .collect();
        missing.sort_unstable();
        return Err(invalid(format!("missing entries {:?}", missing)));
    }

    PreferenceList::from_indices(order)
        .ok_or_else(|| invalid("not a permutation of the opposite side".to_string()))
}

/// Supplies each participant's ranking while a population is built
pub trait PreferenceSource {
    /// Ranking of `candidates` for `participant`, least preferred first
    fn ranking_for(
        &mut self,
        participant: &str,
        side: Side,
        candidates: &[String],
    ) -> Result<Vec<String>, MatchError>;
}

/// Explicit rankings keyed by participant name
#[derive(Debug, Clone, Default)]
pub struct FixedPreferences {
    rankings: HashMap<String, Vec<String>>,
}

impl FixedPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, participant: &str, ranking: &[&str]) -> Self {
        self.insert(participant, ranking.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn insert(&mut self, participant: &str, ranking: Vec<String>) {
        self.rankings.insert(participant.to_string(), ranking);
    }
}

impl From<BTreeMap<String, Vec<String>>> for FixedPreferences {
    fn from(rankings: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            rankings: rankings.into_iter().collect(),
        }
    }
}

impl PreferenceSource for FixedPreferences {
    fn ranking_for(
        &mut self,
        participant: &str,
        _side: Side,
        _candidates: &[String],
    ) -> Result<Vec<String>, MatchError> {
        self.rankings
            .get(participant)
            .cloned()
            .ok_or_else(|| MatchError::MissingRanking(participant.to_string()))
    }
}

/// Uniformly random rankings drawn from an injected RNG
///
/// Seed the RNG (e.g. `ChaCha8Rng::seed_from_u64`) for reproducible runs.
#[derive(Debug)]
pub struct RandomPreferences<R> {
    rng: R,
}

impl<R: Rng> RandomPreferences<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> PreferenceSource for RandomPreferences<R> {
    fn ranking_for(
        &mut self,
        _participant: &str,
        _side: Side,
        candidates: &[String],
    ) -> Result<Vec<String>, MatchError> {
        let mut ranking = candidates.to_vec();
        ranking.shuffle(&mut self.rng);
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn index(list: &[&str]) -> HashMap<String, usize> {
        list.iter().enumerate().map(|(i, s)| (s.to_string(), i)).collect()
    }

    #[test]
    fn test_rank_of_higher_is_better() {
        // "Candy" is last, so top rated
        let opposite = index(&["Chaz", "CJ", "Candy"]);
        let list = resolve_ranking("Jake", &names(&["Chaz", "CJ", "Candy"]), &opposite).unwrap();

        assert_eq!(list.rank_of(2), Some(2));
        assert_eq!(list.rank_of(0), Some(0));
        assert_eq!(list.most_preferred(), Some(2));
        assert!(list.prefers(2, 1));
        assert!(!list.prefers(0, 1));
    }

    #[test]
    fn test_rank_of_out_of_range() {
        let list = PreferenceList::from_indices(vec![1, 0]).unwrap();
        assert_eq!(list.rank_of(5), None);
    }

    #[test]
    fn test_from_indices_rejects_non_permutation() {
        assert!(PreferenceList::from_indices(vec![0, 0]).is_none());
        assert!(PreferenceList::from_indices(vec![0, 2]).is_none());
        assert!(PreferenceList::from_indices(vec![]).is_some());
    }

    #[test]
    fn test_resolve_ranking_errors() {
        let opposite = index(&["X", "Y", "Z"]);

        let duplicate = resolve_ranking("A", &names(&["X", "X", "Y"]), &opposite);
        assert!(matches!(duplicate, Err(MatchError::InvalidRanking { .. })));

        let unknown = resolve_ranking("A", &names(&["X", "Y", "W"]), &opposite);
        assert!(matches!(unknown, Err(MatchError::InvalidRanking { .. })));

        match resolve_ranking("A", &names(&["X", "Y"]), &opposite) {
            Err(MatchError::InvalidRanking { participant, reason }) => {
                assert_eq!(participant, "A");
                assert!(reason.contains("Z"));
            }
            other => panic!("expected missing entry error, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_preferences_missing() {
        let mut source = FixedPreferences::new().with("A", &["X", "Y"]);
        let candidates = names(&["X", "Y"]);

        assert!(source.ranking_for("A", Side::Proposer, &candidates).is_ok());
        assert_eq!(
            source.ranking_for("B", Side::Proposer, &candidates),
            Err(MatchError::MissingRanking("B".to_string()))
        );
    }

    #[test]
    fn test_random_preferences_are_permutations() {
        let mut source = RandomPreferences::new(ChaCha8Rng::seed_from_u64(7));
        let candidates = names(&["B0", "B1", "B2", "B3", "B4", "B5"]);
        let opposite = index(&["B0", "B1", "B2", "B3", "B4", "B5"]);

        for _ in 0..20 {
            let ranking = source.ranking_for("A0", Side::Proposer, &candidates).unwrap();
            assert!(resolve_ranking("A0", &ranking, &opposite).is_ok());
        }
    }

    #[test]
    fn test_random_preferences_seeded_are_reproducible() {
        let candidates = names(&["B0", "B1", "B2", "B3", "B4", "B5", "B6", "B7"]);
        let mut first = RandomPreferences::new(ChaCha8Rng::seed_from_u64(99));
        let mut second = RandomPreferences::new(ChaCha8Rng::seed_from_u64(99));

        assert_eq!(
            first.ranking_for("A0", Side::Proposer, &candidates).unwrap(),
            second.ranking_for("A0", Side::Proposer, &candidates).unwrap()
        );
    }

    #[test]
    fn test_shuffle_keeps_ranks_consistent() {
        let mut list = PreferenceList::from_indices((0..10).collect()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        list.shuffle(&mut rng);

        for (rank, candidate) in list.iter().enumerate() {
            assert_eq!(list.rank_of(candidate), Some(rank));
        }
    }
}
