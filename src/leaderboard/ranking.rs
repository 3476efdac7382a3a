//! Leaderboard ordering and dense rank assignment

use std::cmp::Ordering;

use crate::models::entity::ScoredEntity;

/// Descending by final score. Scores are always finite, so `partial_cmp`
/// only yields `None` for corrupted input, which compares as a tie.
fn by_final_score_desc(a: &ScoredEntity<'_>, b: &ScoredEntity<'_>) -> Ordering {
    b.final_score
        .partial_cmp(&a.final_score)
        .unwrap_or(Ordering::Equal)
}

/// Sort by final score descending and assign ranks `1..=n`.
///
/// The sort is stable: equal scores keep their input order and receive
/// consecutive ranks rather than a shared one.
pub fn rank(mut entities: Vec<ScoredEntity<'_>>) -> Vec<ScoredEntity<'_>> {
    entities.sort_by(by_final_score_desc);
    entities
        .into_iter()
        .enumerate()
        .map(|(index, entity)| ScoredEntity {
            rank: index + 1,
            ..entity
        })
        .collect()
}
