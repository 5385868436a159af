use crate::config::Rounding;
use crate::normalize::ShingleSet;
use rayon::prelude::*;
use serde::{Serialize, Serializer};

/// Score for one document pair. `Unavailable` marks pairs where at least
/// one side failed extraction or normalization; it is reported to the
/// caller as a distinct sentinel, never collapsed to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairScore {
    Percent(u8),
    Unavailable,
}

impl Serialize for PairScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PairScore::Percent(pct) => serializer.serialize_u8(*pct),
            PairScore::Unavailable => serializer.serialize_none(),
        }
    }
}

/// Jaccard overlap of two shingle sets as a 0–100 integer percentage.
///
/// Two empty documents are trivially identical (100); one empty side
/// shares nothing (0). Intersection iterates the smaller set, so a pair
/// costs O(min(|A|, |B|)) hash lookups.
pub fn jaccard_percent(a: &ShingleSet, b: &ShingleSet, rounding: Rounding) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|hash| large.contains(hash)).count();
    let union = a.len() + b.len() - intersection;

    let scaled = intersection as f64 / union as f64 * 100.0;
    let rounded = match rounding {
        Rounding::HalfUp => scaled.round(),
        Rounding::HalfEven => scaled.round_ties_even(),
    };
    rounded as u8
}

/// Score every unordered pair exactly once, in parallel. Self-pairs are
/// never scored here; the matrix builder fixes the diagonal at 100.
pub fn score_all_pairs(
    shingles: &[Option<ShingleSet>],
    rounding: Rounding,
) -> Vec<(usize, usize, PairScore)> {
    let n = shingles.len();
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }

    pairs
        .par_iter()
        .map(|&(i, j)| {
            let score = match (&shingles[i], &shingles[j]) {
                (Some(a), Some(b)) => PairScore::Percent(jaccard_percent(a, b, rounding)),
                _ => PairScore::Unavailable,
            };
            (i, j, score)
        })
        .collect()
}
