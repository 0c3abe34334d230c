//! Top-K ranking
//!
//! Selects the K highest scores of a normalized vector and resolves their
//! labels and confidence bands.
//!
//! # Algorithm
//!
//! 1. Pair each score with its class index
//! 2. Order by score descending, ties broken by index ascending
//! 3. Keep the first `min(top_k, len)` pairs
//! 4. Resolve names and bands
//!
//! Step 2 uses a partial selection followed by a sort of the selected prefix,
//! so ranking a 2102-class vector for K=5 does not sort the whole vector. The
//! ordering is total, so the result is identical to a full sort.

use super::confidence::ConfidenceBand;
use super::result::{Prediction, PredictionSet};
use crate::error::{ClassifyError, Result};
use crate::labels::LabelTable;
use crate::preprocessing::normalization::validate_scores;
use std::cmp::Ordering;

/// Rank a normalized score vector
///
/// # Arguments
///
/// * `scores` - Normalized scores in [0, 1], one per class of `labels`
/// * `top_k` - Number of predictions to keep (at least 1)
/// * `labels` - Label table of the active model variant
///
/// # Returns
///
/// `PredictionSet` of length `min(top_k, scores.len())`
///
/// # Errors
///
/// Returns `ClassifyError::Validation` if `top_k` is 0, the vector is empty,
/// contains non-finite or out-of-range values, or its length differs from the
/// label table's class count
///
/// # Example
///
/// ```
/// use bloom_rank::analysis::ranking::rank;
/// use bloom_rank::analysis::confidence::ConfidenceBand;
/// use bloom_rank::labels::LabelTable;
///
/// let labels = LabelTable::unlabeled(4);
/// let set = rank(&[0.1, 0.7, 0.05, 0.15], 2, &labels)?;
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.as_slice()[0].index, 1);
/// assert_eq!(set.as_slice()[0].confidence_band, ConfidenceBand::High);
/// assert_eq!(set.as_slice()[1].index, 3);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn rank(scores: &[f32], top_k: usize, labels: &LabelTable) -> Result<PredictionSet> {
    log::debug!("Ranking {} scores, top_k={}", scores.len(), top_k);

    if top_k < 1 {
        return Err(ClassifyError::Validation(
            "top_k must be at least 1".to_string(),
        ));
    }
    validate_scores(scores)?;

    if scores.len() != labels.class_count() {
        return Err(ClassifyError::Validation(format!(
            "Score vector has {} entries but the label table has {} classes",
            scores.len(),
            labels.class_count()
        )));
    }

    if let Some(position) = scores.iter().position(|s| !(0.0..=1.0).contains(s)) {
        return Err(ClassifyError::Validation(format!(
            "Score {} at index {} is outside [0, 1]; normalize before ranking",
            scores[position], position
        )));
    }

    let predictions = top_indices(scores, top_k)
        .into_iter()
        .map(|(index, score)| {
            let label = labels.resolve(index);
            Prediction {
                index,
                canonical_name: label.canonical_name,
                display_name: label.display_name,
                score,
                confidence_band: ConfidenceBand::from_score(score),
            }
        })
        .collect();

    Ok(PredictionSet::from_ranked(predictions))
}

/// Indices and scores of the `k` best entries, best first
///
/// Scores must be finite.
pub fn top_indices(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let k = k.min(scores.len());
    if k == 0 {
        return vec![];
    }

    let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    if k < indexed.len() {
        indexed.select_nth_unstable_by(k - 1, rank_order);
        indexed.truncate(k);
    }
    indexed.sort_unstable_by(rank_order);
    indexed
}

/// Score descending, then index ascending
fn rank_order(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rank_concrete_scenario() {
        let labels = LabelTable::unlabeled(4);
        let set = rank(&[0.1, 0.7, 0.05, 0.15], 2, &labels).unwrap();

        let got: Vec<(usize, f32, ConfidenceBand)> = set
            .iter()
            .map(|p| (p.index, p.score, p.confidence_band))
            .collect();
        assert_eq!(
            got,
            vec![(1, 0.7, ConfidenceBand::High), (3, 0.15, ConfidenceBand::Low)]
        );
    }

    #[test]
    fn test_rank_tie_break_by_index() {
        let labels = LabelTable::unlabeled(5);
        let set = rank(&[0.2, 0.3, 0.2, 0.3, 0.0], 4, &labels).unwrap();
        let indices: Vec<usize> = set.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_rank_properties_over_many_vectors() {
        // Deterministic pseudo-random vectors with plenty of ties
        let mut state: u32 = 12345;
        for len in [1usize, 2, 7, 50, 300] {
            let scores: Vec<f32> = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    ((state >> 16) % 20) as f32 / 20.0
                })
                .collect();
            let labels = LabelTable::unlabeled(len);

            for top_k in [1usize, 3, 10, 1000] {
                let set = rank(&scores, top_k, &labels).unwrap();
                assert_eq!(set.len(), top_k.min(len));

                let slice = set.as_slice();
                assert!(slice.windows(2).all(|w| w[0].score >= w[1].score));

                let unique: HashSet<usize> = slice.iter().map(|p| p.index).collect();
                assert_eq!(unique.len(), slice.len());

                // Matches a full stable sort
                let mut expected: Vec<(usize, f32)> =
                    scores.iter().copied().enumerate().collect();
                expected.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
                expected.truncate(top_k.min(len));
                let got: Vec<(usize, f32)> = slice.iter().map(|p| (p.index, p.score)).collect();
                assert_eq!(got, expected);
            }
        }
    }

    #[test]
    fn test_rank_resolves_labels() {
        let labels = LabelTable::from_labels(vec!["Bellis perennis", "Rosa canina"])
            .with_alias("Rosa canina", "Dog Rose");
        let set = rank(&[0.2, 0.8], 1, &labels).unwrap();
        let top = set.top().unwrap();
        assert_eq!(top.canonical_name, "Rosa canina");
        assert_eq!(top.display_name, "Dog Rose");
    }

    #[test]
    fn test_rank_rejects_zero_top_k() {
        let labels = LabelTable::unlabeled(2);
        let result = rank(&[0.5, 0.5], 0, &labels);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_rank_rejects_empty_and_non_finite() {
        assert!(rank(&[], 1, &LabelTable::unlabeled(0)).is_err());
        assert!(rank(&[0.1, f32::NAN], 1, &LabelTable::unlabeled(2)).is_err());
    }

    #[test]
    fn test_rank_rejects_length_mismatch() {
        let labels = LabelTable::unlabeled(3);
        let result = rank(&[0.1, 0.2], 1, &labels);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_rank_rejects_unnormalized_scores() {
        let labels = LabelTable::unlabeled(2);
        assert!(rank(&[200.0, 10.0], 1, &labels).is_err());
    }
}
