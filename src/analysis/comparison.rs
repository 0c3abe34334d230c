//! Prediction set comparison
//!
//! Membership is decided by class index. The `top_mismatch` flag follows the
//! historical display-name rule: the two top predictions match when the
//! display name of A's top entry contains the display name of B's top entry.
//! Equal names therefore always match, and so does a short name contained in
//! a longer one ("Rose" vs "Dog Rose"). An empty display name on B's side is
//! contained in everything, so it is treated as a mismatch. Index equality
//! would be stricter; the containment rule is kept until callers agree on the
//! replacement.

use super::result::PredictionSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of comparing two prediction sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Entries of A whose class also appears in B (values from A)
    pub common_predictions: PredictionSet,
    /// Entries of A whose class is absent from B
    pub unique_to_a: PredictionSet,
    /// Entries of B whose class is absent from A
    pub unique_to_b: PredictionSet,
    /// `|common| / max(|A|, |B|)`, 0 when both sets are empty
    pub similarity: f32,
    /// True when the top-ranked entries differ
    pub top_mismatch: bool,
}

/// Compare two prediction sets
///
/// # Example
///
/// ```
/// use bloom_rank::analysis::comparison::compare_predictions;
/// use bloom_rank::analysis::ranking::rank;
/// use bloom_rank::labels::LabelTable;
///
/// let labels = LabelTable::unlabeled(4);
/// let a = rank(&[0.6, 0.3, 0.1, 0.0], 2, &labels)?;
/// let b = rank(&[0.1, 0.5, 0.0, 0.4], 2, &labels)?;
///
/// let cmp = compare_predictions(&a, &b);
/// assert_eq!(cmp.common_predictions.len(), 1);
/// assert!((cmp.similarity - 0.5).abs() < 1e-6);
/// assert!(cmp.top_mismatch);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn compare_predictions(a: &PredictionSet, b: &PredictionSet) -> ComparisonResult {
    let a_indices: HashSet<usize> = a.iter().map(|p| p.index).collect();
    let b_indices: HashSet<usize> = b.iter().map(|p| p.index).collect();

    let common_predictions = a.retain_where(|p| b_indices.contains(&p.index));
    let unique_to_a = a.retain_where(|p| !b_indices.contains(&p.index));
    let unique_to_b = b.retain_where(|p| !a_indices.contains(&p.index));

    let denominator = a.len().max(b.len());
    let similarity = if denominator == 0 {
        0.0
    } else {
        common_predictions.len() as f32 / denominator as f32
    };

    let top_mismatch = match (a.top(), b.top()) {
        (Some(top_a), Some(top_b)) => {
            top_b.display_name.is_empty()
                || !top_a.display_name.contains(top_b.display_name.as_str())
        }
        (None, None) => false,
        _ => true,
    };

    log::debug!(
        "Compared {} vs {} predictions: common={}, similarity={:.3}, top_mismatch={}",
        a.len(),
        b.len(),
        common_predictions.len(),
        similarity,
        top_mismatch
    );

    ComparisonResult {
        common_predictions,
        unique_to_a,
        unique_to_b,
        similarity,
        top_mismatch,
    }
}
