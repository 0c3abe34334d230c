//! Classification result types

use super::confidence::ConfidenceBand;
use super::stats::PredictionStats;
use crate::error::ClassifyError;
use crate::labels::ModelVariant;
use crate::preprocessing::normalization::ScoreEncoding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ranked class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Class index in the model output
    pub index: usize,

    /// Canonical identifier (scientific name or class tag)
    pub canonical_name: String,

    /// Human-readable name
    pub display_name: String,

    /// Normalized score (0.0-1.0)
    pub score: f32,

    /// Band derived from `score`
    pub confidence_band: ConfidenceBand,
}

/// Ranked predictions for one image
///
/// Invariants: strictly ordered by non-increasing score, no duplicate class
/// indices, every score in [0, 1] with a matching band. The set has no
/// mutating API; filters and comparisons produce new sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Prediction>", into = "Vec<Prediction>")]
pub struct PredictionSet {
    predictions: Vec<Prediction>,
}

impl PredictionSet {
    /// Build a set, checking every invariant
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::Validation` when scores are out of range or
    /// increasing, an index repeats, or a band does not match its score
    pub fn new(predictions: Vec<Prediction>) -> Result<Self, ClassifyError> {
        let mut seen = HashSet::with_capacity(predictions.len());
        for (position, prediction) in predictions.iter().enumerate() {
            if !(0.0..=1.0).contains(&prediction.score) {
                return Err(ClassifyError::Validation(format!(
                    "Score {} of class {} is outside [0, 1]",
                    prediction.score, prediction.index
                )));
            }
            if ConfidenceBand::from_score(prediction.score) != prediction.confidence_band {
                return Err(ClassifyError::Validation(format!(
                    "Band {} does not match score {} of class {}",
                    prediction.confidence_band, prediction.score, prediction.index
                )));
            }
            if !seen.insert(prediction.index) {
                return Err(ClassifyError::Validation(format!(
                    "Duplicate class index {}",
                    prediction.index
                )));
            }
            if position > 0 && predictions[position - 1].score < prediction.score {
                return Err(ClassifyError::Validation(format!(
                    "Predictions are not ordered by score at position {}",
                    position
                )));
            }
        }
        Ok(Self { predictions })
    }

    /// Empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap predictions already known to satisfy the invariants
    pub(crate) fn from_ranked(predictions: Vec<Prediction>) -> Self {
        debug_assert!(predictions
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        Self { predictions }
    }

    /// Keep the predictions matching `keep`, preserving order
    pub(crate) fn retain_where<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Prediction) -> bool,
    {
        Self::from_ranked(
            self.predictions
                .iter()
                .filter(|p| keep(p))
                .cloned()
                .collect(),
        )
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// True when there are no predictions
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Highest-scoring prediction
    pub fn top(&self) -> Option<&Prediction> {
        self.predictions.first()
    }

    /// Predictions in rank order
    pub fn as_slice(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Iterate in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, Prediction> {
        self.predictions.iter()
    }

    /// True if a class index is present
    pub fn contains_index(&self, index: usize) -> bool {
        self.predictions.iter().any(|p| p.index == index)
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a Prediction;
    type IntoIter = std::slice::Iter<'a, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.iter()
    }
}

impl TryFrom<Vec<Prediction>> for PredictionSet {
    type Error = ClassifyError;

    fn try_from(predictions: Vec<Prediction>) -> Result<Self, Self::Error> {
        Self::new(predictions)
    }
}

impl From<PredictionSet> for Vec<Prediction> {
    fn from(set: PredictionSet) -> Self {
        set.predictions
    }
}

/// Complete single-image classification result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Ranked predictions
    pub predictions: PredictionSet,

    /// Statistics over `predictions`
    pub stats: PredictionStats,

    /// Processing metadata
    pub metadata: ClassificationMetadata,
}

/// Classification metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetadata {
    /// Variant named in the configuration (informational, not checked
    /// against the label table)
    pub variant: ModelVariant,

    /// Number of scores in the oracle output
    pub class_count: usize,

    /// Requested top-K
    pub top_k: usize,

    /// Encoding applied by the normalizer
    pub encoding: ScoreEncoding,

    /// Post-processing time in milliseconds (excludes inference)
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,
}
