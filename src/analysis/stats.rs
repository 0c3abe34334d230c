//! Summary statistics over a prediction set
//!
//! - `top_score`: highest score (0 for an empty set)
//! - `mean_score`: arithmetic mean of the scores
//! - `entropy_bits`: Shannon entropy `Σ -p·log2(p)` over entries with `p > 0`
//! - `band_distribution`: number of predictions per confidence band
//!
//! Entropy is computed over the (possibly truncated) top-K scores as they
//! are, without renormalizing them to sum to one.

use super::confidence::ConfidenceBand;
use super::result::PredictionSet;
use serde::{Deserialize, Serialize};

/// Number of predictions per confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandDistribution {
    /// Predictions in the High band
    pub high: usize,
    /// Predictions in the Medium band
    pub medium: usize,
    /// Predictions in the Low band
    pub low: usize,
}

impl BandDistribution {
    /// Count for a single band
    pub fn count(&self, band: ConfidenceBand) -> usize {
        match band {
            ConfidenceBand::High => self.high,
            ConfidenceBand::Medium => self.medium,
            ConfidenceBand::Low => self.low,
        }
    }

    /// Total number of counted predictions
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    fn record(&mut self, band: ConfidenceBand) {
        match band {
            ConfidenceBand::High => self.high += 1,
            ConfidenceBand::Medium => self.medium += 1,
            ConfidenceBand::Low => self.low += 1,
        }
    }
}

/// Statistics derived from one prediction set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    /// Highest score in the set
    pub top_score: f32,
    /// Mean score
    pub mean_score: f32,
    /// Predictions per band
    pub band_distribution: BandDistribution,
    /// Shannon entropy of the scores, in bits
    pub entropy_bits: f32,
}

impl PredictionStats {
    /// Summarize a prediction set
    ///
    /// Returns all-zero statistics for an empty set.
    ///
    /// # Example
    ///
    /// ```
    /// use bloom_rank::analysis::ranking::rank;
    /// use bloom_rank::analysis::stats::PredictionStats;
    /// use bloom_rank::labels::LabelTable;
    ///
    /// let set = rank(&[0.25, 0.25, 0.25, 0.25], 4, &LabelTable::unlabeled(4))?;
    /// let stats = PredictionStats::from_predictions(&set);
    /// assert!((stats.entropy_bits - 2.0).abs() < 1e-5);
    /// # Ok::<(), bloom_rank::ClassifyError>(())
    /// ```
    pub fn from_predictions(predictions: &PredictionSet) -> Self {
        if predictions.is_empty() {
            return Self::default();
        }

        let mut top_score = 0.0f32;
        let mut sum = 0.0f32;
        let mut entropy_bits = 0.0f32;
        let mut band_distribution = BandDistribution::default();

        for prediction in predictions {
            let p = prediction.score;
            top_score = top_score.max(p);
            sum += p;
            if p > 0.0 {
                entropy_bits -= p * p.log2();
            }
            band_distribution.record(prediction.confidence_band);
        }

        let stats = Self {
            top_score,
            mean_score: sum / predictions.len() as f32,
            band_distribution,
            entropy_bits,
        };

        log::debug!(
            "Prediction stats: top={:.4}, mean={:.4}, entropy={:.4} bits, bands={:?}",
            stats.top_score,
            stats.mean_score,
            stats.entropy_bits,
            stats.band_distribution
        );

        stats
    }
}

/// Shorthand for [`PredictionStats::from_predictions`]
pub fn summarize(predictions: &PredictionSet) -> PredictionStats {
    PredictionStats::from_predictions(predictions)
}
