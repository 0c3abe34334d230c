//! # Bloom Rank
//!
//! Post-processing for image-classification models: turns the raw per-class
//! score vector of a classifier into ranked, confidence-banded predictions
//! with summary statistics, batch handling, comparison and export.
//!
//! ## Features
//!
//! - **Normalization**: Probability, uint8-quantized and logit score vectors
//! - **Ranking**: Top-K with deterministic tie-break and label resolution
//! - **Confidence bands**: High / Medium / Low with fixed thresholds
//! - **Statistics**: Top and mean score, band distribution, Shannon entropy
//! - **Batches**: Sequential processing with per-item fault isolation
//! - **Export**: CSV, JSON and XML renditions of a result
//!
//! ## Quick Start
//!
//! ```
//! use bloom_rank::{classify_scores, ClassifyConfig};
//! use bloom_rank::labels::LabelTable;
//!
//! // Scores from your model, index-aligned with the label table
//! let scores = vec![0.1, 0.7, 0.05, 0.15];
//! let labels = LabelTable::from_labels(vec!["Rosa canina", "Bellis perennis", "Quercus robur", "Fagus sylvatica"]);
//! let config = ClassifyConfig { top_k: 2, ..Default::default() };
//!
//! let result = classify_scores(&scores, &labels, &config)?;
//!
//! let top = result.predictions.top().unwrap();
//! println!("{} ({:.1}%, {})", top.display_name, top.score * 100.0, top.confidence_band);
//! # Ok::<(), bloom_rank::ClassifyError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Oracle → ScoreBuffer → Normalization → Ranking → Confidence → Stats → Export
//! ```
//!
//! The model itself is outside the crate: anything implementing
//! [`ScoreOracle`] can feed the pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod labels;
pub mod ml;
pub mod preprocessing;
pub mod profile;

// Re-export main types
pub use analysis::confidence::ConfidenceBand;
pub use analysis::result::{ClassificationMetadata, ClassificationResult, Prediction, PredictionSet};
pub use analysis::stats::PredictionStats;
pub use config::ClassifyConfig;
pub use error::ClassifyError;
pub use labels::{LabelTable, ModelVariant};
pub use ml::{ModelContext, ScoreBuffer, ScoreOracle};
pub use preprocessing::normalization::NormalizationMode;

use analysis::filters::filter_by_confidence;
use analysis::ranking::rank;
use preprocessing::normalization::normalize_scores;

/// Classify a raw score vector
///
/// Normalizes the scores, ranks the top `config.top_k` classes, drops those
/// below `config.min_confidence` and summarizes the rest.
///
/// # Arguments
///
/// * `scores` - Raw oracle output, index-aligned with `labels`
/// * `labels` - Label table of the model variant that produced the scores
/// * `config` - Post-processing configuration
///
/// # Returns
///
/// `ClassificationResult` with predictions, statistics and metadata. The
/// class domain comes from `labels` alone; `config.variant` is only recorded
/// in the metadata.
///
/// # Errors
///
/// Returns `ClassifyError::Validation` if the configuration is invalid, the
/// vector is empty or non-finite, a normalized score falls outside [0, 1], or
/// the vector length differs from the label table
///
/// # Example
///
/// ```
/// use bloom_rank::{classify_scores, ClassifyConfig, ConfidenceBand};
/// use bloom_rank::labels::LabelTable;
///
/// // uint8-quantized output is detected and rescaled
/// let config = ClassifyConfig { top_k: 1, ..Default::default() };
/// let result = classify_scores(&[10.0, 200.0, 5.0, 40.0], &LabelTable::unlabeled(4), &config)?;
///
/// let top = result.predictions.top().unwrap();
/// assert_eq!(top.index, 1);
/// assert!((top.score - 200.0 / 255.0).abs() < 1e-6);
/// assert_eq!(top.confidence_band, ConfidenceBand::High);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn classify_scores(
    scores: &[f32],
    labels: &LabelTable,
    config: &ClassifyConfig,
) -> Result<ClassificationResult, ClassifyError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting classification: {} scores, top_k={}, mode={:?}",
        scores.len(),
        config.top_k,
        config.normalization
    );

    config.validate()?;

    let normalized = normalize_scores(scores, config.normalization)?;
    let ranked = rank(&normalized.scores, config.top_k, labels)?;

    let predictions = if config.min_confidence > 0.0 {
        filter_by_confidence(&ranked, config.min_confidence)
    } else {
        ranked
    };

    let stats = PredictionStats::from_predictions(&predictions);
    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Classification complete: {} predictions, top={:.4}, entropy={:.3} bits in {:.3}ms",
        predictions.len(),
        stats.top_score,
        stats.entropy_bits,
        processing_time_ms
    );

    Ok(ClassificationResult {
        predictions,
        stats,
        metadata: ClassificationMetadata {
            variant: config.variant,
            class_count: scores.len(),
            top_k: config.top_k,
            encoding: normalized.encoding,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Run the oracle on one input and classify its scores
///
/// The oracle's [`ScoreBuffer`] is released before this function returns,
/// whether classification succeeded or not.
///
/// # Errors
///
/// Propagates the oracle's error (normally `ClassifyError::OracleInference`)
/// and the errors of [`classify_scores`]
///
/// # Example
///
/// ```
/// use bloom_rank::{classify_image, ClassifyConfig};
/// use bloom_rank::labels::LabelTable;
/// use bloom_rank::ml::{oracle_fn, ScoreBuffer};
///
/// let oracle = oracle_fn(|_path: &str| Ok(ScoreBuffer::new(vec![0.1, 0.7, 0.05, 0.15])));
/// let result = classify_image(&oracle, "leaf.jpg", &LabelTable::unlabeled(4), &ClassifyConfig::default())?;
/// assert_eq!(result.predictions.len(), 4);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn classify_image<O: ScoreOracle>(
    oracle: &O,
    input: &O::Input,
    labels: &LabelTable,
    config: &ClassifyConfig,
) -> Result<ClassificationResult, ClassifyError> {
    let buffer = oracle.infer(input)?;
    log::debug!("Oracle returned {} scores", buffer.len());
    classify_scores(buffer.scores(), labels, config)
}
