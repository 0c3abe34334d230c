//! Sequential batch classification
//!
//! Items are classified one at a time so that only one oracle buffer is alive
//! at any moment, which bounds peak (accelerator) memory regardless of batch
//! size. A failure in one item is recorded on that item and the batch moves
//! on; the report always has exactly one entry per input, in input order.
//!
//! There is no cancellation or timeout: a slow oracle call blocks its step
//! until it returns.

use crate::analysis::result::PredictionSet;
use crate::config::ClassifyConfig;
use crate::error::ClassifyError;
use crate::labels::LabelTable;
use crate::ml::oracle::ScoreOracle;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One input of a batch
#[derive(Debug)]
pub struct BatchInput<'a, I: ?Sized> {
    /// Identifier reported back with the result (file name, URL, ...)
    pub source: String,
    /// Input handed to the oracle
    pub input: &'a I,
}

impl<'a, I: ?Sized> BatchInput<'a, I> {
    /// Create a batch input
    pub fn new(source: impl Into<String>, input: &'a I) -> Self {
        Self {
            source: source.into(),
            input,
        }
    }
}

/// Why an item produced no predictions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Error kind (`validation`, `oracle_inference`, `model`, `export`)
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ClassifyError> for BatchFailure {
    fn from(err: &ClassifyError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result for one batch item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    /// Source identifier of the input
    pub source: String,
    /// Ranked predictions, empty on failure
    pub predictions: PredictionSet,
    /// Wall time spent on this item in milliseconds
    pub elapsed_ms: f32,
    /// Failure marker, `None` on success
    pub failure: Option<BatchFailure>,
}

impl BatchItemResult {
    /// True if the item was classified
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Results of a whole batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per input, in input order
    pub items: Vec<BatchItemResult>,
    /// Wall time for the whole batch in milliseconds
    pub total_elapsed_ms: f32,
}

impl BatchReport {
    /// Report in which every item failed with the same error
    pub fn all_failed<I: ?Sized>(items: &[BatchInput<'_, I>], err: &ClassifyError) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| BatchItemResult {
                    source: item.source.clone(),
                    predictions: PredictionSet::empty(),
                    elapsed_ms: 0.0,
                    failure: Some(BatchFailure::from(err)),
                })
                .collect(),
            total_elapsed_ms: 0.0,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for an empty batch
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of successfully classified items
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_ok()).count()
    }

    /// Number of failed items
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Sum of per-item times in milliseconds
    pub fn summed_item_ms(&self) -> f32 {
        self.items.iter().map(|item| item.elapsed_ms).sum()
    }
}

/// Classify a batch sequentially with per-item fault isolation
///
/// # Arguments
///
/// * `oracle` - Model used for every item
/// * `items` - Inputs with their source identifiers
/// * `labels` - Label table of the oracle's model variant
/// * `config` - Post-processing configuration
///
/// # Returns
///
/// `BatchReport` with exactly `items.len()` entries. Items whose oracle call,
/// normalization or ranking failed carry an empty prediction set and a
/// [`BatchFailure`].
///
/// # Example
///
/// ```
/// use bloom_rank::batch::{process_batch, BatchInput};
/// use bloom_rank::labels::LabelTable;
/// use bloom_rank::ml::oracle::{oracle_fn, ScoreBuffer};
/// use bloom_rank::{ClassifyConfig, ClassifyError};
///
/// let oracle = oracle_fn(|name: &str| {
///     if name == "broken.jpg" {
///         Err(ClassifyError::OracleInference("corrupt image".to_string()))
///     } else {
///         Ok(ScoreBuffer::new(vec![0.1, 0.9]))
///     }
/// });
/// let items = [
///     BatchInput::new("a.jpg", "a.jpg"),
///     BatchInput::new("broken.jpg", "broken.jpg"),
/// ];
/// let report = process_batch(&oracle, &items, &LabelTable::unlabeled(2), &ClassifyConfig::default());
///
/// assert_eq!(report.len(), 2);
/// assert!(report.items[0].is_ok());
/// assert!(report.items[1].predictions.is_empty());
/// ```
pub fn process_batch<O: ScoreOracle>(
    oracle: &O,
    items: &[BatchInput<'_, O::Input>],
    labels: &LabelTable,
    config: &ClassifyConfig,
) -> BatchReport {
    log::debug!("Starting batch of {} items, top_k={}", items.len(), config.top_k);
    let batch_start = Instant::now();

    let mut results = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let item_start = Instant::now();
        let outcome = crate::classify_image(oracle, item.input, labels, config);
        let elapsed_ms = item_start.elapsed().as_secs_f32() * 1000.0;

        let result = match outcome {
            Ok(classification) => BatchItemResult {
                source: item.source.clone(),
                predictions: classification.predictions,
                elapsed_ms,
                failure: None,
            },
            Err(err) => {
                log::warn!(
                    "[{}/{}] Failed to classify {}: {}",
                    position + 1,
                    items.len(),
                    item.source,
                    err
                );
                BatchItemResult {
                    source: item.source.clone(),
                    predictions: PredictionSet::empty(),
                    elapsed_ms,
                    failure: Some(BatchFailure::from(&err)),
                }
            }
        };
        results.push(result);
    }

    let report = BatchReport {
        items: results,
        total_elapsed_ms: batch_start.elapsed().as_secs_f32() * 1000.0,
    };

    log::debug!(
        "Batch processing completed: {:.2}ms total, ok={}/{}",
        report.total_elapsed_ms,
        report.succeeded(),
        report.len()
    );

    report
}
