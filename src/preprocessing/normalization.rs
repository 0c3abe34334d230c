//! Score normalization
//!
//! Brings a raw score vector into the [0, 1] range. Floating-point backends
//! already emit probabilities, uint8-quantized backends emit values in 0-255,
//! and some graph models emit unnormalized logits. The mode selects how the
//! vector is interpreted:
//! - `Auto`: dequantize when the maximum exceeds 1.1, otherwise pass through
//! - `AssumeRaw`: pass through
//! - `AssumeQuantized`: always divide by 255
//! - `Softmax`: treat entries as logits
//!
//! # Example
//!
//! ```
//! use bloom_rank::preprocessing::normalization::{
//!     normalize_scores, NormalizationMode, ScoreEncoding
//! };
//!
//! let normalized = normalize_scores(&[10.0, 200.0, 5.0, 40.0], NormalizationMode::Auto)?;
//! assert_eq!(normalized.encoding, ScoreEncoding::Quantized);
//! assert!((normalized.scores[1] - 200.0 / 255.0).abs() < 1e-6);
//! # Ok::<(), bloom_rank::ClassifyError>(())
//! ```

use crate::error::{ClassifyError, Result};
use serde::{Deserialize, Serialize};

/// A maximum above this value marks a vector as quantized in `Auto` mode
pub const QUANTIZED_DETECTION_THRESHOLD: f32 = 1.1;

/// Full scale of uint8-quantized scores
pub const QUANTIZED_SCALE: f32 = 255.0;

/// How a raw score vector should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NormalizationMode {
    /// Detect quantized output from the vector maximum
    #[default]
    Auto,
    /// Scores are already probabilities
    AssumeRaw,
    /// Scores are uint8-quantized probabilities
    AssumeQuantized,
    /// Scores are logits; apply softmax
    Softmax,
}

/// Encoding the normalizer applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEncoding {
    /// Passed through as probabilities
    Probability,
    /// Divided by [`QUANTIZED_SCALE`]
    Quantized,
    /// Converted from logits with softmax
    Logits,
}

/// Normalized scores plus what was done to them
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedScores {
    /// Scores in [0, 1], index-aligned with the input
    pub scores: Vec<f32>,
    /// Encoding that was assumed or detected
    pub encoding: ScoreEncoding,
    /// Maximum of the raw input
    pub raw_max: f32,
}

/// Check that a raw vector is non-empty and finite
pub fn validate_scores(raw: &[f32]) -> Result<()> {
    if raw.is_empty() {
        return Err(ClassifyError::Validation("Empty score vector".to_string()));
    }
    if let Some(position) = raw.iter().position(|s| !s.is_finite()) {
        return Err(ClassifyError::Validation(format!(
            "Non-finite score {} at index {}",
            raw[position], position
        )));
    }
    Ok(())
}

/// Guess the encoding of a raw vector from its maximum
pub fn detect_encoding(raw: &[f32]) -> ScoreEncoding {
    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max > QUANTIZED_DETECTION_THRESHOLD {
        ScoreEncoding::Quantized
    } else {
        ScoreEncoding::Probability
    }
}

/// Normalize a raw score vector into [0, 1]
///
/// # Arguments
///
/// * `raw` - Scores as produced by the oracle
/// * `mode` - Interpretation of the raw values
///
/// # Returns
///
/// `NormalizedScores` with one entry per input score
///
/// # Errors
///
/// Returns `ClassifyError::Validation` if the vector is empty, contains
/// NaN or infinite values, or has an entry outside [0, 1] after scaling.
/// Out-of-range entries are reported, never clamped.
pub fn normalize_scores(raw: &[f32], mode: NormalizationMode) -> Result<NormalizedScores> {
    validate_scores(raw)?;

    let raw_max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let encoding = match mode {
        NormalizationMode::Auto => detect_encoding(raw),
        NormalizationMode::AssumeRaw => ScoreEncoding::Probability,
        NormalizationMode::AssumeQuantized => ScoreEncoding::Quantized,
        NormalizationMode::Softmax => ScoreEncoding::Logits,
    };

    log::debug!(
        "Normalizing {} scores with {:?} (max={:.4}, encoding={:?})",
        raw.len(),
        mode,
        raw_max,
        encoding
    );

    if mode == NormalizationMode::Auto && encoding == ScoreEncoding::Quantized {
        log::warn!(
            "Score maximum {:.2} exceeds {}; treating vector as uint8-quantized",
            raw_max,
            QUANTIZED_DETECTION_THRESHOLD
        );
    }

    let scores: Vec<f32> = match encoding {
        ScoreEncoding::Probability => raw.to_vec(),
        ScoreEncoding::Quantized => raw.iter().map(|&s| s / QUANTIZED_SCALE).collect(),
        ScoreEncoding::Logits => softmax(raw),
    };

    if let Some(position) = scores.iter().position(|s| !(0.0..=1.0).contains(s)) {
        return Err(ClassifyError::Validation(format!(
            "Score {} at index {} is outside [0, 1] as {:?}",
            raw[position], position, encoding
        )));
    }

    Ok(NormalizedScores {
        scores,
        encoding,
        raw_max,
    })
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return vec![];
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    // Rounding can push a quotient a hair past 1
    exps.into_iter().map(|e| (e / sum).clamp(0.0, 1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_dequantizes_large_max() {
        let raw = vec![10.0, 200.0, 5.0, 40.0];
        let normalized = normalize_scores(&raw, NormalizationMode::Auto).unwrap();

        assert_eq!(normalized.encoding, ScoreEncoding::Quantized);
        assert_eq!(normalized.raw_max, 200.0);
        for (n, r) in normalized.scores.iter().zip(&raw) {
            assert!((n - r / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_auto_passes_probabilities_through() {
        let raw = vec![0.05, 0.9, 0.05];
        let normalized = normalize_scores(&raw, NormalizationMode::Auto).unwrap();

        assert_eq!(normalized.encoding, ScoreEncoding::Probability);
        assert_eq!(normalized.scores, raw);
    }

    #[test]
    fn test_detection_threshold_is_exclusive() {
        assert_eq!(detect_encoding(&[1.1, 0.0]), ScoreEncoding::Probability);
        assert_eq!(detect_encoding(&[1.11, 0.0]), ScoreEncoding::Quantized);
    }

    #[test]
    fn test_explicit_modes_override_detection() {
        let quantized = normalize_scores(&[0.5, 1.0], NormalizationMode::AssumeQuantized).unwrap();
        assert_eq!(quantized.encoding, ScoreEncoding::Quantized);
        assert!((quantized.scores[1] - 1.0 / 255.0).abs() < 1e-6);

        let raw = normalize_scores(&[0.8, 0.2], NormalizationMode::AssumeRaw).unwrap();
        assert_eq!(raw.encoding, ScoreEncoding::Probability);
        assert_eq!(raw.scores, vec![0.8, 0.2]);

        let over = normalize_scores(&[200.0, 0.2], NormalizationMode::AssumeRaw);
        assert!(matches!(over, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        let negative = normalize_scores(&[-0.4, 0.5, 0.3], NormalizationMode::Auto);
        assert!(matches!(negative, Err(ClassifyError::Validation(_))));

        // Below the detection threshold, so still read as probabilities
        let slightly_over = normalize_scores(&[0.02, 1.08], NormalizationMode::Auto);
        assert!(matches!(slightly_over, Err(ClassifyError::Validation(_))));

        let quantized_negative = normalize_scores(&[200.0, -3.0], NormalizationMode::Auto);
        assert!(matches!(quantized_negative, Err(ClassifyError::Validation(_))));

        let quantized_over = normalize_scores(&[300.0, 2.0], NormalizationMode::AssumeQuantized);
        assert!(matches!(quantized_over, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_softmax_mode() {
        let normalized =
            normalize_scores(&[2.0, 1.0, 0.1], NormalizationMode::Softmax).unwrap();
        assert_eq!(normalized.encoding, ScoreEncoding::Logits);

        let sum: f32 = normalized.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(normalized.scores[0] > normalized.scores[1]);
        assert!(normalized.scores[1] > normalized.scores[2]);
    }

    #[test]
    fn test_softmax_large_logits_stay_finite() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_vector_rejected() {
        let result = normalize_scores(&[], NormalizationMode::Auto);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = normalize_scores(&[0.1, bad], NormalizationMode::AssumeRaw);
            assert!(
                matches!(result, Err(ClassifyError::Validation(_))),
                "{} should be rejected",
                bad
            );
        }
    }
}
