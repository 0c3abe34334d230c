//! Confidence banding
//!
//! Maps a normalized score to one of three discrete bands:
//!
//! | Band   | Score range        |
//! |--------|--------------------|
//! | High   | `score >= 0.70`    |
//! | Medium | `0.50 <= score < 0.70` |
//! | Low    | `score < 0.50`     |
//!
//! The thresholds are fixed; a band is always a pure function of the score.
//!
//! # Example
//!
//! ```
//! use bloom_rank::analysis::confidence::ConfidenceBand;
//!
//! assert_eq!(ConfidenceBand::from_score(0.70), ConfidenceBand::High);
//! assert_eq!(ConfidenceBand::from_score(0.50), ConfidenceBand::Medium);
//! assert_eq!(ConfidenceBand::from_score(0.49), ConfidenceBand::Low);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the High band
pub const HIGH_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Lower bound (inclusive) of the Medium band
pub const MEDIUM_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Discrete confidence band of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// Score below 0.5
    Low,
    /// Score in [0.5, 0.7)
    Medium,
    /// Score of at least 0.7
    High,
}

impl ConfidenceBand {
    /// Classify a normalized score
    ///
    /// # Arguments
    ///
    /// * `score` - Normalized score, expected in [0, 1]
    ///
    /// # Returns
    ///
    /// The band the score falls into. NaN falls into `Low`.
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceBand::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// Lowercase wire name ("high", "medium", "low")
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }

    /// Capitalized name for display ("High", "Medium", "Low")
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceBand::High => "High",
            ConfidenceBand::Medium => "Medium",
            ConfidenceBand::Low => "Low",
        }
    }

    /// Check if the band is High
    pub fn is_high(self) -> bool {
        self == ConfidenceBand::High
    }

    /// Check if the band is Medium
    pub fn is_medium(self) -> bool {
        self == ConfidenceBand::Medium
    }

    /// Check if the band is Low
    pub fn is_low(self) -> bool {
        self == ConfidenceBand::Low
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
