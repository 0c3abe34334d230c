//! Configuration parameters for classification post-processing

use crate::error::{ClassifyError, Result};
use crate::labels::ModelVariant;
use crate::preprocessing::normalization::NormalizationMode;
use serde::{Deserialize, Serialize};

/// Classification configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Number of predictions to keep per image (default: 5)
    pub top_k: usize,

    /// Minimum normalized score a prediction needs to be reported (default: 0.0)
    /// Applied after ranking, so fewer than `top_k` predictions may remain
    pub min_confidence: f32,

    /// How raw oracle scores are interpreted (default: Auto)
    pub normalization: NormalizationMode,

    /// Model variant the scores come from (default: Inaturalist)
    /// Informational only: it is copied into result metadata and never checked
    /// against the label table, which alone defines the class domain
    pub variant: ModelVariant,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_confidence: 0.0,
            normalization: NormalizationMode::Auto,
            variant: ModelVariant::Inaturalist,
        }
    }
}

impl ClassifyConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::Validation` if `top_k` is 0 or
    /// `min_confidence` is outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.top_k < 1 {
            return Err(ClassifyError::Validation(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ClassifyError::Validation(format!(
                "min_confidence {} is outside [0, 1]",
                self.min_confidence
            )));
        }
        Ok(())
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClassifyError::Validation(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ClassifyConfig::default();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.normalization, NormalizationMode::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClassifyConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClassifyConfig {
            min_confidence: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            ClassifyConfig::from_json(r#"{"top_k": 3, "normalization": "AssumeQuantized"}"#)
                .unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.normalization, NormalizationMode::AssumeQuantized);
        assert_eq!(config.variant, ModelVariant::Inaturalist);
        assert_eq!(config.min_confidence, 0.0);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(ClassifyConfig::from_json(r#"{"top_k": 0}"#).is_err());
        assert!(ClassifyConfig::from_json("not json").is_err());
    }
}
