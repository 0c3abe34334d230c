//! Stage timing for a single classification

use crate::config::ClassifyConfig;
use crate::error::Result;
use crate::labels::LabelTable;
use crate::ml::oracle::ScoreOracle;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall time per pipeline stage, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    /// Oracle call
    pub inference_ms: f32,
    /// Normalization, ranking, filtering and statistics
    pub postprocessing_ms: f32,
    /// Whole classification including buffer release
    pub total_ms: f32,
}

/// Classify one input and report how long each stage took
///
/// The classification result itself is discarded; use this to find out
/// whether the oracle or the post-processing dominates.
///
/// # Errors
///
/// Same as [`crate::classify_image`]
pub fn profile_classification<O: ScoreOracle>(
    oracle: &O,
    input: &O::Input,
    labels: &LabelTable,
    config: &ClassifyConfig,
) -> Result<PerformanceProfile> {
    let start = Instant::now();

    let buffer = oracle.infer(input)?;
    let inference_ms = start.elapsed().as_secs_f32() * 1000.0;

    let post_start = Instant::now();
    let result = crate::classify_scores(buffer.scores(), labels, config)?;
    let postprocessing_ms = post_start.elapsed().as_secs_f32() * 1000.0;
    drop(buffer);

    let profile = PerformanceProfile {
        inference_ms,
        postprocessing_ms,
        total_ms: start.elapsed().as_secs_f32() * 1000.0,
    };

    log::debug!(
        "Profiled {} predictions: inference={:.3}ms, post={:.3}ms, total={:.3}ms",
        result.predictions.len(),
        profile.inference_ms,
        profile.postprocessing_ms,
        profile.total_ms
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifyError;
    use crate::ml::oracle::{oracle_fn, ScoreBuffer};
    use std::time::Duration;

    #[test]
    fn test_inference_time_is_measured() {
        let oracle = oracle_fn(|_: &str| {
            std::thread::sleep(Duration::from_millis(5));
            Ok(ScoreBuffer::new(vec![0.2, 0.8]))
        });
        let profile = profile_classification(
            &oracle,
            "a.jpg",
            &LabelTable::unlabeled(2),
            &ClassifyConfig::default(),
        )
        .unwrap();

        assert!(profile.inference_ms >= 5.0);
        assert!(profile.postprocessing_ms >= 0.0);
        assert!(profile.total_ms >= profile.inference_ms + profile.postprocessing_ms - 1e-3);
    }

    #[test]
    fn test_errors_propagate() {
        let oracle = oracle_fn(|_: &str| Ok(ScoreBuffer::new(vec![0.2, 0.8, 0.0])));
        let result = profile_classification(
            &oracle,
            "a.jpg",
            &LabelTable::unlabeled(2),
            &ClassifyConfig::default(),
        );
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }
}
