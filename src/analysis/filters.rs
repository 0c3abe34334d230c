//! Post-ranking filters
//!
//! Confidence filtering drops predictions below a minimum score. Geographic
//! and seasonal filters are accepted so callers can wire them through, but
//! they currently return the set unchanged: no species-range or phenology
//! data is bundled.

use super::result::PredictionSet;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keep predictions with `score >= min_score`
///
/// A `min_score` of 0 keeps everything.
pub fn filter_by_confidence(predictions: &PredictionSet, min_score: f32) -> PredictionSet {
    let filtered = predictions.retain_where(|p| p.score >= min_score);
    if filtered.len() != predictions.len() {
        log::debug!(
            "Confidence filter {:.3} kept {}/{} predictions",
            min_score,
            filtered.len(),
            predictions.len()
        );
    }
    filtered
}

/// Observation location for range filtering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicFilter {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Search radius in kilometres
    pub radius_km: f64,
}

/// Meteorological season (northern hemisphere)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to May
    Spring,
    /// June to August
    Summer,
    /// September to November
    Autumn,
    /// December to February
    Winter,
}

impl Season {
    /// Season containing a calendar date
    ///
    /// ```
    /// use bloom_rank::analysis::filters::Season;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    /// assert_eq!(Season::from_date(date), Season::Spring);
    /// ```
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Season of today's UTC date
    pub fn current() -> Self {
        Self::from_date(chrono::Utc::now().date_naive())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        };
        f.write_str(name)
    }
}

/// Restrict predictions to species recorded near a location (currently a no-op)
pub fn filter_by_geography(predictions: &PredictionSet, filter: &GeographicFilter) -> PredictionSet {
    log::debug!(
        "Geographic filter ({:.4}, {:.4}, {} km) has no range data; returning {} predictions unchanged",
        filter.latitude,
        filter.longitude,
        filter.radius_km,
        predictions.len()
    );
    predictions.clone()
}

/// Restrict predictions to species active in a season (currently a no-op)
pub fn filter_by_season(predictions: &PredictionSet, season: Season) -> PredictionSet {
    log::debug!(
        "Season filter '{}' has no phenology data; returning {} predictions unchanged",
        season,
        predictions.len()
    );
    predictions.clone()
}
