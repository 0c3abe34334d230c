//! Analysis modules
//!
//! Turns normalized scores into ranked, annotated results:
//! - Ranking (top-K with deterministic tie-break)
//! - Confidence banding
//! - Summary statistics
//! - Filtering
//! - Set comparison
//! - Result types

pub mod comparison;
pub mod confidence;
pub mod filters;
pub mod ranking;
pub mod result;
pub mod stats;
