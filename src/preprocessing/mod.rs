//! Score preprocessing
//!
//! Utilities that bring raw oracle output into the [0, 1] probability domain
//! before ranking:
//! - Quantization detection and dequantization (uint8 backends)
//! - Softmax for logit-emitting backends

pub mod normalization;
