//! Model boundary
//!
//! The crate never runs a network itself. A [`ScoreOracle`] produces raw
//! scores wrapped in a [`ScoreBuffer`] guard; a [`ModelContext`] owns a lazily
//! loaded oracle together with the label table and configuration that belong
//! to it.

pub mod context;
pub mod oracle;

pub use context::ModelContext;
pub use oracle::{oracle_fn, FnOracle, ScoreBuffer, ScoreOracle};
