//! Region analysis for the subdivision engine

/// Average color and error scoring of rectangular regions
pub mod scoring;

pub use scoring::{ScoredRegion, score_region};
