//! Demo simplification steps over JSON documents.
//!
//! These are the stock payload for the fixed-point driver: each step
//! rewrites one structural layer per application, so a nested document
//! genuinely needs several iterations to reach its fixed point.

pub mod collapse_all_of;
pub mod prune_empty;

use crate::pipeline::StepPipeline;
use crate::unit::JsonUnit;

pub use collapse_all_of::CollapseAllOf;
pub use prune_empty::PruneEmpty;

/// The stock JSON-simplification pipeline: collapse, then prune.
pub fn simplification_pipeline() -> StepPipeline<JsonUnit> {
    StepPipeline::new()
        .with_step(CollapseAllOf)
        .with_step(PruneEmpty)
}
