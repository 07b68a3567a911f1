//! Error types for fixed-point iteration.

use thiserror::Error;

use crate::pipeline::PipelineError;

/// Errors surfaced by [`FixedPointDriver::run`](crate::FixedPointDriver::run).
///
/// The three variants are deliberately distinct so tooling can report
/// "pipeline diverged" differently from "pipeline is broken" differently
/// from "reentrancy bug".
#[derive(Debug, Error)]
pub enum FixedPointError {
    /// The unit already carried the iteration guard at entry. Indicates a
    /// caller bug (reentrant use on the same unit); never retryable.
    #[error("nested fixed point pipelines not supported (unit at {location})")]
    NestedInvocation { location: String },

    /// The sub-pipeline itself failed during some iteration. The underlying
    /// error is forwarded unchanged; `iteration` is the 0-based index of the
    /// iteration that failed.
    #[error("sub-pipeline failed on iteration {iteration} (unit at {location}): {source}")]
    SubPipeline {
        iteration: usize,
        location: String,
        #[source]
        source: PipelineError,
    },

    /// No convergence within the configured bound. The unit keeps whatever
    /// partially-transformed state the last iteration left it in.
    #[error("maximum iteration count ({limit}) exceeded in fixed point pipeline (unit at {location})")]
    IterationLimitExceeded { limit: usize, location: String },
}
