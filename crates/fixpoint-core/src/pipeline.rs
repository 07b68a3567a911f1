//! Sub-pipeline contract and the stock ordered-step runner.
//!
//! The driver only requires [`PipelineRunner`]: an opaque "run everything
//! once against this unit" call plus a capability declaration hook. Hosts
//! with their own execution engines implement the trait directly.
//! [`StepPipeline`] is the stock implementation — an ordered list of boxed
//! [`Step`]s, each reporting whether it changed the unit.

use std::error::Error as StdError;

use thiserror::Error;

use crate::capability::CapabilityRegistry;
use crate::unit::Unit;

/// Opaque failure produced by a sub-pipeline or one of its steps.
///
/// The driver forwards these unchanged; only the step that produced one
/// knows what it means.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PipelineError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl PipelineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Executes an ordered sequence of transformation steps against a unit.
///
/// Implementations must be stateless per unit: the same runner is reused
/// across iterations and across different units, possibly concurrently
/// (hence the `&self` receiver).
pub trait PipelineRunner<U: Unit> {
    /// Run the whole sub-pipeline once. Steps that mutate the unit must call
    /// [`Unit::mark_modified`] so the driver knows to keep iterating.
    fn run(&self, unit: &mut U) -> Result<(), PipelineError>;

    /// Declare everything this pipeline needs from the host environment.
    fn declare_required_capabilities(&self, _registry: &mut CapabilityRegistry) {}
}

/// Whether a step changed the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Changed,
    Unchanged,
}

/// A single transformation step in a [`StepPipeline`].
pub trait Step<U: Unit>: Send + Sync {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Apply the transformation once. Returning [`StepOutcome::Changed`]
    /// marks the unit as modified for the current iteration.
    fn apply(&self, unit: &mut U) -> Result<StepOutcome, PipelineError>;

    /// Declare host capabilities this step needs.
    fn declare_required_capabilities(&self, _registry: &mut CapabilityRegistry) {}
}

/// Stock runner: steps applied in registration order, stopping at the first
/// failure. An empty pipeline is legal and never marks the unit modified.
pub struct StepPipeline<U> {
    steps: Vec<Box<dyn Step<U>>>,
}

impl<U: Unit> StepPipeline<U> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Builder-style step registration.
    pub fn with_step(mut self, step: impl Step<U> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn push(&mut self, step: impl Step<U> + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<U: Unit> Default for StepPipeline<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> PipelineRunner<U> for StepPipeline<U> {
    fn run(&self, unit: &mut U) -> Result<(), PipelineError> {
        for step in &self.steps {
            match step.apply(unit)? {
                StepOutcome::Changed => {
                    tracing::debug!(step = step.name(), unit = unit.location(), "step modified unit");
                    unit.mark_modified();
                }
                StepOutcome::Unchanged => {}
            }
        }
        Ok(())
    }

    fn declare_required_capabilities(&self, registry: &mut CapabilityRegistry) {
        for step in &self.steps {
            step.declare_required_capabilities(registry);
        }
    }
}
