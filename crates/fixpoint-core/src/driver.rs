//! The fixed-point iteration loop.
//!
//! Runs a sub-pipeline over a unit until a full pass reports no modification
//! or the configured iteration ceiling is hit. There is no direct coupling
//! between the driver and the steps it iterates: at the start of each
//! iteration the driver clears the `fixpoint.modified` marker on the unit;
//! any step that mutates the unit sets it again. If the marker is still
//! absent when the sub-pipeline returns, iteration terminates.

use crate::capability::CapabilityRegistry;
use crate::config::DriverOptions;
use crate::error::FixedPointError;
use crate::pipeline::PipelineRunner;
use crate::unit::{markers, MarkerValue, Unit};

/// Iterates a sub-pipeline to a fixed point.
///
/// The runner is configured once at construction and reused across
/// iterations and across units; `run` takes `&self`, so one driver may
/// serve multiple threads as long as each unit is exclusively borrowed.
///
/// ## Example
///
/// ```rust
/// use fixpoint_core::{FixedPointDriver, JsonUnit};
/// use fixpoint_core::passes::simplification_pipeline;
/// use serde_json::json;
///
/// let driver = FixedPointDriver::new(simplification_pipeline());
/// let mut unit = JsonUnit::new(json!({ "allOf": [{ "type": "string" }] }), "doc.json");
/// driver.run(&mut unit).unwrap();
/// assert_eq!(unit.into_payload(), json!({ "type": "string" }));
/// ```
pub struct FixedPointDriver<R> {
    runner: R,
    options: DriverOptions,
}

impl<R> FixedPointDriver<R> {
    /// Construct a driver with the default iteration ceiling
    /// ([`DEFAULT_MAX_ITERATIONS`](crate::config::DEFAULT_MAX_ITERATIONS)).
    pub fn new(runner: R) -> Self {
        Self::with_options(runner, DriverOptions::default())
    }

    pub fn with_options(runner: R, options: DriverOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Everything the configured sub-pipeline needs from the host
    /// environment, aggregated at configuration time.
    pub fn required_capabilities<U: Unit>(&self) -> CapabilityRegistry
    where
        R: PipelineRunner<U>,
    {
        let mut registry = CapabilityRegistry::new();
        self.runner.declare_required_capabilities(&mut registry);
        registry
    }

    /// Run the sub-pipeline over `unit` until it converges.
    ///
    /// Converges when a full sub-pipeline pass leaves the `fixpoint.modified`
    /// marker unset; fails with
    /// [`IterationLimitExceeded`](FixedPointError::IterationLimitExceeded)
    /// after `max_iterations` attempts without convergence (the unit keeps
    /// its partially-transformed state — there is no rollback), or with
    /// [`SubPipeline`](FixedPointError::SubPipeline) if the runner itself
    /// fails. The `fixpoint.guard` marker is removed on every exit path.
    pub fn run<U: Unit>(&self, unit: &mut U) -> Result<(), FixedPointError>
    where
        R: PipelineRunner<U>,
    {
        // Checked before any other state change; the guard itself is left
        // untouched so the outer invocation still owns it.
        if unit.has_marker(markers::GUARD) {
            return Err(FixedPointError::NestedInvocation {
                location: unit.location().to_string(),
            });
        }
        unit.set_marker(markers::GUARD, MarkerValue::Flag);

        for i in 0..self.options.max_iterations {
            unit.set_marker(markers::ITERATION, MarkerValue::Index(i));
            unit.remove_marker(markers::MODIFIED);

            tracing::debug!(iteration = i, unit = unit.location(), "running sub-pipeline");

            if let Err(source) = self.runner.run(unit) {
                unit.remove_marker(markers::GUARD);
                return Err(FixedPointError::SubPipeline {
                    iteration: i,
                    location: unit.location().to_string(),
                    source,
                });
            }

            if !unit.has_marker(markers::MODIFIED) {
                // Normal exit: converged.
                unit.remove_marker(markers::GUARD);
                unit.remove_marker(markers::ITERATION);
                tracing::debug!(
                    iterations = i + 1,
                    unit = unit.location(),
                    "pipeline reached fixed point"
                );
                return Ok(());
            }
        }

        // Abnormal exit: iteration count exceeded. The iteration marker is
        // left behind as a breadcrumb; the guard never outlives the call.
        unit.remove_marker(markers::GUARD);
        tracing::warn!(
            limit = self.options.max_iterations,
            unit = unit.location(),
            "fixed point pipeline did not converge"
        );
        Err(FixedPointError::IterationLimitExceeded {
            limit: self.options.max_iterations,
            location: unit.location().to_string(),
        })
    }
}
