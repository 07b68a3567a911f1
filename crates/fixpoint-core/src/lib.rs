//! Fixed-point iteration driver for transformation pipelines.
//!
//! Given a mutable unit and a sub-pipeline of transformation steps, the
//! [`FixedPointDriver`] runs the sub-pipeline repeatedly until a full pass
//! reports no modification, or a configured iteration ceiling is hit. The
//! driver knows nothing about what the steps do: the only channel between
//! them is a set of out-of-band markers on the unit (see [`unit::markers`]).
//!
//! ## Usage
//!
//! ```rust
//! use fixpoint_core::{FixedPointDriver, JsonUnit};
//! use fixpoint_core::passes::simplification_pipeline;
//! use serde_json::json;
//!
//! let driver = FixedPointDriver::new(simplification_pipeline());
//!
//! // Each iteration peels one wrapper layer; the driver keeps going until
//! // a pass changes nothing.
//! let doc = json!({ "allOf": [{ "allOf": [{ "type": "string" }] }] });
//! let mut unit = JsonUnit::new(doc, "example.json");
//! driver.run(&mut unit).unwrap();
//!
//! assert_eq!(unit.into_payload(), json!({ "type": "string" }));
//! ```
//!
//! Hosts with their own execution engines implement
//! [`PipelineRunner`] directly instead of using the stock [`StepPipeline`].

pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod passes;
pub mod pipeline;
pub mod unit;

pub use capability::CapabilityRegistry;
pub use config::{DriverOptions, DEFAULT_MAX_ITERATIONS};
pub use driver::FixedPointDriver;
pub use error::FixedPointError;
pub use pipeline::{PipelineError, PipelineRunner, Step, StepOutcome, StepPipeline};
pub use unit::{markers, JsonUnit, MarkerValue, Unit};
