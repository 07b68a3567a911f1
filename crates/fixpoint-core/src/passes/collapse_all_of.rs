//! Collapse singleton `allOf` wrappers.
//!
//! `{ "allOf": [X] }` constrains exactly as much as `X` merged into its
//! parent, so the wrapper is spliced away. Only the outermost occurrence
//! along each path is collapsed per application — a splice can expose a new
//! singleton underneath, which the next fixed-point iteration picks up.
//! Sibling keys on the parent win over keys from the spliced schema.

use serde_json::Value;

use crate::capability::CapabilityRegistry;
use crate::pipeline::{PipelineError, Step, StepOutcome};
use crate::unit::JsonUnit;

pub struct CollapseAllOf;

impl Step<JsonUnit> for CollapseAllOf {
    fn name(&self) -> &str {
        "collapse-all-of"
    }

    fn apply(&self, unit: &mut JsonUnit) -> Result<StepOutcome, PipelineError> {
        let changed = collapse(unit.payload_mut());
        Ok(if changed {
            StepOutcome::Changed
        } else {
            StepOutcome::Unchanged
        })
    }

    fn declare_required_capabilities(&self, registry: &mut CapabilityRegistry) {
        registry.require("json");
    }
}

/// Splice the outermost singleton `allOf` wrappers in place.
/// Returns true if anything changed.
fn collapse(node: &mut Value) -> bool {
    match node {
        Value::Object(obj) => {
            let singleton = obj
                .get("allOf")
                .and_then(Value::as_array)
                .is_some_and(|branches| branches.len() == 1 && branches[0].is_object());

            if singleton {
                let Some(Value::Array(mut branches)) = obj.remove("allOf") else {
                    unreachable!("checked above");
                };
                let Value::Object(inner) = branches.remove(0) else {
                    unreachable!("checked above");
                };
                for (key, value) in inner {
                    // Sibling keywords on the wrapper take precedence.
                    obj.entry(key).or_insert(value);
                }
                // Do not descend into the spliced node: one layer per application.
                return true;
            }

            let mut changed = false;
            for value in obj.values_mut() {
                changed |= collapse(value);
            }
            changed
        }
        Value::Array(arr) => {
            let mut changed = false;
            for value in arr.iter_mut() {
                changed |= collapse(value);
            }
            changed
        }
        _ => false,
    }
}
