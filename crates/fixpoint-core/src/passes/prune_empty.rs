//! Prune keywords that constrain nothing.
//!
//! Drops:
//! - empty `allOf` / `anyOf` / `oneOf` arrays
//! - empty `{}` branches inside `allOf` arrays (an empty schema admits
//!   everything, so the branch is vacuous)
//! - `required: []`
//! - empty `$defs` / `definitions` maps
//!
//! Removing a vacuous branch can leave a singleton `allOf` behind; the
//! collapse step picks that up on the next fixed-point iteration.

use serde_json::Value;

use crate::capability::CapabilityRegistry;
use crate::pipeline::{PipelineError, Step, StepOutcome};
use crate::unit::JsonUnit;

/// Array-valued keywords that are vacuous when empty.
const EMPTY_ARRAY_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "required"];

/// Object-valued keywords that are vacuous when empty.
const EMPTY_OBJECT_KEYWORDS: &[&str] = &["$defs", "definitions"];

pub struct PruneEmpty;

impl Step<JsonUnit> for PruneEmpty {
    fn name(&self) -> &str {
        "prune-empty"
    }

    fn apply(&self, unit: &mut JsonUnit) -> Result<StepOutcome, PipelineError> {
        let changed = prune(unit.payload_mut());
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

fn prune(node: &mut Value) -> bool {
    match node {
        Value::Object(obj) => {
            let mut changed = false;

            // Vacuous {} branches inside allOf.
            if let Some(Value::Array(branches)) = obj.get_mut("allOf") {
                let before = branches.len();
                branches.retain(|b| b.as_object().map(|o| !o.is_empty()).unwrap_or(true));
                changed |= branches.len() != before;
            }

            for key in EMPTY_ARRAY_KEYWORDS {
                if obj.get(*key).and_then(Value::as_array).is_some_and(Vec::is_empty) {
                    obj.remove(*key);
                    changed = true;
                }
            }

            for key in EMPTY_OBJECT_KEYWORDS {
                if obj
                    .get(*key)
                    .and_then(Value::as_object)
                    .is_some_and(|m| m.is_empty())
                {
                    obj.remove(*key);
                    changed = true;
                }
            }

            for value in obj.values_mut() {
                changed |= prune(value);
            }
            changed
        }
        Value::Array(arr) => {
            let mut changed = false;
            for value in arr.iter_mut() {
                changed |= prune(value);
            }
            changed
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(payload: Value) -> (Value, StepOutcome) {
        let mut unit = JsonUnit::new(payload, "test://doc");
        let outcome = PruneEmpty.apply(&mut unit).unwrap();
        (unit.into_payload(), outcome)
    }

    // -----------------------------------------------------------------------
    // Empty composition keywords are dropped
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_keywords_dropped() {
        let (output, outcome) = run(json!({
            "type": "object",
            "allOf": [],
            "anyOf": [],
            "required": [],
            "$defs": {}
        }));

        assert_eq!(output, json!({ "type": "object" }));
        assert_eq!(outcome, StepOutcome::Changed);
    }

    // -----------------------------------------------------------------------
    // Vacuous {} branches inside allOf are removed, others kept
    // -----------------------------------------------------------------------
    #[test]
    fn test_vacuous_all_of_branch_removed() {
        let (output, outcome) = run(json!({
            "allOf": [{}, { "type": "object" }]
        }));

        assert_eq!(output, json!({ "allOf": [{ "type": "object" }] }));
        assert_eq!(outcome, StepOutcome::Changed);
    }

    // -----------------------------------------------------------------------
    // Non-empty keywords survive
    // -----------------------------------------------------------------------
    #[test]
    fn test_non_empty_untouched() {
        let input = json!({
            "required": ["name"],
            "anyOf": [{ "type": "string" }],
            "$defs": { "Foo": { "type": "integer" } }
        });
        let (output, outcome) = run(input.clone());

        assert_eq!(output, input);
        assert_eq!(outcome, StepOutcome::Unchanged);
    }

    // -----------------------------------------------------------------------
    // Pruning recurses into nested schemas
    // -----------------------------------------------------------------------
    #[test]
    fn test_recurses_into_children() {
        let (output, outcome) = run(json!({
            "properties": {
                "a": { "type": "array", "oneOf": [] }
            }
        }));

        assert_eq!(outcome, StepOutcome::Changed);
        assert_eq!(output["properties"]["a"], json!({ "type": "array" }));
    }

    // -----------------------------------------------------------------------
    // Boolean branches in allOf are not mistaken for vacuous objects
    // -----------------------------------------------------------------------
    #[test]
    fn test_boolean_branch_kept() {
        let input = json!({ "allOf": [false, { "type": "string" }] });
        let (output, outcome) = run(input.clone());

        assert_eq!(output, input);
        assert_eq!(outcome, StepOutcome::Unchanged);
    }
}
