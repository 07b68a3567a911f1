//! Configuration for the fixed-point driver.

use serde::{Deserialize, Serialize};

/// Default iteration ceiling when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Options for a [`FixedPointDriver`](crate::FixedPointDriver).
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-iterations`). This
/// naming convention is part of the public API contract for config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DriverOptions {
    /// Maximum number of iterations before non-convergence becomes a fatal
    /// [`IterationLimitExceeded`](crate::FixedPointError::IterationLimitExceeded)
    /// error. Default: 10.
    pub max_iterations: usize,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_iterations() {
        assert_eq!(DriverOptions::default().max_iterations, 10);
    }

    #[test]
    fn test_driver_options_serde_round_trip() {
        let opts = DriverOptions { max_iterations: 25 };

        let json = serde_json::to_string(&opts).unwrap();

        // Verify kebab-case field names are in the JSON
        assert!(json.contains("\"max-iterations\""));

        let deserialized: DriverOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.max_iterations, 25);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let deserialized: DriverOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(deserialized.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
