//! Capability declaration for sub-pipelines.
//!
//! A pipeline declares, at configuration time, everything it needs from the
//! host environment (parsers, dialects, side tables — whatever the embedding
//! system calls them). The driver aggregates these so the host can validate
//! the configuration before any unit is run.

use std::collections::BTreeSet;

/// An ordered, deduplicated set of capability names.
///
/// `BTreeSet` keeps iteration order deterministic regardless of declaration
/// order, so diagnostics and `capabilities` listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRegistry {
    required: BTreeSet<String>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required capability. Duplicate declarations collapse.
    pub fn require(&mut self, name: impl Into<String>) {
        self.required.insert(name.into());
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Iterate capability names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_require_and_query() {
        let mut registry = CapabilityRegistry::new();
        registry.require("json");

        assert!(registry.is_required("json"));
        assert!(!registry.is_required("xml"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut registry = CapabilityRegistry::new();
        registry.require("json");
        registry.require("json");

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut registry = CapabilityRegistry::new();
        registry.require("zeta");
        registry.require("alpha");
        registry.require("mid");

        let names: Vec<&str> = registry.iter().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
