#![deny(missing_docs)]

//! # Load Options
//!
//! Configuration applied once when a document is loaded. The struct is
//! serde-friendly so callers can embed it in their own config files.

use serde::{Deserialize, Serialize};

/// Default cap on reference expansion passes.
pub const DEFAULT_MAX_EXPANSION_PASSES: usize = 10_000;

/// Options controlling how a document is loaded and how schemas are synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Inline every same-document `$ref` before dialect detection.
    pub expand_references: bool,
    /// Inject `minLength: 1` into required string parameters lacking one.
    pub inject_min_length: bool,
    /// Record the original pointer under `x-original-ref` on each expanded object.
    pub annotate_references: bool,
    /// Upper bound on expansion passes (one reference is inlined per pass).
    pub max_expansion_passes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            expand_references: true,
            inject_min_length: false,
            annotate_references: false,
            max_expansion_passes: DEFAULT_MAX_EXPANSION_PASSES,
        }
    }
}

impl LoadOptions {
    /// Sets whether references are expanded.
    pub fn with_expand_references(mut self, enabled: bool) -> Self {
        self.expand_references = enabled;
        self
    }

    /// Sets whether required string parameters receive `minLength: 1`.
    pub fn with_inject_min_length(mut self, enabled: bool) -> Self {
        self.inject_min_length = enabled;
        self
    }

    /// Sets whether expanded objects are annotated with their source pointer.
    pub fn with_annotate_references(mut self, enabled: bool) -> Self {
        self.annotate_references = enabled;
        self
    }

    /// Sets the expansion pass budget.
    pub fn with_max_expansion_passes(mut self, passes: usize) -> Self {
        self.max_expansion_passes = passes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_expand_without_hardening() {
        let opts = LoadOptions::default();
        assert!(opts.expand_references);
        assert!(!opts.inject_min_length);
        assert!(!opts.annotate_references);
        assert_eq!(opts.max_expansion_passes, DEFAULT_MAX_EXPANSION_PASSES);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let opts: LoadOptions = serde_yaml::from_str("inject_min_length: true\n").unwrap();
        assert!(opts.inject_min_length);
        assert!(opts.expand_references);
        assert_eq!(opts.max_expansion_passes, DEFAULT_MAX_EXPANSION_PASSES);
    }

    #[test]
    fn test_builder_setters() {
        let opts = LoadOptions::default()
            .with_expand_references(false)
            .with_max_expansion_passes(3);
        assert!(!opts.expand_references);
        assert_eq!(opts.max_expansion_passes, 3);
    }
}
