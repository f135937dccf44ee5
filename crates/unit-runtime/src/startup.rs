//! # Startup Sequence
//!
//! 1. Load configuration (defaults → env → CLI flags)
//! 2. Initialize logging
//! 3. Create the `UnitRegistry` with the configured duplicate policy
//! 4. Register toolchains in a fixed order: Go, then Ruby
//! 5. Dispatch the command
//!
//! Registration happens here and only here. Toolchain crates expose a
//! `register` function and never touch a registry on their own.

use std::sync::Arc;

use tracing::info;
use unit_core::{Scanner, UnitError, UnitRegistry};

use crate::config::RuntimeConfig;

/// Toolchains a scan can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Toolchain {
    Go,
    Ruby,
    #[default]
    All,
}

/// Build the registry and register every toolchain.
pub fn build_registry(config: &RuntimeConfig) -> Result<Arc<UnitRegistry>, UnitError> {
    let registry = UnitRegistry::new(config.duplicate_policy);

    tc_01_golang::register(&registry)?;
    tc_02_ruby::register(&registry)?;

    info!(
        "[Startup] Registered {} unit kinds (duplicate policy: {})",
        registry.len(),
        registry.policy()
    );
    Ok(Arc::new(registry))
}

/// Scanners for the selected toolchain, in output order.
pub fn scanners(selection: Toolchain) -> Vec<Box<dyn Scanner>> {
    let mut scanners: Vec<Box<dyn Scanner>> = Vec::new();

    if matches!(selection, Toolchain::Go | Toolchain::All) {
        scanners.push(Box::new(tc_01_golang::GoScanner::new()));
    }
    if matches!(selection, Toolchain::Ruby | Toolchain::All) {
        scanners.push(Box::new(tc_02_ruby::RubyScanner::new()));
    }

    scanners
}

#[cfg(test)]
mod tests {
    use super::*;
    use unit_core::DuplicatePolicy;

    #[test]
    fn test_build_registry_registers_all_kinds() {
        let registry = build_registry(&RuntimeConfig::default()).unwrap();

        let kinds: Vec<_> = registry.kinds().iter().map(|k| k.to_string()).collect();
        assert_eq!(kinds, vec!["GoPackage", "ruby", "rubygem"]);
        assert_eq!(registry.policy(), DuplicatePolicy::Reject);
    }

    #[test]
    fn test_registry_rejects_late_duplicate() {
        let registry = build_registry(&RuntimeConfig::default()).unwrap();
        assert!(matches!(
            tc_01_golang::register(&registry),
            Err(UnitError::DuplicateKind { .. })
        ));
    }

    #[test]
    fn test_scanner_selection() {
        let names = |sel| {
            scanners(sel)
                .iter()
                .map(|s| s.toolchain())
                .collect::<Vec<_>>()
        };

        assert_eq!(names(Toolchain::All), vec!["go", "ruby"]);
        assert_eq!(names(Toolchain::Go), vec!["go"]);
        assert_eq!(names(Toolchain::Ruby), vec!["ruby"]);
    }
}
