//! # TC-02 Ruby Toolchain
//!
//! Discovers Ruby gems and loose Ruby scripts in a directory tree.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Unit kinds and dependency rules
//!   - `RubyGem`: One gem, rooted at the directory of its `.gemspec`
//!   - `RubyScripts`: Every `.rb` file no gem claims
//!   - `DeclaredDependency`: A dependency plus its type and groups
//!
//! - **Readers** (`gemspec`, `gemfile`): Textual extraction of gem metadata.
//!   Ruby is never executed; only literal strings are recognised.
//!
//! - **Scanner** (`scanner`): `RubyScanner` implements `unit_core::Scanner`
//!
//! ## Dependency Filtering
//!
//! - Development dependencies of a gemspec are dropped
//! - Gemfile entries in a `:development` or `:test` group are dropped
//!
//! ## Registration
//!
//! ```ignore
//! let registry = UnitRegistry::default();
//! tc_02_ruby::register(&registry)?;
//! assert!(registry.is_registered("rubygem"));
//! assert!(registry.is_registered("ruby"));
//! ```

pub mod domain;
pub mod gemfile;
pub mod gemspec;
pub mod scanner;

pub use domain::{
    DeclaredDependency, DependencyType, RubyGem, RubyScripts, RUBYGEM_KIND, RUBY_SCRIPTS_KIND,
};
pub use gemfile::Gemfile;
pub use gemspec::Gemspec;
pub use scanner::{RubyScanner, RUBY_STDLIB_REPO};

use unit_core::{UnitError, UnitRegistry};

/// Register the `rubygem` and `ruby` kinds with `registry`.
///
/// # Errors
///
/// Fails on the first key the registry refuses.
pub fn register(registry: &UnitRegistry) -> Result<(), UnitError> {
    registry.register::<RubyGem>(RUBYGEM_KIND)?;
    registry.register::<RubyScripts>(RUBY_SCRIPTS_KIND)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_both_kinds() {
        let registry = UnitRegistry::default();
        register(&registry).unwrap();

        let kinds: Vec<_> = registry.kinds().iter().map(|k| k.to_string()).collect();
        assert_eq!(kinds, vec!["ruby", "rubygem"]);
    }
}
