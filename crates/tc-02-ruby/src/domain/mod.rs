//! Domain Layer - Ruby unit kinds and dependency rules
//!
//! RULES:
//! - No I/O operations
//! - Pure functions where possible

pub mod dependency;
pub mod units;

pub use dependency::{runtime_pairs, DeclaredDependency, DependencyType, DEFAULT_REQUIREMENT};
pub use units::{RubyGem, RubyScripts, RUBYGEM_KIND, RUBY_SCRIPTS_KIND};
