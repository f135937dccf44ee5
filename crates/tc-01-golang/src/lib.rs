//! # TC-01 Go Toolchain
//!
//! Go packages as source units.
//!
//! - `GoPackage`: A directory plus its import path, registered as `GoPackage`
//! - `GoScanner`: Finds every directory holding non-test `.go` files
//!
//! ## Registration
//!
//! The crate has no load-time side effects. Call `register` once from the
//! application's startup sequence:
//!
//! ```ignore
//! let registry = UnitRegistry::default();
//! tc_01_golang::register(&registry)?;
//! assert!(registry.is_registered("GoPackage"));
//! ```

pub mod package;
pub mod scanner;

pub use package::{GoPackage, GO_PACKAGE_KIND, ID_PREFIX};
pub use scanner::GoScanner;

use unit_core::{UnitError, UnitRegistry};

/// Register the `GoPackage` kind with `registry`.
///
/// # Errors
///
/// Fails if the key is taken and the registry rejects duplicates.
pub fn register(registry: &UnitRegistry) -> Result<(), UnitError> {
    registry.register::<GoPackage>(GO_PACKAGE_KIND)
}
