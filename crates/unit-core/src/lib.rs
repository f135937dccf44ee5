//! # Unit Core
//!
//! Shared vocabulary for every source-unit toolchain.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure data, no I/O
//!   - `SourceUnit`: The contract every unit kind implements
//!   - `SourceUnitRecord`: Scanner output as written to stdout
//!   - `display_name`: Final-path-segment rule shared by all kinds
//!
//! - **Registry** (`registry/`): Kind key → decoder table
//!   - `UnitRegistry`: Owned by the application, filled at startup
//!   - `DuplicatePolicy`: What happens when a kind key is registered twice
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `Scanner`: Driving port implemented by each toolchain
//!
//! - **Config** (`config`): `[[unit]]` tables loaded from TOML
//!
//! ## Startup
//!
//! Nothing registers itself. The application builds a registry and calls
//! each toolchain's `register` function explicitly:
//!
//! ```ignore
//! use unit_core::{DuplicatePolicy, UnitRegistry};
//!
//! let registry = UnitRegistry::new(DuplicatePolicy::Reject);
//! tc_01_golang::register(&registry)?;
//! tc_02_ruby::register(&registry)?;
//!
//! let units = UnitsFile::load("units.toml")?.resolve(&registry)?;
//! for unit in &units {
//!     println!("{} {}", unit.id(), unit.root_dir());
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;

// Re-exports for convenience
pub use config::{ConfigError, UnitEntry, UnitsFile};
pub use domain::{
    display_name, sort_records, Dependency, SourceUnit, SourceUnitRecord, UnitKind,
};
pub use error::{ScanError, UnitError};
pub use ports::{ScanOptions, Scanner};
pub use registry::{DuplicatePolicy, UnitRegistry};
