//! Domain Layer - Unit contract and scanner records
//!
//! RULES:
//! - No I/O operations
//! - Projections are pure and total

pub mod record;
pub mod unit;

pub use record::{default_ops, sort_records, Dependency, SourceUnitRecord};
pub use unit::{display_name, SourceUnit, UnitKind};
