//! Ports Layer - Trait definitions
//!
//! - `Scanner`: Driving port implemented by each toolchain crate

pub mod scanner;

pub use scanner::{ScanOptions, Scanner};
