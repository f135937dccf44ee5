//! # Unit Runtime Library
//!
//! This library exposes the internals of the `srcunit` binary for testing.
//! The main entry point is `main.rs`.
//!
//! - `config` - Runtime configuration from env and flags
//! - `startup` - Registry construction and toolchain registration
//! - `cli` - Command-line definition
//! - `commands` - `scan`, `units` and `kinds` handlers
//! - `logging` - Subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod startup;

pub use cli::{Cli, Command};
pub use config::RuntimeConfig;
pub use startup::{build_registry, scanners, Toolchain};
