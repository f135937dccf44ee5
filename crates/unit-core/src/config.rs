//! # Unit Configuration
//!
//! Loads unit definitions from a TOML file and turns them into `SourceUnit`s
//! through a `UnitRegistry`.
//!
//! ## Config File Format
//!
//! ```toml
//! [[unit]]
//! type = "GoPackage"
//! dir = "/src/foo"
//! import_path = "example.com/foo"
//!
//! [[unit]]
//! type = "rubygem"
//! name = "rack"
//! dir = "vendor/rack"
//! ```
//!
//! The `type` key selects the registered kind; every other key is handed to
//! that kind's decoder.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::SourceUnit;
use crate::error::UnitError;
use crate::registry::{split_entry, UnitRegistry};

pub use crate::registry::TYPE_KEY;

/// Errors that can occur during unit config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse unit config: {0}")]
    Parse(String),

    #[error("Unit #{index} has no `type` key")]
    MissingType { index: usize },

    #[error("Unit #{index}: {source}")]
    Unit {
        index: usize,
        #[source]
        source: UnitError,
    },
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    unit: Vec<toml::Table>,
}

/// One `[[unit]]` table, split into its kind and remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    pub kind: String,
    pub fields: toml::Table,
}

/// Parsed contents of a units file.
#[derive(Debug, Clone, Default)]
pub struct UnitsFile {
    tables: Vec<toml::Table>,
}

impl UnitsFile {
    /// Load unit definitions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        let file = Self::parse(&content)?;
        info!(
            "Loaded {} unit definitions from {}",
            file.len(),
            path.as_ref().display()
        );
        Ok(file)
    }

    /// Parse unit definitions from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(index) = file
            .unit
            .iter()
            .position(|table| !matches!(table.get(TYPE_KEY), Some(toml::Value::String(_))))
        {
            return Err(ConfigError::MissingType { index });
        }

        Ok(Self { tables: file.unit })
    }

    /// Every entry split into kind and fields.
    pub fn entries(&self) -> Vec<UnitEntry> {
        self.tables
            .iter()
            .filter_map(|table| split_entry(table.clone()).ok())
            .map(|(kind, fields)| UnitEntry { kind, fields })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Decode every entry, stopping at the first one the registry rejects.
    pub fn resolve(&self, registry: &UnitRegistry) -> Result<Vec<Box<dyn SourceUnit>>, ConfigError> {
        self.tables
            .iter()
            .enumerate()
            .map(|(index, table)| {
                registry
                    .decode_entry(table.clone())
                    .map_err(|source| ConfigError::Unit { index, source })
            })
            .collect()
    }
}
