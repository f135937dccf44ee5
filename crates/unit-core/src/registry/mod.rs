//! # Unit Registry
//!
//! Maps a kind key (`GoPackage`, `rubygem`, ...) to the code that turns
//! configuration data into a `SourceUnit` of that kind.
//!
//! The registry is an ordinary value owned by the application. Toolchains do
//! not register themselves when loaded; the startup sequence calls each
//! toolchain's `register` function with the registry it wants filled:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                UnitRegistry                  │
//! │                                              │
//! │  "GoPackage" ──→ decode::<GoPackage>         │
//! │  "rubygem"   ──→ decode::<RubyGem>           │
//! │  "ruby"      ──→ decode::<RubyScripts>       │
//! │                                              │
//! │  duplicate key ──→ DuplicatePolicy           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Lookups take a shared lock so an `Arc<UnitRegistry>` can be handed to
//! readers once startup is done.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{SourceUnit, SourceUnitRecord, UnitKind};
use crate::error::UnitError;

/// What `register` does when the kind key is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first registration and return `UnitError::DuplicateKind`.
    #[default]
    Reject,
    /// Overwrite the earlier registration.
    Replace,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "error" => Ok(Self::Reject),
            "replace" | "overwrite" => Ok(Self::Replace),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

/// Key naming the unit kind inside a unit table.
pub const TYPE_KEY: &str = "type";

type BoxedUnit = Box<dyn SourceUnit>;

/// Split a unit table into its kind and the remaining fields.
pub fn split_entry(mut table: toml::Table) -> Result<(String, toml::Table), UnitError> {
    match table.remove(TYPE_KEY) {
        Some(toml::Value::String(kind)) => Ok((kind, table)),
        _ => Err(UnitError::MissingKind { key: TYPE_KEY }),
    }
}

/// Monomorphized decoders for one unit kind.
#[derive(Clone, Copy)]
struct Decoder {
    from_toml: fn(toml::Value) -> Result<BoxedUnit, String>,
    from_json: fn(serde_json::Value) -> Result<BoxedUnit, String>,
}

impl Decoder {
    fn of<T>() -> Self
    where
        T: SourceUnit + DeserializeOwned + 'static,
    {
        Self {
            from_toml: decode_toml::<T>,
            from_json: decode_json::<T>,
        }
    }
}

fn decode_toml<T>(value: toml::Value) -> Result<BoxedUnit, String>
where
    T: SourceUnit + DeserializeOwned + 'static,
{
    T::deserialize(value)
        .map(|unit| Box::new(unit) as BoxedUnit)
        .map_err(|e| e.to_string())
}

fn decode_json<T>(value: serde_json::Value) -> Result<BoxedUnit, String>
where
    T: SourceUnit + DeserializeOwned + 'static,
{
    serde_json::from_value::<T>(value)
        .map(|unit| Box::new(unit) as BoxedUnit)
        .map_err(|e| e.to_string())
}

/// The central unit-kind registry.
pub struct UnitRegistry {
    decoders: RwLock<HashMap<UnitKind, Decoder>>,
    policy: DuplicatePolicy,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitRegistry")
            .field("kinds", &self.kinds())
            .field("policy", &self.policy)
            .finish()
    }
}

impl UnitRegistry {
    /// Create an empty registry.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            decoders: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register unit type `T` under `kind`.
    pub fn register<T>(&self, kind: &str) -> Result<(), UnitError>
    where
        T: SourceUnit + DeserializeOwned + 'static,
    {
        let key = UnitKind::new(kind);
        let mut decoders = self.decoders.write();

        if decoders.contains_key(&key) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    warn!("[Registry] Rejecting duplicate unit kind: {}", kind);
                    return Err(UnitError::DuplicateKind {
                        kind: kind.to_string(),
                    });
                }
                DuplicatePolicy::Replace => {
                    warn!("[Registry] Replacing unit kind: {}", kind);
                }
            }
        } else {
            info!("[Registry] Registering unit kind: {}", kind);
        }

        decoders.insert(key, Decoder::of::<T>());
        Ok(())
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.decoders.read().contains_key(&UnitKind::new(kind))
    }

    /// Registered kind keys, sorted.
    pub fn kinds(&self) -> Vec<UnitKind> {
        let mut kinds: Vec<_> = self.decoders.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.decoders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.read().is_empty()
    }

    fn decoder(&self, kind: &str) -> Result<Decoder, UnitError> {
        self.decoders
            .read()
            .get(&UnitKind::new(kind))
            .copied()
            .ok_or_else(|| UnitError::UnknownKind {
                kind: kind.to_string(),
            })
    }

    /// Build a unit of `kind` from TOML fields.
    pub fn decode(&self, kind: &str, value: toml::Value) -> Result<BoxedUnit, UnitError> {
        let decoder = self.decoder(kind)?;
        debug!("[Registry] Decoding {} unit", kind);
        (decoder.from_toml)(value).map_err(|reason| UnitError::Decode {
            kind: kind.to_string(),
            reason,
        })
    }

    /// Build a unit from a table whose `type` key names the kind.
    pub fn decode_entry(&self, table: toml::Table) -> Result<BoxedUnit, UnitError> {
        let (kind, fields) = split_entry(table)?;
        self.decode(&kind, toml::Value::Table(fields))
    }

    /// Build a unit from a scanner record's `Data` field.
    pub fn decode_record(&self, record: &SourceUnitRecord) -> Result<BoxedUnit, UnitError> {
        let decoder = self.decoder(&record.kind)?;

        if record.data.is_null() {
            return Err(UnitError::MissingData {
                kind: record.kind.clone(),
                name: record.name.clone(),
            });
        }

        (decoder.from_json)(record.data.clone()).map_err(|reason| UnitError::Decode {
            kind: record.kind.clone(),
            reason,
        })
    }
}
