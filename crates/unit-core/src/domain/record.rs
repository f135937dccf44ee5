//! Scanner output records
//!
//! Scanners describe each unit they discover with a `SourceUnitRecord`. The
//! records are serialized as a JSON array with PascalCase keys:
//!
//! ```json
//! {
//!   "Name": "example.com/foo",
//!   "Type": "GoPackage",
//!   "Dir": "foo",
//!   "Files": ["foo/foo.go"],
//!   "Dependencies": null,
//!   "Data": {"dir": "foo", "import_path": "example.com/foo"},
//!   "Ops": {"depresolve": null, "graph": null}
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A `[name, requirement]` pair, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency(pub String, pub String);

impl Dependency {
    pub fn new(name: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self(name.into(), requirement.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn requirement(&self) -> &str {
        &self.1
    }
}

/// One discovered source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceUnitRecord {
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
    #[serde(default)]
    pub files: Vec<String>,
    /// `None` serializes as `null` when the toolchain has no dependency source.
    #[serde(default)]
    pub dependencies: Option<Vec<Dependency>>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default = "default_ops")]
    pub ops: BTreeMap<String, serde_json::Value>,
}

/// Operations every toolchain advertises for its units.
pub fn default_ops() -> BTreeMap<String, serde_json::Value> {
    ["depresolve", "graph"]
        .into_iter()
        .map(|op| (op.to_string(), serde_json::Value::Null))
        .collect()
}

impl SourceUnitRecord {
    /// Create a record with no files, dependencies or data.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            dir: dir.into(),
            license: None,
            licenses: None,
            files: Vec::new(),
            dependencies: None,
            data: serde_json::Value::Null,
            ops: default_ops(),
        }
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Dependencies are stored sorted.
    pub fn with_dependencies(mut self, mut deps: Vec<Dependency>) -> Self {
        deps.sort();
        self.dependencies = Some(deps);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Sort records by name for stable output.
pub fn sort_records(records: &mut [SourceUnitRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}
