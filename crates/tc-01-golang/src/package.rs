//! The `GoPackage` unit

use serde::{Deserialize, Serialize};
use unit_core::{display_name, SourceUnit};

/// Kind key the Go package unit is registered under.
pub const GO_PACKAGE_KIND: &str = "GoPackage";

/// Namespace prefix of every Go package identifier.
pub const ID_PREFIX: &str = "go:";

/// One Go package: a directory and the import path it is known by.
///
/// Neither field is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoPackage {
    pub dir: String,
    pub import_path: String,
}

impl GoPackage {
    pub fn new(dir: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            import_path: import_path.into(),
        }
    }
}

impl SourceUnit for GoPackage {
    fn kind(&self) -> &'static str {
        GO_PACKAGE_KIND
    }

    fn id(&self) -> String {
        format!("{}{}", ID_PREFIX, self.import_path)
    }

    fn name(&self) -> String {
        display_name(&self.dir)
    }

    fn root_dir(&self) -> &str {
        &self.dir
    }

    fn paths(&self) -> Vec<String> {
        vec![self.dir.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_prefixed_import_path() {
        let pkg = GoPackage::new("/src/foo", "example.com/foo");
        assert_eq!(pkg.id(), "go:example.com/foo");

        let empty = GoPackage::new("/src/foo", "");
        assert_eq!(empty.id(), "go:");
    }

    #[test]
    fn test_root_dir_is_verbatim() {
        for dir in ["/src/foo", "/src/foo/", "", "relative/dir", "/"] {
            let pkg = GoPackage::new(dir, "example.com/foo");
            assert_eq!(pkg.root_dir(), dir);
        }
    }

    #[test]
    fn test_paths_is_single_dir() {
        let pkg = GoPackage::new("/src/foo/", "example.com/foo");
        assert_eq!(pkg.paths(), vec!["/src/foo/".to_string()]);

        let empty = GoPackage::new("", "x");
        assert_eq!(empty.paths(), vec![String::new()]);
    }

    #[test]
    fn test_name_is_last_segment() {
        assert_eq!(GoPackage::new("/src/foo", "p").name(), "foo");
        assert_eq!(GoPackage::new("/src/foo/", "p").name(), "foo");
        assert_eq!(GoPackage::new("", "p").name(), ".");
        assert_eq!(GoPackage::new("/", "p").name(), "/");
    }

    #[test]
    fn test_kind() {
        assert_eq!(GoPackage::default().kind(), "GoPackage");
    }

    #[test]
    fn test_serde_field_names() {
        let pkg = GoPackage::new("/src/foo", "example.com/foo");
        let json = serde_json::to_value(&pkg).unwrap();
        assert_eq!(json["dir"], "/src/foo");
        assert_eq!(json["import_path"], "example.com/foo");
    }
}
