//! # GoPackage Through The Registry
//!
//! Go packages configured in TOML, decoded polymorphically next to another
//! unit kind.

use tc_01_golang::{register, GoPackage};
use unit_core::{SourceUnit, UnitRegistry, UnitsFile};

const UNITS: &str = r#"
[[unit]]
type = "GoPackage"
dir = "/src/foo"
import_path = "example.com/foo"

[[unit]]
type = "GoPackage"
dir = "/src/bar/"
import_path = "example.com/bar"

[[unit]]
type = "GoPackage"
dir = ""
import_path = "example.com/root"
"#;

fn resolve() -> Vec<Box<dyn SourceUnit>> {
    let registry = UnitRegistry::default();
    register(&registry).unwrap();
    UnitsFile::parse(UNITS).unwrap().resolve(&registry).unwrap()
}

#[test]
fn test_identifiers_are_namespaced() {
    let ids: Vec<_> = resolve().iter().map(|u| u.id()).collect();
    assert_eq!(
        ids,
        vec!["go:example.com/foo", "go:example.com/bar", "go:example.com/root"]
    );
}

#[test]
fn test_projections_match_direct_construction() {
    let units = resolve();
    let direct = GoPackage::new("/src/bar/", "example.com/bar");

    assert_eq!(units[1].id(), direct.id());
    assert_eq!(units[1].name(), "bar");
    assert_eq!(units[1].root_dir(), "/src/bar/");
    assert_eq!(units[1].paths(), vec!["/src/bar/"]);
}

#[test]
fn test_empty_dir_unit() {
    let units = resolve();
    assert_eq!(units[2].root_dir(), "");
    assert_eq!(units[2].paths(), vec![""]);
    assert_eq!(units[2].name(), ".");
}

#[test]
fn test_missing_import_path_is_decode_error() {
    let registry = UnitRegistry::default();
    register(&registry).unwrap();

    let file = UnitsFile::parse("[[unit]]\ntype = \"GoPackage\"\ndir = \"/src/x\"\n").unwrap();
    assert!(file.resolve(&registry).is_err());
}
