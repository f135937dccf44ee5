//! Go package discovery
//!
//! A directory is a package when it holds at least one `.go` file that is
//! not a `_test.go` file. Directories named `testdata` or starting with `_`
//! are ignored, like the `go` tool does.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};
use unit_core::discovery::{self, WalkOptions};
use unit_core::{ScanError, ScanOptions, Scanner, SourceUnitRecord};

use crate::package::{GoPackage, GO_PACKAGE_KIND};

#[derive(Debug, Clone, Copy, Default)]
pub struct GoScanner;

impl GoScanner {
    pub fn new() -> Self {
        Self
    }

    /// Import path for a package at `rel_dir` under the scan root.
    pub fn import_path(rel_dir: &str, opts: &ScanOptions) -> String {
        let parts: Vec<&str> = [
            opts.repo.as_deref().map(|r| r.trim_matches('/')),
            opts.normalized_subdir(),
            Some(rel_dir).filter(|d| *d != "."),
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();

        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }
}

fn is_ignored(rel: &str) -> bool {
    rel.split('/')
        .rev()
        .skip(1)
        .any(|dir| dir == "testdata" || dir.starts_with('_'))
}

fn is_go_file(rel: &str) -> bool {
    rel.ends_with(".go")
}

fn is_test_file(rel: &str) -> bool {
    rel.ends_with("_test.go")
}

impl Scanner for GoScanner {
    fn toolchain(&self) -> &'static str {
        "go"
    }

    fn scan(&self, root: &Path, opts: &ScanOptions) -> Result<Vec<SourceUnitRecord>, ScanError> {
        let files = discovery::walk_files(root, WalkOptions::default())?;

        let mut by_dir: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for rel in files.iter().filter(|f| is_go_file(f) && !is_ignored(f)) {
            by_dir.entry(discovery::parent_dir(rel)).or_default().push(rel);
        }

        let mut records = Vec::new();
        for (dir, go_files) in by_dir {
            if go_files.iter().all(|f| is_test_file(f)) {
                debug!("[GoScanner] Skipping test-only directory {}", dir);
                continue;
            }

            let pkg = GoPackage::new(dir, Self::import_path(dir, opts));
            let record = SourceUnitRecord::new(&pkg.import_path, GO_PACKAGE_KIND, dir)
                .with_files(go_files.iter().map(|f| f.to_string()).collect())
                .with_data(serde_json::to_value(&pkg)?);
            records.push(record);
        }

        info!(
            "[GoScanner] Found {} packages under {}",
            records.len(),
            root.display()
        );
        Ok(records)
    }
}
