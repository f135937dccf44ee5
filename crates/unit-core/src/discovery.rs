//! Filesystem discovery helpers shared by scanners
//!
//! Paths handed back to scanners are relative to the scan root, use `/` as
//! separator and are sorted, so scanner output does not depend on the host
//! platform or on directory iteration order.

use std::fs;
use std::path::Path;

use tracing::trace;

use crate::error::ScanError;

/// Directory names that hold tests rather than library code.
pub const TEST_DIRS: [&str; 4] = ["spec", "specs", "test", "tests"];

/// Controls which directories a walk descends into.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Skip directories named in `TEST_DIRS`.
    pub skip_test_dirs: bool,
}

impl WalkOptions {
    pub fn skipping_tests() -> Self {
        Self {
            skip_test_dirs: true,
        }
    }
}

pub fn is_test_dir(name: &str) -> bool {
    TEST_DIRS.contains(&name)
}

/// True when any directory on the relative path `rel` is a test directory.
pub fn in_test_dir(rel: &str) -> bool {
    let mut dirs: Vec<&str> = rel.split('/').collect();
    dirs.pop();
    dirs.into_iter().any(is_test_dir)
}

/// Every regular file under `root`, as sorted relative paths.
///
/// Hidden directories and symlinked directories are not entered. Symlinks to
/// regular files are listed; dangling links are skipped.
pub fn walk_files(root: &Path, opts: WalkOptions) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| ScanError::io(&dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ScanError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ScanError::io(&path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                if name.starts_with('.') || (opts.skip_test_dirs && is_test_dir(&name)) {
                    trace!("Skipping directory {}", path.display());
                    continue;
                }
                pending.push(path);
            } else if file_type.is_file() || (file_type.is_symlink() && links_to_file(&path)) {
                files.push(relative_path(root, &path)?);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn links_to_file(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(e) => {
            trace!("Skipping dangling link {}: {}", path.display(), e);
            false
        }
    }
}

/// `path` relative to `root`, `/`-separated; `"."` for the root itself.
pub fn relative_path(root: &Path, path: &Path) -> Result<String, ScanError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| ScanError::OutsideRoot(path.to_path_buf()))?;

    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}

/// Directory part of a relative path; `"."` when there is none.
pub fn parent_dir(rel: &str) -> &str {
    match rel.rfind('/') {
        Some(idx) => &rel[..idx],
        None => ".",
    }
}

/// Join relative paths, treating `"."` as empty.
pub fn join_rel(dir: &str, file: &str) -> String {
    match (dir, file) {
        (".", f) | ("", f) => f.to_string(),
        (d, ".") | (d, "") => d.to_string(),
        (d, f) => format!("{}/{}", d.trim_end_matches('/'), f),
    }
}

/// True when `rel` lies inside directory `dir` (or `dir` is `"."`).
pub fn is_within(rel: &str, dir: &str) -> bool {
    dir == "." || rel == dir || rel.starts_with(&format!("{}/", dir))
}
