//! Scanner port
//!
//! A scanner walks a directory tree and reports the source units it finds.

use std::path::Path;

use crate::domain::SourceUnitRecord;
use crate::error::ScanError;

/// Options shared by every scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// URI of the repository being scanned (e.g. `github.com/user/repo`).
    pub repo: Option<String>,
    /// Path of the scan root relative to the repository root.
    pub subdir: Option<String>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    /// `subdir` with `.` and surrounding separators treated as empty.
    pub fn normalized_subdir(&self) -> Option<&str> {
        self.subdir
            .as_deref()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty() && *s != ".")
    }
}

/// Discovers source units of one toolchain.
pub trait Scanner: Send + Sync {
    /// Toolchain name used in logs and on the command line.
    fn toolchain(&self) -> &'static str;

    /// Scan `root` and return records in unspecified order.
    fn scan(&self, root: &Path, opts: &ScanOptions) -> Result<Vec<SourceUnitRecord>, ScanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_subdir() {
        assert_eq!(ScanOptions::new().normalized_subdir(), None);
        assert_eq!(ScanOptions::new().with_subdir(".").normalized_subdir(), None);
        assert_eq!(ScanOptions::new().with_subdir("/").normalized_subdir(), None);
        assert_eq!(
            ScanOptions::new().with_subdir("/lib/a/").normalized_subdir(),
            Some("lib/a")
        );
    }
}
