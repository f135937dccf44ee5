//! Ruby gem and script discovery
//!
//! ## Scan Sequence
//!
//! 1. Find every `*.gemspec` outside spec/test directories
//! 2. Emit one `rubygem` unit per gemspec with a literal name; its files are
//!    everything under the gemspec's directory
//! 3. Collect the `.rb` files no gem claimed into a single `ruby` unit
//!    (skipped when scanning the Ruby standard library itself)
//! 4. Sort units by name

use std::collections::HashSet;
use std::path::Path;

use serde_json::json;
use tracing::{debug, info, warn};
use unit_core::discovery::{self, WalkOptions};
use unit_core::{sort_records, ScanError, ScanOptions, Scanner, SourceUnitRecord};

use crate::domain::{runtime_pairs, RubyGem, RUBYGEM_KIND, RUBY_SCRIPTS_KIND};
use crate::gemfile::Gemfile;
use crate::gemspec::Gemspec;

/// Repository whose scripts are the standard library rather than an app.
pub const RUBY_STDLIB_REPO: &str = "github.com/ruby/ruby";

/// Name recorded in the data of the scripts unit.
pub const SCRIPTS_UNIT_NAME: &str = "rubyscripts";

#[derive(Debug, Clone, Copy, Default)]
pub struct RubyScanner;

impl RubyScanner {
    pub fn new() -> Self {
        Self
    }

    fn scan_gem(
        &self,
        root: &Path,
        gemspec_rel: &str,
        all_files: &[String],
    ) -> Result<Option<SourceUnitRecord>, ScanError> {
        let spec = Gemspec::load(&root.join(gemspec_rel))?;
        let Some(name) = spec.name.clone() else {
            warn!("[RubyScanner] No literal gem name in {}, skipping", gemspec_rel);
            return Ok(None);
        };

        let gem_dir = discovery::parent_dir(gemspec_rel);
        let mut declared = spec.dependencies.clone();
        if let Some(gemfile) = Gemfile::load_in(&root.join(gem_dir))? {
            declared.extend(gemfile.dependencies);
        }

        let files: Vec<String> = all_files
            .iter()
            .filter(|f| discovery::is_within(f, gem_dir))
            .cloned()
            .collect();
        let licenses = spec.all_licenses();

        let gem = RubyGem {
            name: name.clone(),
            dir: gem_dir.to_string(),
            version: spec.version.clone(),
            licenses: licenses.clone(),
            files: files.clone(),
        };

        debug!(
            "[RubyScanner] Gem {} in {} ({} files)",
            name,
            gem_dir,
            files.len()
        );

        let mut record = SourceUnitRecord::new(name, RUBYGEM_KIND, gem_dir)
            .with_files(files)
            .with_dependencies(runtime_pairs(&declared))
            .with_data(serde_json::to_value(&gem)?);
        record.license = spec.license.clone();
        record.licenses = Some(licenses);

        Ok(Some(record))
    }

    fn scan_scripts(
        &self,
        root: &Path,
        all_files: &[String],
        claimed: &HashSet<&str>,
    ) -> Result<Option<SourceUnitRecord>, ScanError> {
        let scripts: Vec<String> = all_files
            .iter()
            .filter(|f| f.ends_with(".rb") && !discovery::in_test_dir(f))
            .filter(|f| !claimed.contains(f.as_str()))
            .cloned()
            .collect();

        if scripts.is_empty() {
            return Ok(None);
        }

        let dependencies = Gemfile::load_in(root)?.map(|g| runtime_pairs(&g.dependencies));

        let mut record = SourceUnitRecord::new(".", RUBY_SCRIPTS_KIND, ".")
            .with_files(scripts.clone())
            .with_data(json!({
                "name": SCRIPTS_UNIT_NAME,
                "files": scripts,
            }));
        record.dependencies = dependencies;

        Ok(Some(record))
    }
}

impl Scanner for RubyScanner {
    fn toolchain(&self) -> &'static str {
        "ruby"
    }

    fn scan(&self, root: &Path, opts: &ScanOptions) -> Result<Vec<SourceUnitRecord>, ScanError> {
        let all_files = discovery::walk_files(root, WalkOptions::default())?;
        let gemspecs = all_files
            .iter()
            .filter(|f| f.ends_with(".gemspec") && !discovery::in_test_dir(f));

        let mut records = Vec::new();
        for gemspec in gemspecs {
            if let Some(record) = self.scan_gem(root, gemspec, &all_files)? {
                records.push(record);
            }
        }

        if opts.repo.as_deref() != Some(RUBY_STDLIB_REPO) {
            let claimed: HashSet<&str> = records
                .iter()
                .flat_map(|r| r.files.iter().map(String::as_str))
                .collect();

            if let Some(scripts) = self.scan_scripts(root, &all_files, &claimed)? {
                records.push(scripts);
            }
        }

        sort_records(&mut records);
        info!(
            "[RubyScanner] Found {} units under {}",
            records.len(),
            root.display()
        );
        Ok(records)
    }
}
