//! Gemspec reader
//!
//! Extracts literal attribute assignments from a `.gemspec` file:
//!
//! ```ruby
//! Gem::Specification.new do |s|
//!   s.name     = "rack"
//!   s.version  = "2.2.0"
//!   s.licenses = ["MIT"]
//!   s.add_dependency "json", "~> 2.0"
//!   s.add_development_dependency "rspec"
//! end
//! ```
//!
//! Literals may also use the `%q{...}` forms that `gem build` writes, with
//! requirement lists given as arrays.
//!
//! Values computed at load time (constants, `File.read`, ...) are not
//! evaluated and are left unset.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use unit_core::ScanError;

use crate::domain::{DeclaredDependency, DependencyType};

/// A string literal: `"x"`, `'x'` or `%q` with `<>`, `{}`, `()` or `[]`
/// delimiters. The text is the only capture group.
const LITERAL: &str = r#"(?:["']|%[qQ]?[<{(\[])([^"'<>{}()\[\]]+)(?:["']|[>})\]])"#;

fn attribute_regex(attribute: &str) -> Regex {
    Regex::new(&format!(r"\.{}\s*=\s*{}", attribute, LITERAL)).expect("valid attribute regex")
}

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("name"));

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("version"));

static LICENSE_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("license"));

static LICENSES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.licenses\s*=\s*\[([^\]]*)\]").expect("valid licenses regex"));

/// `add_dependency`, `add_runtime_dependency`, `add_development_dependency`
static DEPENDENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\.add_(runtime_|development_)?dependency[\s(]+{}(.*)",
        LITERAL
    ))
    .expect("valid dependency regex")
});

pub(crate) static QUOTED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']([^"']*)["']"#).expect("valid quoted regex"));

/// Literal metadata read from a gemspec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gemspec {
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub licenses: Vec<String>,
    pub dependencies: Vec<DeclaredDependency>,
}

impl Gemspec {
    /// Read and parse a gemspec file.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut spec = Self::default();

        for line in content.lines().map(str::trim) {
            if line.starts_with('#') {
                continue;
            }

            if let Some(caps) = DEPENDENCY_REGEX.captures(line) {
                let dep_type = match caps.get(1).map(|m| m.as_str()) {
                    Some("development_") => DependencyType::Development,
                    _ => DependencyType::Runtime,
                };
                let clauses: Vec<String> = QUOTED_REGEX
                    .captures_iter(&caps[3])
                    .map(|c| c[1].to_string())
                    .collect();

                spec.dependencies.push(DeclaredDependency {
                    name: caps[2].to_string(),
                    requirement: DeclaredDependency::requirement_from(&clauses),
                    dep_type,
                    groups: Vec::new(),
                });
                continue;
            }

            if spec.name.is_none() {
                spec.name = capture(&NAME_REGEX, line);
            }
            if spec.version.is_none() {
                spec.version = capture(&VERSION_REGEX, line);
            }
            if spec.license.is_none() {
                spec.license = capture(&LICENSE_REGEX, line);
            }
            if let Some(caps) = LICENSES_REGEX.captures(line) {
                spec.licenses = QUOTED_REGEX
                    .captures_iter(&caps[1])
                    .map(|c| c[1].to_string())
                    .collect();
            }
        }

        spec
    }

    /// `licenses` plus the single `license`, deduplicated.
    pub fn all_licenses(&self) -> Vec<String> {
        let mut all = self.licenses.clone();
        if let Some(license) = &self.license {
            if !all.contains(license) {
                all.push(license.clone());
            }
        }
        all
    }
}

fn capture(regex: &Regex, line: &str) -> Option<String> {
    regex.captures(line).map(|c| c[1].to_string())
}
