//! Ruby unit kinds

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unit_core::discovery::{join_rel, parent_dir};
use unit_core::SourceUnit;

/// Kind key of a gem unit.
pub const RUBYGEM_KIND: &str = "rubygem";

/// Kind key of the loose-scripts unit.
pub const RUBY_SCRIPTS_KIND: &str = "ruby";

fn current_dir() -> String {
    ".".to_string()
}

/// A gem, rooted at the directory holding its gemspec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubyGem {
    pub name: String,
    #[serde(default = "current_dir")]
    pub dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl SourceUnit for RubyGem {
    fn kind(&self) -> &'static str {
        RUBYGEM_KIND
    }

    fn id(&self) -> String {
        format!("{}:{}", RUBYGEM_KIND, self.name)
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn root_dir(&self) -> &str {
        &self.dir
    }

    fn paths(&self) -> Vec<String> {
        vec![self.dir.clone()]
    }
}

/// Ruby files that belong to no gem.
///
/// `files` are relative to `dir`. The unit spans every directory that
/// holds one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubyScripts {
    pub name: String,
    #[serde(default = "current_dir")]
    pub dir: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl SourceUnit for RubyScripts {
    fn kind(&self) -> &'static str {
        RUBY_SCRIPTS_KIND
    }

    fn id(&self) -> String {
        format!("{}:{}", RUBY_SCRIPTS_KIND, self.name)
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn root_dir(&self) -> &str {
        &self.dir
    }

    fn paths(&self) -> Vec<String> {
        if self.files.is_empty() {
            return vec![self.dir.clone()];
        }

        let dirs: BTreeSet<String> = self
            .files
            .iter()
            .map(|f| join_rel(&self.dir, parent_dir(f)))
            .collect();
        dirs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gem_projections() {
        let gem = RubyGem {
            name: "rack".to_string(),
            dir: "vendor/rack".to_string(),
            version: Some("2.2.0".to_string()),
            licenses: vec!["MIT".to_string()],
            files: vec!["vendor/rack/lib/rack.rb".to_string()],
        };

        assert_eq!(gem.kind(), "rubygem");
        assert_eq!(gem.id(), "rubygem:rack");
        assert_eq!(gem.name(), "rack");
        assert_eq!(gem.root_dir(), "vendor/rack");
        assert_eq!(gem.paths(), vec!["vendor/rack"]);
    }

    #[test]
    fn test_scripts_span_many_dirs() {
        let scripts = RubyScripts {
            name: "rubyscripts".to_string(),
            dir: ".".to_string(),
            files: vec![
                "bin/run.rb".to_string(),
                "lib/a.rb".to_string(),
                "lib/b.rb".to_string(),
                "setup.rb".to_string(),
            ],
        };

        assert_eq!(scripts.id(), "ruby:rubyscripts");
        assert_eq!(scripts.paths(), vec![".", "bin", "lib"]);
    }

    #[test]
    fn test_scripts_without_files_span_dir() {
        let scripts: RubyScripts = serde_json::from_value(serde_json::json!({
            "name": "rubyscripts",
        }))
        .unwrap();

        assert_eq!(scripts.root_dir(), ".");
        assert_eq!(scripts.paths(), vec!["."]);
    }
}
