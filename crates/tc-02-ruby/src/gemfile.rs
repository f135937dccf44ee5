//! Gemfile reader
//!
//! Recognises `gem` lines and the groups they belong to, either through an
//! enclosing `group ... do` block or inline `group:` / `groups:` options:
//!
//! ```ruby
//! source "https://rubygems.org"
//! gem "rails", "~> 7.0"
//! gem "pg", group: :production
//!
//! group :development, :test do
//!   gem "rspec-rails"
//! end
//! ```

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use unit_core::ScanError;

use crate::domain::DeclaredDependency;
use crate::gemspec::QUOTED_REGEX;

/// Default file name.
pub const GEMFILE: &str = "Gemfile";

static GEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^gem[\s(]+["']([^"']+)["']((?:\s*,\s*["'][^"']*["'])*)(.*)$"#)
        .expect("valid gem regex")
});

static GROUP_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^group\s*\(?(.*?)\)?\s+do\b").expect("valid group regex"));

static SYMBOL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(\w+)").expect("valid symbol regex"));

/// `group: :x`, `:group => :x`, `groups: [:x, :y]`, `:groups => [...]`
static INLINE_GROUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\bgroups?:|:groups?\s*=>)\s*(\[[^\]]*\]|:\w+)").expect("valid inline group regex")
});

static BLOCK_OPEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdo(\s*\|[^|]*\|)?\s*$").expect("valid block regex"));

/// Statements that open a block closed by `end`. Only matched at the start
/// of a line so trailing modifiers (`gem "x" if y`) are not counted.
static KEYWORD_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:if|unless|case|begin|while|until|for|def|class|module)\b")
        .expect("valid keyword regex")
});

static BLOCK_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^end\b").expect("valid end regex"));

static ONE_LINE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;\s]end\s*$").expect("valid one-line end regex"));

/// Dependencies declared by a Gemfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gemfile {
    pub dependencies: Vec<DeclaredDependency>,
}

impl Gemfile {
    /// Read and parse a Gemfile.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    /// Load `dir/Gemfile` when present.
    pub fn load_in(dir: &Path) -> Result<Option<Self>, ScanError> {
        let path = dir.join(GEMFILE);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn parse(content: &str) -> Self {
        // One entry per open block; group blocks carry their groups.
        let mut blocks: Vec<Vec<String>> = Vec::new();
        let mut dependencies = Vec::new();

        for line in content.lines().map(strip_comment) {
            if line.is_empty() {
                continue;
            }

            if BLOCK_END_REGEX.is_match(line) {
                blocks.pop();
                continue;
            }

            if let Some(caps) = GROUP_BLOCK_REGEX.captures(line) {
                blocks.push(symbols(&caps[1]));
                continue;
            }

            if let Some(caps) = GEM_REGEX.captures(line) {
                let clauses: Vec<String> = QUOTED_REGEX
                    .captures_iter(&caps[2])
                    .map(|c| c[1].to_string())
                    .collect();

                let mut groups: Vec<String> = blocks.iter().flatten().cloned().collect();
                if let Some(inline) = INLINE_GROUP_REGEX.captures(&caps[3]) {
                    groups.extend(symbols(&inline[1]));
                }
                if groups.is_empty() {
                    groups.push("default".to_string());
                }

                trace!("Gemfile dependency {} groups={:?}", &caps[1], groups);
                dependencies.push(
                    DeclaredDependency::runtime(&caps[1], DeclaredDependency::requirement_from(&clauses))
                        .with_groups(groups),
                );
                continue;
            }

            let opens_keyword_block =
                KEYWORD_OPEN_REGEX.is_match(line) && !ONE_LINE_END_REGEX.is_match(line);
            if opens_keyword_block || BLOCK_OPEN_REGEX.is_match(line) {
                blocks.push(Vec::new());
            }
        }

        Self { dependencies }
    }
}

/// Trimmed line without a trailing `#` comment. A `#` inside a quoted
/// string is kept.
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (idx, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '#') => return line[..idx].trim(),
            _ => {}
        }
    }
    line.trim()
}

fn symbols(text: &str) -> Vec<String> {
    SYMBOL_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEMFILE_CONTENT: &str = r#"
source "https://rubygems.org"

gemspec

gem "rails", "~> 7.0", ">= 7.0.4"
gem 'pg', group: :production
gem "byebug", groups: [:development, :test]
gem "sprockets", :group => :test

platforms :jruby do
  gem "jruby-openssl"
end

group :development, :test do
  gem "rspec-rails"
  group :ci do
    gem "simplecov"
  end
end

gem "puma"
"#;

    fn find<'a>(gemfile: &'a Gemfile, name: &str) -> &'a DeclaredDependency {
        gemfile
            .dependencies
            .iter()
            .find(|d| d.name == name)
            .unwrap()
    }

    #[test]
    fn test_parse_requirements() {
        let gemfile = Gemfile::parse(GEMFILE_CONTENT);
        assert_eq!(find(&gemfile, "rails").requirement, "~> 7.0, >= 7.0.4");
        assert_eq!(find(&gemfile, "puma").requirement, ">= 0");
    }

    #[test]
    fn test_inline_groups() {
        let gemfile = Gemfile::parse(GEMFILE_CONTENT);
        assert_eq!(find(&gemfile, "pg").groups, vec!["production"]);
        assert_eq!(find(&gemfile, "byebug").groups, vec!["development", "test"]);
        assert_eq!(find(&gemfile, "sprockets").groups, vec!["test"]);
    }

    #[test]
    fn test_block_groups() {
        let gemfile = Gemfile::parse(GEMFILE_CONTENT);
        assert_eq!(find(&gemfile, "rspec-rails").groups, vec!["development", "test"]);
        assert_eq!(
            find(&gemfile, "simplecov").groups,
            vec!["development", "test", "ci"]
        );
        // Non-group blocks carry no groups and close cleanly
        assert_eq!(find(&gemfile, "jruby-openssl").groups, vec!["default"]);
        assert_eq!(find(&gemfile, "puma").groups, vec!["default"]);
    }

    #[test]
    fn test_validity_follows_groups() {
        let gemfile = Gemfile::parse(GEMFILE_CONTENT);
        let valid: Vec<_> = gemfile
            .dependencies
            .iter()
            .filter(|d| d.is_valid())
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(valid, vec!["rails", "pg", "jruby-openssl", "puma"]);
    }

    fn valid_names(content: &str) -> Vec<String> {
        Gemfile::parse(content)
            .dependencies
            .into_iter()
            .filter(|d| d.is_valid())
            .map(|d| d.name)
            .collect()
    }

    #[test]
    fn test_end_with_trailing_comment_closes_group() {
        let content = "group :test do\n  gem \"rspec\"\nend # test\ngem \"rails\"\n";
        assert_eq!(valid_names(content), vec!["rails"]);
    }

    #[test]
    fn test_conditional_inside_group_keeps_group() {
        let content = r#"
group :development do
  if ENV["DEBUGGER"]
    gem "debug"
  end
  gem "pry"
end

gem "rails"
gem "bootsnap", require: false if RUBY_VERSION >= "3.0"
"#;
        let gemfile = Gemfile::parse(content);
        assert_eq!(find(&gemfile, "debug").groups, vec!["development"]);
        assert_eq!(find(&gemfile, "pry").groups, vec!["development"]);
        assert_eq!(find(&gemfile, "bootsnap").groups, vec!["default"]);
        assert_eq!(valid_names(content), vec!["rails", "bootsnap"]);
    }

    #[test]
    fn test_comment_markers_inside_strings_kept() {
        assert_eq!(strip_comment("  gem \"a#b\" # note "), "gem \"a#b\"");
        assert_eq!(strip_comment("platforms :jruby do # java only"), "platforms :jruby do");
        assert_eq!(strip_comment("# whole line"), "");
    }
}
