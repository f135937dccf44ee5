//! # Ruby Scan Integration Tests
//!
//! Scans a small repository holding two gems and some loose scripts, then
//! feeds the records back through a `UnitRegistry`.

use std::fs;
use std::path::Path;

use tc_02_ruby::{register, RubyScanner};
use tempfile::TempDir;
use unit_core::{Dependency, ScanOptions, Scanner, UnitRegistry};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        "gems/widget/widget.gemspec",
        r#"
Gem::Specification.new do |s|
  s.name    = "widget"
  s.version = "0.3.1"
  s.licenses = ["MIT"]
  s.add_dependency "json", "~> 2.0"
  s.add_development_dependency "rspec", "~> 3.0"
end
"#,
    );
    write(root, "gems/widget/lib/widget.rb", "module Widget; end\n");
    write(root, "gems/widget/spec/widget_spec.rb", "");
    write(
        root,
        "gems/widget/Gemfile",
        r#"
source "https://rubygems.org"
gemspec
gem "rake"
gem "json", ">= 1.0"
group :test do
  gem "minitest"
end
"#,
    );

    write(
        root,
        "gems/gadget/gadget.gemspec",
        "Gem::Specification.new do |s|\n  s.name = 'gadget'\nend\n",
    );
    write(root, "gems/gadget/lib/gadget.rb", "");

    write(
        root,
        "Gemfile",
        "gem 'sinatra'\ngem 'pry', group: :development\n",
    );
    write(root, "app.rb", "require 'sinatra'\n");
    write(root, "scripts/migrate.rb", "");
    write(root, "test/app_test.rb", "");

    temp_dir
}

#[test]
fn test_units_sorted_by_name() {
    let repo = fixture_repo();
    let records = RubyScanner::new()
        .scan(repo.path(), &ScanOptions::new())
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![".", "gadget", "widget"]);
}

#[test]
fn test_gem_record() {
    let repo = fixture_repo();
    let records = RubyScanner::new()
        .scan(repo.path(), &ScanOptions::new())
        .unwrap();
    let widget = records.iter().find(|r| r.name == "widget").unwrap();

    assert_eq!(widget.kind, "rubygem");
    assert_eq!(widget.dir, "gems/widget");
    assert_eq!(widget.licenses.as_deref(), Some(&["MIT".to_string()][..]));
    assert_eq!(
        widget.files,
        vec![
            "gems/widget/Gemfile",
            "gems/widget/lib/widget.rb",
            "gems/widget/spec/widget_spec.rb",
            "gems/widget/widget.gemspec",
        ]
    );

    // Gemspec's json wins over the Gemfile's; development and test deps dropped
    assert_eq!(
        widget.dependencies,
        Some(vec![
            Dependency::new("json", "~> 2.0"),
            Dependency::new("rake", ">= 0"),
        ])
    );

    let gadget = records.iter().find(|r| r.name == "gadget").unwrap();
    assert_eq!(gadget.dependencies, Some(Vec::new()));
}

#[test]
fn test_scripts_record_excludes_gem_and_test_files() {
    let repo = fixture_repo();
    let records = RubyScanner::new()
        .scan(repo.path(), &ScanOptions::new())
        .unwrap();
    let scripts = records.iter().find(|r| r.kind == "ruby").unwrap();

    assert_eq!(scripts.dir, ".");
    assert_eq!(scripts.files, vec!["app.rb", "scripts/migrate.rb"]);
    assert_eq!(
        scripts.dependencies,
        Some(vec![Dependency::new("sinatra", ">= 0")])
    );
    assert_eq!(scripts.data["files"][1], "scripts/migrate.rb");
}

#[test]
fn test_records_decode_into_units() {
    let repo = fixture_repo();
    let records = RubyScanner::new()
        .scan(repo.path(), &ScanOptions::new())
        .unwrap();

    let registry = UnitRegistry::default();
    register(&registry).unwrap();

    let ids: Vec<_> = records
        .iter()
        .map(|r| registry.decode_record(r).unwrap().id())
        .collect();
    assert_eq!(ids, vec!["ruby:rubyscripts", "rubygem:gadget", "rubygem:widget"]);

    let scripts = registry.decode_record(&records[0]).unwrap();
    assert_eq!(scripts.paths(), vec![".", "scripts"]);
}

#[test]
fn test_output_json_shape() {
    let repo = fixture_repo();
    let records = RubyScanner::new()
        .scan(repo.path(), &ScanOptions::new())
        .unwrap();

    let json = serde_json::to_value(&records).unwrap();
    let widget = &json[2];
    assert_eq!(widget["Type"], "rubygem");
    assert_eq!(widget["Dependencies"][0][0], "json");
    assert!(widget["Ops"]["depresolve"].is_null());
    assert_eq!(widget["Data"]["version"], "0.3.1");
}
