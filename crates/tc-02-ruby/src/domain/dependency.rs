//! Declared dependencies and the runtime filter
//!
//! Gemspecs tag each dependency as runtime or development. Gemfiles place
//! dependencies in groups. Only dependencies needed at runtime are reported.

use unit_core::Dependency;

/// Requirement RubyGems assumes when none is given.
pub const DEFAULT_REQUIREMENT: &str = ">= 0";

/// Groups whose members are never needed at runtime.
const DEV_GROUPS: [&str; 2] = ["development", "test"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyType {
    #[default]
    Runtime,
    Development,
}

/// A dependency as declared in a gemspec or Gemfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub name: String,
    /// Requirement string such as `~> 1.0, >= 1.0.2`.
    pub requirement: String,
    pub dep_type: DependencyType,
    pub groups: Vec<String>,
}

impl DeclaredDependency {
    pub fn runtime(name: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: requirement.into(),
            dep_type: DependencyType::Runtime,
            groups: Vec::new(),
        }
    }

    pub fn development(name: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self {
            dep_type: DependencyType::Development,
            ..Self::runtime(name, requirement)
        }
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Join requirement clauses; an empty list means any version.
    pub fn requirement_from(clauses: &[String]) -> String {
        if clauses.is_empty() {
            DEFAULT_REQUIREMENT.to_string()
        } else {
            clauses.join(", ")
        }
    }

    /// Kept unless it is a development dependency or sits in a
    /// development/test group.
    pub fn is_valid(&self) -> bool {
        let is_dev_type = self.dep_type == DependencyType::Development;
        let is_dev_group = self
            .groups
            .iter()
            .any(|g| DEV_GROUPS.contains(&g.as_str()));

        !is_dev_type && !is_dev_group
    }

    pub fn to_pair(&self) -> Dependency {
        Dependency::new(&self.name, &self.requirement)
    }
}

/// Runtime pairs from `declared`, first declaration of each name wins.
pub fn runtime_pairs<'a, I>(declared: I) -> Vec<Dependency>
where
    I: IntoIterator<Item = &'a DeclaredDependency>,
{
    let mut seen = std::collections::HashSet::new();
    let mut pairs: Vec<_> = declared
        .into_iter()
        .filter(|d| d.is_valid())
        .filter(|d| seen.insert(d.name.clone()))
        .map(DeclaredDependency::to_pair)
        .collect();
    pairs.sort();
    pairs
}
