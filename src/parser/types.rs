//! Shared types for manifest and lockfile parsing.
//!
//! These mirror the parts of `package.json` and `package-lock.json` that
//! the graph builder reads. Maps keep the insertion order of the source
//! document, which is also the order the builder walks them in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name -> version-spec map as found in `dependencies` and friends.
pub type VersionMap = IndexMap<String, String>;

/// Represents the structure of a package.json file.
///
/// # Example
///
/// ```
/// use npm_graph::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// A brief description of the package.
    pub description: Option<String>,

    /// Production dependencies required at runtime.
    #[serde(default)]
    pub dependencies: VersionMap,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies", default)]
    pub dev_dependencies: VersionMap,
}

impl PackageJson {
    /// Returns the package name if it is present and non-empty.
    pub fn package_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Which manifest section a direct dependency was declared in.
///
/// Only `dependencies` and `devDependencies` feed the graph; peer and
/// optional sections are not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    /// Production dependencies - required at runtime.
    Production,

    /// Development dependencies - only needed during development.
    Development,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
        };
        write!(f, "{}", s)
    }
}

/// A direct dependency declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// The package name (e.g., "react", "lodash").
    pub name: String,

    /// The category of this dependency.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(name: impl Into<String>, dep_type: DependencyType) -> Self {
        Self {
            name: name.into(),
            dep_type,
        }
    }
}

/// One entry of a lockfile dependency tree.
///
/// `dependencies` holds packages installed nested below this one and is
/// resolved locally. `requires` only names packages; those are looked up in
/// the root `dependencies` map, where npm hoists shared packages.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LockDependency {
    /// Exact installed version.
    #[serde(default)]
    pub version: String,

    /// Tarball URL the package was resolved from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Subresource integrity hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Set when the package is only reachable through dev dependencies.
    #[serde(default)]
    pub dev: bool,

    /// Set when the package is only reachable through optional dependencies.
    #[serde(default)]
    pub optional: bool,

    /// Name -> version requirement, resolved against the root tree.
    #[serde(default)]
    pub requires: VersionMap,

    /// Packages nested under this one.
    #[serde(default)]
    pub dependencies: IndexMap<String, LockDependency>,
}

impl LockDependency {
    /// Creates an entry with the given version and no children.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Adds a nested dependency entry.
    pub fn with_dependency(mut self, name: impl Into<String>, dep: LockDependency) -> Self {
        self.dependencies.insert(name.into(), dep);
        self
    }

    /// Adds a `requires` entry.
    pub fn with_requires(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.requires.insert(name.into(), spec.into());
        self
    }

    /// True when the entry neither nests nor requires anything.
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty() && self.requires.is_empty()
    }
}

/// The root of a `package-lock.json` file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PackageLock {
    /// Name of the locked project.
    pub name: Option<String>,

    /// Version of the locked project.
    pub version: Option<String>,

    /// Lockfile format version (1, 2 or 3).
    #[serde(rename = "lockfileVersion", default)]
    pub lockfile_version: Option<u32>,

    /// Root-level `requires` flag written by npm 5+.
    #[serde(default)]
    pub requires: Option<bool>,

    /// Top-level (hoisted) dependency tree.
    #[serde(default)]
    pub dependencies: IndexMap<String, LockDependency>,

    /// Whether the document carried a v2/v3 `packages` section.
    #[serde(default, rename = "packages", skip_serializing)]
    packages: Option<serde_json::Value>,
}

impl PackageLock {
    /// Creates an empty lock root for the given project name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Adds a top-level dependency entry.
    pub fn with_dependency(mut self, name: impl Into<String>, dep: LockDependency) -> Self {
        self.dependencies.insert(name.into(), dep);
        self
    }

    /// True when the document has a `packages` section (lockfile v2+).
    pub fn has_packages_section(&self) -> bool {
        self.packages.is_some()
    }
}
