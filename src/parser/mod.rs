//! Parser module for npm-graph.
//!
//! Reads the two npm documents the graph is built from:
//!
//! - **package.json** - the manifest listing direct dependencies
//! - **package-lock.json** - the resolved dependency tree (`dependencies` layout)
//!
//! # Example
//!
//! ```
//! use npm_graph::parser::{package_json, package_lock};
//!
//! let pkg = package_json::parse_str(r#"{"name": "app", "dependencies": {"ms": "^2.1.0"}}"#).unwrap();
//! let lock = package_lock::parse_str(r#"{"dependencies": {"ms": {"version": "2.1.3"}}}"#).unwrap();
//!
//! assert!(package_json::validate(&pkg).is_ok());
//! assert!(package_lock::validate(&lock).is_ok());
//! ```

pub mod package_json;
pub mod package_lock;
pub mod types;

// Re-export commonly used types for convenience
pub use package_json::{direct_dependencies, ParseError, ParseResult};

pub use types::{Dependency, DependencyType, LockDependency, PackageJson, PackageLock};
