//! Parser for npm package-lock.json files.
//!
//! Only the `dependencies` tree (lockfile v1, also emitted by v2) is read.
//! A v3 lockfile carries nothing but the flat `packages` section and is
//! rejected by [`validate`].

use std::fs;
use std::path::Path;

use super::package_json::{ParseError, ParseResult};
use super::types::PackageLock;

/// Parses a package-lock.json file from a file path.
pub fn parse_file(path: &Path) -> ParseResult<PackageLock> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package-lock.json from a string.
///
/// # Example
///
/// ```
/// use npm_graph::parser::package_lock::parse_str;
///
/// let json = r#"{
///     "name": "my-app",
///     "lockfileVersion": 1,
///     "dependencies": {
///         "debug": {"version": "4.3.4", "requires": {"ms": "2.1.2"}},
///         "ms": {"version": "2.1.2"}
///     }
/// }"#;
///
/// let lock = parse_str(json).unwrap();
/// assert_eq!(lock.dependencies.len(), 2);
/// assert!(lock.dependencies["debug"].requires.contains_key("ms"));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageLock> {
    let lock: PackageLock = serde_json::from_str(content)?;
    Ok(lock)
}

/// Validates that a lockfile has a dependency tree the builder can walk.
///
/// An empty tree is fine for a project without dependencies; a tree that is
/// only present in the `packages` layout is not.
pub fn validate(lock: &PackageLock) -> ParseResult<()> {
    if lock.dependencies.is_empty() && lock.has_packages_section() {
        let version = lock
            .lockfile_version
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        return Err(ParseError::InvalidLockfile(format!(
            "lockfileVersion {} has no `dependencies` tree; regenerate it with --lockfile-version 2",
            version
        )));
    }
    Ok(())
}
