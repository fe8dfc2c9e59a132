//! Parser for npm package.json files.
//!
//! This module provides functionality to parse package.json files
//! and extract the direct dependencies the graph builder starts from.

use std::fs;
use std::path::Path;

use super::types::{Dependency, DependencyType, PackageJson};

/// Errors that can occur while parsing manifests and lockfiles.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The package.json structure is invalid or missing required fields.
    #[error("Invalid package.json: {0}")]
    InvalidPackage(String),

    /// The package-lock.json cannot be used to build a graph.
    #[error("Invalid package-lock.json: {0}")]
    InvalidLockfile(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use npm_graph::parser::package_json::parse_file;
///
/// let pkg = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {:?}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use npm_graph::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Validates a parsed PackageJson structure.
///
/// The package name becomes the root node of the graph, so it must be
/// present and non-blank.
pub fn validate(pkg: &PackageJson) -> ParseResult<()> {
    if pkg.package_name().is_none() {
        return Err(ParseError::InvalidPackage(
            "package.json has no name".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the direct dependencies that seed the graph.
///
/// Production dependencies come first, then development dependencies when
/// `include_dev` is set, each in declaration order. A name declared in both
/// maps appears twice.
///
/// # Example
///
/// ```
/// use npm_graph::parser::package_json::{parse_str, direct_dependencies};
/// use npm_graph::parser::types::DependencyType;
///
/// let json = r#"{
///     "name": "my-app",
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let pkg = parse_str(json).unwrap();
/// let deps = direct_dependencies(&pkg, true);
///
/// assert_eq!(deps.len(), 2);
/// assert_eq!(deps[0].name, "react");
/// assert_eq!(deps[1].dep_type, DependencyType::Development);
/// ```
pub fn direct_dependencies(pkg: &PackageJson, include_dev: bool) -> Vec<Dependency> {
    let mut deps: Vec<Dependency> = pkg
        .dependencies
        .keys()
        .map(|name| Dependency::new(name, DependencyType::Production))
        .collect();

    if include_dev {
        deps.extend(
            pkg.dev_dependencies
                .keys()
                .map(|name| Dependency::new(name, DependencyType::Development)),
        );
    }

    deps
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "description": "A test application",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "jest": "^29.0.0"
        },
        "peerDependencies": {
            "react": ">=16.8.0"
        },
        "optionalDependencies": {
            "fsevents": "^2.3.0"
        }
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(pkg.name, Some("test-app".to_string()));
        assert_eq!(pkg.version, Some("1.0.0".to_string()));
        assert_eq!(pkg.dependencies.len(), 3);
        assert_eq!(pkg.dev_dependencies.len(), 2);
    }

    #[test]
    fn test_parse_str_minimal() {
        let pkg = parse_str(r#"{"name": "minimal"}"#).unwrap();

        assert_eq!(pkg.name, Some("minimal".to_string()));
        assert!(pkg.dependencies.is_empty());
        assert!(pkg.dev_dependencies.is_empty());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_validate_valid_package() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        assert!(validate(&pkg).is_ok());
    }

    #[test]
    fn test_validate_deps_without_name_invalid() {
        let pkg = parse_str(r#"{"dependencies": {"react": "^18.0.0"}}"#).unwrap();
        assert!(matches!(
            validate(&pkg).unwrap_err(),
            ParseError::InvalidPackage(_)
        ));
    }

    #[test]
    fn test_validate_empty_name_invalid() {
        let pkg = parse_str(r#"{"name": ""}"#).unwrap();
        assert!(validate(&pkg).is_err());
    }

    #[test]
    fn test_direct_dependencies_order() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let names: Vec<String> = direct_dependencies(&pkg, true)
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(
            names,
            vec!["react", "react-dom", "lodash", "typescript", "jest"]
        );
    }

    #[test]
    fn test_direct_dependencies_without_dev() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = direct_dependencies(&pkg, false);

        assert_eq!(deps.len(), 3);
        assert!(deps
            .iter()
            .all(|d| d.dep_type == DependencyType::Production));
    }

    #[test]
    fn test_direct_dependencies_keeps_duplicates() {
        let json = r#"{
            "name": "dup",
            "dependencies": {"shared": "^1.0.0"},
            "devDependencies": {"shared": "^1.0.0"}
        }"#;
        let pkg = parse_str(json).unwrap();
        let deps = direct_dependencies(&pkg, true);

        assert_eq!(deps.len(), 2);
        assert!(deps.iter().all(|d| d.name == "shared"));
    }

    #[test]
    fn test_direct_dependencies_skip_peer_and_optional() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = direct_dependencies(&pkg, true);

        assert_eq!(deps.len(), 5);
        assert!(deps.iter().all(|d| d.name != "fsevents"));
        assert_eq!(
            deps.iter()
                .filter(|d| d.dep_type == DependencyType::Production)
                .count(),
            3
        );
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        // package.json often has many other fields; ensure we ignore them gracefully
        let json = r#"{
            "name": "with-extras",
            "version": "1.0.0",
            "scripts": {"build": "tsc"},
            "author": "Test Author",
            "license": "MIT",
            "repository": {"type": "git", "url": "https://example.com"},
            "dependencies": {"express": "^4.18.0"}
        }"#;

        let pkg = parse_str(json).unwrap();
        assert_eq!(pkg.name, Some("with-extras".to_string()));
        assert_eq!(pkg.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));

        let invalid_err = ParseError::InvalidPackage("missing name".to_string());
        assert!(invalid_err.to_string().contains("Invalid package.json"));

        let lock_err = ParseError::InvalidLockfile("no tree".to_string());
        assert!(lock_err.to_string().contains("Invalid package-lock.json"));
    }
}
