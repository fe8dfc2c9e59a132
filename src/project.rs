//! Loading an npm project from disk.
//!
//! This is the host side of the builder: it finds the project folder, reads
//! `package.json` and `package-lock.json`, reports anything that goes wrong
//! and hands the parsed documents to [`GraphBuilder`].

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::graph::{BuildError, BuildOptions, DependencyGraph, GraphBuilder};
use crate::parser::{package_json, package_lock, PackageJson, PackageLock, ParseError};

/// File name of the npm manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// File name of the npm lockfile.
pub const LOCKFILE_FILE: &str = "package-lock.json";

/// Errors that can occur while loading a project or building its graph.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The project folder does not exist or is not a directory.
    #[error("Project folder not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// package.json could not be read, parsed or validated.
    #[error("{}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// package-lock.json could not be read, parsed or validated.
    #[error("{}: {source}", .path.display())]
    Lockfile {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The builder rejected the parsed documents.
    #[error("Failed to build dependency graph: {0}")]
    Build(#[from] BuildError),
}

/// Result type alias for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// A project folder with its parsed manifest and lockfile.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: PackageJson,
    pub lock: PackageLock,
}

impl Project {
    /// Reads and validates both documents under `root`.
    pub fn load(root: &Path) -> ProjectResult<Self> {
        if !root.is_dir() {
            return Err(ProjectError::MissingRoot(root.to_path_buf()));
        }

        let manifest_path = root.join(MANIFEST_FILE);
        debug!(path = %manifest_path.display(), "reading manifest");
        let manifest = package_json::parse_file(&manifest_path)
            .and_then(|pkg| package_json::validate(&pkg).map(|_| pkg))
            .map_err(|source| ProjectError::Manifest {
                path: manifest_path,
                source,
            })?;

        let lock_path = root.join(LOCKFILE_FILE);
        debug!(path = %lock_path.display(), "reading lockfile");
        let lock = package_lock::parse_file(&lock_path)
            .and_then(|lock| package_lock::validate(&lock).map(|_| lock))
            .map_err(|source| ProjectError::Lockfile {
                path: lock_path,
                source,
            })?;

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            lock,
        })
    }

    /// Project name from the manifest.
    pub fn name(&self) -> &str {
        self.manifest.package_name().unwrap_or_default()
    }

    /// Project version from the manifest, or an empty string.
    pub fn version(&self) -> &str {
        self.manifest.version.as_deref().unwrap_or_default()
    }

    /// Builds the dependency graph. Builder failures are logged and
    /// returned; nothing built so far is kept.
    pub fn build_graph(&self, options: BuildOptions) -> ProjectResult<DependencyGraph> {
        GraphBuilder::with_options(&self.manifest, &self.lock, options)
            .build()
            .map_err(|err| {
                error!(root = %self.root.display(), "{}", err);
                ProjectError::from(err)
            })
    }
}

/// Loads the project at `root` and builds its graph in one step.
pub fn load_graph(root: &Path, options: BuildOptions) -> ProjectResult<DependencyGraph> {
    Project::load(root)?.build_graph(options)
}
