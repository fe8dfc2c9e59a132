//! Builds a [`DependencyGraph`] from a manifest and its lock tree.
//!
//! The walk is a depth-first pre-order over the lock tree. Each package's
//! nested `dependencies` are visited before its `requires`, both in
//! declaration order. Nested entries resolve against the local map, while
//! `requires` entries resolve against the root (hoisted) map.
//!
//! The only cycle guard is link existence: a child is expanded the first
//! time the link `source -> child` is created and never again from that
//! source. A package can still be reached again from a different source.

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use tracing::{debug, info, trace};

use super::dependency_graph::DependencyGraph;
use crate::parser::direct_dependencies;
use crate::parser::types::{LockDependency, PackageJson, PackageLock};

/// Tier of the project itself.
pub const ROOT_TIER: usize = 1;

/// Tier of packages listed directly in the manifest.
pub const DIRECT_TIER: usize = 2;

/// Errors raised while building a graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The manifest has no usable `name` for the root node.
    #[error("manifest has no package name")]
    MissingName,
}

/// Result type alias for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Knobs for a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Seed the graph with `devDependencies` as well as `dependencies`.
    pub include_dev_dependencies: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            include_dev_dependencies: true,
        }
    }
}

/// Where a dependency name is looked up.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// A package's own nested `dependencies` map.
    Local(&'a IndexMap<String, LockDependency>),
    /// The lockfile's top-level `dependencies` map.
    Root,
}

/// Resolves dependency names to lock entries.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    root: &'a IndexMap<String, LockDependency>,
}

impl<'a> Resolver<'a> {
    pub fn new(lock: &'a PackageLock) -> Self {
        Self {
            root: &lock.dependencies,
        }
    }

    /// Looks `name` up in `scope`. A missing entry is not an error; the
    /// package is treated as a leaf.
    pub fn resolve(&self, name: &str, scope: Scope<'a>) -> Option<&'a LockDependency> {
        match scope {
            Scope::Local(map) => map.get(name),
            Scope::Root => self.root.get(name),
        }
    }
}

/// One pending expansion on the traversal stack.
struct Frame<'a> {
    source: NodeIndex,
    /// Tier given to packages first discovered from `source`.
    tier: usize,
    record: &'a LockDependency,
    /// Cursor over `dependencies` followed by `requires`.
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(source: NodeIndex, tier: usize, record: &'a LockDependency) -> Self {
        Self {
            source,
            tier,
            record,
            next: 0,
        }
    }

    fn next_child(&mut self) -> Option<(&'a str, Scope<'a>)> {
        let record = self.record;
        let nested = record.dependencies.len();
        let idx = self.next;
        self.next += 1;

        if idx < nested {
            let (name, _) = record.dependencies.get_index(idx)?;
            Some((name.as_str(), Scope::Local(&record.dependencies)))
        } else {
            let (name, _) = record.requires.get_index(idx - nested)?;
            Some((name.as_str(), Scope::Root))
        }
    }
}

/// Builds one graph from one manifest/lockfile pair.
///
/// The builder owns the graph it fills, so every build starts empty.
///
/// # Example
///
/// ```rust
/// use npm_graph::graph::GraphBuilder;
/// use npm_graph::parser::{package_json, package_lock};
///
/// let manifest = package_json::parse_str(r#"{
///     "name": "app",
///     "dependencies": {"debug": "^4.0.0"}
/// }"#).unwrap();
/// let lock = package_lock::parse_str(r#"{
///     "dependencies": {
///         "debug": {"version": "4.3.4", "requires": {"ms": "2.1.2"}},
///         "ms": {"version": "2.1.2"}
///     }
/// }"#).unwrap();
///
/// let graph = GraphBuilder::new(&manifest, &lock).build().unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.get_node("ms").unwrap().group, 3);
/// assert!(graph.contains_link("debug", "ms"));
/// ```
pub struct GraphBuilder<'a> {
    manifest: &'a PackageJson,
    resolver: Resolver<'a>,
    options: BuildOptions,
    graph: DependencyGraph,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(manifest: &'a PackageJson, lock: &'a PackageLock) -> Self {
        Self::with_options(manifest, lock, BuildOptions::default())
    }

    pub fn with_options(
        manifest: &'a PackageJson,
        lock: &'a PackageLock,
        options: BuildOptions,
    ) -> Self {
        Self {
            manifest,
            resolver: Resolver::new(lock),
            options,
            graph: DependencyGraph::with_capacity(lock.dependencies.len() + 1, 0),
        }
    }

    /// Runs the traversal and returns the finished graph.
    pub fn build(mut self) -> BuildResult<DependencyGraph> {
        let manifest = self.manifest;
        let root_name = manifest.package_name().ok_or(BuildError::MissingName)?;
        let (root, _) = self.graph.ensure_node(root_name, ROOT_TIER);

        let direct = direct_dependencies(manifest, self.options.include_dev_dependencies);

        let mut seeds = Vec::with_capacity(direct.len());
        for dep in &direct {
            let (idx, _) = self.graph.ensure_node(&dep.name, DIRECT_TIER);
            let value = self.graph.increment_link_between(root, idx);
            trace!(
                package = %dep.name,
                kind = %dep.dep_type,
                value,
                "linked direct dependency"
            );
            seeds.push((idx, dep.name.as_str()));
        }

        for (idx, name) in seeds {
            match self.resolver.resolve(name, Scope::Root) {
                Some(record) => self.expand(idx, name, DIRECT_TIER + 1, record),
                None => trace!(package = name, "no lock entry, leaving as leaf"),
            }
        }

        info!(
            root = root_name,
            nodes = self.graph.node_count(),
            links = self.graph.link_count(),
            "built dependency graph"
        );

        Ok(self.graph)
    }

    fn expand(&mut self, source: NodeIndex, name: &str, tier: usize, record: &'a LockDependency) {
        let mut stack = Vec::new();
        push_frame(&mut stack, name, source, tier, record);

        while let Some(frame) = stack.last_mut() {
            let Some((child, scope)) = frame.next_child() else {
                stack.pop();
                continue;
            };
            let (source, tier) = (frame.source, frame.tier);

            let seen = self
                .graph
                .node_index(child)
                .is_some_and(|target| self.graph.has_link_between(source, target));
            if seen {
                continue;
            }

            let (target, _) = self.graph.ensure_node(child, tier);
            self.graph.insert_link_between_if_absent(source, target);

            match self.resolver.resolve(child, scope) {
                Some(record) => push_frame(&mut stack, child, target, tier + 1, record),
                None => trace!(package = child, "no lock entry, leaving as leaf"),
            }
        }
    }
}

/// Schedules `record` for expansion. Every expanded package passes through
/// here exactly once per expansion.
fn push_frame<'a>(
    stack: &mut Vec<Frame<'a>>,
    name: &str,
    source: NodeIndex,
    tier: usize,
    record: &'a LockDependency,
) {
    debug!("flattening dependencies for {}", name);
    stack.push(Frame::new(source, tier, record));
}

/// Builds a graph with default options.
pub fn build(manifest: &PackageJson, lock: &PackageLock) -> BuildResult<DependencyGraph> {
    GraphBuilder::new(manifest, lock).build()
}
