//! Dependency graph implementation using petgraph.
//!
//! Nodes are packages keyed by name, edges are weighted "depends on"
//! relationships. Both are unique: a name maps to one node and an ordered
//! `(source, target)` pair maps to one link whose `value` counts how often
//! the relationship was recorded.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A package in the graph.
///
/// `group` is the tier at which the package was first discovered: 1 for the
/// root project, 2 for its direct dependencies, and so on. Renderers use it
/// for coloring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Package name, unique within a graph
    pub id: String,
    /// Tier of first discovery
    pub group: usize,
}

impl Node {
    /// Creates a new node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use npm_graph::graph::Node;
    ///
    /// let node = Node::new("react", 2);
    /// assert_eq!(node.id, "react");
    /// assert_eq!(node.group, 2);
    /// ```
    pub fn new(id: impl Into<String>, group: usize) -> Self {
        Self {
            id: id.into(),
            group,
        }
    }
}

/// Weight stored on a petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LinkWeight {
    value: u32,
}

/// A directed, weighted relationship between two packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// The dependent package
    pub source: String,
    /// The dependency
    pub target: String,
    /// How many times the relationship was recorded (at least 1)
    pub value: u32,
}

/// Serializable `{ nodes, links }` form of a graph, the shape force-directed
/// renderers consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// A directed graph of package dependencies.
///
/// Edges point from the dependent package to its dependency. Nodes and
/// links iterate in insertion order.
///
/// # Example
///
/// ```rust
/// use npm_graph::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.ensure_node("my-app", 1);
/// graph.ensure_node("react", 2);
/// graph.ensure_node("react-dom", 2);
///
/// graph.increment_link("my-app", "react");
/// graph.increment_link("my-app", "react-dom");
/// graph.increment_link("my-app", "react");
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.link_count(), 2);
/// assert_eq!(graph.link_value("my-app", "react"), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<Node, LinkWeight>,
    /// Maps package names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    /// Maps ordered (source, target) pairs to their single edge
    link_indices: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            link_indices: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, links),
            node_indices: HashMap::with_capacity(nodes),
            link_indices: HashMap::with_capacity(links),
        }
    }

    /// Ensures a node named `id` exists.
    ///
    /// A new node gets `group`; an existing node keeps the group it was
    /// created with.
    ///
    /// # Returns
    ///
    /// The node index and whether the node was created by this call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use npm_graph::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// let (_, created) = graph.ensure_node("lodash", 3);
    /// assert!(created);
    ///
    /// let (_, created) = graph.ensure_node("lodash", 2);
    /// assert!(!created);
    /// assert_eq!(graph.get_node("lodash").unwrap().group, 3);
    /// ```
    pub fn ensure_node(&mut self, id: &str, group: usize) -> (NodeIndex, bool) {
        if let Some(&idx) = self.node_indices.get(id) {
            return (idx, false);
        }

        let idx = self.graph.add_node(Node::new(id, group));
        self.node_indices.insert(id.to_string(), idx);
        (idx, true)
    }

    /// Returns the index of the node named `id`.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Returns the node stored at `idx`.
    pub fn node_at(&self, idx: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(idx)
    }

    /// True if a link `source -> target` exists.
    pub fn has_link_between(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.link_indices.contains_key(&(source, target))
    }

    /// Creates the link `source -> target` with value 1 unless it exists.
    ///
    /// Returns `true` if the link was created.
    pub fn insert_link_between_if_absent(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> bool {
        if self.has_link_between(source, target) {
            return false;
        }
        let edge = self
            .graph
            .add_edge(source, target, LinkWeight { value: 1 });
        self.link_indices.insert((source, target), edge);
        true
    }

    /// Creates the link `source -> target` with value 1, or adds 1 to the
    /// value of the existing link. Returns the new value.
    pub fn increment_link_between(&mut self, source: NodeIndex, target: NodeIndex) -> u32 {
        if let Some(&edge) = self.link_indices.get(&(source, target)) {
            if let Some(weight) = self.graph.edge_weight_mut(edge) {
                weight.value += 1;
                return weight.value;
            }
        }
        self.insert_link_between_if_absent(source, target);
        1
    }

    /// Name-based form of [`increment_link_between`](Self::increment_link_between).
    ///
    /// Returns `None` if either node does not exist.
    pub fn increment_link(&mut self, source: &str, target: &str) -> Option<u32> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        Some(self.increment_link_between(from, to))
    }

    /// Name-based form of [`insert_link_between_if_absent`](Self::insert_link_between_if_absent).
    ///
    /// Returns `false` if the link already exists or either node is missing.
    pub fn insert_link_if_absent(&mut self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(from), Some(to)) => self.insert_link_between_if_absent(from, to),
            _ => false,
        }
    }

    /// True if a package with this name is in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// True if the link `source -> target` is in the graph.
    pub fn contains_link(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(from), Some(to)) => self.has_link_between(from, to),
            _ => false,
        }
    }

    /// Gets a node by package name.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Gets the link `source -> target`.
    pub fn get_link(&self, source: &str, target: &str) -> Option<Link> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        let edge = self.link_indices.get(&(from, to))?;
        let weight = self.graph.edge_weight(*edge)?;
        Some(Link {
            source: source.to_string(),
            target: target.to_string(),
            value: weight.value,
        })
    }

    /// Value of the link `source -> target`, if present.
    pub fn link_value(&self, source: &str, target: &str) -> Option<u32> {
        self.get_link(source, target).map(|link| link.value)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.graph.node_weights().collect()
    }

    /// All links in insertion order.
    pub fn links(&self) -> Vec<Link> {
        self.graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.node_at(edge.source())?;
                let target = self.node_at(edge.target())?;
                Some(Link {
                    source: source.id.clone(),
                    target: target.id.clone(),
                    value: edge.weight().value,
                })
            })
            .collect()
    }

    /// The first node inserted, which the builder makes the project root.
    pub fn root(&self) -> Option<&Node> {
        self.graph.node_weights().next()
    }

    /// Packages that `id` links to (outgoing edges).
    ///
    /// # Example
    ///
    /// ```rust
    /// use npm_graph::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.ensure_node("my-app", 1);
    /// graph.ensure_node("react", 2);
    /// graph.increment_link("my-app", "react");
    ///
    /// let deps = graph.dependencies_of("my-app");
    /// assert_eq!(deps.len(), 1);
    /// assert_eq!(deps[0].id, "react");
    /// ```
    pub fn dependencies_of(&self, id: &str) -> Vec<&Node> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Packages that link to `id` (incoming edges).
    pub fn dependents_of(&self, id: &str) -> Vec<&Node> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&Node> {
        let Some(idx) = self.node_index(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph.node_weight(other)
            })
            .collect()
    }

    /// Nodes first discovered at the given tier.
    pub fn nodes_in_group(&self, group: usize) -> Vec<&Node> {
        self.graph
            .node_weights()
            .filter(|node| node.group == group)
            .collect()
    }

    /// Deepest tier present in the graph (0 for an empty graph).
    pub fn max_group(&self) -> usize {
        self.graph
            .node_weights()
            .map(|node| node.group)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if the graph contains cycles.
    ///
    /// # Example
    ///
    /// ```rust
    /// use npm_graph::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.ensure_node("a", 2);
    /// graph.ensure_node("b", 3);
    /// graph.insert_link_if_absent("a", "b");
    /// graph.insert_link_if_absent("b", "a");
    ///
    /// assert!(graph.has_cycles());
    /// ```
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all cycles in the graph.
    ///
    /// Every strongly connected component with more than one package, and
    /// every package linking to itself, is reported as one cycle.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                let cycle: Vec<String> = scc
                    .iter()
                    .filter_map(|&idx| self.graph.node_weight(idx))
                    .map(|node| node.id.clone())
                    .collect();
                cycles.push(cycle);
            } else if let [idx] = scc.as_slice() {
                let idx = *idx;
                if self.has_link_between(idx, idx) {
                    cycles.push(vec![self.graph[idx].id.clone()]);
                }
            }
        }

        cycles
    }

    /// Returns the names of all packages that are part of any cycle.
    pub fn nodes_in_cycles(&self) -> HashSet<String> {
        self.detect_cycles().into_iter().flatten().collect()
    }

    /// Returns cycle information including a printable path.
    pub fn cycle_details(&self) -> Vec<CycleInfo> {
        self.detect_cycles()
            .into_iter()
            .map(|nodes| CycleInfo { nodes })
            .collect()
    }

    /// Snapshot of the graph as `{ nodes, links }`.
    pub fn view(&self) -> GraphView {
        GraphView {
            nodes: self.graph.node_weights().cloned().collect(),
            links: self.links(),
        }
    }

    /// Serializes the graph as compact `{ "nodes": [...], "links": [...] }` JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.view())
    }

    /// Serializes the graph as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.view())
    }
}

impl From<&DependencyGraph> for GraphView {
    fn from(graph: &DependencyGraph) -> Self {
        graph.view()
    }
}

/// Information about a detected circular dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The package names in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a printable path, e.g. "a -> b -> c -> a".
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns the number of packages in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
