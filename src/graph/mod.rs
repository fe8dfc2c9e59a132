//! Graph module for dependency relationship modeling.
//!
//! [`DependencyGraph`] stores unique packages and unique weighted links;
//! [`GraphBuilder`] fills one from a manifest and its lock tree.
//!
//! # Example
//!
//! ```rust
//! use npm_graph::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.ensure_node("react-dom", 2);
//! graph.ensure_node("react", 2);
//! graph.increment_link("react-dom", "react");
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.link_count(), 1);
//! ```

pub mod builder;
mod dependency_graph;

pub use builder::{
    build, BuildError, BuildOptions, BuildResult, GraphBuilder, Resolver, Scope, DIRECT_TIER,
    ROOT_TIER,
};
pub use dependency_graph::{CycleInfo, DependencyGraph, GraphView, Link, Node};
