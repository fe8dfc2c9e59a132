//! npm-graph - dependency graphs for npm projects
//!
//! This crate turns a `package.json` and its `package-lock.json` into a
//! graph of unique packages and weighted dependency links, shaped for
//! force-directed visualization.

pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod project;
