//! Export functionality for dependency graphs.
//!
//! This module provides exporters for writing a built graph in various
//! formats: JSON (the `{nodes, links}` shape renderers consume), CSV and
//! Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::graph::{CycleInfo, DependencyGraph, GraphView, DIRECT_TIER};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - `{ nodes, links }` for force-directed renderers
    #[default]
    Json,
    /// CSV format - one row per link
    Csv,
    /// Markdown format - summary report
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Data container for export operations.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Project name
    pub project_name: String,
    /// Project version
    pub project_version: String,
    /// Nodes and links in insertion order
    pub view: GraphView,
    /// Detected circular dependencies
    pub cycles: Vec<CycleInfo>,
}

impl ExportData {
    /// Create export data from a built graph.
    pub fn new(project_name: String, project_version: String, graph: &DependencyGraph) -> Self {
        Self {
            project_name,
            project_version,
            view: graph.view(),
            cycles: graph.cycle_details(),
        }
    }

    /// Number of packages
    pub fn node_count(&self) -> usize {
        self.view.nodes.len()
    }

    /// Number of distinct links
    pub fn link_count(&self) -> usize {
        self.view.links.len()
    }

    /// Number of packages listed directly in the manifest
    pub fn direct_count(&self) -> usize {
        self.view
            .nodes
            .iter()
            .filter(|n| n.group == DIRECT_TIER)
            .count()
    }

    /// Deepest tier reached
    pub fn max_group(&self) -> usize {
        self.view.nodes.iter().map(|n| n.group).max().unwrap_or(0)
    }

    /// Package count per tier, ascending
    pub fn group_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for node in &self.view.nodes {
            *sizes.entry(node.group).or_insert(0) += 1;
        }
        sizes
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter::default().export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::graph::DependencyGraph;

    /// app -> a, app -> b (x2), a -> c, c -> a
    pub fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.ensure_node("app", 1);
        graph.ensure_node("a", 2);
        graph.ensure_node("b", 2);
        graph.ensure_node("c", 3);
        graph.increment_link("app", "a");
        graph.increment_link("app", "b");
        graph.increment_link("app", "b");
        graph.insert_link_if_absent("a", "c");
        graph.insert_link_if_absent("c", "a");
        graph
    }
}
