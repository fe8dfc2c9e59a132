//! Markdown export implementation.
//!
//! Writes a short report: summary counts, packages per tier, the most
//! depended-on packages and any circular dependencies.

use super::{ExportData, Exporter};
use std::collections::HashMap;
use std::io::{self, Write};

/// How many packages the "most depended on" table lists.
const TOP_DEPENDED: usize = 10;

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Packages ranked by incoming link count, ties broken by name.
    fn most_depended_on(data: &ExportData) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for link in &data.view.links {
            *counts.entry(link.target.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(TOP_DEPENDED);
        ranked
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Dependency Graph Report")?;
        writeln!(writer)?;
        if data.project_version.is_empty() {
            writeln!(writer, "**Project:** {}", data.project_name)?;
        } else {
            writeln!(
                writer,
                "**Project:** {} v{}",
                data.project_name, data.project_version
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Packages | {} |", data.node_count())?;
        writeln!(writer, "| Links | {} |", data.link_count())?;
        writeln!(writer, "| Direct Dependencies | {} |", data.direct_count())?;
        writeln!(writer, "| Deepest Tier | {} |", data.max_group())?;
        writeln!(writer, "| Circular Dependencies | {} |", data.cycles.len())?;
        writeln!(writer)?;

        writeln!(writer, "## Packages by Tier")?;
        writeln!(writer)?;
        writeln!(writer, "| Tier | Packages |")?;
        writeln!(writer, "|------|----------|")?;
        for (group, count) in data.group_sizes() {
            writeln!(writer, "| {} | {} |", group, count)?;
        }
        writeln!(writer)?;

        let ranked = Self::most_depended_on(data);
        if !ranked.is_empty() {
            writeln!(writer, "## Most Depended On")?;
            writeln!(writer)?;
            writeln!(writer, "| Package | Dependents |")?;
            writeln!(writer, "|---------|------------|")?;
            for (name, count) in ranked {
                writeln!(writer, "| {} | {} |", name, count)?;
            }
            writeln!(writer)?;
        }

        if !data.cycles.is_empty() {
            writeln!(writer, "## Circular Dependencies")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "The following circular dependencies were detected:"
            )?;
            writeln!(writer)?;
            for (i, cycle) in data.cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle.cycle_path())?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by npm-graph*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_graph;
    use crate::graph::DependencyGraph;

    fn render(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_basic() {
        let data = ExportData::new("app".to_string(), "1.0.0".to_string(), &sample_graph());
        let md_str = render(&data);

        assert!(md_str.contains("# Dependency Graph Report"));
        assert!(md_str.contains("**Project:** app v1.0.0"));
        assert!(md_str.contains("| Packages | 4 |"));
        assert!(md_str.contains("| Links | 4 |"));
        assert!(md_str.contains("| Direct Dependencies | 2 |"));
        assert!(md_str.contains("| Deepest Tier | 3 |"));
    }

    #[test]
    fn test_markdown_export_tiers() {
        let data = ExportData::new("app".to_string(), "1.0.0".to_string(), &sample_graph());
        let md_str = render(&data);

        assert!(md_str.contains("## Packages by Tier"));
        assert!(md_str.contains("| 2 | 2 |"));
        assert!(md_str.contains("| 3 | 1 |"));
    }

    #[test]
    fn test_markdown_export_with_cycles() {
        let data = ExportData::new("app".to_string(), "1.0.0".to_string(), &sample_graph());
        let md_str = render(&data);

        assert!(md_str.contains("## Circular Dependencies"));
        assert!(md_str.contains("circular dependencies were detected"));
    }

    #[test]
    fn test_markdown_most_depended_on() {
        let mut graph = DependencyGraph::new();
        for (name, group) in [("app", 1), ("x", 2), ("y", 2), ("z", 3)] {
            graph.ensure_node(name, group);
        }
        graph.increment_link("app", "x");
        graph.increment_link("app", "y");
        graph.insert_link_if_absent("x", "z");
        graph.insert_link_if_absent("y", "z");

        let data = ExportData::new("app".to_string(), String::new(), &graph);
        let ranked = MarkdownExporter::most_depended_on(&data);

        assert_eq!(ranked[0], ("z", 2));
        assert_eq!(ranked.len(), 3);

        let md_str = render(&data);
        assert!(md_str.contains("**Project:** app\n"));
        assert!(md_str.contains("| z | 2 |"));
    }

    #[test]
    fn test_markdown_export_no_cycle_section_when_acyclic() {
        let mut graph = DependencyGraph::new();
        graph.ensure_node("app", 1);
        let data = ExportData::new("app".to_string(), "1.0.0".to_string(), &graph);
        let md_str = render(&data);

        assert!(!md_str.contains("## Circular Dependencies"));
        assert!(!md_str.contains("## Most Depended On"));
        assert!(md_str.contains("*Generated by npm-graph*"));
    }
}
