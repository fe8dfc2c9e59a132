//! CSV export implementation.
//!
//! Writes the link list as `source,target,value` rows for spreadsheet or
//! graph-tool import.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "source,target,value")?;

        for link in &data.view.links {
            writeln!(
                writer,
                "{},{},{}",
                Self::escape_field(&link.source),
                Self::escape_field(&link.target),
                link.value
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_graph;
    use crate::graph::DependencyGraph;

    #[test]
    fn test_csv_export_basic() {
        let data = ExportData::new("app".to_string(), "1.0.0".to_string(), &sample_graph());
        let mut output = Vec::new();

        CsvExporter.export(&data, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Header + 4 links
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "source,target,value");
        assert_eq!(lines[1], "app,a,1");
        assert_eq!(lines[2], "app,b,2");
    }

    #[test]
    fn test_csv_escape_field() {
        assert_eq!(CsvExporter::escape_field("simple"), "simple");
        assert_eq!(CsvExporter::escape_field("has,comma"), "\"has,comma\"");
        assert_eq!(
            CsvExporter::escape_field("has\"quote"),
            "\"has\"\"quote\""
        );
        assert_eq!(
            CsvExporter::escape_field("has\nnewline"),
            "\"has\nnewline\""
        );
    }

    #[test]
    fn test_csv_export_scoped_names() {
        let mut graph = DependencyGraph::new();
        graph.ensure_node("@scope/app", 1);
        graph.ensure_node("@types/node", 2);
        graph.increment_link("@scope/app", "@types/node");

        let data = ExportData::new("@scope/app".to_string(), String::new(), &graph);
        let mut output = Vec::new();
        CsvExporter.export(&data, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();
        assert!(csv_str.contains("@scope/app,@types/node,1"));
    }

    #[test]
    fn test_csv_export_empty_graph() {
        let data = ExportData::new("x".to_string(), String::new(), &DependencyGraph::new());
        let mut output = Vec::new();
        CsvExporter.export(&data, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "source,target,value\n");
    }
}
