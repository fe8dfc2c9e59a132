//! JSON export implementation.
//!
//! Writes `{ "nodes": [{id, group}], "links": [{source, target, value}] }`,
//! ready to hand to a force simulation.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// JSON exporter implementation.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    /// Indent the output
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    /// Single-line output, e.g. for embedding in a page.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&data.view)
        } else {
            serde_json::to_string(&data.view)
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_graph;
    use crate::graph::GraphView;

    fn create_test_data() -> ExportData {
        ExportData::new("app".to_string(), "1.0.0".to_string(), &sample_graph())
    }

    #[test]
    fn test_json_export_shape() {
        let data = create_test_data();
        let mut output = Vec::new();

        JsonExporter::default().export(&data, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(parsed["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["links"].as_array().unwrap().len(), 4);

        assert_eq!(parsed["nodes"][3]["id"], "c");
        assert_eq!(parsed["nodes"][3]["group"], 3);
        assert_eq!(parsed["links"][1]["target"], "b");
        assert_eq!(parsed["links"][1]["value"], 2);
    }

    #[test]
    fn test_json_compact_is_one_line() {
        let data = create_test_data();
        let mut output = Vec::new();

        JsonExporter::compact().export(&data, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        assert_eq!(json_str.trim_end().lines().count(), 1);

        let view: GraphView = serde_json::from_str(&json_str).unwrap();
        assert_eq!(view, data.view);
    }
}
