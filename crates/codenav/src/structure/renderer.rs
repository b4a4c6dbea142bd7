//! Text renderers for the structure graph and its placement
//!
//! [`ReportRenderer`] produces the class hierarchy report shown next to the
//! transcribed text. [`PlacementTableRenderer`] produces a column-aligned
//! dump of slots, markers and connectors for inspecting a layout.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::{debug, span, Level};
use unicode_width::UnicodeWidthStr;

use super::database::StructureGraph;
use super::layout::StructureLayout;
use crate::core::{NavigatorError, Renderer};

/// Header line that opens each class block in the report
pub const CLASS_HEADER_SUFFIX: &str = " class details:";
/// Heading of the parent list in the report
pub const PARENT_HEADING: &str = "\tParent classes:";
/// Heading of the reference list in the report
pub const REFERENCE_HEADING: &str = "\tReference classes:";

/// Renders the human-readable class hierarchy report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn new() -> Self {
        Self
    }

    fn write_report(graph: &StructureGraph, out: &mut String) -> std::fmt::Result {
        for class in graph.classes() {
            write!(out, "{}{}", class.name, CLASS_HEADER_SUFFIX)?;
            write!(out, "\n{}", PARENT_HEADING)?;
            for parent in &class.parent_classes {
                write!(out, "\n\t\t{}", parent)?;
            }
            write!(out, "\n{}", REFERENCE_HEADING)?;
            for reference in &class.ref_classes {
                write!(out, "\n\t\t{}", reference)?;
            }
            out.push_str("\n\n");
        }
        Ok(())
    }
}

impl Renderer<StructureGraph> for ReportRenderer {
    type Output = String;

    fn render(&self, source: &StructureGraph) -> Result<Self::Output> {
        let render_span = span!(Level::DEBUG, "render_report", class_count = source.class_count());
        let _enter = render_span.enter();

        let mut out = String::new();
        Self::write_report(source, &mut out)
            .map_err(|e| NavigatorError::render_error(format!("failed to write report: {}", e)))?;

        debug!(output_len = out.len(), "Report rendered");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "report"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

/// Renders a column-aligned table of the current placement
#[derive(Debug, Clone, Copy)]
pub struct PlacementTableRenderer {
    column_gap: usize,
}

impl PlacementTableRenderer {
    pub fn new() -> Self {
        Self { column_gap: 2 }
    }

    fn pad(text: &str, width: usize) -> String {
        let padding = width.saturating_sub(UnicodeWidthStr::width(text));
        format!("{}{}", text, " ".repeat(padding))
    }

    fn write_rows(&self, rows: &[Vec<String>], out: &mut String) -> std::fmt::Result {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in rows {
            let mut line = String::new();
            for (col, cell) in row.iter().enumerate() {
                if col + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&Self::pad(cell, widths[col] + self.column_gap));
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn write_table(&self, layout: &StructureLayout, out: &mut String) -> std::fmt::Result {
        let mut rows = vec![vec![
            "slot".to_string(),
            "ring".to_string(),
            "class".to_string(),
            "position".to_string(),
        ]];
        rows.extend(layout.nodes().map(|node| {
            vec![
                node.slot_index.to_string(),
                node.ring().to_string(),
                node.name.clone(),
                node.position.to_string(),
            ]
        }));
        self.write_rows(&rows, out)?;

        if layout.marker_count() > 0 {
            writeln!(out)?;
            writeln!(out, "markers:")?;
            let rows: Vec<Vec<String>> = layout
                .markers()
                .map(|m| vec![format!("  {}", m.class), m.kind.to_string(), m.target.clone()])
                .collect();
            self.write_rows(&rows, out)?;
        }

        if layout.connection_count() > 0 {
            writeln!(out)?;
            writeln!(out, "connections:")?;
            let rows: Vec<Vec<String>> = layout
                .connections()
                .map(|c| {
                    vec![
                        format!("  {}", c.key.source),
                        format!("-{}->", c.key.kind),
                        c.key.target.clone(),
                        format!("{:.3}", c.length()),
                    ]
                })
                .collect();
            self.write_rows(&rows, out)?;
        }
        Ok(())
    }
}

impl Default for PlacementTableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<StructureLayout> for PlacementTableRenderer {
    type Output = String;

    fn render(&self, source: &StructureLayout) -> Result<Self::Output> {
        let render_span = span!(Level::DEBUG, "render_placement", node_count = source.node_count());
        let _enter = render_span.enter();

        let mut out = String::new();
        self.write_table(source, &mut out)
            .map_err(|e| NavigatorError::render_error(format!("failed to write table: {}", e)))?;
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "placement-table"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
