//! Session facade tying extraction and placement together
//!
//! A session owns one structure graph and its placement state. The host
//! application creates one per document, hands it each block of transcribed
//! text as it arrives, and queries the report and placement afterwards:
//! Dialect → Parser → StructureGraph → Layout → Renderer

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{LayoutAlgorithm, Parser, Renderer};
use crate::structure::{
    Dialect, PlacementConfig, PlacementUpdate, ReportRenderer, StructureGraph, StructureLayout,
    StructureParser,
};

/// One visualization session: an append-only graph plus its placement
///
/// Calls must be serialized by the owner; `&mut self` on every mutating
/// method enforces that within safe code.
#[derive(Debug, Clone, Default)]
pub struct NavigatorSession {
    graph: StructureGraph,
    layout: StructureLayout,
    report_renderer: ReportRenderer,
}

impl NavigatorSession {
    /// Create an empty session with the default placement spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom placement spacing
    pub fn with_config(config: PlacementConfig) -> Result<Self> {
        Ok(Self {
            graph: StructureGraph::new(),
            layout: StructureLayout::try_with_config(config)?,
            report_renderer: ReportRenderer::new(),
        })
    }

    /// Fold a block of text into the graph
    ///
    /// The dialect tag is validated before anything is touched, so an
    /// unsupported tag leaves the graph exactly as it was.
    /// Returns `true` if a declaration or reference was recorded.
    pub fn ingest(&mut self, dialect: &str, text: &str) -> Result<bool> {
        let dialect = match dialect.parse::<Dialect>() {
            Ok(dialect) => dialect,
            Err(e) => {
                warn!(dialect, "Rejected ingest with unsupported dialect");
                return Err(e.into());
            }
        };
        self.ingest_dialect(dialect, text)
    }

    /// Fold a block of text into the graph using an already-validated dialect
    pub fn ingest_dialect(&mut self, dialect: Dialect, text: &str) -> Result<bool> {
        let ingest_span = span!(Level::INFO, "ingest", %dialect, text_len = text.len());
        let _enter = ingest_span.enter();

        let extracted = StructureParser::new(dialect).parse(text, &mut self.graph)?;
        if extracted {
            info!(class_count = self.graph.class_count(), "Structure extracted");
        } else {
            debug!("No structure found in text");
        }
        Ok(extracted)
    }

    /// Assign slots to new classes and materialise any ready connectors
    pub fn place(&mut self) -> Result<PlacementUpdate> {
        self.layout.layout(&self.graph)
    }

    /// Ingest, then place if anything was extracted
    ///
    /// Returns `None` when the text produced no structure, which callers may
    /// treat as a signal to retry transcription.
    pub fn ingest_and_place(&mut self, dialect: &str, text: &str) -> Result<Option<PlacementUpdate>> {
        if self.ingest(dialect, text)? {
            self.place().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Render the class report in discovery order
    pub fn formatted_report(&self) -> Result<String> {
        self.report_renderer.render(&self.graph)
    }

    pub fn graph(&self) -> &StructureGraph {
        &self.graph
    }

    pub fn layout(&self) -> &StructureLayout {
        &self.layout
    }
}
