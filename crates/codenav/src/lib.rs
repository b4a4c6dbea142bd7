//! Codenav - Extract class structure from transcribed source code
//!
//! A library for folding OCR-transcribed C++, Java and Kotlin text into a
//! class structure graph, and laying that graph out on rings of slots for a
//! spatial viewer.
//!
//! # Quick Start
//!
//! ```rust
//! use codenav::report;
//!
//! let text = "class Circle : public Shape {";
//! let report = report("cpp", text).unwrap();
//! assert!(report.starts_with("Circle class details:"));
//! ```
//!
//! # Advanced Usage
//!
//! A session keeps the graph and its placement across many blocks of text:
//!
//! ```rust
//! use codenav::prelude::*;
//!
//! let mut session = NavigatorSession::new();
//! session.ingest("kotlin", "class Shape {").unwrap();
//! session.place().unwrap();
//!
//! session.ingest("kotlin", "class Circle(r: Double) : Shape() {").unwrap();
//! let update = session.place().unwrap();
//!
//! assert_eq!(update.new_nodes.len(), 1);
//! assert_eq!(update.new_nodes[0].name, "Circle");
//! assert_eq!(session.layout().connection_count(), 1);
//! ```

pub mod core;
pub mod session;
pub mod structure;

pub use crate::core::*;
pub use session::NavigatorSession;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, LayoutAlgorithm, NavigatorError, Parser, RelationKind, Renderer, Vec3,
    };
    pub use crate::session::NavigatorSession;
    pub use crate::structure::{
        ClassEntity, Connection, ConnectionKey, Dialect, Marker, PlacedClass, PlacementConfig,
        PlacementTableRenderer, PlacementUpdate, ReportRenderer, StructureGraph, StructureLayout,
        StructureParser,
    };
}

/// Extract the class structure of a single block of text
///
/// # Example
/// ```rust
/// use codenav::extract;
///
/// let graph = extract("java", "class Circle extends Shape {").unwrap();
/// assert_eq!(graph.class_count(), 1);
/// assert_eq!(graph.get_class("Circle").unwrap().first_parent(), Some("Shape"));
/// ```
pub fn extract(dialect: &str, text: &str) -> anyhow::Result<structure::StructureGraph> {
    use crate::core::Parser as _;
    use crate::structure::{Dialect, StructureGraph, StructureParser};

    let dialect: Dialect = dialect.parse()?;
    let mut graph = StructureGraph::new();
    StructureParser::new(dialect).parse(text, &mut graph)?;
    Ok(graph)
}

/// Extract a single block of text and render its class report
///
/// # Example
/// ```rust
/// use codenav::report;
///
/// let text = report("java", "class Shape {").unwrap();
/// assert_eq!(text, "Shape class details:\n\tParent classes:\n\tReference classes:\n\n");
/// ```
pub fn report(dialect: &str, text: &str) -> anyhow::Result<String> {
    use crate::core::Renderer as _;
    use crate::structure::ReportRenderer;

    let graph = extract(dialect, text)?;
    ReportRenderer::new().render(&graph)
}
