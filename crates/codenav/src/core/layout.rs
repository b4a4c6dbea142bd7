//! Core layout trait for spatial placement
//!
//! Unlike a one-shot layout, placement here is incremental: the algorithm
//! keeps its own state between calls so that positions already handed to the
//! renderer never move.

use anyhow::Result;

use super::Database;

/// Core trait for incremental layout algorithms
///
/// # Example
/// ```
/// use codenav::core::{LayoutAlgorithm, Parser};
/// use codenav::structure::{Dialect, StructureGraph, StructureLayout, StructureParser};
///
/// let mut graph = StructureGraph::new();
/// StructureParser::new(Dialect::Cpp)
///     .parse("class Shape {", &mut graph)
///     .unwrap();
///
/// let mut layout = StructureLayout::new();
/// let update = layout.layout(&graph).unwrap();
/// assert_eq!(update.new_nodes.len(), 1);
/// ```
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The output type of one layout pass
    type Output;

    /// Place whatever is new in the database since the previous pass
    fn layout(&mut self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
