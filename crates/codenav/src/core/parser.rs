//! Core parser trait for transcribed source text
//!
//! A parser consumes one block of text and folds whatever structure it can
//! recognise into an existing database.

use anyhow::Result;

use super::Database;

/// Core trait for text parsers
///
/// Parsing is incremental: the same database is passed to every call for a
/// session, and each call only adds to it.
///
/// # Example
/// ```
/// use codenav::core::{Database, Parser};
/// use codenav::structure::{Dialect, StructureGraph, StructureParser};
///
/// let parser = StructureParser::new(Dialect::Java);
/// let mut graph = StructureGraph::new();
/// let extracted = parser.parse("class Circle extends Shape {", &mut graph).unwrap();
/// assert!(extracted);
/// assert_eq!(graph.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse text into the provided database
    ///
    /// Returns `true` if anything (a declaration or a reference) was recorded.
    fn parse(&self, input: &str, database: &mut D) -> Result<bool>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}
