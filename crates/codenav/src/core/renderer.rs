//! Core renderer trait for textual output
//!
//! Renderers turn a database or a layout into text for a collaborator to
//! display. They never mutate what they render.

use anyhow::Result;

/// Core trait for renderers over a source `S`
pub trait Renderer<S>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the source into the output format
    fn render(&self, source: &S) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
