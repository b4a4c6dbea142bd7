//! Core error types for structure extraction
//!
//! This module defines the error taxonomy shared by the extraction, placement
//! and rendering stages.

use thiserror::Error;

/// Core error types for structure extraction and placement
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Unsupported dialect: {dialect} (expected one of cpp, c++, java, kotlin)")]
    UnsupportedDialect { dialect: String },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl NavigatorError {
    /// Create a new unsupported dialect error
    pub fn unsupported_dialect(dialect: impl Into<String>) -> Self {
        Self::UnsupportedDialect {
            dialect: dialect.into(),
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::LayoutError { message }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }

    /// Returns true if this error rejected the dialect tag of an `ingest` call
    pub fn is_unsupported_dialect(&self) -> bool {
        matches!(self, Self::UnsupportedDialect { .. })
    }
}
