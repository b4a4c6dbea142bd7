//! Core abstractions for structure extraction
//!
//! This module defines the pipeline traits (database, parser, layout,
//! renderer) together with the shared error, logging and geometry types.

mod database;
mod error;
mod layout;
pub mod logging;
mod parser;
mod renderer;
mod types;

pub use database::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use types::*;
