//! Class structure extraction and placement
//!
//! Dialect rules feed the extraction engine, which grows the structure graph;
//! the layout assigns slots and connectors; renderers turn both into text.

mod database;
mod dialect;
mod layout;
mod parser;
mod renderer;

pub use database::{ClassEntity, Relationship, StructureGraph};
pub use dialect::Dialect;
pub use layout::{
    Connection, ConnectionKey, Marker, PlacedClass, PlacementConfig, PlacementUpdate,
    StructureLayout, CLASS_NODE_PADDING, CLASS_NODE_SIZE, DEFAULT_DEPTH_STEP, SLOTS_PER_RING,
};
pub use parser::{declared_class_name, StructureParser};
pub use renderer::{
    PlacementTableRenderer, ReportRenderer, CLASS_HEADER_SUFFIX, PARENT_HEADING,
    REFERENCE_HEADING,
};
