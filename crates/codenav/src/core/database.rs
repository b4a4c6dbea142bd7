//! Core database trait for structure storage
//!
//! The extraction stage writes into a database and the placement and
//! rendering stages read from it. Databases are append-only: nothing in the
//! pipeline removes a node once it has been discovered.

/// Core trait for structure databases
///
/// The associated types let the database expose its own node and edge
/// representations to the later pipeline stages.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in discovery order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges, grouped by source node in discovery order
    fn edges(&self) -> impl Iterator<Item = Self::Edge>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
