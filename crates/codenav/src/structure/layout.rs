//! Slot and connection placement
//!
//! Every discovered class gets a slot in a spiral of four-slot rings around
//! the anchor owned by the renderer. Slots are handed out once, in discovery
//! order, and never move. Each class then gets at most one connector to its
//! first parent and one to its first reference; a connector whose target has
//! not been placed yet is retried on every later pass.

use std::fmt;

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, span, trace, Level};

use super::database::StructureGraph;
use crate::core::{LayoutAlgorithm, NavigatorError, RelationKind, Vec3};

/// Edge length of a class node in the scene
pub const CLASS_NODE_SIZE: f32 = 0.08;

/// Gap kept between neighbouring class nodes
pub const CLASS_NODE_PADDING: f32 = 0.02;

/// Depth added per ring so overlapping rings never coincide
pub const DEFAULT_DEPTH_STEP: f32 = 0.01;

/// Slots per ring: +X, -Y, -X, +Y
pub const SLOTS_PER_RING: usize = 4;

const RING_DIRECTIONS: [Vec3; SLOTS_PER_RING] = [Vec3::POS_X, Vec3::NEG_Y, Vec3::NEG_X, Vec3::POS_Y];

/// Spacing knobs for slot placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Distance from the ring center to each slot, also added per ring along X
    pub spacing: f32,
    /// Depth offset added per ring
    pub depth_step: f32,
}

impl PlacementConfig {
    pub fn new(spacing: f32, depth_step: f32) -> Self {
        Self {
            spacing,
            depth_step,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_depth_step(mut self, depth_step: f32) -> Self {
        self.depth_step = depth_step;
        self
    }

    /// Check that the knobs describe a usable layout
    pub fn validate(&self) -> Result<(), NavigatorError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(NavigatorError::layout_error(format!(
                "spacing must be a positive finite number, got {}",
                self.spacing
            )));
        }
        if !self.depth_step.is_finite() || self.depth_step < 0.0 {
            return Err(NavigatorError::layout_error(format!(
                "depth step must be a non-negative finite number, got {}",
                self.depth_step
            )));
        }
        Ok(())
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spacing: (CLASS_NODE_SIZE + CLASS_NODE_PADDING) * 2.0,
            depth_step: DEFAULT_DEPTH_STEP,
        }
    }
}

/// A class that has been given a slot
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedClass {
    pub name: String,
    pub slot_index: usize,
    pub position: Vec3,
}

impl PlacedClass {
    /// Zero-based ring the slot belongs to
    pub fn ring(&self) -> usize {
        self.slot_index / SLOTS_PER_RING
    }
}

/// Identity of a connector: at most one exists per key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    pub source: String,
    pub kind: RelationKind,
    pub target: String,
}

impl ConnectionKey {
    pub fn new(source: impl Into<String>, kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            target: target.into(),
        }
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.source, self.kind, self.target)
    }
}

/// A materialised connector between two placed classes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub key: ConnectionKey,
    pub from: Vec3,
    pub to: Vec3,
}

impl Connection {
    /// Distance between the two slots
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Unit vector from source to target, zero for a self connection
    pub fn direction(&self) -> Vec3 {
        (self.to - self.from).normalized()
    }
}

/// Badge attached to a class for its first parent or first reference
///
/// Unlike connectors, markers do not need the target to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    pub class: String,
    pub kind: RelationKind,
    pub target: String,
}

/// What changed during one placement pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementUpdate {
    pub new_nodes: Vec<PlacedClass>,
    pub new_markers: Vec<Marker>,
    pub new_connections: Vec<Connection>,
    /// Connectors still waiting for their target to be placed
    pub deferred: Vec<ConnectionKey>,
}

impl PlacementUpdate {
    /// True if nothing new was placed (deferred connectors do not count)
    pub fn is_empty(&self) -> bool {
        self.new_nodes.is_empty() && self.new_markers.is_empty() && self.new_connections.is_empty()
    }
}

/// Incremental ring layout for a structure graph
#[derive(Debug, Clone)]
pub struct StructureLayout {
    config: PlacementConfig,
    nodes: IndexMap<String, PlacedClass>,
    markers: IndexSet<Marker>,
    connections: IndexMap<ConnectionKey, Connection>,
}

impl StructureLayout {
    pub fn new() -> Self {
        Self::from_valid_config(PlacementConfig::default())
    }

    /// Create a layout with custom spacing, rejecting unusable values
    pub fn try_with_config(config: PlacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PlacementConfig) -> Self {
        Self {
            config,
            nodes: IndexMap::new(),
            markers: IndexSet::new(),
            connections: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Offset of a slot from the ring center
    pub fn slot_position(&self, slot_index: usize) -> Vec3 {
        let ring = (slot_index / SLOTS_PER_RING) as f32;
        let direction = RING_DIRECTIONS[slot_index % SLOTS_PER_RING];
        direction * self.config.spacing
            + Vec3::new(ring * self.config.spacing, 0.0, ring * self.config.depth_step)
    }

    /// Place everything new in the graph and materialise pending connectors
    pub fn place(&mut self, graph: &StructureGraph) -> Result<PlacementUpdate> {
        let place_span = span!(
            Level::INFO,
            "place_structure",
            class_count = graph.class_count(),
            placed = self.nodes.len()
        );
        let _enter = place_span.enter();

        let mut update = PlacementUpdate::default();

        // Slots first, so a connector can target a class discovered later in the same graph
        for class in graph.classes() {
            if self.nodes.contains_key(&class.name) {
                continue;
            }
            let slot_index = self.nodes.len();
            let placed = PlacedClass {
                name: class.name.clone(),
                slot_index,
                position: self.slot_position(slot_index),
            };
            trace!(class = %placed.name, slot_index, position = %placed.position, "Assigned slot");
            self.nodes.insert(placed.name.clone(), placed.clone());
            update.new_nodes.push(placed);
        }

        for class in graph.classes().filter(|c| c.has_relationships()) {
            for kind in [RelationKind::Parent, RelationKind::Reference] {
                let Some(target) = class.first_related(kind) else {
                    continue;
                };

                let marker = Marker {
                    class: class.name.clone(),
                    kind,
                    target: target.to_string(),
                };
                if self.markers.insert(marker.clone()) {
                    update.new_markers.push(marker);
                }

                let key = ConnectionKey::new(&class.name, kind, target);
                if self.connections.contains_key(&key) {
                    continue;
                }

                match (self.nodes.get(&class.name), self.nodes.get(target)) {
                    (Some(from), Some(to)) => {
                        let connection = Connection {
                            key: key.clone(),
                            from: from.position,
                            to: to.position,
                        };
                        debug!(connection = %key, length = connection.length(), "Materialised connection");
                        self.connections.insert(key, connection.clone());
                        update.new_connections.push(connection);
                    }
                    _ => {
                        trace!(connection = %key, "Target not placed yet, deferring");
                        update.deferred.push(key);
                    }
                }
            }
        }

        debug!(
            new_nodes = update.new_nodes.len(),
            new_markers = update.new_markers.len(),
            new_connections = update.new_connections.len(),
            deferred = update.deferred.len(),
            "Placement completed"
        );
        Ok(update)
    }

    pub fn node(&self, name: &str) -> Option<&PlacedClass> {
        self.nodes.get(name)
    }

    /// Placed classes in slot order
    pub fn nodes(&self) -> impl Iterator<Item = &PlacedClass> {
        self.nodes.values()
    }

    pub fn connection(&self, key: &ConnectionKey) -> Option<&Connection> {
        self.connections.get(key)
    }

    /// Connectors in the order they were materialised
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl Default for StructureLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<StructureGraph> for StructureLayout {
    type Output = PlacementUpdate;

    fn layout(&mut self, database: &StructureGraph) -> Result<Self::Output> {
        self.place(database)
    }

    fn name(&self) -> &'static str {
        "ring"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::database::ClassEntity;

    const EPSILON: f32 = 1e-6;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn graph_of(classes: &[(&str, Option<&str>, Option<&str>)]) -> StructureGraph {
        let mut graph = StructureGraph::new();
        for (name, parent, reference) in classes {
            let mut class = ClassEntity::new(*name);
            if let Some(parent) = parent {
                class.parent_classes.insert(parent.to_string());
            }
            if let Some(reference) = reference {
                class.ref_classes.insert(reference.to_string());
            }
            graph.insert_class(class);
        }
        graph
    }

    #[test]
    fn test_default_config() {
        let config = PlacementConfig::default();
        assert!((config.spacing - 0.2).abs() < EPSILON);
        assert!((config.depth_step - 0.01).abs() < EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(StructureLayout::try_with_config(PlacementConfig::new(0.0, 0.01)).is_err());
        assert!(StructureLayout::try_with_config(PlacementConfig::new(f32::NAN, 0.01)).is_err());
        assert!(StructureLayout::try_with_config(PlacementConfig::new(1.0, -1.0)).is_err());
        assert!(StructureLayout::try_with_config(PlacementConfig::new(1.0, 0.0)).is_ok());
    }

    #[test]
    fn test_first_ring_rotation() {
        let layout = StructureLayout::try_with_config(PlacementConfig::new(1.0, 0.5)).unwrap();
        assert_close(layout.slot_position(0), Vec3::new(1.0, 0.0, 0.0));
        assert_close(layout.slot_position(1), Vec3::new(0.0, -1.0, 0.0));
        assert_close(layout.slot_position(2), Vec3::new(-1.0, 0.0, 0.0));
        assert_close(layout.slot_position(3), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_second_ring_is_pushed_out_and_back() {
        let layout = StructureLayout::try_with_config(PlacementConfig::new(1.0, 0.5)).unwrap();
        assert_close(layout.slot_position(4), Vec3::new(2.0, 0.0, 0.5));
        assert_close(layout.slot_position(7), Vec3::new(1.0, 1.0, 0.5));
        assert_close(layout.slot_position(8), Vec3::new(3.0, 0.0, 1.0));
    }

    #[test]
    fn test_slots_follow_discovery_order() {
        let graph = graph_of(&[
            ("A", None, None),
            ("B", None, None),
            ("C", None, None),
            ("D", None, None),
            ("E", None, None),
        ]);
        let mut layout = StructureLayout::new();
        let update = layout.place(&graph).unwrap();

        let names: Vec<_> = update.new_nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);

        let a = layout.node("A").unwrap();
        let e = layout.node("E").unwrap();
        assert_eq!(a.ring(), 0);
        assert_eq!(layout.node("D").unwrap().ring(), 0);
        assert_eq!(e.ring(), 1);
        assert_eq!(e.slot_index % SLOTS_PER_RING, a.slot_index % SLOTS_PER_RING);
        assert!(e.position.x > a.position.x);
        assert!(e.position.z > a.position.z);
    }

    #[test]
    fn test_slots_are_never_reassigned() {
        let mut graph = graph_of(&[("A", None, None), ("B", None, None)]);
        let mut layout = StructureLayout::new();
        layout.place(&graph).unwrap();
        let before = layout.node("B").unwrap().clone();

        graph.insert_class(ClassEntity::new("C"));
        let update = layout.place(&graph).unwrap();

        assert_eq!(update.new_nodes.len(), 1);
        assert_eq!(update.new_nodes[0].slot_index, 2);
        assert_eq!(layout.node("B").unwrap(), &before);
    }

    #[test]
    fn test_connection_to_placed_parent() {
        let graph = graph_of(&[("Shape", None, None), ("Circle", Some("Shape"), None)]);
        let mut layout = StructureLayout::new();
        let update = layout.place(&graph).unwrap();

        assert_eq!(update.new_connections.len(), 1);
        let connection = &update.new_connections[0];
        assert_eq!(connection.key, ConnectionKey::new("Circle", RelationKind::Parent, "Shape"));
        assert_eq!(connection.from, layout.node("Circle").unwrap().position);
        assert_eq!(connection.to, layout.node("Shape").unwrap().position);
        assert!(update.deferred.is_empty());
    }

    #[test]
    fn test_deferred_connection_materialises_once() {
        let mut graph = graph_of(&[("Child", Some("Parent"), None)]);
        let mut layout = StructureLayout::new();

        let first = layout.place(&graph).unwrap();
        assert!(first.new_connections.is_empty());
        assert_eq!(
            first.deferred,
            vec![ConnectionKey::new("Child", RelationKind::Parent, "Parent")]
        );
        // The marker does not wait for the target
        assert_eq!(first.new_markers.len(), 1);

        graph.insert_class(ClassEntity::new("Parent"));
        let second = layout.place(&graph).unwrap();
        assert_eq!(second.new_connections.len(), 1);
        assert!(second.deferred.is_empty());
        assert!(second.new_markers.is_empty());

        let third = layout.place(&graph).unwrap();
        assert!(third.is_empty());
        assert_eq!(layout.connection_count(), 1);
    }

    #[test]
    fn test_only_first_parent_and_reference_connect() {
        let mut square = ClassEntity::new("Square");
        square.parent_classes.insert("Rectangle".to_string());
        square.parent_classes.insert("Shape".to_string());
        square.ref_classes.insert("Point".to_string());
        square.ref_classes.insert("Shape".to_string());

        let mut graph = graph_of(&[("Shape", None, None), ("Rectangle", None, None), ("Point", None, None)]);
        graph.insert_class(square);

        let mut layout = StructureLayout::new();
        let update = layout.place(&graph).unwrap();

        let keys: Vec<_> = update.new_connections.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["Square-parent-Rectangle", "Square-ref-Point"]);
        assert_eq!(layout.marker_count(), 2);
    }

    #[test]
    fn test_mutual_references_both_connect() {
        let graph = graph_of(&[("A", None, Some("B")), ("B", None, Some("A"))]);
        let mut layout = StructureLayout::new();
        let update = layout.place(&graph).unwrap();

        assert_eq!(update.new_connections.len(), 2);
        assert!(layout
            .connection(&ConnectionKey::new("A", RelationKind::Reference, "B"))
            .is_some());
        assert!(layout
            .connection(&ConnectionKey::new("B", RelationKind::Reference, "A"))
            .is_some());
    }

    #[test]
    fn test_self_parent_connects_to_itself() {
        let graph = graph_of(&[("Loop", Some("Loop"), None)]);
        let mut layout = StructureLayout::new();
        let update = layout.place(&graph).unwrap();

        assert_eq!(update.new_connections.len(), 1);
        let connection = &update.new_connections[0];
        assert_eq!(connection.length(), 0.0);
        assert_eq!(connection.direction(), Vec3::ZERO);
    }

    #[test]
    fn test_connection_geometry() {
        let graph = graph_of(&[("A", None, None), ("B", None, None), ("C", Some("A"), None)]);
        let mut layout = StructureLayout::try_with_config(PlacementConfig::new(1.0, 0.0)).unwrap();
        let update = layout.place(&graph).unwrap();

        // C sits at -X, A at +X
        let connection = &update.new_connections[0];
        assert!((connection.length() - 2.0).abs() < EPSILON);
        assert_close(connection.direction(), Vec3::POS_X);
    }

    #[test]
    fn test_unknown_target_stays_deferred() {
        let graph = graph_of(&[("Circle", Some("Shape"), None)]);
        let mut layout = StructureLayout::new();
        layout.place(&graph).unwrap();
        let again = layout.place(&graph).unwrap();

        assert_eq!(again.deferred.len(), 1);
        assert!(again.is_empty());
    }

    #[test]
    fn test_layout_trait_metadata() {
        let layout = StructureLayout::new();
        assert_eq!(LayoutAlgorithm::<StructureGraph>::name(&layout), "ring");
        assert_eq!(LayoutAlgorithm::<StructureGraph>::version(&layout), "0.1.0");
    }
}
