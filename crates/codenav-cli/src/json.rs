//! JSON views of the placement for the `layout --json` command

use codenav::structure::{Connection, ConnectionKey, Marker, PlacedClass, StructureLayout};
use codenav::Vec3;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub nodes: Vec<NodeView>,
    pub markers: Vec<MarkerView>,
    pub connections: Vec<ConnectionView>,
    pub deferred: Vec<KeyView>,
}

#[derive(Debug, Serialize)]
pub struct NodeView {
    pub name: String,
    pub slot: usize,
    pub ring: usize,
    pub position: [f32; 3],
}

#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub class: String,
    pub kind: &'static str,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectionView {
    pub source: String,
    pub kind: &'static str,
    pub target: String,
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub length: f32,
}

#[derive(Debug, Serialize)]
pub struct KeyView {
    pub source: String,
    pub kind: &'static str,
    pub target: String,
}

fn coords(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

impl From<&PlacedClass> for NodeView {
    fn from(node: &PlacedClass) -> Self {
        Self {
            name: node.name.clone(),
            slot: node.slot_index,
            ring: node.ring(),
            position: coords(node.position),
        }
    }
}

impl From<&Marker> for MarkerView {
    fn from(marker: &Marker) -> Self {
        Self {
            class: marker.class.clone(),
            kind: marker.kind.as_str(),
            target: marker.target.clone(),
        }
    }
}

impl From<&Connection> for ConnectionView {
    fn from(connection: &Connection) -> Self {
        Self {
            source: connection.key.source.clone(),
            kind: connection.key.kind.as_str(),
            target: connection.key.target.clone(),
            from: coords(connection.from),
            to: coords(connection.to),
            length: connection.length(),
        }
    }
}

impl From<&ConnectionKey> for KeyView {
    fn from(key: &ConnectionKey) -> Self {
        Self {
            source: key.source.clone(),
            kind: key.kind.as_str(),
            target: key.target.clone(),
        }
    }
}

impl LayoutView {
    pub fn new(layout: &StructureLayout, deferred: &[ConnectionKey]) -> Self {
        Self {
            nodes: layout.nodes().map(NodeView::from).collect(),
            markers: layout.markers().map(MarkerView::from).collect(),
            connections: layout.connections().map(ConnectionView::from).collect(),
            deferred: deferred.iter().map(KeyView::from).collect(),
        }
    }
}
