//! Structure graph storage
//!
//! Holds the classes discovered so far and their parent/reference sets.
//! Insertion order is discovery order and is preserved everywhere: it drives
//! slot assignment, report order and the reference scan.

use indexmap::{IndexMap, IndexSet};

use crate::core::{Database, RelationKind};

/// A class discovered in the transcribed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntity {
    pub name: String,
    pub parent_classes: IndexSet<String>,
    pub ref_classes: IndexSet<String>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_classes: IndexSet::new(),
            ref_classes: IndexSet::new(),
        }
    }

    /// The parent used for layout: the first one recorded
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_classes.first().map(String::as_str)
    }

    /// The reference used for layout: the first one recorded
    pub fn first_reference(&self) -> Option<&str> {
        self.ref_classes.first().map(String::as_str)
    }

    /// The first recorded target of the given relationship kind
    pub fn first_related(&self, kind: RelationKind) -> Option<&str> {
        match kind {
            RelationKind::Parent => self.first_parent(),
            RelationKind::Reference => self.first_reference(),
        }
    }

    /// Returns true if the class has at least one parent or reference
    pub fn has_relationships(&self) -> bool {
        !self.parent_classes.is_empty() || !self.ref_classes.is_empty()
    }
}

/// A directed relationship between two classes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// The append-only structure graph of one session
#[derive(Debug, Clone, Default)]
pub struct StructureGraph {
    classes: IndexMap<String, ClassEntity>,
}

impl StructureGraph {
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// Insert a new class; the first declaration wins
    ///
    /// Returns `false` and leaves the graph untouched if the name is known.
    pub fn insert_class(&mut self, class: ClassEntity) -> bool {
        if self.classes.contains_key(&class.name) {
            return false;
        }
        self.classes.insert(class.name.clone(), class);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.get(name)
    }

    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut ClassEntity> {
        self.classes.get_mut(name)
    }

    /// Classes in discovery order
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.classes.values()
    }

    /// Class names in discovery order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Discovery index of a class
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.classes.get_index_of(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every recorded relationship, parents before references per class
    pub fn relationships(&self) -> impl Iterator<Item = Relationship> + '_ {
        self.classes.values().flat_map(|class| {
            let parents = class
                .parent_classes
                .iter()
                .map(move |p| Relationship::new(&class.name, p, RelationKind::Parent));
            let refs = class
                .ref_classes
                .iter()
                .map(move |r| Relationship::new(&class.name, r, RelationKind::Reference));
            parents.chain(refs)
        })
    }

    pub fn relationship_count(&self) -> usize {
        self.classes
            .values()
            .map(|c| c.parent_classes.len() + c.ref_classes.len())
            .sum()
    }
}

impl Database for StructureGraph {
    type Node = ClassEntity;
    type Edge = Relationship;

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes()
    }

    fn edges(&self) -> impl Iterator<Item = Self::Edge> {
        self.relationships()
    }

    fn node_count(&self) -> usize {
        self.class_count()
    }

    fn edge_count(&self) -> usize {
        self.relationship_count()
    }
}
