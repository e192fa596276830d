//! Domain entities: core data structures

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Entity type registered in the store's type registry.
///
/// Created once per distinct `type_key` while loading the types sheet,
/// immutable afterwards. The attribute schema is an opaque description
/// string; the store never interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    /// Unique type identifier, e.g. "Pump"
    pub type_key: String,
    /// Free-form schema/description of the type's attributes
    pub attribute_schema: String,
}

/// A node in the hierarchy.
///
/// Edges are stored as id references (`children`, `links`), resolved
/// against the store's node map at access time. The node does not own
/// its type either; `type_key` points into the store's type registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNode {
    /// Unique identifier within one store (primary key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Key into the store's type registry
    pub type_key: String,
    /// Provenance string carried through from input, never edited
    pub source: String,
    /// JSON-encoded payload, opaque to the store
    pub attributes: String,
    /// Containment ("HAS") edges, in import order
    pub children: Vec<String>,
    /// Lateral ("LINK") edges, in import order
    pub links: Vec<String>,
}

impl EntityNode {
    /// Build a node from an entity row. Edges start empty; the input
    /// row's advisory `action` column is not carried onto the node
    /// (export stamps a single call-time tag instead).
    pub fn from_row(row: &EntityRow) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            type_key: row.type_key.clone(),
            source: row.source.clone(),
            attributes: row.attributes.clone(),
            children: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl fmt::Display for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({})", self.name, self.id, self.type_key)
    }
}

/// Row of the `EntityTypes` sheet: `[type, attributeSchema]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRow {
    pub type_key: String,
    pub attribute_schema: String,
}

/// Row of the `Entities` sheet:
/// `[id, name, typeKey, source, attributes, action]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub id: String,
    pub name: String,
    pub type_key: String,
    pub source: String,
    pub attributes: String,
    /// Advisory on input; on export, the single call-time tag
    pub action: String,
}

/// Row of the `Relationships` sheet:
/// `[parentId, childId, kind]` plus an optional `action` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub parent_id: String,
    pub child_id: String,
    pub kind: String,
    /// Advisory on input; on export, the single call-time tag
    pub action: String,
}

/// The three row groups of one workbook, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRows {
    pub types: Vec<TypeRow>,
    pub entities: Vec<EntityRow>,
    pub relationships: Vec<RelationshipRow>,
}

/// Edge classification: the literal `"HAS"` denotes containment, any
/// other kind value denotes a lateral link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Has,
    Link,
}

impl EdgeKind {
    pub fn classify(kind: &str) -> Self {
        if kind == "HAS" {
            EdgeKind::Has
        } else {
            EdgeKind::Link
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Has => write!(f, "HAS"),
            EdgeKind::Link => write!(f, "LINK"),
        }
    }
}

/// Export tag stamped uniformly onto every row of a single export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum ExportAction {
    Insert,
    Delete,
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportAction::Insert => write!(f, "INSERT"),
            ExportAction::Delete => write!(f, "DELETE"),
        }
    }
}
