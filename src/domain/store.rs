//! The authoritative entity map and its maintenance operations.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, instrument};

use crate::domain::entities::{
    EdgeKind, EntityNode, EntityRow, EntityType, ExportAction, RelationshipRow, SheetRows, TypeRow,
};

/// Owns the node map and the type registry.
///
/// Node maps are `BTreeMap`s so every derived view (roots, serialize)
/// iterates in a deterministic order (sorted by id). Edges are id
/// references into the node map; the containment graph is not assumed
/// to be acyclic, so every traversal tracks visited ids.
///
/// Load favors silent tolerance over failure: offending rows are
/// dropped, never aborting the whole load. No operation on this type
/// returns an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyStore {
    types: BTreeMap<String, EntityType>,
    nodes: BTreeMap<String, EntityNode>,
}

impl HierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the three row groups of one workbook.
    ///
    /// Per-row tolerance policy:
    /// - duplicate type or entity ids: last write wins
    /// - entity rows citing an unregistered type: dropped
    /// - relationship rows with an unresolvable parent or child: dropped
    /// - `HAS` rows where parent == child: dropped (a node never lists
    ///   itself in its own children)
    /// - repeated relationship rows produce repeated edges
    #[instrument(level = "debug", skip_all)]
    pub fn load(rows: &SheetRows) -> Self {
        let mut types: BTreeMap<String, EntityType> = BTreeMap::new();
        for row in &rows.types {
            types.insert(
                row.type_key.clone(),
                EntityType {
                    type_key: row.type_key.clone(),
                    attribute_schema: row.attribute_schema.clone(),
                },
            );
        }

        let mut nodes: BTreeMap<String, EntityNode> = BTreeMap::new();
        for row in &rows.entities {
            if !types.contains_key(&row.type_key) {
                debug!(id = %row.id, type_key = %row.type_key, "dropping entity row: unregistered type");
                continue;
            }
            nodes.insert(row.id.clone(), EntityNode::from_row(row));
        }

        for row in &rows.relationships {
            if !nodes.contains_key(&row.parent_id) || !nodes.contains_key(&row.child_id) {
                debug!(parent = %row.parent_id, child = %row.child_id, "dropping relationship row: unknown id");
                continue;
            }
            match EdgeKind::classify(&row.kind) {
                EdgeKind::Has => {
                    if row.parent_id == row.child_id {
                        debug!(id = %row.parent_id, "dropping relationship row: self-containment");
                        continue;
                    }
                    if let Some(parent) = nodes.get_mut(&row.parent_id) {
                        parent.children.push(row.child_id.clone());
                    }
                }
                EdgeKind::Link => {
                    if let Some(parent) = nodes.get_mut(&row.parent_id) {
                        parent.links.push(row.child_id.clone());
                    }
                }
            }
        }

        Self { types, nodes }
    }

    pub fn get(&self, id: &str) -> Option<&EntityNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = &EntityNode> {
        self.nodes.values()
    }

    /// All registered types, sorted by type key (including unused ones).
    pub fn types(&self) -> impl Iterator<Item = &EntityType> {
        self.types.values()
    }

    /// Total (containment, link) edge counts.
    pub fn edge_counts(&self) -> (usize, usize) {
        self.nodes.values().fold((0, 0), |(has, link), n| {
            (has + n.children.len(), link + n.links.len())
        })
    }

    /// Roots of the forest: nodes with at least one child that appear
    /// in no other node's children.
    ///
    /// A childless node is never a root, even if nothing references it;
    /// such nodes are invisible to tree traversal from roots. Known
    /// quirk of the model, preserved and pinned by tests; see
    /// [`HierarchyStore::unreachable`] for the complement.
    #[instrument(level = "debug", skip(self))]
    pub fn roots(&self) -> Vec<&EntityNode> {
        let child_ids: HashSet<&str> = self
            .nodes
            .values()
            .flat_map(|n| n.children.iter().map(String::as_str))
            .collect();
        self.nodes
            .values()
            .filter(|n| !n.children.is_empty() && !child_ids.contains(n.id.as_str()))
            .collect()
    }

    /// Nodes not reachable from any root via containment edges, sorted
    /// by id. Link edges do not contribute to reachability.
    #[instrument(level = "debug", skip(self))]
    pub fn unreachable(&self) -> Vec<&EntityNode> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = self.roots().iter().map(|n| n.id.as_str()).collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                for child in &node.children {
                    stack.push(child);
                }
            }
        }
        self.nodes
            .values()
            .filter(|n| !seen.contains(n.id.as_str()))
            .collect()
    }

    /// Overwrite a node's attribute payload in place.
    ///
    /// The payload is an opaque string here; JSON validation is the
    /// caller's concern. Returns `false` (no-op) for an unknown id.
    #[instrument(level = "debug", skip(self, attributes))]
    pub fn set_attributes(&mut self, id: &str, attributes: String) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.attributes = attributes;
                true
            }
            None => false,
        }
    }

    /// Remove a node and its full containment subtree, then prune
    /// references to the removed ids from every remaining node.
    ///
    /// Only `children` edges are followed; nodes reachable solely via
    /// `links` survive (links denote association, not ownership). The
    /// walk tracks visited ids, so it terminates on cyclic containment.
    /// Returns the number of removed nodes, 0 for an unknown id.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_cascade(&mut self, id: &str) -> usize {
        let mut removed: HashSet<String> = HashSet::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            if !removed.insert(current) {
                continue;
            }
            for child in &node.children {
                stack.push(child.clone());
            }
        }

        self.nodes.retain(|id, _| !removed.contains(id));
        for node in self.nodes.values_mut() {
            node.children.retain(|c| !removed.contains(c));
            node.links.retain(|l| !removed.contains(l));
        }

        debug!(count = removed.len(), "cascade delete");
        removed.len()
    }

    /// Produce the three row groups for export, every row stamped with
    /// the one call-time action tag.
    ///
    /// Types registered but referenced by no node are omitted. Per node,
    /// `HAS` rows come before `LINK` rows; groups iterate in map order.
    #[instrument(level = "debug", skip(self))]
    pub fn serialize(&self, action: ExportAction) -> SheetRows {
        let tag = action.to_string();

        let used: BTreeSet<&str> = self.nodes.values().map(|n| n.type_key.as_str()).collect();
        let types = self
            .types
            .values()
            .filter(|t| used.contains(t.type_key.as_str()))
            .map(|t| TypeRow {
                type_key: t.type_key.clone(),
                attribute_schema: t.attribute_schema.clone(),
            })
            .collect();

        let entities = self
            .nodes
            .values()
            .map(|n| EntityRow {
                id: n.id.clone(),
                name: n.name.clone(),
                type_key: n.type_key.clone(),
                source: n.source.clone(),
                attributes: n.attributes.clone(),
                action: tag.clone(),
            })
            .collect();

        let mut relationships = Vec::new();
        for node in self.nodes.values() {
            for child in &node.children {
                relationships.push(RelationshipRow {
                    parent_id: node.id.clone(),
                    child_id: child.clone(),
                    kind: EdgeKind::Has.to_string(),
                    action: tag.clone(),
                });
            }
            for link in &node.links {
                relationships.push(RelationshipRow {
                    parent_id: node.id.clone(),
                    child_id: link.clone(),
                    kind: EdgeKind::Link.to_string(),
                    action: tag.clone(),
                });
            }
        }

        SheetRows {
            types,
            entities,
            relationships,
        }
    }
}
