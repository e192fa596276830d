//! Tree display conversion for the store's root forest.

use std::collections::HashSet;

use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::EntityNode;
use crate::domain::store::HierarchyStore;

pub trait TreeConvert {
    fn to_tree_string(&self) -> Vec<Tree<String>>;
}

impl TreeConvert for HierarchyStore {
    /// One `Tree<String>` per root, children recursed, links rendered
    /// as `~>` annotated leaves (not traversed). A visited set per tree
    /// keeps cyclic containment from recursing forever; a revisited
    /// node is shown once more as a marker leaf.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Vec<Tree<String>> {
        self.roots()
            .into_iter()
            .map(|root| {
                let mut visited = HashSet::new();
                build_tree(self, root, &mut visited)
            })
            .collect()
    }
}

fn build_tree<'a>(
    store: &'a HierarchyStore,
    node: &'a EntityNode,
    visited: &mut HashSet<&'a str>,
) -> Tree<String> {
    visited.insert(node.id.as_str());

    let mut leaves = Vec::new();
    for child_id in &node.children {
        let Some(child) = store.get(child_id) else {
            continue;
        };
        if visited.contains(child_id.as_str()) {
            leaves.push(Tree::new(format!("{} (repeated)", child)));
        } else {
            leaves.push(build_tree(store, child, visited));
        }
    }
    for link_id in &node.links {
        if let Some(link) = store.get(link_id) {
            leaves.push(Tree::new(format!("~> {}", link)));
        }
    }

    Tree::new(node.to_string()).with_leaves(leaves)
}
