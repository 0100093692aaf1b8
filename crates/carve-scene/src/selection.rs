//! Bounded node selection with first-in-first-out eviction.

use crate::node::{Node, NodeId};
use crate::store::NodeStore;

/// Maximum number of simultaneously selected nodes.
pub const MAX_SELECTED: usize = 2;

/// Insertion-ordered set of at most [`MAX_SELECTED`] node ids.
///
/// Selected ids are resolved through the store at call time rather than
/// caching nodes, so the result always reflects the latest node state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an id: deselect it if selected, otherwise select it, evicting
    /// the oldest selection when already at capacity.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            return;
        }
        if self.ids.len() >= MAX_SELECTED {
            self.ids.remove(0);
        }
        self.ids.push(id.to_string());
    }

    /// Clear the selection and select only `id` (used to highlight a freshly
    /// created node).
    pub fn select_only(&mut self, id: &str) {
        self.ids.clear();
        self.ids.push(id.to_string());
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Whether an id is currently selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the selection through the store, skipping dangling ids.
    pub fn resolve<'a>(&self, store: &'a NodeStore) -> Vec<&'a Node> {
        self.ids.iter().filter_map(|id| store.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Shape, ShapeKind};

    #[test]
    fn third_toggle_evicts_oldest() {
        let mut sel = Selection::new();
        sel.toggle("node_1");
        sel.toggle("node_2");
        sel.toggle("node_3");
        assert_eq!(sel.ids(), ["node_2", "node_3"]);
        assert_eq!(sel.len(), MAX_SELECTED);
    }

    #[test]
    fn toggle_deselects() {
        let mut sel = Selection::new();
        sel.toggle("node_1");
        sel.toggle("node_2");
        sel.toggle("node_1");
        assert_eq!(sel.ids(), ["node_2"]);
    }

    #[test]
    fn size_never_exceeds_two() {
        let mut sel = Selection::new();
        for i in 0..10 {
            sel.toggle(&format!("node_{}", i));
            assert!(sel.len() <= MAX_SELECTED);
        }
    }

    #[test]
    fn select_only_replaces_everything() {
        let mut sel = Selection::new();
        sel.toggle("node_1");
        sel.toggle("node_2");
        sel.select_only("node_9");
        assert_eq!(sel.ids(), ["node_9"]);
    }

    #[test]
    fn resolve_skips_dangling_ids() {
        let mut store = NodeStore::new();
        store.register(Node::primitive(
            "node_1".to_string(),
            "Box_1".to_string(),
            Shape::defaults(ShapeKind::Box),
        ));
        let mut sel = Selection::new();
        sel.toggle("node_1");
        sel.toggle("node_404");
        let resolved = sel.resolve(&store);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "node_1");
    }
}
