//! Project state: the node store and selection, with the graph mutators
//! every edit path goes through.

use crate::error::Result;
use crate::node::{Node, NodeId, OpKind, Shape, ShapeKind};
use crate::selection::Selection;
use crate::serialize;
use crate::store::{id_suffix, NodeStore};
use crate::transform::Transform;

/// The full mutable state of one open project.
///
/// All mutation paths (direct actions, drag transforms, parsed commands)
/// operate on an explicit `Project` passed by reference; there is no global
/// state. History snapshots are the caller's responsibility: `Project` only
/// guarantees that each mutator leaves the store structurally valid.
#[derive(Debug, Default)]
pub struct Project {
    /// All nodes, keyed by id, in registration order.
    pub store: NodeStore,
    /// Currently selected node ids (at most two).
    pub selection: Selection,
}

impl Project {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full reset: drop every node, restart id generation, clear the
    /// selection. History is owned elsewhere and survives this.
    pub fn init(&mut self) {
        self.store.clear();
        self.selection.clear();
        log::debug!("project state reset");
    }

    /// Create a primitive with default parameters, register it as a root,
    /// and return its id.
    pub fn add_primitive(&mut self, kind: ShapeKind) -> NodeId {
        let id = self.store.generate_id();
        let n = id_suffix(&id).unwrap_or(0);
        let name = format!("{}_{}", kind.label(), n);
        log::debug!("add primitive {} as {}", kind.keyword(), id);
        self.store
            .register(Node::primitive(id.clone(), name, Shape::defaults(kind)));
        id
    }

    /// Combine two nodes into a new operation node.
    ///
    /// Returns `None` if either id is unresolved. On success the new node
    /// embeds **clones of the operands' current store values** as `left` and
    /// `right` (order preserved, significant for [`OpKind::Subtract`]), the
    /// new node becomes a root, and both operands' canonical store entries
    /// are flipped to non-root while remaining addressable by id.
    ///
    /// Embedded operands are frozen snapshots: mutating a node after it has
    /// been embedded does not retroactively change the embedded copy. The
    /// canonical store entry is what future selection-based operations see,
    /// so operating on a node already embedded elsewhere is legal and
    /// duplicates its reachability.
    pub fn apply_operation(&mut self, id_a: &str, id_b: &str, op: OpKind) -> Option<NodeId> {
        if !self.store.contains(id_a) || !self.store.contains(id_b) {
            log::warn!("apply {} with unresolved operand ({}, {})", op, id_a, id_b);
            return None;
        }

        self.store.get_mut(id_a)?.is_root = false;
        self.store.get_mut(id_b)?.is_root = false;
        let left = self.store.get(id_a)?.clone();
        let right = self.store.get(id_b)?.clone();

        let id = self.store.generate_id();
        let n = id_suffix(&id).unwrap_or(0);
        let name = format!("{}_{}", op, n);
        log::debug!("apply {}({}, {}) as {}", op, id_a, id_b, id);
        self.store
            .register(Node::operation(id.clone(), name, op, left, right));
        Some(id)
    }

    /// Replace a node's transform. Called continuously during an interactive
    /// drag; the drag-end notification is what triggers the single history
    /// save. Returns `false` if the id is unresolved.
    pub fn update_node_transform(&mut self, id: &str, transform: Transform) -> bool {
        match self.store.get_mut(id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.store.get(id)
    }

    /// Mutable lookup by id.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.store.get_mut(id)
    }

    /// Toggle a node in the selection and return its current value.
    pub fn toggle_selection(&mut self, id: &str) -> Option<&Node> {
        self.selection.toggle(id);
        self.store.get(id)
    }

    /// Select only `id`, clearing any previous selection.
    pub fn select_only(&mut self, id: &str) {
        self.selection.select_only(id);
    }

    /// Selected nodes, resolved through the store at call time.
    pub fn selected_nodes(&self) -> Vec<&Node> {
        self.selection.resolve(&self.store)
    }

    /// The most recently created root other than `exclude`, if any. This is
    /// the default left operand for command-driven booleans.
    pub fn last_root_excluding(&self, exclude: &str) -> Option<&Node> {
        self.store
            .iter()
            .filter(|n| n.is_root && n.id != exclude)
            .last()
    }

    /// Serialize the current forest (roots only, operands nested).
    pub fn export_json(&self) -> Result<String> {
        serialize::forest_to_json(&self.store)
    }

    /// Replace the whole project with the forest parsed from `text`.
    ///
    /// Parsing happens before any live state is touched; on error the
    /// project is left exactly as it was.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        serialize::load_into(self, text)
    }
}
