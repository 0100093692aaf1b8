//! Forest ⇄ JSON round-trip for export/import and history snapshots.
//!
//! The exchange format is a JSON array of root records; operation records
//! embed their operands recursively, matching the in-memory shape. Import is
//! parse-first: any structural or syntax error is reported before live state
//! is touched, so a failed import never leaves a partially applied project.

use crate::error::{Result, SceneError};
use crate::node::{Node, NodeKind};
use crate::project::Project;
use crate::store::{id_suffix, NodeStore};

/// Serialize all root nodes, in store iteration order, as pretty JSON.
pub fn forest_to_json(store: &NodeStore) -> Result<String> {
    let roots = store.roots();
    Ok(serde_json::to_string_pretty(&roots)?)
}

/// Parse a forest without applying it. Ids are validated against the
/// `node_<integer>` format; duplicate ids are allowed (a node embedded in
/// two operations serializes in both places).
pub fn parse_forest(text: &str) -> Result<Vec<Node>> {
    let roots: Vec<Node> = serde_json::from_str(text)?;
    for root in &roots {
        validate_ids(root)?;
    }
    Ok(roots)
}

fn validate_ids(node: &Node) -> Result<()> {
    if id_suffix(&node.id).is_none() {
        return Err(SceneError::InvalidNodeId(node.id.clone()));
    }
    if let NodeKind::Operation(op) = &node.kind {
        validate_ids(&op.left)?;
        validate_ids(&op.right)?;
    }
    Ok(())
}

/// Replace `project`'s contents with the forest parsed from `text`.
///
/// On success the store is fully reset, every record (top-level and
/// embedded) is registered by id in document pre-order, top-level records
/// are marked roots, and the id counter is advanced past the largest
/// numeric suffix seen.
pub fn load_into(project: &mut Project, text: &str) -> Result<()> {
    let roots = parse_forest(text)?;

    project.init();
    for mut root in roots {
        root.is_root = true;
        register_tree(&mut project.store, root);
    }
    log::debug!("loaded project with {} nodes", project.store.len());
    Ok(())
}

fn register_tree(store: &mut NodeStore, node: Node) {
    store.bump_past(&node.id);
    let operands = node
        .as_operation()
        .map(|op| ((*op.left).clone(), (*op.right).clone()));
    store.register(node);
    if let Some((left, right)) = operands {
        register_tree(store, left);
        register_tree(store, right);
    }
}
