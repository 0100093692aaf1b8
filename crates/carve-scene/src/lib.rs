//! Scene-graph state engine for the carve CSG editor.
//!
//! This crate owns the node data model and every structural invariant around
//! it: primitives and boolean operations form owned trees, every node is
//! simultaneously addressable through a flat id-indexed store, at most two
//! nodes are selected at a time, and the whole forest round-trips through a
//! JSON exchange format.
//!
//! The model is purely declarative: no mesh data, just the shapes, the
//! operation tree, and per-node transforms. Evaluating geometry is handled
//! separately (see `carve-eval`).
//!
//! # Example
//!
//! ```
//! use carve_scene::{OpKind, Project, ShapeKind};
//!
//! let mut project = Project::new();
//! let block = project.add_primitive(ShapeKind::Box);
//! let hole = project.add_primitive(ShapeKind::Sphere);
//! let cut = project.apply_operation(&block, &hole, OpKind::Subtract).unwrap();
//! assert_eq!(project.store.roots().len(), 1);
//! assert_eq!(project.store.roots()[0].id, cut);
//! ```

mod error;
mod node;
mod project;
mod selection;
mod serialize;
mod store;
mod transform;

pub use error::{Result, SceneError};
pub use node::{BoxParams, Node, NodeId, NodeKind, OpKind, Operation, Shape, ShapeKind, SphereParams};
pub use project::Project;
pub use selection::{Selection, MAX_SELECTED};
pub use serialize::{forest_to_json, parse_forest};
pub use store::{id_suffix, NodeStore, ID_PREFIX};
pub use transform::Transform;
