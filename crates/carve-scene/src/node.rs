//! The node data model, the core building block of the scene graph.
//!
//! A node is either a primitive shape or a boolean operation whose operands
//! are **owned by value**: an operation embeds full copies of its children,
//! so the structure is a tree rather than a DAG. Embedded operands are
//! frozen snapshots taken at apply-time; the flat [`NodeStore`] keeps one
//! canonical entry per id for lookups.
//!
//! [`NodeStore`]: crate::NodeStore

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Unique identifier for a node, formatted `node_<n>`.
pub type NodeId = String;

/// The kind of primitive shape a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned box centered at origin.
    Box,
    /// Sphere centered at origin.
    Sphere,
}

impl ShapeKind {
    /// Display label used when building default node names.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Sphere => "Sphere",
        }
    }

    /// The lowercase keyword used in commands and the wire format.
    pub fn keyword(&self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
        }
    }
}

/// Dimensions of a box primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
    /// Extent along Z.
    pub depth: f64,
}

/// Dimensions of a sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    /// Sphere radius.
    pub radius: f64,
}

/// A primitive shape with its parameters.
///
/// Serializes as `geometry` + `params`, matching the exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "geometry", content = "params", rename_all = "lowercase")]
pub enum Shape {
    /// Box primitive.
    Box(BoxParams),
    /// Sphere primitive.
    Sphere(SphereParams),
}

impl Shape {
    /// Default parameters for a shape kind: 1×1×1 box, radius-0.5 sphere.
    pub fn defaults(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Box => Shape::Box(BoxParams {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            }),
            ShapeKind::Sphere => Shape::Sphere(SphereParams { radius: 0.5 }),
        }
    }

    /// The kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box(_) => ShapeKind::Box,
            Shape::Sphere(_) => ShapeKind::Sphere,
        }
    }
}

/// Boolean operation kind.
///
/// Operand order is significant for [`OpKind::Subtract`] (left − right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpKind {
    /// Combine both operands.
    Union,
    /// Remove the right operand from the left.
    Subtract,
    /// Keep only the overlapping region.
    Intersect,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpKind::Union => "UNION",
            OpKind::Subtract => "SUBTRACT",
            OpKind::Intersect => "INTERSECT",
        };
        f.write_str(s)
    }
}

/// A boolean operation with its two embedded operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation kind.
    pub op: OpKind,
    /// Left operand, owned by value.
    pub left: Box<Node>,
    /// Right operand, owned by value.
    pub right: Box<Node>,
}

/// What a node is: a primitive shape or a boolean operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Leaf primitive.
    Primitive(Shape),
    /// Boolean combination of two embedded operand nodes.
    Operation(Operation),
}

/// A node in the scene graph.
///
/// `is_root` is derived structure, not wire data: a node is a root iff no
/// operation currently embeds it as an operand. Import recomputes the flag,
/// so it is skipped during serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier (`node_<n>`).
    pub id: NodeId,
    /// Human-readable display label.
    pub name: String,
    /// Row-major 4×4 transform.
    #[serde(default)]
    pub transform: Transform,
    /// Whether the node is currently a top-level root.
    #[serde(skip)]
    pub is_root: bool,
    /// Primitive or operation payload.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Build a root primitive node with an identity transform.
    pub fn primitive(id: NodeId, name: String, shape: Shape) -> Self {
        Self {
            id,
            name,
            transform: Transform::identity(),
            is_root: true,
            kind: NodeKind::Primitive(shape),
        }
    }

    /// Build a root operation node with an identity transform.
    pub fn operation(id: NodeId, name: String, op: OpKind, left: Node, right: Node) -> Self {
        Self {
            id,
            name,
            transform: Transform::identity(),
            is_root: true,
            kind: NodeKind::Operation(Operation {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
        }
    }

    /// The shape payload, if this is a primitive.
    pub fn shape(&self) -> Option<&Shape> {
        match &self.kind {
            NodeKind::Primitive(shape) => Some(shape),
            NodeKind::Operation(_) => None,
        }
    }

    /// The operation payload, if this is an operation.
    pub fn as_operation(&self) -> Option<&Operation> {
        match &self.kind {
            NodeKind::Operation(op) => Some(op),
            NodeKind::Primitive(_) => None,
        }
    }
}
