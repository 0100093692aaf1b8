//! Evaluation seam between the scene graph and a boolean-geometry backend.
//!
//! The scene graph is purely declarative; turning it into concrete solids is
//! the job of a [`BrushEvaluator`], typically a mesh boolean engine owned by
//! the rendering collaborator. The driver here walks each root bottom-up
//! (primitive base case, operation combinator case), calling the evaluator
//! once per operation node. Nothing is cached across rebuilds: the forest is
//! re-evaluated from scratch on every durable mutation and drag tick.

pub mod bounds;

pub use bounds::{forest_bounds, Aabb, BoundsEvaluator};

use carve_scene::{Node, NodeId, NodeKind, NodeStore, OpKind, Shape, Transform};

/// A backend that resolves primitives into brushes and combines brushes with
/// boolean operations.
///
/// A *brush* is whatever concrete solid representation the backend works
/// with: a triangle mesh, a B-rep solid, or just a bounding volume. The
/// node's transform is passed alongside so the backend can place the result;
/// for operations it is the operation node's own transform, applied to the
/// combined solid.
pub trait BrushEvaluator {
    /// Concrete solid representation.
    type Brush;
    /// Backend failure type (e.g. inputs that are not valid solids).
    type Error;

    /// Resolve a primitive's kind and parameters into a placed brush.
    fn primitive(&mut self, shape: &Shape, transform: &Transform)
        -> Result<Self::Brush, Self::Error>;

    /// Combine two brushes with a boolean operation and place the result.
    fn combine(
        &mut self,
        left: Self::Brush,
        right: Self::Brush,
        op: OpKind,
        transform: &Transform,
    ) -> Result<Self::Brush, Self::Error>;
}

/// Evaluate one node tree bottom-up.
pub fn evaluate_node<E: BrushEvaluator + ?Sized>(
    evaluator: &mut E,
    node: &Node,
) -> Result<E::Brush, E::Error> {
    match &node.kind {
        NodeKind::Primitive(shape) => evaluator.primitive(shape, &node.transform),
        NodeKind::Operation(op) => {
            let left = evaluate_node(evaluator, &op.left)?;
            let right = evaluate_node(evaluator, &op.right)?;
            evaluator.combine(left, right, op.op, &node.transform)
        }
    }
}

/// Evaluate every root in the store, in iteration order.
pub fn evaluate_roots<E: BrushEvaluator + ?Sized>(
    evaluator: &mut E,
    store: &NodeStore,
) -> Result<Vec<(NodeId, E::Brush)>, E::Error> {
    let mut out = Vec::new();
    for root in store.roots() {
        let brush = evaluate_node(evaluator, root)?;
        out.push((root.id.clone(), brush));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_scene::{Project, ShapeKind};

    /// Counts backend calls to check the one-call-per-operation contract.
    #[derive(Default)]
    struct CountingEvaluator {
        primitives: usize,
        combines: usize,
    }

    impl BrushEvaluator for CountingEvaluator {
        type Brush = ();
        type Error = std::convert::Infallible;

        fn primitive(&mut self, _: &Shape, _: &Transform) -> Result<(), Self::Error> {
            self.primitives += 1;
            Ok(())
        }

        fn combine(&mut self, _: (), _: (), _: OpKind, _: &Transform) -> Result<(), Self::Error> {
            self.combines += 1;
            Ok(())
        }
    }

    #[test]
    fn one_backend_call_per_node() {
        let mut project = Project::new();
        let a = project.add_primitive(ShapeKind::Box);
        let b = project.add_primitive(ShapeKind::Sphere);
        let first = project.apply_operation(&a, &b, OpKind::Union).unwrap();
        let c = project.add_primitive(ShapeKind::Sphere);
        project.apply_operation(&first, &c, OpKind::Subtract).unwrap();

        let mut eval = CountingEvaluator::default();
        let results = evaluate_roots(&mut eval, &project.store).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(eval.primitives, 3);
        assert_eq!(eval.combines, 2);
    }

    #[test]
    fn forest_with_multiple_roots() {
        let mut project = Project::new();
        project.add_primitive(ShapeKind::Box);
        project.add_primitive(ShapeKind::Sphere);

        let mut eval = CountingEvaluator::default();
        let results = evaluate_roots(&mut eval, &project.store).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "node_1");
        assert_eq!(eval.combines, 0);
    }
}
