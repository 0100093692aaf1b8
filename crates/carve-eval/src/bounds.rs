//! Conservative axis-aligned bounds as a stand-in brush representation.
//!
//! Useful anywhere a full mesh boolean engine is overkill: summary views,
//! sanity checks in tests, broadphase culling. Subtraction keeps the left
//! operand's box (removal can only shrink a solid), so results are always
//! conservative over-approximations.

use nalgebra::Point3;

use carve_scene::{NodeId, NodeStore, OpKind, Shape, Transform};

use crate::{evaluate_roots, BrushEvaluator};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Whether this AABB contains no volume.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest AABB containing both inputs.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.include_point(&other.min);
        out.include_point(&other.max);
        out
    }

    /// Overlapping region of both inputs; empty when they are disjoint.
    pub fn intersection(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: Point3::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        }
    }

    /// Extent along each axis (zero for empty boxes).
    pub fn size(&self) -> (f64, f64, f64) {
        if self.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// The eight corners of this box.
    fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// AABB of this box's corners pushed through a transform.
    fn transformed(&self, transform: &Transform) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::empty();
        for corner in self.corners() {
            out.include_point(&transform.apply_point(&corner));
        }
        out
    }
}

/// Brush evaluator producing conservative [`Aabb`] bounds.
#[derive(Debug, Default)]
pub struct BoundsEvaluator;

impl BrushEvaluator for BoundsEvaluator {
    type Brush = Aabb;
    type Error = std::convert::Infallible;

    fn primitive(&mut self, shape: &Shape, transform: &Transform) -> Result<Aabb, Self::Error> {
        // Primitives are centered at the origin in local space.
        let local = match shape {
            Shape::Box(b) => Aabb::new(
                Point3::new(-b.width / 2.0, -b.height / 2.0, -b.depth / 2.0),
                Point3::new(b.width / 2.0, b.height / 2.0, b.depth / 2.0),
            ),
            Shape::Sphere(s) => Aabb::new(
                Point3::new(-s.radius, -s.radius, -s.radius),
                Point3::new(s.radius, s.radius, s.radius),
            ),
        };
        Ok(local.transformed(transform))
    }

    fn combine(
        &mut self,
        left: Aabb,
        right: Aabb,
        op: OpKind,
        transform: &Transform,
    ) -> Result<Aabb, Self::Error> {
        let combined = match op {
            OpKind::Union => left.union(&right),
            OpKind::Intersect => left.intersection(&right),
            OpKind::Subtract => left,
        };
        Ok(combined.transformed(transform))
    }
}

/// Bounds of every root in the store, in iteration order.
pub fn forest_bounds(store: &NodeStore) -> Vec<(NodeId, Aabb)> {
    match evaluate_roots(&mut BoundsEvaluator, store) {
        Ok(bounds) => bounds,
        Err(never) => match never {},
    }
}
