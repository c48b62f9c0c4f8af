//! `Solid` struct and implementations of the `CSG` trait for `Solid`

use crate::bsp::Node;
use crate::float_types::Real;
use crate::polygon::Polygon;
use crate::traits::CSG;
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector3};
use std::fmt::Debug;

pub mod shapes;

/// A solid, represented by the polygons of its closed boundary.
///
/// Boolean operations never modify their operands; each builds fresh BSP trees
/// from copies of the polygon lists and returns a new `Solid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Solid<S: Clone> {
    /// Boundary polygons, outward facing
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Debug> Default for Solid<S> {
    fn default() -> Self {
        <Self as CSG>::new()
    }
}

impl<S: Clone + Debug> Solid<S> {
    /// Build a Solid from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        Solid {
            polygons: polygons.to_vec(),
        }
    }

    /// The boundary polygons of this solid.
    pub fn to_polygons(&self) -> &[Polygon<S>] {
        &self.polygons
    }

    /// Helper to collect all vertices from the Solid.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Triangulate each polygon, returning a Solid made of triangles only.
    pub fn triangulate(&self) -> Solid<S> {
        let polygons = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |tri| {
                    Polygon::with_plane(tri.to_vec(), poly.plane.clone(), poly.metadata.clone())
                })
            })
            .collect();

        Solid { polygons }
    }

    /// Axis-aligned bounds `(mins, maxs)` of all vertices, `None` when empty.
    pub fn bounding_box(&self) -> Option<(Point3<Real>, Point3<Real>)> {
        let mut vertices = self.polygons.iter().flat_map(|p| p.vertices.iter());
        let first = vertices.next()?.pos;

        Some(vertices.fold((first, first), |(mins, maxs), v| {
            (mins.inf(&v.pos), maxs.sup(&v.pos))
        }))
    }

    /// Whether `point` is inside this solid.
    ///
    /// Builds a BSP tree, so prefer [`Node::contains_point`] for many queries.
    /// Points within `EPSILON` of the boundary may go either way.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        Node::from_polygons(&self.polygons).contains_point(point)
    }

    /// `a ∪ b` on the trees themselves; the result is left in `a`.
    ///
    /// Faces shared by both solids survive only once: after the mutual clip,
    /// `b` is inverted and clipped again so that its copy of a coplanar,
    /// same-facing face falls into `a`'s solid space and is removed.
    fn union_trees(a: &mut Node<S>, b: &mut Node<S>) {
        a.clip_to(b);
        b.clip_to(a);
        b.invert();
        b.clip_to(a);
        b.invert();
        a.build(&b.all_polygons());
    }
}

impl<S: Clone + Debug> CSG for Solid<S> {
    /// Returns a new empty Solid
    fn new() -> Self {
        Solid {
            polygons: Vec::new(),
        }
    }

    /// Return a new Solid representing union of the two Solids.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Solid<S>) -> Solid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        Self::union_trees(&mut a, &mut b);

        let polygons = a.all_polygons();
        tracing::debug!(
            a_polygons = self.polygons.len(),
            b_polygons = other.polygons.len(),
            result = polygons.len(),
            "union"
        );
        Solid { polygons }
    }

    /// Return a new Solid representing the space in this Solid but not in `other`.
    ///
    /// Computed as `¬(¬a ∪ b)`.
    ///
    /// ```text
    /// let c = a.subtract(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn subtract(&self, other: &Solid<S>) -> Solid<S> {
        // An empty tree stays empty under inversion, so it cannot stand for ¬∅.
        if self.polygons.is_empty() {
            return Solid::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        Self::union_trees(&mut a, &mut b);
        a.invert();

        let polygons = a.all_polygons();
        tracing::debug!(
            a_polygons = self.polygons.len(),
            b_polygons = other.polygons.len(),
            result = polygons.len(),
            "subtract"
        );
        Solid { polygons }
    }

    /// Return a new Solid representing the space in both Solids.
    ///
    /// Computed as `¬(¬a ∪ ¬b)`.
    ///
    /// ```text
    /// let c = a.intersect(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersect(&self, other: &Solid<S>) -> Solid<S> {
        if self.polygons.is_empty() || other.polygons.is_empty() {
            return Solid::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.invert();
        Self::union_trees(&mut a, &mut b);
        a.invert();

        let polygons = a.all_polygons();
        tracing::debug!(
            a_polygons = self.polygons.len(),
            b_polygons = other.polygons.len(),
            result = polygons.len(),
            "intersect"
        );
        Solid { polygons }
    }

    /// Return a new Solid representing space in this Solid excluding the space in the
    /// other Solid plus the space in the other Solid excluding the space in this Solid.
    ///
    /// ```text
    /// let c = a.xor(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   a   |
    ///     |    +--+----+   =   |    +--+----+
    ///     +----+--+    |       +----+--+    |
    ///          |   b   |            |       |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn xor(&self, other: &Solid<S>) -> Solid<S> {
        let a_sub_b = self.subtract(other);
        let b_sub_a = other.subtract(self);
        a_sub_b.union(&b_sub_a)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the solid.
    ///
    /// Normals go through the inverse transpose. A mirroring matrix reverses
    /// every polygon's winding so the boundary keeps facing outward.
    fn transform(&self, mat: &Matrix4<Real>) -> Solid<S> {
        let normal_matrix = mat.try_inverse().map_or(*mat, |inv| inv.transpose());
        let mirrored = mat.fixed_view::<3, 3>(0, 0).into_owned().determinant() < 0.0;

        let mut solid = self.clone();
        for poly in &mut solid.polygons {
            for vert in &mut poly.vertices {
                vert.pos = mat.transform_point(&vert.pos);
                vert.normal = transform_normal(&normal_matrix, &vert.normal);
            }
            if mirrored {
                poly.vertices.reverse();
            }

            // keep the cached plane consistent with the new vertex positions
            let anchor = mat.transform_point(&Point3::from(poly.plane.normal * poly.plane.w));
            let normal = transform_normal(&normal_matrix, &poly.plane.normal);
            poly.plane.normal = normal;
            poly.plane.w = normal.dot(&anchor.coords);
        }

        solid
    }

    /// Invert this Solid (flip inside vs. outside)
    fn inverse(&self) -> Solid<S> {
        let mut solid = self.clone();
        solid.polygons.iter_mut().for_each(|p| p.flip());
        solid
    }
}

fn transform_normal(normal_matrix: &Matrix4<Real>, normal: &Vector3<Real>) -> Vector3<Real> {
    let transformed = normal_matrix.transform_vector(normal);
    transformed.try_normalize(0.0).unwrap_or(transformed)
}
