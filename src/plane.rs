//! Oriented planes: point/polygon classification and polygon splitting.

use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Plane classification constants. A polygon's class is the bitwise OR of the
// classes of its vertices, so SPANNING == FRONT | BACK.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Output of [`Plane::split_polygon`]:
/// `(coplanar_front, coplanar_back, front, back)`.
pub type SplitBuckets<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

/// An oriented plane `{ p : normal · p = w }`.
///
/// The half-space the normal points into is the *front*.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

impl Plane {
    /// Create a plane from a normal and offset. The normal is normalized.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Create a plane from three points.
    ///
    /// The normal follows the right-hand rule: `(b - a) × (c - a)`. Collinear
    /// points yield a NaN normal; callers that cannot rule that out should go
    /// through [`Polygon::try_new`].
    pub fn from_points(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Plane {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Get the offset (distance from origin along the normal)
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane in place, swapping its front and back half-spaces.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point` from the plane (positive in front).
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] within [`EPSILON`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon with respect to the plane.
    /// Returns a bitmask of COPLANAR, FRONT, and BACK.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// - Polygons lying in the plane go to `coplanar_front` when they face the
    ///   same way as the plane and to `coplanar_back` otherwise.
    /// - Polygons entirely on one side go to `front` or `back` unchanged.
    /// - Spanning polygons are cut along the plane. Fragments with fewer than
    ///   three vertices are dropped; the rest keep the source plane and metadata.
    pub fn split_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> SplitBuckets<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let (split_front, split_back) = self.split_loop(&polygon.vertices, &types);

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }

    /// Walk a spanning vertex loop and distribute it into a front and a back loop,
    /// inserting an interpolated vertex wherever an edge crosses from FRONT to BACK
    /// or back again.
    fn split_loop(&self, vertices: &[Vertex], types: &[i8]) -> (Vec<Vertex>, Vec<Vertex>) {
        let n = vertices.len();
        let mut split_front = Vec::with_capacity(n + 1);
        let mut split_back = Vec::with_capacity(n + 1);

        for i in 0..n {
            let j = (i + 1) % n;
            let (type_i, type_j) = (types[i], types[j]);
            let (vertex_i, vertex_j) = (&vertices[i], &vertices[j]);

            if type_i != BACK {
                split_front.push(*vertex_i);
            }
            if type_i != FRONT {
                split_back.push(*vertex_i);
            }

            if (type_i | type_j) == SPANNING {
                // type_i and type_j are strictly opposite, so the denominator is
                // at least 2·EPSILON away from zero.
                let t = (self.w - self.normal.dot(&vertex_i.pos.coords))
                    / self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                let vertex_new = vertex_i.interpolate(vertex_j, t);
                split_front.push(vertex_new);
                split_back.push(vertex_new);
            }
        }

        (split_front, split_back)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn quad(points: [[Real; 3]; 4]) -> Polygon<()> {
        Polygon::new(
            points
                .iter()
                .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
                .collect(),
            None,
        )
    }

    #[test]
    fn from_points_is_right_handed() {
        let plane = Plane::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        approx::assert_relative_eq!(plane.normal, Vector3::z());
        approx::assert_relative_eq!(plane.w, 0.0);
    }

    #[test]
    fn from_points_offset() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(2.0, 0.0, 3.0),
            Point3::new(0.0, 2.0, 3.0),
        );
        approx::assert_relative_eq!(plane.normal.norm(), 1.0);
        approx::assert_relative_eq!(plane.w, 3.0);
    }

    #[test]
    fn from_normal_normalizes() {
        let plane = Plane::from_normal(Vector3::new(0.0, 0.0, 2.0), 4.0);
        approx::assert_relative_eq!(plane.normal, Vector3::z());
        approx::assert_relative_eq!(plane.w, 2.0);
    }

    #[test]
    fn orient_point_uses_epsilon() {
        let plane = Plane::from_normal(Vector3::z(), 0.0);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 1.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, -1.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(5.0, 5.0, EPSILON * 0.5)), COPLANAR);
        assert_eq!(plane.orient_point(&Point3::new(5.0, 5.0, -EPSILON * 0.5)), COPLANAR);
    }

    #[test]
    fn classify_spanning() {
        let plane = Plane::from_normal(Vector3::x(), 0.5);
        let square = quad([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        assert_eq!(plane.classify_polygon(&square), SPANNING);
    }

    #[test]
    fn touching_polygon_is_not_split() {
        // One edge lies on the plane, the rest is in front.
        let plane = Plane::from_normal(Vector3::x(), 0.0);
        let square = quad([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        let (cf, cb, f, b) = plane.split_polygon(&square);
        assert!(cf.is_empty() && cb.is_empty() && b.is_empty());
        assert_eq!(f.len(), 1);
        assert_eq!(f[0], square);
    }

    #[test]
    fn split_through_vertex_makes_triangles() {
        // The diagonal plane passes through two opposite corners.
        let plane = Plane::from_normal(Vector3::new(1.0, -1.0, 0.0), 0.0);
        let square = quad([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        let (_, _, f, b) = plane.split_polygon(&square);
        assert_eq!(f.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(f[0].vertices.len(), 3);
        assert_eq!(b[0].vertices.len(), 3);
    }
}
