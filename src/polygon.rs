//! Convex, planar polygons with generic metadata.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A convex polygon, defined by a list of vertices.
///
/// The vertices must be coplanar and wound counter-clockwise when seen from
/// the side the plane normal points to.
///
/// - `S` is the generic metadata type, stored as `Option<S>`. Clones and split
///   fragments carry the same metadata; the geometry code never looks at it.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting
    pub plane: Plane,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices, deriving its plane from the first three.
    ///
    /// The input is trusted; see [`Polygon::try_new`] for a validating variant.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");

        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Create a polygon with an already known plane, e.g. a fragment of a larger polygon.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Create a polygon after checking that it has at least three finite vertices
    /// and that the first three span a plane.
    pub fn try_new(vertices: Vec<Vertex>, metadata: Option<S>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints(vertices.len()));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }

        let (a, b, c) = (vertices[0].pos, vertices[1].pos, vertices[2].pos);
        if (b - a).cross(&(c - a)).norm_squared() < EPSILON * EPSILON {
            return Err(ValidationError::DegeneratePolygon(a));
        }

        Ok(Polygon::new(vertices, metadata))
    }

    /// Create a polygon from bare points. Every vertex gets the plane normal.
    pub fn from_points(points: &[Point3<Real>], metadata: Option<S>) -> Result<Self, ValidationError> {
        let vertices = points.iter().map(|&p| Vertex::new(p, Vector3::zeros())).collect();
        let mut polygon = Polygon::try_new(vertices, metadata)?;
        let normal = polygon.plane.normal;
        polygon.vertices.iter_mut().for_each(|v| v.normal = normal);
        Ok(polygon)
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(|v| v.flip());
        self.plane.flip();
    }

    /// Fan-triangulate around the first vertex.
    ///
    /// Valid because polygons are convex. A triangle is returned as is.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [anchor, pair[0], pair[1]])
            .collect()
    }

    /// Returns an iterator over the polygon's edges as `(start, end)` vertex pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Returns a mutable reference to the metadata, if any.
    pub const fn metadata_mut(&mut self) -> Option<&mut S> {
        self.metadata.as_mut()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}
