//! Conversion between `Solid`s and indexed triangle meshes.
//!
//! Export fan-triangulates every polygon and then welds triangle corners that
//! agree in position and normal (within [`WeldTolerance`]) into a single index.
//! Import turns every triangle into its own three-vertex polygon.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::vertex::{Vertex, VertexEpsilon};
use approx::AbsDiffEq;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// An indexed triangle mesh as consumed by renderers: parallel position and
/// normal arrays plus one `[u32; 3]` per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub triangles: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The triangle list as a flat index buffer.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// How close two triangle corners must be to share an index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldTolerance {
    /// Maximum per-axis position difference
    pub position: Real,
    /// Maximum per-component normal difference
    pub normal: Real,
}

impl Default for WeldTolerance {
    fn default() -> Self {
        Self {
            position: EPSILON,
            normal: EPSILON,
        }
    }
}

impl WeldTolerance {
    /// Weld on position alone. The first normal seen at a position is kept.
    pub const fn position_only(position: Real) -> Self {
        Self {
            position,
            normal: Real::INFINITY,
        }
    }

    const fn as_vertex_epsilon(&self) -> VertexEpsilon {
        VertexEpsilon {
            position: self.position,
            normal: self.normal,
        }
    }
}

type Cell = (i64, i64, i64);

/// Index for the vertex that would follow `len` existing ones.
fn next_index(len: usize) -> Result<u32, ValidationError> {
    u32::try_from(len).map_err(|_| ValidationError::TooManyVertices(len + 1))
}

/// Incrementally assigns indices to vertices, reusing the index of an already
/// seen vertex within tolerance. Positions are bucketed into a grid whose cell
/// size is the position tolerance, so only the 27 surrounding cells are searched.
struct Welder {
    tolerance: WeldTolerance,
    cell_size: Real,
    cells: HashMap<Cell, Vec<u32>>,
    vertices: Vec<Vertex>,
}

impl Welder {
    fn new(tolerance: WeldTolerance) -> Self {
        Self {
            tolerance,
            cell_size: tolerance.position.max(Real::EPSILON),
            cells: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn cell(&self, pos: &Point3<Real>) -> Cell {
        (
            (pos.x / self.cell_size).floor() as i64,
            (pos.y / self.cell_size).floor() as i64,
            (pos.z / self.cell_size).floor() as i64,
        )
    }

    fn index_of(&mut self, vertex: &Vertex) -> Result<u32, ValidationError> {
        let epsilon = self.tolerance.as_vertex_epsilon();
        let (cx, cy, cz) = self.cell(&vertex.pos);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    if let Some(&found) = bucket
                        .iter()
                        .find(|&&i| self.vertices[i as usize].abs_diff_eq(vertex, epsilon))
                    {
                        return Ok(found);
                    }
                }
            }
        }

        let index = next_index(self.vertices.len())?;
        self.vertices.push(*vertex);
        self.cells.entry((cx, cy, cz)).or_default().push(index);
        Ok(index)
    }

    fn finish(self, triangles: Vec<[u32; 3]>) -> IndexedMesh {
        let (positions, normals) = self.vertices.iter().map(|v| (v.pos, v.normal)).unzip();
        IndexedMesh {
            positions,
            normals,
            triangles,
        }
    }
}

impl<S: Clone + Debug> Solid<S> {
    /// Triangulate and weld this solid into an [`IndexedMesh`].
    ///
    /// ## Errors
    /// If more than `u32::MAX + 1` distinct vertices remain after welding.
    pub fn to_indexed_mesh(&self, tolerance: WeldTolerance) -> Result<IndexedMesh, ValidationError> {
        let mut welder = Welder::new(tolerance);
        let mut triangles = Vec::with_capacity(self.polygons.len() * 2);
        for [a, b, c] in self.polygons.iter().flat_map(|poly| poly.triangulate()) {
            triangles.push([welder.index_of(&a)?, welder.index_of(&b)?, welder.index_of(&c)?]);
        }

        let mesh = welder.finish(triangles);
        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "welded indexed mesh"
        );
        Ok(mesh)
    }

    /// Build a solid from an indexed triangle mesh, one polygon per triangle.
    ///
    /// Positions are taken as given; apply any transform beforehand.
    /// Zero-area triangles are skipped.
    ///
    /// ## Errors
    /// If a triangle refers to a missing vertex, the normal and position arrays
    /// differ in length, or a coordinate is not finite.
    pub fn from_indexed_mesh(mesh: &IndexedMesh, metadata: Option<S>) -> Result<Solid<S>, ValidationError> {
        if mesh.normals.len() != mesh.positions.len() {
            return Err(ValidationError::MismatchedNormals {
                positions: mesh.positions.len(),
                normals: mesh.normals.len(),
            });
        }

        let mut polygons = Vec::with_capacity(mesh.triangles.len());
        for (t, triangle) in mesh.triangles.iter().enumerate() {
            let mut vertices = Vec::with_capacity(3);
            for &index in triangle {
                let i = index as usize;
                if i >= mesh.positions.len() {
                    return Err(ValidationError::IndexOutOfRange {
                        index,
                        len: mesh.positions.len(),
                    });
                }
                vertices.push(Vertex::new(mesh.positions[i], mesh.normals[i]));
            }

            match Polygon::try_new(vertices, metadata.clone()) {
                Ok(polygon) => polygons.push(polygon),
                Err(ValidationError::DegeneratePolygon(at)) => {
                    tracing::warn!(triangle = t, %at, "skipping zero-area triangle");
                },
                Err(err) => return Err(err),
            }
        }

        Ok(Solid { polygons })
    }
}
