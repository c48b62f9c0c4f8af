//! 3D Shapes as `Solid`s

use crate::float_types::{PI, Real, TAU};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::traits::CSG;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Corner indices and outward normal of each cube face.
///
/// Corner `i` sits at `-1` or `+1` on each axis according to bits 0 (x),
/// 1 (y) and 2 (z) of `i`.
const CUBE_FACES: [([usize; 4], [Real; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

impl<S: Clone + Debug> Solid<S> {
    /// Axis-aligned box centered on `center`, extending `half_extents` along each axis.
    ///
    /// Six quads, every vertex carrying its face's outward normal.
    ///
    /// ```
    /// # use bsp_csg::Solid;
    /// # use nalgebra::{Point3, Vector3};
    /// let cube: Solid<()> = Solid::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), None);
    /// assert_eq!(cube.polygons.len(), 6);
    /// ```
    pub fn cube(center: Point3<Real>, half_extents: Vector3<Real>, metadata: Option<S>) -> Solid<S> {
        let corner = |i: usize| {
            let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            center
                + Vector3::new(
                    half_extents.x * sign(1),
                    half_extents.y * sign(2),
                    half_extents.z * sign(4),
                )
        };

        let polygons = CUBE_FACES
            .iter()
            .map(|(indices, n)| {
                let normal = Vector3::new(n[0], n[1], n[2]);
                let vertices = indices
                    .iter()
                    .map(|&i| Vertex::new(corner(i), normal))
                    .collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect();

        Solid { polygons }
    }

    /// UV sphere around `center`.
    ///
    /// `slices` subdivide the azimuth and `stacks` the polar angle; each cell is
    /// a quad, or a triangle where it touches a pole. Vertex normals point
    /// radially outward. At least 3 slices and 2 stacks are used.
    pub fn sphere(
        center: Point3<Real>,
        radius: Real,
        slices: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let vertex = |i: usize, j: usize| {
            let theta = i as Real / slices as Real * TAU;
            let phi = j as Real / stacks as Real * PI;
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            Vertex::new(center + dir * radius, dir)
        };

        let mut polygons = Vec::with_capacity(slices * stacks);
        for i in 0..slices {
            for j in 0..stacks {
                let mut vertices = Vec::with_capacity(4);
                vertices.push(vertex(i, j));
                if j > 0 {
                    vertices.push(vertex(i + 1, j));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(i + 1, j + 1));
                }
                vertices.push(vertex(i, j + 1));
                polygons.push(Polygon::new(vertices, metadata.clone()));
            }
        }

        Solid { polygons }
    }

    /// Sweep `polygon` along `direction` (its own normal when `None`) by
    /// `distance`, producing a closed prism.
    ///
    /// The caps reuse the polygon's vertices; each edge becomes a quad side.
    /// Sweeping against the polygon's facing direction still yields an
    /// outward-facing boundary.
    pub fn extrude(polygon: &Polygon<S>, distance: Real, direction: Option<Vector3<Real>>) -> Solid<S> {
        let direction = direction.unwrap_or(polygon.plane.normal);
        let offset = direction * distance;
        let metadata = &polygon.metadata;

        let mut polygons = Vec::with_capacity(polygon.vertices.len() + 2);
        for (start, end) in polygon.edges() {
            let quad = [start.pos, end.pos, end.pos + offset, start.pos + offset];
            let side = Polygon::<S>::new(
                quad.iter().map(|&p| Vertex::new(p, Vector3::zeros())).collect(),
                metadata.clone(),
            );
            let normal = side.plane.normal;
            polygons.push(Polygon::with_plane(
                quad.iter().map(|&p| Vertex::new(p, normal)).collect(),
                side.plane,
                metadata.clone(),
            ));
        }

        let top = polygon
            .vertices
            .iter()
            .map(|v| Vertex::new(v.pos + offset, polygon.plane.normal))
            .collect();
        let mut top_plane = polygon.plane.clone();
        top_plane.w += top_plane.normal.dot(&offset);
        polygons.push(Polygon::with_plane(top, top_plane, metadata.clone()));

        let bottom = polygon
            .vertices
            .iter()
            .rev()
            .map(|v| Vertex::new(v.pos, -polygon.plane.normal))
            .collect();
        polygons.push(Polygon::with_plane(
            bottom,
            polygon.plane.flipped(),
            metadata.clone(),
        ));

        let solid = Solid { polygons };
        if offset.dot(&polygon.plane.normal) < 0.0 {
            // Swept backwards: every face above points into the prism.
            return solid.inverse();
        }
        solid
    }
}
