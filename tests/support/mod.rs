//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use bsp_csg::{
    Solid,
    bsp::Node,
    float_types::Real,
    polygon::Polygon,
    vertex::Vertex,
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None)
}

/// Unit square in the XY plane, facing +Z.
pub fn unit_square() -> Polygon<()> {
    make_polygon_3d(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ])
}

/// Cube centered on `center` with the given half size.
pub fn cube_at(center: [Real; 3], half: Real) -> Solid<()> {
    Solid::cube(
        Point3::new(center[0], center[1], center[2]),
        Vector3::new(half, half, half),
        None,
    )
}

/// Regular grid of sample points covering `[-extent, extent]^3`.
///
/// The offset keeps samples off the integer and half-integer planes the test
/// solids are built on.
pub fn sample_points(extent: Real, steps: usize) -> Vec<Point3<Real>> {
    let step = 2.0 * extent / steps as Real;
    let coord = |i: usize| -extent + (i as Real + 0.37) * step;

    let mut points = Vec::with_capacity(steps * steps * steps);
    for i in 0..steps {
        for j in 0..steps {
            for k in 0..steps {
                points.push(Point3::new(coord(i), coord(j), coord(k)));
            }
        }
    }
    points
}

/// Membership of every sample point, evaluated against a single tree.
pub fn membership(solid: &Solid<()>, points: &[Point3<Real>]) -> Vec<bool> {
    let tree = Node::from_polygons(&solid.polygons);
    points.iter().map(|p| tree.contains_point(p)).collect()
}

/// Assert that two solids contain exactly the same sample points.
pub fn assert_same_point_set(a: &Solid<()>, b: &Solid<()>, points: &[Point3<Real>]) {
    let (in_a, in_b) = (membership(a, points), membership(b, points));
    for ((p, x), y) in points.iter().zip(in_a).zip(in_b) {
        assert_eq!(x, y, "membership differs at {p}");
    }
}

/// Total area of all polygons of a solid.
pub fn surface_area(solid: &Solid<()>) -> Real {
    solid
        .polygons
        .iter()
        .flat_map(|p| p.triangulate())
        .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() / 2.0)
        .sum()
}
