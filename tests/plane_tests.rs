mod support;

use bsp_csg::{
    float_types::{EPSILON, Real},
    plane::{BACK, COPLANAR, FRONT, Plane, SPANNING},
    polygon::Polygon,
    vertex::Vertex,
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, make_polygon_3d, unit_square};

#[test]
fn flip_negates_normal_and_offset() {
    let mut plane = Plane::from_normal(Vector3::new(0.0, 3.0, 4.0), 10.0);
    approx::assert_relative_eq!(plane.normal(), Vector3::new(0.0, 0.6, 0.8));
    approx::assert_relative_eq!(plane.offset(), 2.0);

    plane.flip();
    approx::assert_relative_eq!(plane.normal(), Vector3::new(0.0, -0.6, -0.8));
    approx::assert_relative_eq!(plane.offset(), -2.0);
    assert_eq!(plane.flipped().flipped(), plane);
}

#[test]
fn classify_polygon_bitmask() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let above = make_polygon_3d(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    let below = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]]);
    let across = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);

    assert_eq!(plane.classify_polygon(&unit_square()), COPLANAR);
    assert_eq!(plane.classify_polygon(&above), FRONT);
    assert_eq!(plane.classify_polygon(&below), BACK);
    assert_eq!(plane.classify_polygon(&across), SPANNING);
}

#[test]
fn split_unit_square_at_half() {
    let plane = Plane::from_normal(Vector3::x(), 0.5);
    let square = unit_square();
    let (cf, cb, front, back) = plane.split_polygon(&square);

    assert!(cf.is_empty() && cb.is_empty());
    assert_eq!(front.len(), 1);
    assert_eq!(back.len(), 1);

    let positions = |p: &Polygon<()>| p.vertices.iter().map(|v| v.pos).collect::<Vec<_>>();
    assert_eq!(
        positions(&front[0]),
        vec![
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ]
    );
    assert_eq!(
        positions(&back[0]),
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    );

    // Fragments keep the plane of the polygon they came from.
    assert_eq!(front[0].plane, square.plane);
    assert_eq!(back[0].plane, square.plane);
}

#[test]
fn coplanar_goes_by_facing() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let square = unit_square();
    let mut flipped = square.clone();
    flipped.flip();

    let (cf, cb, f, b) = plane.split_polygon(&square);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (1, 0, 0, 0));

    let (cf, cb, f, b) = plane.split_polygon(&flipped);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (0, 1, 0, 0));
}

#[test]
fn split_interpolates_normals() {
    let plane = Plane::from_normal(Vector3::x(), 0.5);
    let square: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::x()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::y()),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::y()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::x()),
        ],
        None,
    );
    let (_, _, front, _) = plane.split_polygon(&square);
    let cut = front[0].vertices[0];
    assert_eq!(cut.pos, Point3::new(0.5, 0.0, 0.0));
    approx::assert_relative_eq!(cut.normal, Vector3::new(0.5, 0.5, 0.0));
}

#[test]
fn near_plane_vertices_count_as_coplanar() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let nudge = EPSILON * 0.1;
    let poly = make_polygon_3d(&[[0.0, 0.0, nudge], [1.0, 0.0, -nudge], [0.0, 1.0, 0.0]]);
    assert_eq!(plane.classify_polygon(&poly), COPLANAR);
}

#[test]
fn signed_distance_sign() {
    let plane = Plane::from_points(
        Point3::new(0.0, 0.0, 2.0),
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(0.0, 1.0, 2.0),
    );
    let d: Real = plane.signed_distance(&Point3::new(3.0, -4.0, 5.0));
    assert!(approx_eq(d, 3.0, EPSILON));
    assert!(plane.signed_distance(&Point3::origin()) < 0.0);
}
