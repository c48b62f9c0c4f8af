//! Validation errors

use crate::float_types::Real;
use nalgebra::Point3;

/// All the possible validation issues we might encounter at the crate boundary.
///
/// The boolean engine itself never fails; these only come out of the
/// constructors that accept untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A polygon has fewer than three vertices
    #[error("(TooFewPoints) a polygon needs at least 3 vertices, got {0}")]
    TooFewPoints(usize),
    /// The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) the coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// The first three vertices of a polygon do not span a plane
    #[error("(DegeneratePolygon) vertices do not define a plane at: {0}")]
    DegeneratePolygon(Point3<Real>),
    /// A triangle refers to a vertex that does not exist
    #[error("(IndexOutOfRange) index {index} is out of range (vertices.len = {len})")]
    IndexOutOfRange { index: u32, len: usize },
    /// The normal array does not match the position array
    #[error("(MismatchedNormals) {positions} positions but {normals} normals")]
    MismatchedNormals { positions: usize, normals: usize },
    /// More distinct vertices than a `u32` index can address
    #[error("(TooManyVertices) {0} vertices do not fit in u32 indices")]
    TooManyVertices(usize),
}
