//! **Constructive Solid Geometry (CSG)** on polygon boundaries,
//! built around Boolean operations (*union*, *difference*, *intersection*, *xor*) on sets of polygons stored in [BSP](bsp) trees.
//!
//! A [`Solid`] is nothing more than the list of convex polygons bounding it,
//! each wound counter-clockwise when seen from outside. Every Boolean operation
//! builds a BSP tree per operand, clips each tree against the other and
//! collects what survives into a new `Solid`. The operands are left untouched.
//!
//! ```
//! use bsp_csg::{CSG, Solid};
//! use nalgebra::{Point3, Vector3};
//!
//! let a: Solid<()> = Solid::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), None);
//! let b = a.translate(0.5, 0.5, 0.5);
//! let both = a.union(&b);
//! assert!(both.contains_point(&Point3::new(1.25, 1.25, 1.25)));
//! assert!(!both.contains_point(&Point3::new(1.25, -0.75, 0.0)));
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod vertex;
pub mod plane;
pub mod polygon;
pub mod bsp;
pub mod traits;
pub mod solid;
pub mod indexed_mesh;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::ValidationError;
pub use indexed_mesh::{IndexedMesh, WeldTolerance};
pub use polygon::Polygon;
pub use solid::Solid;
pub use traits::CSG;
pub use vertex::Vertex;
