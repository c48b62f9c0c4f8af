// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Distance from a plane under which a point counts as lying on it.
pub const EPSILON: Real = 1e-5;

/// Recursion budget for [`Node::build`](crate::bsp::Node::build).
///
/// Once exhausted the remaining polygons are dropped and a warning is logged.
pub const DEFAULT_BUILD_DEPTH: usize = 6000;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
