//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non‑unit) normal; it is **copied verbatim**, so make sure it
    ///   is oriented the way you need it for lighting.
    #[inline]
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip vertex normal in place.
    ///
    /// # Example
    /// ```rust
    /// # use nalgebra::{Point3, Vector3};
    /// # use bsp_csg::vertex::Vertex;
    /// let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::x());
    /// v.flip();
    /// assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0), "position remains the same");
    /// assert_eq!(v.normal, -Vector3::x(), "the normal is negated");
    /// ```
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Both position and normal are blended:
    /// - p(t) = p₀ + t·(p₁ - p₀)
    /// - n(t) = n₀ + t·(n₁ - n₀)
    ///
    /// The normal is not renormalized.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }

    /// Whether both position and normal are finite.
    pub fn is_finite(&self) -> bool {
        self.pos.iter().all(|c| c.is_finite()) && self.normal.iter().all(|c| c.is_finite())
    }
}

/// Per-component tolerances used when comparing two [`Vertex`]s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VertexEpsilon {
    pub position: <Point3<Real> as approx::AbsDiffEq>::Epsilon,
    pub normal: <Vector3<Real> as approx::AbsDiffEq>::Epsilon,
}

impl approx::AbsDiffEq for Vertex {
    type Epsilon = VertexEpsilon;

    fn default_epsilon() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_epsilon(),
            normal: Vector3::<Real>::default_epsilon(),
        }
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.pos, &other.pos, epsilon.position)
            && approx::AbsDiffEq::abs_diff_eq(&self.normal, &other.normal, epsilon.normal)
    }
}

impl approx::RelativeEq for Vertex {
    fn default_max_relative() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_max_relative(),
            normal: Vector3::<Real>::default_max_relative(),
        }
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(
            &self.pos,
            &other.pos,
            epsilon.position,
            max_relative.position,
        ) && approx::RelativeEq::relative_eq(
            &self.normal,
            &other.normal,
            epsilon.normal,
            max_relative.normal,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vertex_new() {
        let pos = Point3::new(1.0, 2.0, 3.0);
        let normal = Vector3::new(0.0, 1.0, 0.0);
        let v = Vertex::new(pos, normal);
        assert_eq!(v.pos, pos);
        assert_eq!(v.normal, normal);
    }

    #[test]
    fn test_vertex_interpolate() {
        let v1 = Vertex::new(Point3::origin(), Vector3::x());
        let v2 = Vertex::new(Point3::new(2.0, 2.0, 2.0), Vector3::y());
        let v_mid = v1.interpolate(&v2, 0.5);

        approx::assert_relative_eq!(
            v_mid,
            Vertex::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(0.5, 0.5, 0.0))
        );
    }

    #[test]
    fn interpolate_endpoints() {
        let v1 = Vertex::new(Point3::new(-1.0, 0.0, 4.0), Vector3::z());
        let v2 = Vertex::new(Point3::new(3.0, 2.0, 0.0), -Vector3::z());

        approx::assert_relative_eq!(v1.interpolate(&v2, 0.0), v1);
        approx::assert_relative_eq!(v1.interpolate(&v2, 1.0), v2);
    }

    #[test]
    fn interpolate_leaves_inputs_untouched() {
        let v1 = Vertex::new(Point3::origin(), Vector3::x());
        let v2 = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        let _ = v1.interpolate(&v2, 0.25);
        assert_eq!(v1, Vertex::new(Point3::origin(), Vector3::x()));
        assert_eq!(v2, Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::x()));
    }

    #[test]
    fn finite_check() {
        let good = Vertex::new(Point3::origin(), Vector3::z());
        let bad = Vertex::new(Point3::new(Real::NAN, 0.0, 0.0), Vector3::z());
        assert!(good.is_finite());
        assert!(!bad.is_finite());
    }
}
