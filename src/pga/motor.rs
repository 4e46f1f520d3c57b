//! Motors: rigid motions (rotation + translation) as even multivectors
//!
//! Layout follows `[s, e01, e02, e03, e23, e31, e12, e0123]`. Points are
//! moved with the sandwich `M · X · ~M`; composition is the geometric
//! product, with `a * b` applying `b` first.

use std::ops::Mul;

use super::EPSILON;
use super::multivector::{E01, E02, E03, E12, E23, E31, E0123, Multivector, SCALAR};
use super::point::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motor {
    pub s: f32,
    pub e01: f32,
    pub e02: f32,
    pub e03: f32,
    pub e23: f32,
    pub e31: f32,
    pub e12: f32,
    pub e0123: f32,
}

impl Default for Motor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Motor {
    pub const IDENTITY: Self = Self {
        s: 1.0,
        e01: 0.0,
        e02: 0.0,
        e03: 0.0,
        e23: 0.0,
        e31: 0.0,
        e12: 0.0,
        e0123: 0.0,
    };

    /// Pure translation by `(dx, dy)`
    pub fn translator(dx: f32, dy: f32) -> Self {
        Self {
            e01: -0.5 * dx,
            e02: -0.5 * dy,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation by `angle` radians about the origin
    pub fn rotor(angle: f32) -> Self {
        let (sin, cos) = (0.5 * angle).sin_cos();
        Self {
            s: cos,
            e12: -sin,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation by `angle` radians about `center`.
    ///
    /// Built as `T(+c) · R(angle) · T(-c)`, renormalized after composing.
    pub fn rotation_about(center: &Point, angle: f32) -> Self {
        let c = center.to_vec2();
        let (to, back) = (Self::translator(c.x, c.y), Self::translator(-c.x, -c.y));
        (to * Self::rotor(angle) * back).normalized()
    }

    /// Reversion: negates the bivector part. For unit motors this is the inverse.
    pub fn reverse(&self) -> Self {
        Self {
            s: self.s,
            e01: -self.e01,
            e02: -self.e02,
            e03: -self.e03,
            e23: -self.e23,
            e31: -self.e31,
            e12: -self.e12,
            e0123: self.e0123,
        }
    }

    /// Euclidean norm (`s² + e23² + e31² + e12²`). Unit motors have norm 1.
    pub fn norm(&self) -> f32 {
        (self.s * self.s + self.e23 * self.e23 + self.e31 * self.e31 + self.e12 * self.e12)
            .sqrt()
    }

    /// Rescaled to unit norm; a degenerate motor comes back unchanged
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n < EPSILON {
            return *self;
        }
        let k = 1.0 / n;
        Self {
            s: self.s * k,
            e01: self.e01 * k,
            e02: self.e02 * k,
            e03: self.e03 * k,
            e23: self.e23 * k,
            e31: self.e31 * k,
            e12: self.e12 * k,
            e0123: self.e0123 * k,
        }
    }

    /// Apply to a point via `M · X · ~M`, returning a weight-normalized point
    pub fn apply(&self, point: &Point) -> Point {
        let m = self.to_multivector();
        let x = point.to_multivector();
        let rev = self.reverse().to_multivector();
        Point::from_multivector(&m.geometric(&x).geometric(&rev)).normalized()
    }

    fn to_multivector(self) -> Multivector {
        Multivector::from_components(&[
            (SCALAR, self.s),
            (E01, self.e01),
            (E02, self.e02),
            (E03, self.e03),
            (E23, self.e23),
            (E31, self.e31),
            (E12, self.e12),
            (E0123, self.e0123),
        ])
    }

    fn from_multivector(mv: &Multivector) -> Self {
        Self {
            s: mv.get(SCALAR),
            e01: mv.get(E01),
            e02: mv.get(E02),
            e03: mv.get(E03),
            e23: mv.get(E23),
            e31: mv.get(E31),
            e12: mv.get(E12),
            e0123: mv.get(E0123),
        }
    }
}

impl Mul for Motor {
    type Output = Motor;

    fn mul(self, rhs: Motor) -> Motor {
        Motor::from_multivector(&self.to_multivector().geometric(&rhs.to_multivector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Vec2, b: Vec2, tol: f32) {
        assert!((a - b).length() < tol, "{a} != {b}");
    }

    /// `M · ~M` must be the scalar 1 for a unit rigid motion
    fn assert_unit(m: &Motor) {
        let prod = *m * m.reverse();
        assert!((prod.s - 1.0).abs() < 1e-4, "scalar part {}", prod.s);
        for c in [prod.e01, prod.e02, prod.e03, prod.e23, prod.e31, prod.e12, prod.e0123] {
            assert!(c.abs() < 1e-3, "non-scalar residue {c}");
        }
    }

    #[test]
    fn test_translator_moves_point() {
        let p = Motor::translator(3.0, -4.0).apply(&Point::new(1.0, 1.0));
        assert_close(p.to_vec2(), Vec2::new(4.0, -3.0), 1e-5);
    }

    #[test]
    fn test_rotor_quarter_turn_is_counter_clockwise() {
        let p = Motor::rotor(FRAC_PI_2).apply(&Point::new(1.0, 0.0));
        assert_close(p.to_vec2(), Vec2::new(0.0, 1.0), 1e-5);
    }

    #[test]
    fn test_reverse_undoes_motor() {
        let m = Motor::rotation_about(&Point::new(40.0, 80.0), 1.3) * Motor::translator(5.0, 9.0);
        let x = Point::new(10.0, 20.0);
        let back = m.reverse().apply(&m.apply(&x));
        assert_close(back.to_vec2(), x.to_vec2(), 1e-3);
    }

    #[test]
    fn test_half_turn_about_point_is_point_reflection() {
        let c = Point::new(450.0, 180.0);
        let p = Motor::rotation_about(&c, PI).apply(&Point::new(535.0, 180.0));
        assert_close(p.to_vec2(), Vec2::new(365.0, 180.0), 1e-3);
    }

    #[test]
    fn test_composition_applies_right_operand_first() {
        // Rotate about the origin, then translate
        let m = Motor::translator(10.0, 0.0) * Motor::rotor(FRAC_PI_2);
        let p = m.apply(&Point::new(1.0, 0.0));
        assert_close(p.to_vec2(), Vec2::new(10.0, 1.0), 1e-5);
    }

    #[test]
    fn test_builders_are_unit_motors() {
        assert_unit(&Motor::translator(250.0, -80.0));
        assert_unit(&Motor::rotor(2.5));
        let c = Point::new(250.0, 250.0);
        assert_unit(&Motor::rotation_about(&c, 1.2));
        assert_unit(&(Motor::rotation_about(&c, 0.4) * Motor::translator(3.0, 4.0)));
        assert!((Motor::rotation_about(&c, 0.4).norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalized_rescales_drifted_motor() {
        let mut m = Motor::rotor(0.9);
        m.s *= 3.0;
        m.e12 *= 3.0;
        assert!((m.normalized().norm() - 1.0).abs() < 1e-6);
        let p = m.normalized().apply(&Point::new(5.0, 0.0));
        assert_close(p.to_vec2(), Motor::rotor(0.9).apply(&Point::new(5.0, 0.0)).to_vec2(), 1e-4);
    }

    #[test]
    fn test_rotate_and_back_restores_point() {
        let c = Point::new(200.0, 150.0);
        let x = Point::new(260.0, 95.0);
        for theta in [0.1, 1.0, PI] {
            let there = Motor::rotation_about(&c, theta).apply(&x);
            let back = Motor::rotation_about(&c, -theta).apply(&there);
            assert_close(back.to_vec2(), x.to_vec2(), 1e-3);
        }
    }

    proptest! {
        #[test]
        fn identity_leaves_any_point_unchanged(
            px in -1000.0f32..1000.0,
            py in -1000.0f32..1000.0,
        ) {
            let x = Point::new(px, py);
            let moved = Motor::IDENTITY.apply(&x).to_vec2();
            prop_assert!((moved - x.to_vec2()).length() < 1e-4);
        }

        #[test]
        fn reverse_is_involution_for_built_motors(
            dx in -1000.0f32..1000.0,
            dy in -1000.0f32..1000.0,
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            angle in -6.3f32..6.3,
        ) {
            let c = Point::new(cx, cy);
            let built = [
                Motor::translator(dx, dy),
                Motor::rotor(angle),
                Motor::rotation_about(&c, angle),
                Motor::rotation_about(&c, angle) * Motor::translator(dx, dy),
            ];
            for m in built {
                prop_assert_eq!(m.reverse().reverse(), m);
            }
        }

        #[test]
        fn join_norm_matches_euclidean_distance(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            let expected = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
            prop_assert!((a.join(&b).norm() - expected).abs() < 1e-4 * expected.max(1.0));
        }

        #[test]
        fn rotation_about_preserves_distance_to_center(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            angle in -6.3f32..6.3,
        ) {
            let c = Point::new(cx, cy);
            let p = Point::new(px, py);
            let moved = Motor::rotation_about(&c, angle).apply(&p);
            let before = c.distance(&p);
            let after = c.distance(&moved);
            prop_assert!((before - after).abs() < 1e-2);
        }
    }
}
