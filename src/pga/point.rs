//! Points and lines
//!
//! A point is the trivector `x·e032 + y·e013 + z·e021 + w·e123`. Gameplay
//! lives in the z = 0 plane, but the full grade-3 layout is kept so motors
//! can be applied with the ordinary sandwich product.

use glam::Vec2;

use super::EPSILON;
use super::multivector::{E013, E021, E032, E123, Multivector};

/// Homogeneous point (grade-3 element)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub e032: f32,
    pub e013: f32,
    pub e021: f32,
    pub e123: f32,
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Weight-1 point in the z = 0 plane
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            e032: x,
            e013: y,
            e021: 0.0,
            e123: 1.0,
        }
    }

    pub fn from_vec2(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Homogeneous weight (the e123 component)
    #[inline]
    pub fn weight(&self) -> f32 {
        self.e123
    }

    /// Rescale so the weight is 1. A zero-weight (ideal) point is returned unchanged.
    pub fn normalized(&self) -> Self {
        let w = self.e123;
        if w.abs() < EPSILON {
            return *self;
        }
        Self {
            e032: self.e032 / w,
            e013: self.e013 / w,
            e021: self.e021 / w,
            e123: 1.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.normalized().e032
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.normalized().e013
    }

    /// Weight-normalized Euclidean position
    pub fn to_vec2(&self) -> Vec2 {
        let p = self.normalized();
        Vec2::new(p.e032, p.e013)
    }

    /// Regressive product `self ∨ other`: the line through both points.
    ///
    /// Sign convention: the Euclidean part runs from `self` toward `other`.
    pub fn join(&self, other: &Point) -> Line {
        let (ax, ay, az, aw) = (self.e032, self.e013, self.e021, self.e123);
        let (bx, by, bz, bw) = (other.e032, other.e013, other.e021, other.e123);
        Line {
            e01: ay * bz - az * by,
            e02: az * bx - ax * bz,
            e03: ax * by - ay * bx,
            e23: aw * bx - bw * ax,
            e31: aw * by - bw * ay,
            e12: aw * bz - bw * az,
        }
    }

    /// Euclidean distance, read from the norm of the join
    pub fn distance(&self, other: &Point) -> f32 {
        let weights = self.e123 * other.e123;
        let norm = self.join(other).norm();
        if weights.abs() < EPSILON {
            norm
        } else {
            norm / weights.abs()
        }
    }

    pub(crate) fn to_multivector(self) -> Multivector {
        Multivector::from_components(&[
            (E032, self.e032),
            (E013, self.e013),
            (E021, self.e021),
            (E123, self.e123),
        ])
    }

    pub(crate) fn from_multivector(mv: &Multivector) -> Self {
        Self {
            e032: mv.get(E032),
            e013: mv.get(E013),
            e021: mv.get(E021),
            e123: mv.get(E123),
        }
    }
}

/// Line (grade-2 element): moment `e01/e02/e03`, direction `e23/e31/e12`.
///
/// Only ever produced by [`Point::join`] and consumed on the spot as a
/// distance/direction primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub e01: f32,
    pub e02: f32,
    pub e03: f32,
    pub e23: f32,
    pub e31: f32,
    pub e12: f32,
}

impl Line {
    /// Euclidean norm. For a join of two weight-1 points this is their distance.
    #[inline]
    pub fn norm(&self) -> f32 {
        (self.e23 * self.e23 + self.e31 * self.e31 + self.e12 * self.e12).sqrt()
    }

    /// Unit direction in the plane, or `None` when the line is degenerate
    pub fn direction(&self) -> Option<Vec2> {
        let n = self.norm();
        if n > EPSILON {
            Some(Vec2::new(self.e23 / n, self.e31 / n))
        } else {
            None
        }
    }

    /// Unit direction together with the norm it was normalized by
    pub fn direction_and_norm(&self) -> Option<(Vec2, f32)> {
        let n = self.norm();
        self.direction().map(|d| (d, n))
    }
}
