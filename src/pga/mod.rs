//! Projective geometric algebra kernel
//!
//! The small slice of 3D PGA the simulation moves things with:
//! - `Point`: weight-normalized homogeneous positions
//! - `Line`: joins of two points, used as distance/direction primitives
//! - `Motor`: unit rigid motions, applied with the sandwich product
//!
//! Everything in the world moves through motors rather than ad hoc trig.

mod multivector;
pub mod motor;
pub mod point;

pub use motor::Motor;
pub use point::{Line, Point};

/// Threshold under which distances and norms count as degenerate
pub const EPSILON: f32 = 1e-6;
