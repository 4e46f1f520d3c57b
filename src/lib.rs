//! Gravity Maze - a maze arcade built around gravity-well pillars
//!
//! Core modules:
//! - `pga`: Geometric kernel (points, lines, motors)
//! - `sim`: Deterministic simulation (maze, pillars, player, collisions, frame tick)
//! - `tuning`: Data-driven game balance

pub mod pga;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest frame step the driver hands to the simulation
    pub const MAX_FRAME_DT: f32 = 1.0 / 60.0;
    /// Reference rate that per-frame drag factors are expressed in
    pub const DRAG_REFERENCE_HZ: f32 = 60.0;

    /// World (canvas) dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 8.0;

    /// Universal pillar gravity: accel = GRAVITY_ACCEL / max(R, GRAVITY_MIN_RADIUS)
    pub const GRAVITY_ACCEL: f32 = 220.0;
    pub const GRAVITY_MIN_RADIUS: f32 = 30.0;

    /// Share of the swirl thrust that spin-energy feeds back in
    pub const SLING_ENERGY_SHARE: f32 = 0.35;
    /// Centripetal assist applied while swirling
    pub const CENTRIPETAL_ASSIST: f32 = 0.15;
}

/// Decay `factor` (expressed per 60 Hz frame) over a step of `dt` seconds.
///
/// `factor^(dt·60)`, so two half steps decay exactly as much as one full step.
#[inline]
pub fn frame_decay(factor: f32, dt: f32) -> f32 {
    factor.powf((dt * consts::DRAG_REFERENCE_HZ).max(0.0))
}
