//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults match the
//! shipped game; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::maze::{MAX_CELLS, MIN_CELLS, MazeParams};
use crate::sim::pillar::Bounds;
use crate::sim::player::PlayerTuning;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid tuning JSON
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    pub player_radius: f32,
    /// Thrust per held direction (doubled while boosting)
    pub accel: f32,
    /// Velocity kept per 60 Hz frame
    pub drag: f32,
    /// Spin-energy kept per 60 Hz frame
    pub energy_drag: f32,
    pub max_speed: f32,
    /// Restitution used by every wall and bounds bounce
    pub bounce_loss: f32,
    /// Spin-energy gained per unit of speed on a world-bounds hit
    pub wall_energy_gain: f32,

    // === Swirl (active pillar) ===
    pub influence_radius: f32,
    pub min_spin_radius: f32,
    pub sling_factor: f32,
    pub max_energy: f32,

    // === Gravity (all pillars) ===
    pub gravity_accel: f32,
    pub gravity_min_radius: f32,

    // === Bounce impulse command ===
    pub impulse_energy_factor: f32,
    pub impulse_energy_cap: f32,

    // === Pillars ===
    pub pillar_influence_radius: f32,
    /// Upper bound on how many pillars of each kind a level spawns
    pub pillars_per_type: u32,
    pub pillar_margin: f32,
    pub seek_max_speed: f32,
    pub seek_accel: f32,
    pub reflector_trigger_radius: f32,
    pub reflector_cooldown: f32,
    /// Seconds between automatic active-pillar changes
    pub active_rotate_period: f32,
    pub auto_rotate: bool,

    // === Maze ===
    pub maze_cols: u32,
    pub maze_rows: u32,
    pub maze_margin: f32,
    pub wall_thickness: f32,
    pub depenetration_iterations: u32,
    pub depenetration_epsilon: f32,

    // === Collectibles ===
    pub collectibles_min: u32,
    pub collectibles_max: u32,
    pub collectible_radius: f32,
    pub collectible_margin: f32,

    // === HUD ===
    /// Spin-energy shown as a full HUD bar
    pub hud_energy_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_radius: PLAYER_RADIUS,
            accel: 900.0,
            drag: 0.995,
            energy_drag: 0.998,
            max_speed: 220.0,
            bounce_loss: 0.75,
            wall_energy_gain: 0.12,

            influence_radius: 150.0,
            min_spin_radius: 60.0,
            sling_factor: 0.01,
            max_energy: 100_000.0,

            gravity_accel: GRAVITY_ACCEL,
            gravity_min_radius: GRAVITY_MIN_RADIUS,

            impulse_energy_factor: 0.35,
            impulse_energy_cap: 600.0,

            pillar_influence_radius: 240.0,
            pillars_per_type: 2,
            pillar_margin: 80.0,
            seek_max_speed: 150.0,
            seek_accel: 300.0,
            reflector_trigger_radius: 90.0,
            reflector_cooldown: 0.25,
            active_rotate_period: 3.0,
            auto_rotate: true,

            maze_cols: 14,
            maze_rows: 10,
            maze_margin: 40.0,
            wall_thickness: 6.0,
            depenetration_iterations: 12,
            depenetration_epsilon: 0.01,

            collectibles_min: 2,
            collectibles_max: 5,
            collectible_radius: 10.0,
            collectible_margin: 60.0,

            hud_energy_max: 600.0,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&text)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_radius", self.player_radius),
            ("accel", self.accel),
            ("drag", self.drag),
            ("energy_drag", self.energy_drag),
            ("max_speed", self.max_speed),
            ("bounce_loss", self.bounce_loss),
            ("wall_energy_gain", self.wall_energy_gain),
            ("influence_radius", self.influence_radius),
            ("min_spin_radius", self.min_spin_radius),
            ("sling_factor", self.sling_factor),
            ("max_energy", self.max_energy),
            ("gravity_accel", self.gravity_accel),
            ("gravity_min_radius", self.gravity_min_radius),
            ("impulse_energy_factor", self.impulse_energy_factor),
            ("impulse_energy_cap", self.impulse_energy_cap),
            ("pillar_influence_radius", self.pillar_influence_radius),
            ("pillar_margin", self.pillar_margin),
            ("seek_max_speed", self.seek_max_speed),
            ("seek_accel", self.seek_accel),
            ("reflector_trigger_radius", self.reflector_trigger_radius),
            ("reflector_cooldown", self.reflector_cooldown),
            ("active_rotate_period", self.active_rotate_period),
            ("maze_margin", self.maze_margin),
            ("wall_thickness", self.wall_thickness),
            ("depenetration_epsilon", self.depenetration_epsilon),
            ("collectible_radius", self.collectible_radius),
            ("collectible_margin", self.collectible_margin),
            ("hud_energy_max", self.hud_energy_max),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, reason: "must be finite" });
            }
            if value < 0.0 {
                return Err(TuningError::Invalid { field, reason: "must not be negative" });
            }
        }

        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(TuningError::Invalid {
                field: "world_width/world_height",
                reason: "must be positive",
            });
        }
        if self.drag <= 0.0 || self.drag > 1.0 {
            return Err(TuningError::Invalid { field: "drag", reason: "must be in (0, 1]" });
        }
        if self.energy_drag <= 0.0 || self.energy_drag > 1.0 {
            return Err(TuningError::Invalid { field: "energy_drag", reason: "must be in (0, 1]" });
        }
        if self.bounce_loss > 1.0 {
            return Err(TuningError::Invalid { field: "bounce_loss", reason: "must be in [0, 1]" });
        }
        if self.max_speed <= 0.0 {
            return Err(TuningError::Invalid { field: "max_speed", reason: "must be positive" });
        }
        if self.active_rotate_period <= 0.0 {
            return Err(TuningError::Invalid {
                field: "active_rotate_period",
                reason: "must be positive",
            });
        }
        if self.depenetration_iterations == 0 {
            return Err(TuningError::Invalid {
                field: "depenetration_iterations",
                reason: "must be at least 1",
            });
        }
        // Every corridor must fit the player between two half-walls
        let min_cell = 2.0 * self.player_radius + self.wall_thickness;
        let spans = [
            ("maze_cols", self.maze_cols, self.world_width),
            ("maze_rows", self.maze_rows, self.world_height),
        ];
        for (field, count, extent) in spans {
            if count > MAX_CELLS {
                return Err(TuningError::Invalid {
                    field,
                    reason: "exceeds the generator's cell limit",
                });
            }
            let cell = (extent - 2.0 * self.maze_margin) / count.max(MIN_CELLS) as f32;
            if cell < min_cell {
                return Err(TuningError::Invalid {
                    field,
                    reason: "cells too small for the player",
                });
            }
        }

        if self.collectibles_min > self.collectibles_max {
            return Err(TuningError::Invalid {
                field: "collectibles_min",
                reason: "must not exceed collectibles_max",
            });
        }
        Ok(())
    }

    /// Kinematics record consumed by the player integrator
    pub fn player_tuning(&self) -> PlayerTuning {
        PlayerTuning {
            accel: self.accel,
            drag: self.drag,
            energy_drag: self.energy_drag,
            max_speed: self.max_speed,
            influence_radius: self.influence_radius,
            min_spin_radius: self.min_spin_radius,
            sling_factor: self.sling_factor,
            max_energy: self.max_energy,
            gravity_accel: self.gravity_accel,
            gravity_min_radius: self.gravity_min_radius,
        }
    }

    /// Maze generation parameters for this world
    pub fn maze_params(&self, seed: u64) -> MazeParams {
        MazeParams {
            cols: self.maze_cols,
            rows: self.maze_rows,
            margin: self.maze_margin,
            wall_thickness: self.wall_thickness,
            width: self.world_width,
            height: self.world_height,
            seed,
        }
    }

    /// Region movable pillars bounce inside
    pub fn pillar_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.world_width, self.world_height)
    }
}
