//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only (seed 0 is the one entropy escape hatch)
//! - Stable iteration order (pillars, walls and collectibles in list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod maze;
pub mod pillar;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{DepenetrationOutcome, depenetrate, resolve_maze, resolve_world_bounds};
pub use maze::{Dir, Maze, MazeGrid, MazeParams, MazeWall, generate};
pub use pillar::{Bounds, Pillar, PillarBody, PillarKind, Reflector};
pub use player::{InputState, PlayerState, PlayerTuning, step_kinematics};
pub use spawn::{Collectible, clone_static_pillar_at, spawn_collectibles, spawn_random_pillars};
pub use state::{HudReadout, SimEvent, Simulation};
pub use tick::tick;
