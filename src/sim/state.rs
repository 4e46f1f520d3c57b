//! Simulation context
//!
//! Everything that outlives a frame lives in [`Simulation`]: the current
//! level, the active-pillar cursor, the auto-rotate timer and the run seed.
//! The frame driver is the only mutator; renderers read through the
//! accessors at the bottom.

use glam::Vec2;

use super::maze::{self, Maze, MazeWall};
use super::pillar::{Pillar, PillarKind};
use super::player::PlayerState;
use super::spawn::{self, Collectible};
use crate::pga::Point;
use crate::tuning::Tuning;

/// Salts separating the per-level seed streams
const MAZE_SALT: u64 = 1;
const PILLAR_SALT: u64 = 2;
const COLLECTIBLE_SALT: u64 = 3;

/// Something noteworthy that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A reflector teleported the player
    Reflected { pillar: usize },
    /// The player bounced off a maze wall or the world edge
    WallBounce,
    CollectiblePicked { index: usize },
    /// The end circle was reached; `level` is the level just finished
    LevelComplete { level: u32 },
}

/// Values a HUD shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    /// Speed over max speed, 0..=1
    pub speed_fraction: f32,
    /// |spin-energy| over the HUD full-scale value, 0..=1
    pub energy_fraction: f32,
    pub spin_energy: f32,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    pub tuning: Tuning,
    /// Run seed every level seed is derived from
    pub seed: u64,
    /// 0-based level counter
    pub level: u32,
    pub maze: Maze,
    pub pillars: Vec<Pillar>,
    pub collectibles: Vec<Collectible>,
    pub player: PlayerState,
    /// Active-pillar cursor; clamped into the pillar list when read
    pub(crate) active_cursor: usize,
    pub auto_rotate: bool,
    pub(crate) rotate_timer: f32,
    /// Collectibles picked up over the whole run
    pub collected: u32,
    pub time_ticks: u64,
    /// Events from the most recent frame
    pub events: Vec<SimEvent>,
}

impl Simulation {
    /// Build level 0 for `seed`. Identical tuning and seed give identical runs.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let auto_rotate = tuning.auto_rotate;
        let mut sim = Self {
            tuning,
            seed,
            level: 0,
            maze: Maze::from_walls(Vec::new(), Point::ORIGIN, Point::ORIGIN, 0.0),
            pillars: Vec::new(),
            collectibles: Vec::new(),
            player: PlayerState::default(),
            active_cursor: 0,
            auto_rotate,
            rotate_timer: 0.0,
            collected: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        sim.load_level();
        sim
    }

    /// Replace maze, pillars and collectibles for the current level and put
    /// the player on the new start. The active cursor carries over.
    fn load_level(&mut self) {
        let t = &self.tuning;
        let maze_seed = spawn::level_seed(self.seed, self.level, MAZE_SALT);
        let maze = maze::generate(&t.maze_params(maze_seed));
        let pillars = spawn::spawn_random_pillars(
            spawn::level_seed(self.seed, self.level, PILLAR_SALT),
            t.pillars_per_type,
            t.pillar_margin,
            t,
            &maze,
        );
        let collectibles = spawn::spawn_collectibles(
            spawn::level_seed(self.seed, self.level, COLLECTIBLE_SALT),
            t.collectibles_min,
            t.collectibles_max,
            t.collectible_margin,
            t.collectible_radius,
            &maze,
            Vec2::new(t.world_width, t.world_height),
        );

        self.player.respawn_at(maze.start);
        self.maze = maze;
        self.pillars = pillars;
        self.collectibles = collectibles;
        self.rotate_timer = 0.0;

        log::info!(
            "Level {} ready: {} walls, {} pillars, {} collectibles",
            self.level,
            self.maze.walls.len(),
            self.pillars.len(),
            self.collectibles.len()
        );
    }

    /// Advance to the next level
    pub fn regenerate(&mut self) {
        self.level += 1;
        self.load_level();
    }

    /// Step the active pillar forward or backward, wrapping
    pub fn cycle_active(&mut self, forward: bool) {
        let n = self.pillars.len();
        if n == 0 {
            return;
        }
        let current = self.active_cursor.min(n - 1);
        self.active_cursor = if forward { (current + 1) % n } else { (current + n - 1) % n };
        self.rotate_timer = 0.0;
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        self.rotate_timer = 0.0;
    }

    /// Flip the player's velocity and bank spin-energy from it
    pub fn bounce_impulse(&mut self) {
        self.player
            .bounce_impulse(self.tuning.impulse_energy_factor, self.tuning.impulse_energy_cap);
    }

    /// Drop a static pillar where the player is
    pub fn clone_pillar_at_player(&mut self) {
        let influence = self.tuning.pillar_influence_radius;
        let pillar = spawn::clone_static_pillar_at(&self.player.position, influence);
        log::debug!("Cloned static pillar at {}", pillar.center.to_vec2());
        self.pillars.push(pillar);
    }

    /// Count down the auto-rotate period and cycle when it runs out
    pub(crate) fn advance_auto_rotate(&mut self, dt: f32) {
        if !self.auto_rotate || self.pillars.len() < 2 {
            return;
        }
        self.rotate_timer += dt.max(0.0);
        let period = self.tuning.active_rotate_period;
        if self.rotate_timer >= period {
            self.cycle_active(true);
            self.rotate_timer = 0.0;
        }
    }

    /// Pillar centers in render order
    pub fn pillar_points(&self) -> Vec<Point> {
        self.pillars.iter().map(|p| p.center).collect()
    }

    pub fn pillar_views(&self) -> Vec<(Point, PillarKind)> {
        self.pillars.iter().map(|p| (p.center, p.kind())).collect()
    }

    /// Active pillar, or `None` when there are no pillars
    pub fn active_index(&self) -> Option<usize> {
        match self.pillars.len() {
            0 => None,
            n => Some(self.active_cursor.min(n - 1)),
        }
    }

    pub fn walls(&self) -> &[MazeWall] {
        &self.maze.walls
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_radius(&self) -> f32 {
        self.tuning.player_radius
    }

    pub fn hud(&self) -> HudReadout {
        let fraction = |value: f32, full: f32| {
            if full > 0.0 { (value / full).clamp(0.0, 1.0) } else { 0.0 }
        };
        HudReadout {
            speed_fraction: fraction(self.player.speed(), self.tuning.max_speed),
            energy_fraction: fraction(self.player.spin_energy.abs(), self.tuning.hud_energy_max),
            spin_energy: self.player.spin_energy,
        }
    }
}
