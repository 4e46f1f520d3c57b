//! Level population: random pillar sets and collectibles
//!
//! Everything here is a pure function of its seed and the maze.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::maze::{Maze, rng_for_seed};
use super::pillar::Pillar;
use crate::pga::Point;
use crate::tuning::Tuning;

/// Clearance a pillar center keeps from every wall
pub const PILLAR_WALL_CLEARANCE: f32 = 12.0;
/// Pillars never spawn this close to the player's start
pub const START_CLEARANCE: f32 = 90.0;
/// Candidate positions tried before a spawn is skipped
const PLACEMENT_ATTEMPTS: u32 = 48;

/// Pickup placed in a maze corridor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub position: Point,
    pub radius: f32,
    pub collected: bool,
}

impl Collectible {
    pub fn touches(&self, player: &Point, player_radius: f32) -> bool {
        !self.collected && player.distance(&self.position) <= self.radius + player_radius
    }
}

/// Mix a run seed with a level number and a per-concern salt.
///
/// Never returns 0, so derived seeds stay reproducible.
pub fn level_seed(run_seed: u64, level: u32, salt: u64) -> u64 {
    (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(run_seed)
        .wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .max(1)
}

/// Random point inside the margin rectangle that keeps `clearance` from
/// every wall and satisfies `accept`
fn sample_clear_point(
    rng: &mut Pcg32,
    maze: &Maze,
    size: Vec2,
    margin: f32,
    clearance: f32,
    accept: impl Fn(Vec2) -> bool,
) -> Option<Point> {
    let lo = Vec2::splat(margin).min(size * 0.5);
    let hi = (size - Vec2::splat(margin)).max(lo);
    for _ in 0..PLACEMENT_ATTEMPTS {
        let p = Vec2::new(rng.random_range(lo.x..=hi.x), rng.random_range(lo.y..=hi.y));
        if !maze.circle_overlaps_any_wall(p, clearance) && accept(p) {
            return Some(Point::from_vec2(p));
        }
    }
    None
}

/// Up to `per_type_max` pillars of each kind, away from walls and the start
pub fn spawn_random_pillars(
    seed: u64,
    per_type_max: u32,
    margin: f32,
    tuning: &Tuning,
    maze: &Maze,
) -> Vec<Pillar> {
    let mut rng = rng_for_seed(seed);
    let size = Vec2::new(tuning.world_width, tuning.world_height);
    let start = maze.start.to_vec2();
    let influence = tuning.pillar_influence_radius;
    let away_from_start = |p: Vec2| p.distance(start) >= START_CLEARANCE;

    let mut pillars = Vec::new();
    let place = |rng: &mut Pcg32| {
        sample_clear_point(rng, maze, size, margin, PILLAR_WALL_CLEARANCE, away_from_start)
    };

    for _ in 0..rng.random_range(0..=per_type_max) {
        if let Some(center) = place(&mut rng) {
            pillars.push(Pillar {
                influence_radius: influence,
                ..Pillar::fixed(center)
            });
        }
    }

    for _ in 0..rng.random_range(0..=per_type_max) {
        if let Some(from) = place(&mut rng) {
            let heading: f32 = rng.random_range(0.0..TAU);
            let speed: f32 = rng.random_range(40.0..90.0);
            pillars.push(Pillar::linear(from, Vec2::from_angle(heading) * speed, influence));
        }
    }

    for _ in 0..rng.random_range(0..=per_type_max) {
        if let Some(anchor) = place(&mut rng) {
            let radius: f32 = rng.random_range(40.0..100.0);
            let phase: f32 = rng.random_range(0.0..TAU);
            let spin: f32 = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let omega = rng.random_range(0.6f32..1.5) * spin;
            let on_circle = Point::from_vec2(anchor.to_vec2() + Vec2::from_angle(phase) * radius);
            pillars.push(Pillar::orbit(anchor, on_circle, omega, influence));
        }
    }

    for _ in 0..rng.random_range(0..=per_type_max) {
        if let (Some(from), Some(target)) = (place(&mut rng), place(&mut rng)) {
            let (max_speed, accel) = (tuning.seek_max_speed, tuning.seek_accel);
            pillars.push(Pillar::seek(from, target, max_speed, accel, influence));
        }
    }

    for _ in 0..rng.random_range(0..=per_type_max) {
        if let Some(center) = place(&mut rng) {
            pillars.push(Pillar::reflector(
                center,
                tuning.reflector_trigger_radius,
                tuning.reflector_cooldown,
            ));
        }
    }

    log::info!("Spawned {} pillars (seed {})", pillars.len(), seed);
    pillars
}

/// Static pillar dropped at the player's position
pub fn clone_static_pillar_at(position: &Point, influence_radius: f32) -> Pillar {
    Pillar {
        influence_radius,
        ..Pillar::fixed(position.normalized())
    }
}

/// Between `min` and `max` collectibles clear of walls and off the end circle
pub fn spawn_collectibles(
    seed: u64,
    min: u32,
    max: u32,
    margin: f32,
    radius: f32,
    maze: &Maze,
    world: Vec2,
) -> Vec<Collectible> {
    let mut rng = rng_for_seed(seed);
    let count = rng.random_range(min.min(max)..=max);
    let end = maze.end.to_vec2();
    let end_clearance = maze.end_radius + radius;
    let start = maze.start.to_vec2();

    let mut out: Vec<Collectible> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let taken: Vec<Vec2> = out.iter().map(|c| c.position.to_vec2()).collect();
        let accept = |p: Vec2| {
            p.distance(end) > end_clearance
                && p.distance(start) > 2.0 * radius
                && taken.iter().all(|t| t.distance(p) > 2.0 * radius)
        };
        if let Some(position) = sample_clear_point(&mut rng, maze, world, margin, radius, accept) {
            out.push(Collectible {
                position,
                radius,
                collected: false,
            });
        }
    }
    log::debug!("Placed {}/{} collectibles", out.len(), count);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::{MazeWall, generate};
    use crate::sim::pillar::PillarKind;

    fn world() -> (Tuning, Maze) {
        let tuning = Tuning::default();
        let maze = generate(&tuning.maze_params(42));
        (tuning, maze)
    }

    #[test]
    fn test_level_seed_deterministic_and_nonzero() {
        assert_eq!(level_seed(7, 3, 1), level_seed(7, 3, 1));
        assert_ne!(level_seed(7, 3, 1), level_seed(7, 4, 1));
        assert_ne!(level_seed(7, 3, 1), level_seed(7, 3, 2));
        assert_ne!(level_seed(0, 0, 0), 0);
    }

    #[test]
    fn test_pillars_reproducible() {
        let (tuning, maze) = world();
        let a = spawn_random_pillars(11, 2, 80.0, &tuning, &maze);
        let b = spawn_random_pillars(11, 2, 80.0, &tuning, &maze);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pillars_respect_limits() {
        let (tuning, maze) = world();
        for seed in 1..40 {
            let pillars = spawn_random_pillars(seed, 2, 80.0, &tuning, &maze);
            for kind in [
                PillarKind::Static,
                PillarKind::Linear,
                PillarKind::Orbit,
                PillarKind::Seek,
                PillarKind::Reflect,
            ] {
                assert!(pillars.iter().filter(|p| p.kind() == kind).count() <= 2);
            }
            // Orbiters start off their sampled anchor, so only the others are checked
            for p in pillars.iter().filter(|p| p.kind() != PillarKind::Orbit) {
                let c = p.center.to_vec2();
                assert!(c.distance(maze.start.to_vec2()) >= START_CLEARANCE);
                assert!(!maze.circle_overlaps_any_wall(c, PILLAR_WALL_CLEARANCE));
            }
        }
    }

    #[test]
    fn test_zero_per_type_spawns_nothing() {
        let (tuning, maze) = world();
        assert!(spawn_random_pillars(5, 0, 80.0, &tuning, &maze).is_empty());
    }

    #[test]
    fn test_clone_is_static_at_player() {
        let p = clone_static_pillar_at(&Point::new(120.0, 60.0), 200.0);
        assert_eq!(p.kind(), PillarKind::Static);
        assert_eq!(p.center, Point::new(120.0, 60.0));
        assert_eq!(p.influence_radius, 200.0);
    }

    #[test]
    fn test_collectibles_within_count_and_clear() {
        let (tuning, maze) = world();
        let world = Vec2::new(tuning.world_width, tuning.world_height);
        for seed in 1..20 {
            let items = spawn_collectibles(seed, 2, 5, 60.0, 10.0, &maze, world);
            assert!(items.len() <= 5);
            for c in &items {
                assert!(!c.collected);
                assert!(!maze.circle_overlaps_any_wall(c.position.to_vec2(), 10.0));
                assert!(!maze.is_at_end(&c.position, 10.0));
            }
        }
    }

    #[test]
    fn test_collectible_touch_and_collected_flag() {
        let mut c = Collectible {
            position: Point::new(100.0, 100.0),
            radius: 10.0,
            collected: false,
        };
        assert!(c.touches(&Point::new(115.0, 100.0), 8.0));
        assert!(!c.touches(&Point::new(130.0, 100.0), 8.0));
        c.collected = true;
        assert!(!c.touches(&Point::new(100.0, 100.0), 8.0));
    }

    #[test]
    fn test_fully_walled_world_places_nothing() {
        let wall = MazeWall::new(0.0, 0.0, 800.0, 600.0);
        let maze = Maze::from_walls(vec![wall], Point::new(0.0, 0.0), Point::new(10.0, 10.0), 5.0);
        let items = spawn_collectibles(3, 2, 5, 60.0, 10.0, &maze, Vec2::new(800.0, 600.0));
        assert!(items.is_empty());
    }
}
