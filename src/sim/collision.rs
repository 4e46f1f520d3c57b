//! Collision response for the player circle
//!
//! Two resolvers: the world-bounds clamp and the maze-wall resolver. The maze
//! also has a position-only depenetration pass, run after teleports.

use glam::Vec2;

use super::maze::{Maze, MazeWall};
use super::player::PlayerState;
use crate::pga::{EPSILON, Point};

/// Result of a depenetration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepenetrationOutcome {
    /// Passes over the wall list that moved the circle
    pub iterations: u32,
    /// The circle no longer overlaps any wall
    pub resolved: bool,
}

/// Penetration of a circle into one wall: push direction (unit) and depth
#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    normal: Vec2,
    depth: f32,
}

/// Contact between a circle and a wall, if they overlap.
///
/// Center outside the rectangle: push away from the closest point (covers
/// edges and corners alike). Center inside: push through the nearest side.
fn wall_contact(wall: &MazeWall, center: Vec2, radius: f32) -> Option<Contact> {
    let closest = wall.closest_point(center);
    let offset = center - closest;
    let d2 = offset.length_squared();

    if d2 > 0.0 {
        if d2 >= radius * radius {
            return None;
        }
        let d = d2.sqrt();
        return Some(Contact {
            normal: offset / d,
            depth: radius - d,
        });
    }

    let sides = [
        (center.x - wall.x, Vec2::NEG_X),
        (wall.max_x() - center.x, Vec2::X),
        (center.y - wall.y, Vec2::NEG_Y),
        (wall.max_y() - center.y, Vec2::Y),
    ];
    let (to_side, normal) = sides
        .into_iter()
        .fold((f32::INFINITY, Vec2::ZERO), |best, side| if side.0 < best.0 { side } else { best });

    Some(Contact {
        normal,
        depth: to_side + radius,
    })
}

fn translate(point: &Point, by: Vec2) -> Point {
    crate::pga::Motor::translator(by.x, by.y).apply(point)
}

/// Clamp the player into `[r, w - r] × [r, h - r]`.
///
/// A clamped axis has its velocity negated and scaled by `bounce_loss`; any
/// hit adds `energy_gain · speed` of spin-energy. Returns whether it hit.
pub fn resolve_world_bounds(
    player: &mut PlayerState,
    radius: f32,
    width: f32,
    height: f32,
    bounce_loss: f32,
    energy_gain: f32,
) -> bool {
    let mut p = player.position.to_vec2();
    let mut hit = false;

    let max_x = (width - radius).max(radius);
    let max_y = (height - radius).max(radius);

    if p.x < radius || p.x > max_x {
        p.x = p.x.clamp(radius, max_x);
        player.velocity.x = -player.velocity.x * bounce_loss;
        hit = true;
    }
    if p.y < radius || p.y > max_y {
        p.y = p.y.clamp(radius, max_y);
        player.velocity.y = -player.velocity.y * bounce_loss;
        hit = true;
    }

    if hit {
        player.position = Point::from_vec2(p);
        player.spin_energy += energy_gain * player.speed();
    }
    hit
}

/// Push the player out of every wall it overlaps, reflecting velocity with
/// restitution `bounce_loss`. Walls are visited in order, each against the
/// already-corrected position. Returns whether any wall was hit.
pub fn resolve_maze(maze: &Maze, player: &mut PlayerState, radius: f32, bounce_loss: f32) -> bool {
    let mut hit = false;
    for wall in &maze.walls {
        let center = player.position.to_vec2();
        let Some(contact) = wall_contact(wall, center, radius) else {
            continue;
        };
        hit = true;

        player.position = translate(&player.position, contact.normal * contact.depth);

        // Approaching velocity only: v -= (1 + loss)(v·n)n would also flip a
        // velocity already leaving the wall and pull the circle back in
        let into = player.velocity.dot(contact.normal);
        if into < 0.0 {
            player.velocity -= (1.0 + bounce_loss) * into * contact.normal;
        }
    }
    hit
}

/// Position-only overlap removal, bounded by `max_iters` passes.
///
/// Each push overshoots by `epsilon` so the circle ends strictly clear.
/// Stops early on the first pass that finds nothing to fix.
pub fn depenetrate(
    maze: &Maze,
    position: &mut Point,
    radius: f32,
    max_iters: u32,
    epsilon: f32,
) -> DepenetrationOutcome {
    let mut iterations = 0;
    while iterations < max_iters {
        let mut moved = false;
        for wall in &maze.walls {
            let Some(contact) = wall_contact(wall, position.to_vec2(), radius) else {
                continue;
            };
            if contact.depth <= EPSILON {
                continue;
            }
            *position = translate(position, contact.normal * (contact.depth + epsilon));
            moved = true;
        }
        if !moved {
            break;
        }
        iterations += 1;
    }

    let resolved = !maze
        .walls
        .iter()
        .any(|w| wall_contact(w, position.to_vec2(), radius).is_some_and(|c| c.depth > EPSILON));
    if !resolved {
        log::warn!(
            "Depenetration gave up after {} passes at {} (radius {})",
            iterations,
            position.to_vec2(),
            radius
        );
    } else if iterations > 0 {
        log::debug!("Depenetrated in {} passes", iterations);
    }

    DepenetrationOutcome { iterations, resolved }
}
