//! One simulation frame
//!
//! The step order is fixed; later steps read state earlier ones mutated:
//! maze resolve, reflector check, pillar motion, active-pillar assembly,
//! player integration, world bounds, reflector re-check, depenetration if
//! anything teleported, collectibles, then the win check (which may swap in
//! a whole new level as the frame's last action).

use super::collision::{depenetrate, resolve_maze, resolve_world_bounds};
use super::player::{InputState, step_kinematics};
use super::state::{SimEvent, Simulation};

/// Advance the simulation by `dt` seconds.
///
/// The driver is expected to cap `dt` (see [`crate::consts::MAX_FRAME_DT`]).
pub fn tick(sim: &mut Simulation, input: &InputState, dt: f32) {
    sim.events.clear();
    sim.time_ticks += 1;

    let radius = sim.tuning.player_radius;
    let bounce_loss = sim.tuning.bounce_loss;

    // 1. Settle against walls from the previous frame
    if resolve_maze(&sim.maze, &mut sim.player, radius, bounce_loss) {
        sim.events.push(SimEvent::WallBounce);
    }

    // 2. Reflectors, ticking their cooldowns
    let mut teleported = reflect_pass(sim, dt);

    // 3. Pillar motion
    let bounds = sim.tuning.pillar_bounds();
    for pillar in &mut sim.pillars {
        pillar.step(dt, &bounds, bounce_loss);
    }

    // 4. Pillar list and active index for this frame
    sim.advance_auto_rotate(dt);
    let centers = sim.pillar_points();
    let active = sim.active_index();

    // 5. Player
    step_kinematics(&mut sim.player, input, &centers, active, dt, &sim.tuning.player_tuning());

    if resolve_world_bounds(
        &mut sim.player,
        radius,
        sim.tuning.world_width,
        sim.tuning.world_height,
        bounce_loss,
        sim.tuning.wall_energy_gain,
    ) {
        sim.events.push(SimEvent::WallBounce);
    }

    // 6. Re-check after the move; cooldowns already ticked this frame
    teleported |= reflect_pass(sim, 0.0);

    // 7. A teleport may have landed inside a wall
    if teleported {
        depenetrate(
            &sim.maze,
            &mut sim.player.position,
            radius,
            sim.tuning.depenetration_iterations,
            sim.tuning.depenetration_epsilon,
        );
    }

    // 8. Pickups
    for (index, item) in sim.collectibles.iter_mut().enumerate() {
        if item.touches(&sim.player.position, radius) {
            item.collected = true;
            sim.collected += 1;
            sim.events.push(SimEvent::CollectiblePicked { index });
        }
    }

    // 9. Win check; regeneration is the last thing a frame does
    if sim.maze.is_at_end(&sim.player.position, radius) {
        log::info!("Level {} complete after {} ticks", sim.level, sim.time_ticks);
        sim.events.push(SimEvent::LevelComplete { level: sim.level });
        sim.regenerate();
    }
}

/// Run every reflector against the player; true if any fired
fn reflect_pass(sim: &mut Simulation, dt: f32) -> bool {
    let mut fired = false;
    for (index, pillar) in sim.pillars.iter_mut().enumerate() {
        if pillar.try_reflect(&mut sim.player, dt) {
            sim.events.push(SimEvent::Reflected { pillar: index });
            fired = true;
        }
    }
    fired
}
