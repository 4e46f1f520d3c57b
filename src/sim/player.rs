//! Player kinematics
//!
//! Force accumulation per frame: thrust, pillar gravity, active-pillar swirl,
//! then integrate, cap, frame-rate-normalized drag, and a translator move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CENTRIPETAL_ASSIST, SLING_ENERGY_SHARE};
use crate::frame_decay;
use crate::pga::{EPSILON, Motor, Point};

/// Held inputs for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

/// Position, velocity and stored spin-energy of the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub position: Point,
    pub velocity: Vec2,
    /// Rotational charge built up from bounces; feeds the swirl
    pub spin_energy: f32,
}

impl PlayerState {
    /// At rest at `position`
    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            spin_energy: 0.0,
        }
    }

    /// Move to `position` with velocity and spin-energy zeroed
    pub fn respawn_at(&mut self, position: Point) {
        *self = Self::at(position);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Flip velocity and bank spin-energy proportional to the speed
    pub fn bounce_impulse(&mut self, energy_factor: f32, energy_cap: f32) {
        self.velocity = -self.velocity;
        self.spin_energy =
            (self.spin_energy + energy_factor * self.speed()).clamp(-energy_cap, energy_cap);
    }
}

/// Kinematics tuning record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub accel: f32,
    pub drag: f32,
    pub energy_drag: f32,
    pub max_speed: f32,
    pub influence_radius: f32,
    pub min_spin_radius: f32,
    pub sling_factor: f32,
    pub max_energy: f32,
    pub gravity_accel: f32,
    pub gravity_min_radius: f32,
}

/// Advance the player one frame.
///
/// `active` outside `pillars` is treated as no active pillar.
pub fn step_kinematics(
    player: &mut PlayerState,
    input: &InputState,
    pillars: &[Point],
    active: Option<usize>,
    dt: f32,
    k: &PlayerTuning,
) {
    let mut acc = Vec2::ZERO;

    // Thrust
    let thrust = if input.boost { 2.0 * k.accel } else { k.accel };
    if input.up {
        acc.y += thrust;
    }
    if input.down {
        acc.y -= thrust;
    }
    if input.right {
        acc.x += thrust;
    }
    if input.left {
        acc.x -= thrust;
    }

    // Gravity from every pillar
    for center in pillars {
        if let Some((toward, r)) = player.position.join(center).direction_and_norm() {
            acc += toward * (k.gravity_accel / r.max(k.gravity_min_radius));
        }
    }

    // Swirl around the active pillar
    if let Some(center) = active.and_then(|i| pillars.get(i)) {
        acc += swirl_acceleration(player, center, k);
    }

    player.velocity += acc * dt;

    let speed = player.velocity.length();
    if speed > k.max_speed {
        player.velocity *= k.max_speed / speed;
    }

    player.velocity *= frame_decay(k.drag, dt);
    player.spin_energy *= frame_decay(k.energy_drag, dt);

    let step = player.velocity * dt;
    player.position = Motor::translator(step.x, step.y).apply(&player.position);

    player.spin_energy = player.spin_energy.clamp(-k.max_energy, k.max_energy);
}

/// Tangential swirl plus a small centripetal assist inside the influence radius
fn swirl_acceleration(player: &PlayerState, center: &Point, k: &PlayerTuning) -> Vec2 {
    let Some((radial, r)) = player.position.join(center).direction_and_norm() else {
        return Vec2::ZERO;
    };
    if r >= k.influence_radius || r <= EPSILON {
        return Vec2::ZERO;
    }
    let tangent = radial.perp();
    let spin_r = r.max(k.min_spin_radius);

    let w = (1.0 - r / k.influence_radius).clamp(0.0, 1.0);
    let mut swirl = 2.0 * k.accel * (0.25 + 0.75 * w * w);
    let sling = k.sling_factor * player.spin_energy / spin_r;
    swirl += k.accel * SLING_ENERGY_SHARE * sling;

    let vt = player.velocity.dot(tangent);
    let centripetal = CENTRIPETAL_ASSIST * vt * vt / spin_r;

    tangent * swirl + radial * centripetal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> PlayerTuning {
        PlayerTuning {
            accel: 900.0,
            drag: 0.995,
            energy_drag: 0.998,
            max_speed: 220.0,
            influence_radius: 150.0,
            min_spin_radius: 60.0,
            sling_factor: 0.01,
            max_energy: 1000.0,
            gravity_accel: 220.0,
            gravity_min_radius: 30.0,
        }
    }

    fn frictionless() -> PlayerTuning {
        PlayerTuning {
            drag: 1.0,
            energy_drag: 1.0,
            max_speed: 1.0e6,
            ..tuning()
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_thrust_and_boost() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(100.0, 100.0));
        let right = InputState {
            right: true,
            ..Default::default()
        };
        step_kinematics(&mut p, &right, &[], None, DT, &k);
        assert!((p.velocity.x - 900.0 * DT).abs() < 1e-3);

        let mut q = PlayerState::at(Point::new(100.0, 100.0));
        let input = InputState { up: true, boost: true, ..Default::default() };
        step_kinematics(&mut q, &input, &[], None, DT, &k);
        assert!((q.velocity.y - 1800.0 * DT).abs() < 1e-3);
        assert!(q.position.y() > 100.0);
    }

    #[test]
    fn test_opposing_inputs_cancel() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(10.0, 10.0));
        let input = InputState { up: true, down: true, left: true, right: true, boost: false };
        step_kinematics(&mut p, &input, &[], None, DT, &k);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_pulls_toward_pillar() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        step_kinematics(&mut p, &InputState::default(), &[Point::new(100.0, 0.0)], None, 1.0, &k);
        // 220 / max(100, 30)
        assert!((p.velocity.x - 2.2).abs() < 1e-4);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_gravity_uses_min_radius_close_in() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        step_kinematics(&mut p, &InputState::default(), &[Point::new(0.0, 5.0)], None, 1.0, &k);
        assert!((p.velocity.y - 220.0 / 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_pillar_is_skipped() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(40.0, 40.0));
        step_kinematics(&mut p, &InputState::default(), &[Point::new(40.0, 40.0)], Some(0), DT, &k);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn test_active_pillar_adds_tangential_swirl() {
        let k = frictionless();
        let pillar = [Point::new(100.0, 0.0)];
        let mut passive = PlayerState::at(Point::new(0.0, 0.0));
        let mut active = passive;
        step_kinematics(&mut passive, &InputState::default(), &pillar, None, DT, &k);
        step_kinematics(&mut active, &InputState::default(), &pillar, Some(0), DT, &k);
        // Radial toward +x, tangent is its left-hand perpendicular (+y)
        assert_eq!(passive.velocity.y, 0.0);
        assert!(active.velocity.y > 0.0);
    }

    #[test]
    fn test_swirl_only_inside_influence_radius() {
        let k = frictionless();
        let pillar = [Point::new(200.0, 0.0)];
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        step_kinematics(&mut p, &InputState::default(), &pillar, Some(0), DT, &k);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_active_index_is_ignored() {
        let k = frictionless();
        let pillar = [Point::new(100.0, 0.0)];
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        step_kinematics(&mut p, &InputState::default(), &pillar, Some(5), DT, &k);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_spin_energy_strengthens_swirl() {
        let k = frictionless();
        let pillar = [Point::new(100.0, 0.0)];
        let mut calm = PlayerState::at(Point::new(0.0, 0.0));
        let mut charged = calm;
        charged.spin_energy = 500.0;
        step_kinematics(&mut calm, &InputState::default(), &pillar, Some(0), DT, &k);
        step_kinematics(&mut charged, &InputState::default(), &pillar, Some(0), DT, &k);
        assert!(charged.velocity.y > calm.velocity.y);
    }

    #[test]
    fn test_speed_capped() {
        let k = PlayerTuning { drag: 1.0, ..tuning() };
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        p.velocity = Vec2::new(1000.0, 0.0);
        step_kinematics(&mut p, &InputState::default(), &[], None, DT, &k);
        assert!(p.speed() <= k.max_speed + 1e-3);
    }

    #[test]
    fn test_drag_is_frame_rate_independent() {
        let k = tuning();
        let mut one = PlayerState::at(Point::new(0.0, 0.0));
        one.velocity = Vec2::new(100.0, 0.0);
        one.spin_energy = 50.0;
        let mut two = one;

        step_kinematics(&mut one, &InputState::default(), &[], None, DT, &k);
        step_kinematics(&mut two, &InputState::default(), &[], None, DT / 2.0, &k);
        step_kinematics(&mut two, &InputState::default(), &[], None, DT / 2.0, &k);

        assert!((one.velocity.x - 100.0 * 0.995).abs() < 1e-3);
        assert!((one.velocity.x - two.velocity.x).abs() < 1e-3);
        assert!((one.spin_energy - two.spin_energy).abs() < 1e-3);
    }

    #[test]
    fn test_spin_energy_clamped() {
        let k = PlayerTuning { max_energy: 100.0, ..frictionless() };
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        p.spin_energy = -500.0;
        step_kinematics(&mut p, &InputState::default(), &[], None, DT, &k);
        assert_eq!(p.spin_energy, -100.0);
    }

    #[test]
    fn test_moves_by_velocity_times_dt() {
        let k = frictionless();
        let mut p = PlayerState::at(Point::new(50.0, 50.0));
        p.velocity = Vec2::new(60.0, -30.0);
        step_kinematics(&mut p, &InputState::default(), &[], None, 0.5, &k);
        assert!((p.position.to_vec2() - Vec2::new(80.0, 35.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounce_impulse_flips_and_charges() {
        let mut p = PlayerState::at(Point::new(0.0, 0.0));
        p.velocity = Vec2::new(30.0, 40.0);
        p.bounce_impulse(0.35, 600.0);
        assert_eq!(p.velocity, Vec2::new(-30.0, -40.0));
        assert!((p.spin_energy - 17.5).abs() < 1e-4);

        p.spin_energy = 595.0;
        p.bounce_impulse(0.35, 600.0);
        assert_eq!(p.spin_energy, 600.0);
    }

    #[test]
    fn test_respawn_clears_motion() {
        let mut p = PlayerState::at(Point::new(1.0, 1.0));
        p.velocity = Vec2::new(5.0, 5.0);
        p.spin_energy = 12.0;
        p.respawn_at(Point::new(66.0, 66.0));
        assert_eq!(p, PlayerState::at(Point::new(66.0, 66.0)));
    }
}
