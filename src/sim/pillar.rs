//! Gravity-well pillars
//!
//! A pillar's motion mode is fixed when it is built. Each mode carries only
//! the fields it needs, so an orbit's `omega` can never be read on a seeker.

use glam::Vec2;

use super::player::PlayerState;
use crate::pga::{Motor, Point};

/// Default radius within which a pillar's swirl applies
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 240.0;

/// Field-less tag the renderer colors pillars by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PillarKind {
    Static,
    Linear,
    Orbit,
    Seek,
    Reflect,
}

/// Rectangle movable pillars are kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }
}

/// Point-reflection trigger.
///
/// Fires when the player is inside `trigger_radius` and the cooldown has run
/// out, then re-arms after `cooldown` seconds whether or not the player left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflector {
    pub trigger_radius: f32,
    pub cooldown: f32,
    pub cooldown_left: f32,
}

impl Reflector {
    pub fn new(trigger_radius: f32, cooldown: f32) -> Self {
        Self {
            trigger_radius,
            cooldown,
            cooldown_left: 0.0,
        }
    }
}

/// Motion mode and its per-mode state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PillarBody {
    Static,
    Linear { velocity: Vec2 },
    /// Positive `omega` turns clockwise (tangent = inward radial turned a quarter)
    Orbit { anchor: Point, omega: f32 },
    Seek { target: Point, velocity: Vec2, max_speed: f32, accel: f32 },
    Reflect(Reflector),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    pub center: Point,
    pub influence_radius: f32,
    pub body: PillarBody,
}

impl Pillar {
    pub fn fixed(center: Point) -> Self {
        Self {
            center,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            body: PillarBody::Static,
        }
    }

    pub fn linear(start: Point, velocity: Vec2, influence_radius: f32) -> Self {
        Self {
            center: start,
            influence_radius,
            body: PillarBody::Linear { velocity },
        }
    }

    /// Orbit `anchor`, starting from `start_on_circle`
    pub fn orbit(anchor: Point, start_on_circle: Point, omega: f32, influence_radius: f32) -> Self {
        Self {
            center: start_on_circle,
            influence_radius,
            body: PillarBody::Orbit { anchor, omega },
        }
    }

    pub fn seek(
        start: Point,
        target: Point,
        max_speed: f32,
        accel: f32,
        influence_radius: f32,
    ) -> Self {
        Self {
            center: start,
            influence_radius,
            body: PillarBody::Seek {
                target,
                velocity: Vec2::ZERO,
                max_speed,
                accel,
            },
        }
    }

    pub fn reflector(center: Point, trigger_radius: f32, cooldown: f32) -> Self {
        Self {
            center,
            influence_radius: trigger_radius,
            body: PillarBody::Reflect(Reflector::new(trigger_radius, cooldown)),
        }
    }

    pub fn kind(&self) -> PillarKind {
        match self.body {
            PillarBody::Static => PillarKind::Static,
            PillarBody::Linear { .. } => PillarKind::Linear,
            PillarBody::Orbit { .. } => PillarKind::Orbit,
            PillarBody::Seek { .. } => PillarKind::Seek,
            PillarBody::Reflect(_) => PillarKind::Reflect,
        }
    }

    /// Advance by `dt`, then bounce off `bounds`. Non-positive `dt` is a no-op.
    pub fn step(&mut self, dt: f32, bounds: &Bounds, bounce_loss: f32) {
        if dt <= 0.0 {
            return;
        }

        let center = self.center;
        let motion = match &mut self.body {
            PillarBody::Static | PillarBody::Reflect(_) => return,
            PillarBody::Linear { velocity } => {
                Some(Motor::translator(velocity.x * dt, velocity.y * dt))
            }
            PillarBody::Orbit { anchor, omega } => {
                // Exact arc about the anchor: speed |omega|·R along the tangent
                center
                    .join(anchor)
                    .direction()
                    .map(|_| Motor::rotation_about(anchor, -*omega * dt))
            }
            PillarBody::Seek {
                target,
                velocity,
                max_speed,
                accel,
            } => center.join(target).direction().map(|dir| {
                *velocity += dir * *accel * dt;
                let speed = velocity.length();
                if speed > *max_speed {
                    *velocity *= *max_speed / speed.max(1e-6);
                }
                Motor::translator(velocity.x * dt, velocity.y * dt)
            }),
        };

        if let Some(motor) = motion {
            self.center = motor.apply(&self.center);
        }
        self.bounce_inside(bounds, bounce_loss);
    }

    fn bounce_inside(&mut self, bounds: &Bounds, bounce_loss: f32) {
        let p = self.center.to_vec2();
        let clamped = p.clamp(bounds.min, bounds.max);
        let hit_x = clamped.x != p.x;
        let hit_y = clamped.y != p.y;
        if !hit_x && !hit_y {
            return;
        }

        self.center = Point::from_vec2(clamped);
        match &mut self.body {
            PillarBody::Linear { velocity } | PillarBody::Seek { velocity, .. } => {
                if hit_x {
                    velocity.x = -velocity.x * bounce_loss;
                }
                if hit_y {
                    velocity.y = -velocity.y * bounce_loss;
                }
            }
            PillarBody::Orbit { omega, .. } => *omega = -*omega,
            PillarBody::Static | PillarBody::Reflect(_) => {}
        }
    }

    /// Reflector check: tick the cooldown by `dt`, and if the player is inside
    /// the trigger radius with the cooldown spent, rotate the player half a
    /// turn about the center and negate its velocity. Other kinds never fire.
    pub fn try_reflect(&mut self, player: &mut PlayerState, dt: f32) -> bool {
        let center = self.center;
        let PillarBody::Reflect(reflector) = &mut self.body else {
            return false;
        };

        reflector.cooldown_left = (reflector.cooldown_left - dt.max(0.0)).max(0.0);
        if reflector.cooldown_left > 0.0 {
            return false;
        }

        let r = player.position.join(&center).norm();
        if r > reflector.trigger_radius {
            return false;
        }

        let half_turn = Motor::rotation_about(&center, std::f32::consts::PI);
        player.position = half_turn.apply(&player.position);
        player.velocity = -player.velocity;
        reflector.cooldown_left = reflector.cooldown;
        log::debug!(
            "Reflector at {} fired (R = {:.1}), player now at {}",
            center.to_vec2(),
            r,
            player.position.to_vec2()
        );
        true
    }
}
