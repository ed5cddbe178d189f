//! World state and body types
//!
//! One `World` per toy instance. The simulation tick, the render step and the
//! pointer handlers all read and write the same bodies in place.

use glam::Vec2;

use crate::consts::*;
use crate::palette::FillColor;
use crate::settings::BodyConfig;

/// Stable body identifier (allocated from 1, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// A movable circular body. Only `Body::new` builds one.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Center, canvas pixels, origin top-left
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Always > 0, fixed for the body's lifetime
    radius: f32,
    pub color: FillColor,
    /// Reserved; nothing reads it yet
    pub mass: f32,
}

impl Body {
    /// Returns `None` when `radius` is not a positive finite number.
    pub fn new(id: BodyId, pos: Vec2, radius: f32, color: FillColor) -> Option<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return None;
        }
        Some(Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            mass: BALL_MASS,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Euclidean distance from `point` to the body center
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }
}

/// The shared body collection plus the viewport it lives in
#[derive(Debug, Clone)]
pub struct World {
    /// Viewport bounds (width, height)
    pub bounds: Vec2,
    /// Velocity lost per axis per tick
    pub decay_step: f32,
    /// Bodies, sorted by id
    pub bodies: Vec<Body>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl World {
    /// Empty world with the default decay step
    pub fn new(bounds: Vec2) -> Self {
        Self {
            bounds,
            decay_step: VELOCITY_DECAY,
            bodies: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// World holding the single default red ball at (100, 100)
    pub fn with_default_ball() -> Self {
        let mut world = Self::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        world.spawn(&BodyConfig::default());
        world
    }

    /// Add a body. Only called while building the world; the set is fixed
    /// once loops start. Returns `None` for a non-positive radius, in which
    /// case no id is used up.
    pub fn spawn(&mut self, config: &BodyConfig) -> Option<BodyId> {
        let mut body = Body::new(BodyId(self.next_id), config.pos, config.radius, config.color)?;
        body.vel = config.vel;
        body.mass = config.mass;
        self.next_id += 1;

        let id = body.id;
        self.bodies.push(body);
        Some(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Advance every body by exactly one tick
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }
}
