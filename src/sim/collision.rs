//! Boundary collision against the viewport edges
//!
//! Reflection only flips the velocity component; position is never corrected,
//! so a body may overlap a wall by up to one tick of travel. A body resting
//! inside the boundary zone flips sign every tick it stays there.

use glam::Vec2;

use super::state::Body;

/// Which axes a body breaches this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub y: bool,
}

impl WallContact {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// True when the circle touches or crosses `0` or `bound` on one axis
#[inline]
fn breaches(pos: f32, radius: f32, bound: f32) -> bool {
    pos - radius <= 0.0 || pos + radius >= bound
}

/// Check a body against the viewport without modifying it
pub fn wall_contact(body: &Body, bounds: Vec2) -> WallContact {
    let r = body.radius();
    WallContact {
        x: breaches(body.pos.x, r, bounds.x),
        y: breaches(body.pos.y, r, bounds.y),
    }
}

/// Negate the velocity on every breached axis. Perfectly elastic.
pub fn reflect_at_bounds(body: &mut Body, bounds: Vec2) -> WallContact {
    let contact = wall_contact(body, bounds);
    if contact.x {
        body.vel.x = -body.vel.x;
    }
    if contact.y {
        body.vel.y = -body.vel.y;
    }
    contact
}
