//! Fixed timestep simulation tick
//!
//! One tick = boundary reflection for every body, then decay and integration
//! for every body. Units are pixels per tick, so there is no `dt`.

use super::collision::reflect_at_bounds;
use super::state::{Body, World};

/// Move one velocity component toward zero by `step`.
///
/// Not clamped: a component smaller than `step` overshoots and changes sign.
/// Exactly zero stays zero.
#[inline]
pub fn decay_component(v: f32, step: f32) -> f32 {
    if v < 0.0 {
        v + step
    } else if v > 0.0 {
        v - step
    } else {
        v
    }
}

/// Decay velocity, then add it to position
pub fn decay_and_integrate(body: &mut Body, step: f32) {
    body.vel.x = decay_component(body.vel.x, step);
    body.vel.y = decay_component(body.vel.y, step);
    body.pos += body.vel;
}

/// Advance the world by one fixed tick
pub fn tick(world: &mut World) {
    world.time_ticks += 1;

    let bounds = world.bounds;
    for body in &mut world.bodies {
        let contact = reflect_at_bounds(body, bounds);
        if contact.any() {
            log::trace!(
                "tick {}: body {:?} reflected (x: {}, y: {})",
                world.time_ticks,
                body.id,
                contact.x,
                contact.y
            );
        }
    }

    let step = world.decay_step;
    for body in &mut world.bodies {
        decay_and_integrate(body, step);
    }
}
