//! Simulation module
//!
//! Pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{WallContact, reflect_at_bounds, wall_contact};
pub use state::{Body, BodyId, World};
pub use tick::{decay_and_integrate, decay_component, tick};
