//! Ball Toy - a single ball bouncing around a canvas
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (boundary reflection, velocity decay, integration)
//! - `interaction`: Pointer handling (hover impulse, click selection, color choice)
//! - `app`: The shared world record both loops and the event handlers act on
//! - `renderer`: Draw surface abstraction and the WebGPU backend
//! - `platform`: Timers, listeners and fixed-step bookkeeping
//! - `settings`: Data-driven configuration

pub mod app;
pub mod interaction;
pub mod palette;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use interaction::{CanvasRect, ColorPicker, InteractionController, Selection};
pub use palette::FillColor;
pub use settings::{BodyConfig, Settings};

/// Toy configuration constants
pub mod consts {
    use glam::Vec2;

    /// Render surface dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Simulation rate, independent of the display refresh
    pub const TICK_HZ: f32 = 60.0;

    /// Velocity lost per axis per tick (pixels/tick)
    pub const VELOCITY_DECAY: f32 = 0.001;

    /// Velocity a body is set to while the pointer hovers inside it
    pub const HOVER_IMPULSE: Vec2 = Vec2::new(1.0, 1.0);

    /// Default body
    pub const BALL_START: Vec2 = Vec2::new(100.0, 100.0);
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 10.0;

    /// Upper bound on circles the GPU backend shades per frame
    pub const MAX_CIRCLES: usize = 16;
}
