//! Rendering
//!
//! The render step only needs three primitives from a surface: clear, fill a
//! circle, present. The WebGPU backend shades the circles as SDFs in the
//! fragment shader.

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;

use glam::Vec2;

use crate::palette::FillColor;
use crate::sim::World;

/// Failure to put a frame on screen
#[derive(Debug)]
pub enum RenderError {
    /// The swapchain surface could not hand out a texture
    Surface(wgpu::SurfaceError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Surface(e) => write!(f, "surface error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Surface(e) => Some(e),
        }
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RenderError::Surface(e)
    }
}

/// Something the render step can draw filled circles onto
pub trait DrawSurface {
    /// Erase the whole viewport
    fn clear(&mut self);
    /// Queue a filled circle; later circles paint over earlier ones
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: FillColor);
    /// Show what was drawn since the last `clear`
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draw the current state of every body. Reads only.
pub fn draw_world(world: &World, surface: &mut dyn DrawSurface) -> Result<(), RenderError> {
    surface.clear();
    for body in &world.bodies {
        surface.fill_circle(body.pos, body.radius(), body.color);
    }
    surface.present()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::BodyConfig;

    /// Draw call recorded by [`RecordingSurface`]
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawOp {
        Clear,
        Circle(Vec2, f32, FillColor),
        Present,
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(DrawOp::Clear);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: FillColor) {
            self.ops.push(DrawOp::Circle(center, radius, color));
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Present);
            Ok(())
        }
    }

    #[test]
    fn test_draw_world_clears_then_fills() {
        let mut world = World::with_default_ball();
        world
            .spawn(&BodyConfig {
                pos: Vec2::new(300.0, 200.0),
                radius: 8.0,
                color: FillColor::Yellow,
                ..Default::default()
            })
            .unwrap();
        let mut surface = RecordingSurface::default();

        draw_world(&world, &mut surface).unwrap();

        assert_eq!(
            surface.ops,
            vec![
                DrawOp::Clear,
                DrawOp::Circle(Vec2::new(100.0, 100.0), 20.0, FillColor::Red),
                DrawOp::Circle(Vec2::new(300.0, 200.0), 8.0, FillColor::Yellow),
                DrawOp::Present,
            ]
        );
    }

    #[test]
    fn test_draw_does_not_touch_world() {
        let mut world = World::with_default_ball();
        world.bodies[0].vel = Vec2::new(2.0, -1.0);
        let mut surface = RecordingSurface::default();

        draw_world(&world, &mut surface).unwrap();
        draw_world(&world, &mut surface).unwrap();

        assert_eq!(world.bodies[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(world.bodies[0].vel, Vec2::new(2.0, -1.0));
        assert_eq!(world.time_ticks, 0);
    }
}
