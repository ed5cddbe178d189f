//! Toy instance
//!
//! `App` is the single record the simulation timer, the render loop and the
//! pointer handlers share. Nothing is copied between them: each entry point
//! borrows the same world in turn on the one cooperative thread.

use glam::Vec2;

use crate::interaction::{CanvasRect, ColorPicker, InteractionController};
use crate::palette::FillColor;
use crate::renderer::{DrawSurface, RenderError, draw_world};
use crate::settings::Settings;
use crate::sim::World;

pub struct App {
    pub settings: Settings,
    pub world: World,
    pub controller: InteractionController,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let world = settings.build_world();
        let controller =
            InteractionController::new(settings.hover_impulse, settings.palette.clone());
        log::info!(
            "World created: {} body(ies) in {}x{}",
            world.bodies.len(),
            world.bounds.x,
            world.bounds.y
        );
        Self {
            settings,
            world,
            controller,
        }
    }

    /// One fixed simulation tick
    pub fn tick(&mut self) {
        self.world.tick();
    }

    /// Pointer moved to `page` (page coordinates)
    pub fn pointer_moved(&mut self, page: Vec2, rect: CanvasRect) {
        let point = rect.to_canvas(page);
        self.controller.pointer_moved(&mut self.world, point);
    }

    /// Pointer clicked at `page` (page coordinates)
    pub fn clicked(&mut self, page: Vec2, rect: CanvasRect, picker: &mut dyn ColorPicker) {
        let point = rect.to_canvas(page);
        self.controller.clicked(&self.world, point, picker);
    }

    /// A swatch was chosen in the picker
    pub fn choose_color(&mut self, color: FillColor, picker: &mut dyn ColorPicker) -> bool {
        self.controller.choose_color(&mut self.world, color, picker)
    }

    /// Draw the current world state
    pub fn render(&self, surface: &mut dyn DrawSurface) -> Result<(), RenderError> {
        draw_world(&self.world, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Selection;
    use crate::interaction::tests::RecordingPicker;
    use crate::renderer::tests::{DrawOp, RecordingSurface};
    use crate::sim::BodyId;

    #[test]
    fn test_page_coordinates_are_translated() {
        let mut app = App::default();
        let rect = CanvasRect::new(200.0, 50.0);
        let mut picker = RecordingPicker::default();

        // (300, 150) on the page is (100, 100) on the canvas
        app.pointer_moved(Vec2::new(300.0, 150.0), rect);
        assert_eq!(app.world.bodies[0].vel, Vec2::new(1.0, 1.0));

        app.clicked(Vec2::new(300.0, 150.0), rect, &mut picker);
        assert_eq!(app.controller.selection(), Selection::Selected(BodyId(1)));

        // Same page point without the offset misses
        app.clicked(Vec2::new(300.0, 150.0), CanvasRect::default(), &mut picker);
        assert_eq!(app.controller.selection(), Selection::None);
    }

    #[test]
    fn test_render_sees_latest_mutation() {
        let mut app = App::default();
        let mut picker = RecordingPicker::default();
        let mut surface = RecordingSurface::default();

        app.clicked(Vec2::new(100.0, 100.0), CanvasRect::default(), &mut picker);
        assert!(app.choose_color(FillColor::Green, &mut picker));
        app.render(&mut surface).unwrap();

        assert!(surface.ops.contains(&DrawOp::Circle(
            Vec2::new(100.0, 100.0),
            20.0,
            FillColor::Green
        )));
    }

    #[test]
    fn test_settings_flow_into_controller() {
        let mut settings = Settings::default();
        settings.hover_impulse = Vec2::new(-2.0, 0.5);
        settings.palette = vec![FillColor::Blue];
        let mut app = App::new(settings);
        let mut picker = RecordingPicker::default();

        app.pointer_moved(Vec2::new(100.0, 100.0), CanvasRect::default());
        app.clicked(Vec2::new(100.0, 100.0), CanvasRect::default(), &mut picker);

        assert_eq!(app.world.bodies[0].vel, Vec2::new(-2.0, 0.5));
        assert_eq!(picker.shown, vec![vec![FillColor::Blue]]);
    }
}
