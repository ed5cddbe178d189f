//! Pointer interaction
//!
//! Turns pointer moves and clicks into world mutations, and drives the color
//! picker from the selection state:
//!
//! ```text
//! None ──click hits body──▶ Selected(id)
//! Selected ──click misses every body──▶ None
//! Selected ──color chosen──▶ None
//! ```

use glam::Vec2;

use crate::consts::HOVER_IMPULSE;
use crate::palette::FillColor;
use crate::sim::{BodyId, World};

/// On-screen origin of the render surface, in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Move the origin past a border so it sits on the drawable content
    pub fn inset(self, border_left: f32, border_top: f32) -> Self {
        Self::new(self.left + border_left, self.top + border_top)
    }

    /// Page-space pointer position to canvas-local pixels
    #[inline]
    pub fn to_canvas(&self, page: Vec2) -> Vec2 {
        Vec2::new(page.x - self.left, page.y - self.top)
    }
}

/// The side-channel UI a selection opens
pub trait ColorPicker {
    /// Present the palette; a choice comes back through
    /// [`InteractionController::choose_color`]
    fn show(&mut self, palette: &[FillColor]);
    fn hide(&mut self);
}

/// Current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(BodyId),
}

impl Selection {
    pub fn body(&self) -> Option<BodyId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(*id),
        }
    }
}

/// Maps pointer events onto the shared world
#[derive(Debug, Clone)]
pub struct InteractionController {
    selection: Selection,
    picker_visible: bool,
    /// Velocity assigned while the pointer is inside a body
    pub hover_impulse: Vec2,
    /// Colors offered when a body is selected
    pub palette: Vec<FillColor>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(HOVER_IMPULSE, FillColor::PALETTE.to_vec())
    }
}

impl InteractionController {
    pub fn new(hover_impulse: Vec2, palette: Vec<FillColor>) -> Self {
        Self {
            selection: Selection::None,
            picker_visible: false,
            hover_impulse,
            palette,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn picker_visible(&self) -> bool {
        self.picker_visible
    }

    /// Overwrite the velocity of every body the pointer is strictly inside.
    ///
    /// Fires on every move event while inside; this is an assignment, not an
    /// accumulating force. Returns how many bodies were hit.
    pub fn pointer_moved(&self, world: &mut World, point: Vec2) -> usize {
        let mut hits = 0;
        for body in &mut world.bodies {
            if body.distance_to(point) < body.radius() {
                body.vel = self.hover_impulse;
                hits += 1;
                log::trace!("hover impulse on {:?} at {:?}", body.id, point);
            }
        }
        hits
    }

    /// Select the body under the pointer (boundary inclusive) or clear the
    /// selection.
    ///
    /// Every body is evaluated in id order and each one overwrites the
    /// outcome, so with several bodies the last one decides.
    pub fn clicked(&mut self, world: &World, point: Vec2, picker: &mut dyn ColorPicker) {
        for body in &world.bodies {
            if body.distance_to(point) <= body.radius() {
                self.selection = Selection::Selected(body.id);
                self.picker_visible = true;
                picker.show(&self.palette);
            } else {
                self.selection = Selection::None;
                self.picker_visible = false;
                picker.hide();
            }
        }
        log::debug!("click at {:?} -> {:?}", point, self.selection);
    }

    /// Recolor the selected body and close the picker.
    ///
    /// No-op without a selection. Returns whether a color was applied.
    pub fn choose_color(
        &mut self,
        world: &mut World,
        color: FillColor,
        picker: &mut dyn ColorPicker,
    ) -> bool {
        let Selection::Selected(id) = self.selection else {
            return false;
        };
        if let Some(body) = world.body_mut(id) {
            body.color = color;
            log::debug!("{:?} recolored to {}", id, color);
        }
        self.selection = Selection::None;
        self.picker_visible = false;
        picker.hide();
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::BodyConfig;

    /// Picker that records what it was asked to do
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPicker {
        pub visible: bool,
        pub shown: Vec<Vec<FillColor>>,
        pub hides: usize,
    }

    impl ColorPicker for RecordingPicker {
        fn show(&mut self, palette: &[FillColor]) {
            self.visible = true;
            self.shown.push(palette.to_vec());
        }

        fn hide(&mut self) {
            self.visible = false;
            self.hides += 1;
        }
    }

    #[test]
    fn test_canvas_translation() {
        let rect = CanvasRect::new(30.0, 12.5);
        assert_eq!(rect.to_canvas(Vec2::new(130.0, 112.5)), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_bordered_canvas_hits_ball_center() {
        // Border box at (8, 8) with a 1px border: content starts at (9, 9)
        let rect = CanvasRect::new(8.0, 8.0).inset(1.0, 1.0);
        assert_eq!(rect.to_canvas(Vec2::new(109.0, 109.0)), Vec2::new(100.0, 100.0));

        let world = World::with_default_ball();
        let mut controller = InteractionController::default();
        let mut picker = RecordingPicker::default();
        // Rim pixel on the right: one pixel further out would miss
        controller.clicked(&world, rect.to_canvas(Vec2::new(129.0, 109.0)), &mut picker);
        assert_eq!(controller.selection(), Selection::Selected(BodyId(1)));
    }

    #[test]
    fn test_hover_overwrites_velocity() {
        let mut world = World::with_default_ball();
        world.bodies[0].vel = Vec2::new(-3.0, 2.0);
        let controller = InteractionController::default();

        let hits = controller.pointer_moved(&mut world, Vec2::new(105.0, 95.0));

        assert_eq!(hits, 1);
        assert_eq!(world.bodies[0].vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_hover_on_edge_does_nothing() {
        let mut world = World::with_default_ball();
        world.bodies[0].vel = Vec2::new(-3.0, 2.0);
        let controller = InteractionController::default();

        // Exactly on the rim: strict test, no impulse
        let hits = controller.pointer_moved(&mut world, Vec2::new(120.0, 100.0));

        assert_eq!(hits, 0);
        assert_eq!(world.bodies[0].vel, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_hover_repeats_every_move() {
        let mut world = World::with_default_ball();
        let controller = InteractionController::default();

        controller.pointer_moved(&mut world, Vec2::new(100.0, 100.0));
        world.tick();
        assert!(world.bodies[0].vel.x < 1.0);

        controller.pointer_moved(&mut world, Vec2::new(101.0, 101.0));
        assert_eq!(world.bodies[0].vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_click_rim_selects() {
        let world = World::with_default_ball();
        let mut controller = InteractionController::default();
        let mut picker = RecordingPicker::default();

        // Boundary inclusive for clicks
        controller.clicked(&world, Vec2::new(100.0, 120.0), &mut picker);

        assert_eq!(controller.selection(), Selection::Selected(BodyId(1)));
        assert!(controller.picker_visible());
        assert!(picker.visible);
        assert_eq!(picker.shown, vec![FillColor::PALETTE.to_vec()]);
    }

    #[test]
    fn test_selection_round_trip() {
        let mut world = World::with_default_ball();
        let mut controller = InteractionController::default();
        let mut picker = RecordingPicker::default();

        controller.clicked(&world, Vec2::new(100.0, 100.0), &mut picker);
        assert_eq!(controller.selection().body(), Some(BodyId(1)));
        assert!(picker.visible);

        controller.clicked(&world, Vec2::new(500.0, 500.0), &mut picker);
        assert_eq!(controller.selection(), Selection::None);
        assert!(!controller.picker_visible());
        assert!(!picker.visible);

        controller.clicked(&world, Vec2::new(90.0, 110.0), &mut picker);
        let applied = controller.choose_color(&mut world, FillColor::Blue, &mut picker);
        assert!(applied);
        assert_eq!(world.bodies[0].color, FillColor::Blue);
        assert_eq!(controller.selection(), Selection::None);
        assert!(!picker.visible);
    }

    #[test]
    fn test_choose_color_without_selection_is_noop() {
        let mut world = World::with_default_ball();
        let mut controller = InteractionController::default();
        let mut picker = RecordingPicker::default();

        let applied = controller.choose_color(&mut world, FillColor::Green, &mut picker);

        assert!(!applied);
        assert_eq!(world.bodies[0].color, FillColor::Red);
        assert_eq!(picker.hides, 0);
    }

    #[test]
    fn test_last_evaluated_body_decides() {
        let mut world = World::with_default_ball();
        world
            .spawn(&BodyConfig {
                pos: Vec2::new(400.0, 300.0),
                ..Default::default()
            })
            .unwrap();
        let mut controller = InteractionController::default();
        let mut picker = RecordingPicker::default();

        // Hits body 1, then body 2 misses and clears it
        controller.clicked(&world, Vec2::new(100.0, 100.0), &mut picker);
        assert_eq!(controller.selection(), Selection::None);
        assert!(!picker.visible);

        // Hits the last body: sticks
        controller.clicked(&world, Vec2::new(400.0, 300.0), &mut picker);
        assert_eq!(controller.selection(), Selection::Selected(BodyId(2)));
        assert!(picker.visible);
    }
}
