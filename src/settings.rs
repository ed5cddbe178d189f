//! Toy settings
//!
//! Read as JSON from LocalStorage on the web, or from a file natively. Every
//! field has a default, so partial documents are fine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette::FillColor;
use crate::sim::World;

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: FillColor,
    pub mass: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            pos: BALL_START,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            color: FillColor::Red,
            mass: BALL_MASS,
        }
    }
}

/// Toy settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,

    // === Simulation ===
    /// Fixed simulation rate (ticks per second)
    pub tick_hz: f32,
    /// Velocity lost per axis per tick
    pub decay_step: f32,
    /// Velocity assigned on hover
    pub hover_impulse: Vec2,
    /// Bodies present at start; the set never changes afterwards
    pub bodies: Vec<BodyConfig>,

    // === Picker ===
    pub palette: Vec<FillColor>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            tick_hz: TICK_HZ,
            decay_step: VELOCITY_DECAY,
            hover_impulse: HOVER_IMPULSE,
            bodies: vec![BodyConfig::default()],

            palette: FillColor::PALETTE.to_vec(),
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Replace values the simulation cannot run with.
    ///
    /// Bodies with a non-positive or non-finite radius are dropped.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            log::warn!("Invalid canvas_width {}, using default", self.canvas_width);
            self.canvas_width = defaults.canvas_width;
        }
        if !(self.canvas_height.is_finite() && self.canvas_height > 0.0) {
            log::warn!("Invalid canvas_height {}, using default", self.canvas_height);
            self.canvas_height = defaults.canvas_height;
        }
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            log::warn!("Invalid tick_hz {}, using default", self.tick_hz);
            self.tick_hz = defaults.tick_hz;
        }
        if !(self.decay_step.is_finite() && self.decay_step > 0.0) {
            log::warn!("Invalid decay_step {}, using default", self.decay_step);
            self.decay_step = defaults.decay_step;
        }

        let before = self.bodies.len();
        self.bodies.retain(|b| b.radius.is_finite() && b.radius > 0.0);
        if self.bodies.len() != before {
            log::warn!(
                "Dropped {} body config(s) with non-positive radius",
                before - self.bodies.len()
            );
        }

        if self.palette.is_empty() {
            self.palette = defaults.palette;
        }

        self
    }

    /// Viewport bounds (width, height)
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Timer period for the simulation loop
    pub fn tick_interval_ms(&self) -> i32 {
        (1000.0 / self.tick_hz).floor().max(1.0) as i32
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Build the world described by these settings
    pub fn build_world(&self) -> World {
        let mut world = World::new(self.bounds());
        world.decay_step = self.decay_step;
        for config in &self.bodies {
            world.spawn(config);
        }
        world
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "ball_toy_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file, falling back to defaults (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_toy() {
        let s = Settings::default();
        assert_eq!(s.bounds(), Vec2::new(800.0, 600.0));
        assert_eq!(s.tick_interval_ms(), 16);
        assert_eq!(s.bodies.len(), 1);
        assert_eq!(
            s.palette,
            vec![FillColor::Red, FillColor::Green, FillColor::Blue, FillColor::Yellow]
        );
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let s = Settings::from_json(r#"{ "tick_hz": 30.0 }"#).unwrap();
        assert_eq!(s.tick_hz, 30.0);
        assert_eq!(s.canvas_width, 800.0);
        assert_eq!(s.bodies, vec![BodyConfig::default()]);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_validation_drops_bad_bodies() {
        let json = r#"{
            "tick_hz": 0.0,
            "decay_step": -0.5,
            "canvas_width": -1.0,
            "palette": [],
            "bodies": [
                { "radius": 0.0 },
                { "pos": [50.0, 60.0], "radius": 5.0, "color": "yellow" }
            ]
        }"#;
        let s = Settings::from_json(json).unwrap();
        assert_eq!(s.tick_hz, TICK_HZ);
        assert_eq!(s.decay_step, VELOCITY_DECAY);
        assert_eq!(s.canvas_width, CANVAS_WIDTH);
        assert_eq!(s.palette.len(), 4);
        assert_eq!(s.bodies.len(), 1);
        assert_eq!(s.bodies[0].color, FillColor::Yellow);
        assert_eq!(s.bodies[0].pos, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_stored_decay_never_accelerates() {
        for step in ["0.0", "-0.5"] {
            let json = format!(r#"{{ "decay_step": {step} }}"#);
            let mut world = Settings::from_json(&json).unwrap().build_world();
            world.bodies[0].vel = Vec2::new(1.0, 1.0);
            for _ in 0..10 {
                world.tick();
            }
            let vel = world.bodies[0].vel;
            assert!(vel.x.abs() < 1.0 && vel.y.abs() < 1.0, "{step}: {vel:?}");
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "palette": ["purple"] }"#).is_err());
    }

    #[test]
    fn test_build_world() {
        let mut s = Settings::default();
        s.decay_step = 0.01;
        let world = s.build_world();
        assert_eq!(world.decay_step, 0.01);
        assert_eq!(world.bodies.len(), 1);
        assert_eq!(world.bounds, Vec2::new(800.0, 600.0));
    }
}
