//! Platform abstraction layer
//!
//! - Fixed-step bookkeeping for hosts that only offer a variable clock
//! - Browser timers, animation frames and event listeners (wasm only), each
//!   released when its handle is dropped

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Maximum ticks run for one clock advance, prevents spiral of death
pub const MAX_SUBSTEPS: u32 = 8;

/// Longest wall-clock gap accepted per advance (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Converts elapsed wall-clock time into a whole number of fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    accumulator: f32,
}

impl FixedStep {
    /// `dt` is the tick period in seconds
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add `elapsed` seconds and return how many ticks are due
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }
}
