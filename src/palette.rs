//! Fill colors offered by the color picker

use serde::{Deserialize, Serialize};

/// Symbolic fill identifier for a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
}

impl FillColor {
    /// Palette shown by the picker, in display order
    pub const PALETTE: [FillColor; 4] = [
        FillColor::Red,
        FillColor::Green,
        FillColor::Blue,
        FillColor::Yellow,
    ];

    /// CSS color keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            FillColor::Red => "red",
            FillColor::Green => "green",
            FillColor::Blue => "blue",
            FillColor::Yellow => "yellow",
        }
    }

    /// Linear RGBA matching the CSS keyword (green is CSS `#008000`)
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            FillColor::Red => [1.0, 0.0, 0.0, 1.0],
            FillColor::Green => [0.0, 0.216, 0.0, 1.0],
            FillColor::Blue => [0.0, 0.0, 1.0, 1.0],
            FillColor::Yellow => [1.0, 1.0, 0.0, 1.0],
        }
    }
}

impl std::fmt::Display for FillColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
