//! Text shape.

use super::ShapeTrait;
use crate::geometry::contains_inclusive;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Approximate glyph advance as a fraction of the font size.
pub const TEXT_GLYPH_WIDTH: f64 = 0.6;

/// A single run of text. `(x, y)` is the baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

fn default_font_size() -> f64 {
    Text::DEFAULT_FONT_SIZE
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    pub fn new(x: f64, y: f64, content: String, font_size: f64) -> Self {
        Self {
            x,
            y,
            content,
            font_size,
        }
    }

    /// Estimated advance width; the real layout belongs to the rendering surface.
    pub fn approximate_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size * TEXT_GLYPH_WIDTH
    }
}

impl ShapeTrait for Text {
    /// Box from the glyph-width estimate, sitting on the baseline.
    fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.y - self.font_size,
            self.x + self.approximate_width(),
            self.y,
        )
    }

    fn hit_test(&self, point: Point, padding: f64) -> bool {
        contains_inclusive(self.bounds().inflate(padding, padding), point)
    }

    /// Text has no outline; surfaces draw the glyphs themselves.
    fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}
