//! Elements: a shape plus identity, style, paint order and timestamps.

use crate::shapes::{Shape, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of an element within a board.
pub type ElementId = String;

/// Thinnest allowed stroke.
pub const MIN_STROKE_WIDTH: u32 = 1;
/// Thickest allowed stroke.
pub const MAX_STROKE_WIDTH: u32 = 32;

/// Reasons an element cannot be committed to a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error("Freehand stroke needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("Negative size {width}x{height}")]
    NegativeSize { width: f64, height: f64 },
    #[error("Zero-sized {0}")]
    Degenerate(&'static str),
    #[error("Non-finite coordinate in element {0}")]
    NonFinite(ElementId),
    #[error("Unsupported element kind")]
    Unsupported,
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Scale the alpha channel by `opacity` (0.0 to 1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint properties of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
    /// Stroke width, kept within `MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH`.
    pub stroke_width: u32,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: None,
            stroke_width: 2,
            opacity: 1.0,
        }
    }
}

impl ElementStyle {
    /// Set the stroke width, clamped to the allowed range.
    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        self
    }

    /// Set the opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
        self
    }

    pub fn with_fill(mut self, fill: Option<SerializableColor>) -> Self {
        self.fill_color = fill;
        self
    }

    /// Stroke color with the element opacity and an extra multiplier applied.
    pub fn stroke_with_opacity(&self, extra: f64) -> Color {
        self.stroke_color.with_opacity(self.opacity * extra).into()
    }

    /// Fill color with the element opacity and an extra multiplier applied.
    pub fn fill_with_opacity(&self, extra: f64) -> Option<Color> {
        self.fill_color.map(|c| c.with_opacity(self.opacity * extra).into())
    }

    /// Clamp out-of-range values coming from the outside world.
    pub fn sanitized(self) -> Self {
        let width = self.stroke_width;
        let opacity = self.opacity;
        self.with_stroke_width(width).with_opacity(opacity)
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A drawn object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub shape: Shape,
    #[serde(default)]
    pub style: ElementStyle,
    /// Paint order, ascending. Not necessarily contiguous.
    #[serde(default)]
    pub z_index: i64,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

impl Element {
    /// Create an element with a fresh id and current timestamps.
    pub fn new(shape: Shape, style: ElementStyle) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), shape, style)
    }

    /// Create an element with a known id.
    pub fn with_id(id: impl Into<ElementId>, shape: Shape, style: ElementStyle) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            shape,
            style,
            z_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Mark the element as modified now.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at);
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    pub fn hit_test(&self, point: Point, padding: f64) -> bool {
        self.shape.hit_test(point, padding)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    /// Only rectangles and circles can be resized and rotated.
    pub fn is_transformable(&self) -> bool {
        self.shape.is_transformable()
    }

    /// Check the invariants a committed element must satisfy.
    pub fn validate(&self) -> Result<(), ElementError> {
        if !self.bounds().is_finite() {
            return Err(ElementError::NonFinite(self.id.clone()));
        }
        match &self.shape {
            Shape::Rectangle(r) if r.width < 0.0 || r.height < 0.0 => Err(ElementError::NegativeSize {
                width: r.width,
                height: r.height,
            }),
            Shape::Circle(c) if c.width < 0.0 || c.height < 0.0 => Err(ElementError::NegativeSize {
                width: c.width,
                height: c.height,
            }),
            Shape::Freehand(f) if f.points.len() < 2 => Err(ElementError::TooFewPoints(f.points.len())),
            Shape::Unsupported => Err(ElementError::Unsupported),
            _ => Ok(()),
        }
    }
}
