//! Shape geometry for each element kind.

mod arrow;
mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod text;

pub use arrow::{ARROW_HEAD_LENGTH, Arrow};
pub use ellipse::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::{TEXT_GLYPH_WIDTH, Text};

use crate::geometry::Bounds;
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Common geometry of every shape kind.
pub trait ShapeTrait {
    /// Bounding box in canvas coordinates (ignores rotation).
    fn bounds(&self) -> Rect;

    /// Check if a canvas point hits this shape.
    fn hit_test(&self, point: Point, padding: f64) -> bool;

    /// Outline for rendering, before rotation is applied.
    fn to_path(&self) -> BezPath;

    /// Move the shape by a canvas delta.
    fn translate(&mut self, delta: Vec2);
}

/// Box-bearing shapes that can be resized and rotated.
pub trait Transformable {
    /// Current box.
    fn frame(&self) -> Bounds;

    /// Replace the box, keeping the angle.
    fn set_frame(&mut self, frame: Bounds);

    /// Rotation in degrees, `[0, 360)`.
    fn angle(&self) -> f64;

    fn set_angle(&mut self, degrees: f64);
}

/// All element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Arrow(Arrow),
    Text(Text),
    Freehand(Freehand),
    /// A kind this build does not know. Never hit, never painted.
    #[serde(other)]
    Unsupported,
}

impl Shape {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
            Shape::Arrow(_) => "arrow",
            Shape::Text(_) => "text",
            Shape::Freehand(_) => "freehand",
            Shape::Unsupported => "unsupported",
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
            Shape::Unsupported => Rect::ZERO,
        }
    }

    pub fn hit_test(&self, point: Point, padding: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, padding),
            Shape::Circle(s) => s.hit_test(point, padding),
            Shape::Line(s) => s.hit_test(point, padding),
            Shape::Arrow(s) => s.hit_test(point, padding),
            Shape::Text(s) => s.hit_test(point, padding),
            Shape::Freehand(s) => s.hit_test(point, padding),
            Shape::Unsupported => false,
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Arrow(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
            Shape::Freehand(s) => s.to_path(),
            Shape::Unsupported => BezPath::new(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
            Shape::Arrow(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
            Shape::Freehand(s) => s.translate(delta),
            Shape::Unsupported => {}
        }
    }

    /// Top-left anchor for boxes and text, start point for lines, arrows and strokes.
    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => Point::new(s.x, s.y),
            Shape::Circle(s) => Point::new(s.x, s.y),
            Shape::Line(s) => s.start(),
            Shape::Arrow(s) => s.start(),
            Shape::Text(s) => Point::new(s.x, s.y),
            Shape::Freehand(s) => s.points.first().copied().unwrap_or(Point::ZERO),
            Shape::Unsupported => Point::ZERO,
        }
    }

    pub fn as_transformable(&self) -> Option<&dyn Transformable> {
        match self {
            Shape::Rectangle(s) => Some(s),
            Shape::Circle(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_transformable_mut(&mut self) -> Option<&mut dyn Transformable> {
        match self {
            Shape::Rectangle(s) => Some(s),
            Shape::Circle(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Shape::Unsupported)
    }

    pub fn is_transformable(&self) -> bool {
        self.as_transformable().is_some()
    }

    /// Rotation in degrees (0 for kinds that cannot rotate).
    pub fn angle(&self) -> f64 {
        self.as_transformable().map_or(0.0, |t| t.angle())
    }

    /// Rotation about the box center, for rendering.
    pub fn rotation_transform(&self) -> Affine {
        match self.as_transformable() {
            Some(t) if t.angle().abs() > f64::EPSILON => {
                Affine::rotate_about(t.angle().to_radians(), t.frame().center())
            }
            _ => Affine::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_only_boxes_are_transformable() {
        assert!(Shape::Rectangle(Rectangle::new(0.0, 0.0, 1.0, 1.0)).is_transformable());
        assert!(Shape::Circle(Circle::new(0.0, 0.0, 1.0, 1.0)).is_transformable());
        assert!(!Shape::Line(Line::new(0.0, 0.0, 1.0, 1.0)).is_transformable());
        assert!(!Shape::Arrow(Arrow::new(0.0, 0.0, 1.0, 1.0)).is_transformable());
        assert!(!Shape::Text(Text::new(0.0, 0.0, "hi".to_string(), 16.0)).is_transformable());
        assert!(!Shape::Freehand(Freehand::new()).is_transformable());
        assert!(!Shape::Unsupported.is_transformable());
    }

    #[test]
    fn test_rotation_transform_about_center() {
        let mut rect = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        rect.angle = 90.0;
        let shape = Shape::Rectangle(rect);
        let moved = shape.rotation_transform() * Point::new(0.0, 0.0);
        assert!((moved.x - 100.0).abs() < 1e-9);
        assert!((moved.y - 0.0).abs() < 1e-9);
    }
}
