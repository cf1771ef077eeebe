//! Line shape.

use super::{ShapeTrait, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight segment stored as a start point plus a signed delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Signed horizontal extent (end.x - start.x).
    #[serde(default)]
    pub width: f64,
    /// Signed vertical extent (end.y - start.y).
    #[serde(default)]
    pub height: f64,
}

impl Line {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a line between two points.
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x - start.x, end.y - start.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn length(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

impl ShapeTrait for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    fn hit_test(&self, point: Point, padding: f64) -> bool {
        point_to_segment_dist(point, self.start(), self.end()) <= padding
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        path.line_to(self.end());
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_keeps_direction() {
        let line = Line::between(Point::new(100.0, 100.0), Point::new(40.0, 130.0));
        assert!((line.width + 60.0).abs() < f64::EPSILON);
        assert!((line.height - 30.0).abs() < f64::EPSILON);
        assert_eq!(line.end(), Point::new(40.0, 130.0));
    }

    #[test]
    fn test_hit_test_on_line() {
        let line = Line::new(0.0, 0.0, 100.0, 0.0);
        assert!(line.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(line.hit_test(Point::new(50.0, 5.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 6.0), 5.0));
        // Beyond the end the distance is measured to the endpoint
        assert!(!line.hit_test(Point::new(106.0, 0.0), 5.0));
    }

    #[test]
    fn test_bounds_of_reversed_line() {
        let line = Line::new(50.0, 80.0, -40.0, -60.0);
        assert_eq!(line.bounds(), Rect::new(10.0, 20.0, 50.0, 80.0));
    }
}
