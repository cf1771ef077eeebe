//! Arrow shape.

use super::{ShapeTrait, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Length of the arrowhead, also used as its hit radius.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;

/// A line with an arrowhead at its end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
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

impl Arrow {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create an arrow pointing from `start` to `end`.
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x - start.x, end.y - start.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Unit direction of the shaft; points right when the arrow has no length.
    pub fn direction(&self) -> Vec2 {
        let len = self.width.hypot(self.height);
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(self.width / len, self.height / len)
        }
    }

    /// Tip and the two barb ends of the head.
    pub fn head_points(&self) -> [Point; 3] {
        let tip = self.end();
        let dir = self.direction();
        let perp = Vec2::new(-dir.y, dir.x);
        let back = tip - dir * ARROW_HEAD_LENGTH;
        [
            tip,
            back + perp * (ARROW_HEAD_LENGTH * 0.5),
            back - perp * (ARROW_HEAD_LENGTH * 0.5),
        ]
    }

    /// Centroid of the arrowhead triangle.
    pub fn head_centroid(&self) -> Point {
        let [tip, left, right] = self.head_points();
        Point::new((tip.x + left.x + right.x) / 3.0, (tip.y + left.y + right.y) / 3.0)
    }
}

impl ShapeTrait for Arrow {
    fn bounds(&self) -> Rect {
        let [tip, left, right] = self.head_points();
        Rect::from_points(self.start(), tip)
            .union_pt(left)
            .union_pt(right)
    }

    fn hit_test(&self, point: Point, padding: f64) -> bool {
        if point_to_segment_dist(point, self.start(), self.end()) <= padding {
            return true;
        }
        point.distance(self.head_centroid()) <= padding + ARROW_HEAD_LENGTH
    }

    fn to_path(&self) -> BezPath {
        let [tip, left, right] = self.head_points();
        let mut path = BezPath::new();
        path.move_to(self.start());
        path.line_to(tip);
        path.move_to(left);
        path.line_to(tip);
        path.line_to(right);
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}
