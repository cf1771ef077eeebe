//! Circle (ellipse) shape.

use super::{ShapeTrait, Transformable};
use crate::geometry::Bounds;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in a box anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees around the center.
    #[serde(default)]
    pub angle: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            angle: 0.0,
        }
    }

    /// Create a circle inscribed in a box.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl ShapeTrait for Circle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Filled test against the ellipse equation; padding does not apply.
    fn hit_test(&self, point: Point, _padding: f64) -> bool {
        let radii = self.radii();
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return false;
        }
        let center = self.center();
        let dx = (point.x - center.x) / radii.x;
        let dy = (point.y - center.y) / radii.y;
        dx * dx + dy * dy <= 1.0
    }

    fn to_path(&self) -> BezPath {
        KurboEllipse::from_rect(self.bounds()).to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

impl Transformable for Circle {
    fn frame(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn set_frame(&mut self, frame: Bounds) {
        self.x = frame.x;
        self.y = frame.y;
        self.width = frame.width;
        self.height = frame.height;
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }
}
