//! Viewport transforms and box helpers.

use crate::config::{MAX_ZOOM, MIN_ZOOM};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Viewport manages the pan/zoom transform between screen and canvas space.
///
/// The viewport never touches element data; it only converts coordinates.
/// `zoom` is kept inside `[min_zoom, max_zoom]`, so it is never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
    /// Current zoom level.
    zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Viewport {
    /// Create a viewport at the origin with 100% zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom zoom limits.
    ///
    /// Swapped limits are reordered; a non-finite or non-positive limit falls
    /// back to its default.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let mut viewport = Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        };
        viewport.zoom = viewport.clamp_zoom(1.0);
        viewport
    }

    /// Usable `(min, max)` zoom limits.
    fn limits(&self) -> (f64, f64) {
        let sane = |z: f64, fallback: f64| if z.is_finite() && z > 0.0 { z } else { fallback };
        let a = sane(self.min_zoom, MIN_ZOOM);
        let b = sane(self.max_zoom, MAX_ZOOM);
        (a.min(b), a.max(b))
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        let (min, max) = self.limits();
        zoom.clamp(min, max)
    }

    /// Current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = self.clamp_zoom(zoom);
        }
    }

    /// Canvas-to-screen transform, used for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        Point::new(
            canvas_point.x * self.zoom + self.offset.x,
            canvas_point.y * self.zoom + self.offset.y,
        )
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = self.zoom * factor;
        if !new_zoom.is_finite() {
            return;
        }
        let new_zoom = self.clamp_zoom(new_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        // Shift so canvas_point stays under screen_point
        let new_screen = self.canvas_to_screen(canvas_point);
        self.offset += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
    }

    /// Reset to the origin at 100% zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = self.clamp_zoom(1.0);
    }
}

/// Axis-aligned box in `{x, y, width, height}` form.
///
/// Resize math works on this form directly so the anchored edge is recomputed
/// from the original origin and size rather than from corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Box spanned by two corner points, in either order.
pub fn bounding_box_of(p1: Point, p2: Point) -> Rect {
    let x = p1.x.min(p2.x);
    let y = p1.y.min(p2.y);
    Rect::new(x, y, x + (p2.x - p1.x).abs(), y + (p2.y - p1.y).abs())
}

/// Point-in-box test including all four edges.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether `inner` lies entirely within `outer` on all four sides.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
