//! Resize/rotate handles and the transform gesture.
//!
//! A transform always works from an immutable snapshot of the original box
//! plus the cumulative pointer delta since the gesture started, so repeated
//! pointer moves never accumulate rounding drift.

use crate::config::InteractionConfig;
use crate::element::{Element, ElementId};
use crate::geometry::Bounds;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Type of transform handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle, resizes two edges.
    Corner(Corner),
    /// Edge midpoint handle, resizes one edge.
    Edge(Edge),
    /// Rotation handle above the top edge.
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleKind {
    /// Hit-test order; earlier handles win when several are in range.
    pub const ALL: [HandleKind; 9] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Edge(Edge::Top),
        HandleKind::Edge(Edge::Right),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Edge(Edge::Left),
        HandleKind::Rotate,
    ];

    /// Compass name (`nw`, `ne`, ..., `rotate`).
    pub fn name(self) -> &'static str {
        match self {
            HandleKind::Corner(Corner::TopLeft) => "nw",
            HandleKind::Corner(Corner::TopRight) => "ne",
            HandleKind::Corner(Corner::BottomRight) => "se",
            HandleKind::Corner(Corner::BottomLeft) => "sw",
            HandleKind::Edge(Edge::Top) => "n",
            HandleKind::Edge(Edge::Right) => "e",
            HandleKind::Edge(Edge::Bottom) => "s",
            HandleKind::Edge(Edge::Left) => "w",
            HandleKind::Rotate => "rotate",
        }
    }

    /// Which edge each axis drags: (horizontal, vertical).
    fn axes(self) -> (AxisDrag, AxisDrag) {
        match self {
            HandleKind::Corner(Corner::TopLeft) => (AxisDrag::Start, AxisDrag::Start),
            HandleKind::Corner(Corner::TopRight) => (AxisDrag::End, AxisDrag::Start),
            HandleKind::Corner(Corner::BottomRight) => (AxisDrag::End, AxisDrag::End),
            HandleKind::Corner(Corner::BottomLeft) => (AxisDrag::Start, AxisDrag::End),
            HandleKind::Edge(Edge::Top) => (AxisDrag::Fixed, AxisDrag::Start),
            HandleKind::Edge(Edge::Right) => (AxisDrag::End, AxisDrag::Fixed),
            HandleKind::Edge(Edge::Bottom) => (AxisDrag::Fixed, AxisDrag::End),
            HandleKind::Edge(Edge::Left) => (AxisDrag::Start, AxisDrag::Fixed),
            HandleKind::Rotate => (AxisDrag::Fixed, AxisDrag::Fixed),
        }
    }
}

/// How a resize moves one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisDrag {
    /// Axis untouched.
    Fixed,
    /// The leading edge (left/top) moves; the trailing edge stays put.
    Start,
    /// The trailing edge (right/bottom) moves; the origin stays put.
    End,
}

/// A transform handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Euclidean distance test, inclusive of the radius.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= radius * radius
    }
}

/// The nine handles of a box, in hit-test order.
///
/// Handles ignore the element's rotation.
pub fn handles_for(bounds: Bounds, rotate_offset: f64) -> Vec<Handle> {
    let Bounds { x, y, width, height } = bounds;
    let center = bounds.center();
    HandleKind::ALL
        .iter()
        .map(|&kind| {
            let position = match kind {
                HandleKind::Corner(Corner::TopLeft) => Point::new(x, y),
                HandleKind::Corner(Corner::TopRight) => Point::new(x + width, y),
                HandleKind::Corner(Corner::BottomRight) => Point::new(x + width, y + height),
                HandleKind::Corner(Corner::BottomLeft) => Point::new(x, y + height),
                HandleKind::Edge(Edge::Top) => Point::new(center.x, y),
                HandleKind::Edge(Edge::Right) => Point::new(x + width, center.y),
                HandleKind::Edge(Edge::Bottom) => Point::new(center.x, y + height),
                HandleKind::Edge(Edge::Left) => Point::new(x, center.y),
                HandleKind::Rotate => Point::new(center.x, y - rotate_offset),
            };
            Handle::new(position, kind)
        })
        .collect()
}

/// First handle in enumeration order within `radius` of `point`.
pub fn hit_test_handles(bounds: Bounds, point: Point, radius: f64, rotate_offset: f64) -> Option<HandleKind> {
    handles_for(bounds, rotate_offset)
        .into_iter()
        .find(|h| h.hit_test(point, radius))
        .map(|h| h.kind)
}

/// The element a transform may act on: the sole selected element, if transformable.
pub fn transform_target<'a>(elements: &'a [Element], selected: &HashSet<ElementId>) -> Option<&'a Element> {
    if selected.len() != 1 {
        return None;
    }
    elements
        .iter()
        .find(|e| selected.contains(&e.id))
        .filter(|e| e.is_transformable())
}

fn resize_axis(origin: f64, size: f64, delta: f64, drag: AxisDrag, min_size: f64) -> (f64, f64) {
    match drag {
        AxisDrag::Fixed => (origin, size),
        AxisDrag::End => (origin, (size + delta).max(min_size)),
        AxisDrag::Start => {
            let new_size = (size - delta).max(min_size);
            (origin + size - new_size, new_size)
        }
    }
}

/// Origin of an axis whose size was derived from the other axis.
fn anchor_origin(origin: f64, size: f64, new_size: f64, drag: AxisDrag) -> f64 {
    match drag {
        AxisDrag::Start => origin + size - new_size,
        AxisDrag::End | AxisDrag::Fixed => origin,
    }
}

/// New box for dragging `handle` by the cumulative `delta`.
///
/// Each dimension is clamped to `min_size` before the anchored edge is
/// recomputed. With `lock_aspect`, the secondary dimension is derived from the
/// primary one through the original ratio and is not clamped again.
pub fn resize_bounds(original: Bounds, handle: HandleKind, delta: Vec2, lock_aspect: bool, min_size: f64) -> Bounds {
    let (x_drag, y_drag) = handle.axes();
    let (x, width) = resize_axis(original.x, original.width, delta.x, x_drag, min_size);
    let (y, height) = resize_axis(original.y, original.height, delta.y, y_drag, min_size);
    let resized = Bounds::new(x, y, width, height);

    let ratio = original.width / original.height;
    if !lock_aspect || handle == HandleKind::Rotate || !ratio.is_finite() || ratio <= 0.0 {
        return resized;
    }

    if x_drag == AxisDrag::Fixed {
        // Top/bottom edges drive the width
        let width = height * ratio;
        Bounds::new(anchor_origin(original.x, original.width, width, x_drag), y, width, height)
    } else {
        let height = width / ratio;
        Bounds::new(x, anchor_origin(original.y, original.height, height, y_drag), width, height)
    }
}

/// Angle from `center` to `point` in whole degrees, `[0, 360)`.
///
/// 0 points right and 90 points down (canvas y grows downward). A probe at the
/// center itself yields 0.
pub fn rotation_angle(center: Point, point: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let degrees = dy.atan2(dx).to_degrees();
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = ((degrees + 360.0) % 360.0).floor();
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// An in-progress resize or rotate of a single element.
#[derive(Debug, Clone)]
pub struct TransformState {
    handle: HandleKind,
    original: Bounds,
    preview: Element,
    anchor: Point,
    min_size: f64,
}

impl TransformState {
    /// Start a transform if `point` hits one of `target`'s handles.
    ///
    /// Returns `None` when the element is not transformable or no handle is hit.
    pub fn begin(target: &Element, point: Point, config: &InteractionConfig) -> Option<Self> {
        let frame = target.shape.as_transformable()?.frame();
        let handle = hit_test_handles(frame, point, config.handle_radius, config.rotate_handle_offset)?;
        Some(Self {
            handle,
            original: frame,
            preview: target.clone(),
            anchor: point,
            min_size: config.min_element_size,
        })
    }

    /// Recompute the preview for the current pointer position.
    pub fn update(&mut self, point: Point, lock_aspect: bool) -> &Element {
        let Some(target) = self.preview.shape.as_transformable_mut() else {
            return &self.preview;
        };
        match self.handle {
            HandleKind::Rotate => target.set_angle(rotation_angle(self.original.center(), point)),
            handle => {
                let delta = point - self.anchor;
                target.set_frame(resize_bounds(self.original, handle, delta, lock_aspect, self.min_size));
            }
        }
        &self.preview
    }

    pub fn handle(&self) -> HandleKind {
        self.handle
    }

    /// Box of the element when the gesture started.
    pub fn original(&self) -> Bounds {
        self.original
    }

    pub fn preview(&self) -> &Element {
        &self.preview
    }

    pub fn element_id(&self) -> &str {
        &self.preview.id
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// End the gesture, yielding the element to commit.
    pub fn finish(mut self) -> Element {
        self.preview.touch();
        self.preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_ELEMENT_SIZE;
    use crate::element::ElementStyle;
    use crate::shapes::{Circle, Line, Rectangle, Shape, Transformable};

    const SE: HandleKind = HandleKind::Corner(Corner::BottomRight);
    const NW: HandleKind = HandleKind::Corner(Corner::TopLeft);
    const NE: HandleKind = HandleKind::Corner(Corner::TopRight);
    const SW: HandleKind = HandleKind::Corner(Corner::BottomLeft);

    fn rect_element(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::with_id("r", Shape::Rectangle(Rectangle::new(x, y, w, h)), ElementStyle::default())
    }

    fn frame_of(element: &Element) -> Bounds {
        element.shape.as_transformable().unwrap().frame()
    }

    #[test]
    fn test_handle_positions_and_order() {
        let handles = handles_for(Bounds::new(0.0, 0.0, 100.0, 50.0), 30.0);
        let names: Vec<&str> = handles.iter().map(|h| h.kind.name()).collect();
        assert_eq!(names, vec!["nw", "ne", "se", "sw", "n", "e", "s", "w", "rotate"]);
        assert_eq!(handles[2].position, Point::new(100.0, 50.0));
        assert_eq!(handles[5].position, Point::new(100.0, 25.0));
        assert_eq!(handles[8].position, Point::new(50.0, -30.0));
    }

    #[test]
    fn test_handle_hit_prefers_enumeration_order() {
        // On a tiny box nw and n are both within radius; nw comes first
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(hit_test_handles(bounds, Point::new(4.0, 0.0), 8.0, 30.0), Some(NW));
        assert_eq!(hit_test_handles(bounds, Point::new(5.0, -30.0), 8.0, 30.0), Some(HandleKind::Rotate));
        assert_eq!(hit_test_handles(Bounds::new(0.0, 0.0, 100.0, 100.0), Point::new(50.0, 50.0), 8.0, 30.0), None);
    }

    #[test]
    fn test_se_resize() {
        let b = resize_bounds(Bounds::new(100.0, 100.0, 200.0, 150.0), SE, Vec2::new(20.0, 15.0), false, MIN_ELEMENT_SIZE);
        assert_eq!(b, Bounds::new(100.0, 100.0, 220.0, 165.0));
    }

    #[test]
    fn test_nw_resize_keeps_se_corner() {
        let original = Bounds::new(100.0, 100.0, 200.0, 150.0);
        let b = resize_bounds(original, NW, Vec2::new(30.0, -10.0), false, MIN_ELEMENT_SIZE);
        assert_eq!(b, Bounds::new(130.0, 90.0, 170.0, 160.0));
        assert!((b.x + b.width - 300.0).abs() < f64::EPSILON);
        assert!((b.y + b.height - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_corners() {
        let original = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let ne = resize_bounds(original, NE, Vec2::new(10.0, 20.0), false, MIN_ELEMENT_SIZE);
        assert_eq!(ne, Bounds::new(0.0, 20.0, 110.0, 80.0));
        let sw = resize_bounds(original, SW, Vec2::new(10.0, 20.0), false, MIN_ELEMENT_SIZE);
        assert_eq!(sw, Bounds::new(10.0, 0.0, 90.0, 120.0));
    }

    #[test]
    fn test_edges_move_one_axis() {
        let original = Bounds::new(10.0, 10.0, 100.0, 50.0);
        let delta = Vec2::new(7.0, 9.0);
        let n = resize_bounds(original, HandleKind::Edge(Edge::Top), delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(n, Bounds::new(10.0, 19.0, 100.0, 41.0));
        let e = resize_bounds(original, HandleKind::Edge(Edge::Right), delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(e, Bounds::new(10.0, 10.0, 107.0, 50.0));
        let s = resize_bounds(original, HandleKind::Edge(Edge::Bottom), delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(s, Bounds::new(10.0, 10.0, 100.0, 59.0));
        let w = resize_bounds(original, HandleKind::Edge(Edge::Left), delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(w, Bounds::new(17.0, 10.0, 93.0, 50.0));
    }

    #[test]
    fn test_resize_inverse_laws() {
        let original = Bounds::new(40.0, 60.0, 200.0, 100.0);
        let delta = Vec2::new(25.0, -30.0);
        let grown = resize_bounds(original, SE, delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(resize_bounds(grown, SE, -delta, false, MIN_ELEMENT_SIZE), original);

        let shrunk = resize_bounds(original, NW, delta, false, MIN_ELEMENT_SIZE);
        assert_eq!(resize_bounds(shrunk, NW, -delta, false, MIN_ELEMENT_SIZE), original);

        // se then nw with the same delta restores the size around a shifted origin
        let back = resize_bounds(grown, NW, delta, false, MIN_ELEMENT_SIZE);
        assert!((back.width - original.width).abs() < f64::EPSILON);
        assert!((back.height - original.height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aspect_lock_corner() {
        let original = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let b = resize_bounds(original, SE, Vec2::new(50.0, 10.0), true, MIN_ELEMENT_SIZE);
        assert!((b.width - 250.0).abs() < f64::EPSILON);
        assert!((b.height - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aspect_lock_nw_anchors_derived_axis() {
        let original = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let b = resize_bounds(original, NW, Vec2::new(-50.0, 0.0), true, MIN_ELEMENT_SIZE);
        assert_eq!(b, Bounds::new(-50.0, -25.0, 250.0, 125.0));
    }

    #[test]
    fn test_aspect_lock_edges() {
        let original = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let e = resize_bounds(original, HandleKind::Edge(Edge::Right), Vec2::new(100.0, 0.0), true, MIN_ELEMENT_SIZE);
        assert_eq!(e, Bounds::new(0.0, 0.0, 300.0, 150.0));
        let s = resize_bounds(original, HandleKind::Edge(Edge::Bottom), Vec2::new(0.0, 50.0), true, MIN_ELEMENT_SIZE);
        assert_eq!(s, Bounds::new(0.0, 0.0, 300.0, 150.0));
    }

    #[test]
    fn test_aspect_lock_may_undercut_min_on_derived_axis() {
        let original = Bounds::new(0.0, 0.0, 400.0, 20.0);
        let b = resize_bounds(original, SE, Vec2::new(-390.0, 0.0), true, MIN_ELEMENT_SIZE);
        assert!((b.width - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
        assert!((b.height - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aspect_lock_ignored_for_flat_box() {
        let original = Bounds::new(0.0, 0.0, 100.0, 0.0);
        let b = resize_bounds(original, SE, Vec2::new(10.0, 10.0), true, MIN_ELEMENT_SIZE);
        assert_eq!(b, Bounds::new(0.0, 0.0, 110.0, 10.0));
    }

    #[test]
    fn test_min_size_clamp() {
        let original = Bounds::new(0.0, 0.0, 100.0, 100.0);
        for handle in HandleKind::ALL {
            if handle == HandleKind::Rotate {
                continue;
            }
            let b = resize_bounds(original, handle, Vec2::new(500.0, 500.0), false, MIN_ELEMENT_SIZE);
            let c = resize_bounds(original, handle, Vec2::new(-500.0, -500.0), false, MIN_ELEMENT_SIZE);
            for r in [b, c] {
                assert!(r.width >= MIN_ELEMENT_SIZE && r.height >= MIN_ELEMENT_SIZE, "{}", handle.name());
                assert!(!r.width.is_nan() && !r.height.is_nan());
            }
        }
        let nw = resize_bounds(original, NW, Vec2::new(500.0, 500.0), false, MIN_ELEMENT_SIZE);
        assert_eq!(nw, Bounds::new(90.0, 90.0, MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
    }

    #[test]
    fn test_rotation_normalization() {
        let center = Point::new(150.0, 150.0);
        assert!((rotation_angle(center, Point::new(200.0, 150.0))).abs() < f64::EPSILON);
        assert!((rotation_angle(center, Point::new(150.0, 200.0)) - 90.0).abs() < f64::EPSILON);
        assert!((rotation_angle(center, Point::new(100.0, 150.0)) - 180.0).abs() < f64::EPSILON);
        assert!((rotation_angle(center, Point::new(150.0, 100.0)) - 270.0).abs() < f64::EPSILON);
        assert!((rotation_angle(center, center)).abs() < f64::EPSILON);
        assert!((rotation_angle(center, Point::new(200.0, 149.999)) - 359.0).abs() < f64::EPSILON);

        for i in 0..72 {
            let t = i as f64 * 0.37;
            let angle = rotation_angle(center, Point::new(150.0 + t.cos() * 40.0, 150.0 + t.sin() * 40.0));
            assert!((0.0..360.0).contains(&angle));
            assert!((angle - angle.floor()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_transform_target_requires_single_transformable() {
        let elements = vec![
            rect_element(0.0, 0.0, 10.0, 10.0),
            Element::with_id("l", Shape::Line(Line::new(0.0, 0.0, 5.0, 5.0)), ElementStyle::default()),
        ];
        let one: HashSet<ElementId> = ["r".to_string()].into_iter().collect();
        assert!(transform_target(&elements, &one).is_some());
        let line: HashSet<ElementId> = ["l".to_string()].into_iter().collect();
        assert!(transform_target(&elements, &line).is_none());
        let both: HashSet<ElementId> = ["r".to_string(), "l".to_string()].into_iter().collect();
        assert!(transform_target(&elements, &both).is_none());
    }

    #[test]
    fn test_transform_state_resize_uses_cumulative_delta() {
        let element = rect_element(100.0, 100.0, 200.0, 150.0);
        let config = InteractionConfig::default();
        let mut state = TransformState::begin(&element, Point::new(300.0, 250.0), &config).unwrap();
        assert_eq!(state.handle(), SE);

        state.update(Point::new(310.0, 260.0), false);
        state.update(Point::new(320.0, 265.0), false);
        // Preview only; the source element is untouched
        assert_eq!(frame_of(&element), Bounds::new(100.0, 100.0, 200.0, 150.0));

        let done = state.finish();
        assert_eq!(frame_of(&done), Bounds::new(100.0, 100.0, 220.0, 165.0));
        assert_eq!(done.id, "r");
    }

    #[test]
    fn test_transform_state_rotate_keeps_frame() {
        let element = Element::with_id(
            "c",
            Shape::Circle(Circle::new(100.0, 100.0, 100.0, 100.0)),
            ElementStyle::default(),
        );
        let config = InteractionConfig::default();
        let mut state = TransformState::begin(&element, Point::new(150.0, 70.0), &config).unwrap();
        assert_eq!(state.handle(), HandleKind::Rotate);

        let preview = state.update(Point::new(150.0, 200.0), false);
        assert!((preview.shape.angle() - 90.0).abs() < f64::EPSILON);
        assert_eq!(frame_of(preview), Bounds::new(100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_transform_state_misses() {
        let element = rect_element(0.0, 0.0, 100.0, 100.0);
        let config = InteractionConfig::default();
        assert!(TransformState::begin(&element, Point::new(50.0, 50.0), &config).is_none());

        let line = Element::with_id("l", Shape::Line(Line::new(0.0, 0.0, 100.0, 100.0)), ElementStyle::default());
        assert!(TransformState::begin(&line, Point::new(0.0, 0.0), &config).is_none());
    }

    #[test]
    fn test_resize_ignores_angle() {
        let mut rect = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        rect.set_angle(45.0);
        let element = Element::with_id("r", Shape::Rectangle(rect), ElementStyle::default());
        let config = InteractionConfig::default();
        let mut state = TransformState::begin(&element, Point::new(100.0, 100.0), &config).unwrap();
        let preview = state.update(Point::new(120.0, 110.0), false);
        assert_eq!(frame_of(preview), Bounds::new(0.0, 0.0, 120.0, 110.0));
        assert!((preview.shape.angle() - 45.0).abs() < f64::EPSILON);
    }
}
