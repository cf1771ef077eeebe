//! Tool system for the whiteboard.

use crate::element::{Element, ElementStyle};
use crate::geometry::bounding_box_of;
use crate::shapes::{Arrow, Circle, Freehand, Line, Rectangle, Shape, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Freehand,
}

impl ToolKind {
    /// Tools that create an element from a press-drag-release.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow | ToolKind::Freehand
        )
    }
}

/// Style applied to newly drawn elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingStyle {
    pub style: ElementStyle,
    pub font_size: f64,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            style: ElementStyle::default(),
            font_size: Text::DEFAULT_FONT_SIZE,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A drawing is in progress.
    Active {
        start: Point,
        current: Point,
        /// Element being drawn; `None` for tools that draw nothing.
        preview: Option<Element>,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Current style to apply to new elements.
    pub current_style: DrawingStyle,
    /// Where the next text element goes, set by a text-tool click.
    text_anchor: Option<Point>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a tool interaction.
    pub fn begin(&mut self, point: Point) {
        let preview = self
            .shape_between(point, point)
            .map(|shape| Element::new(shape, self.current_style.style.clone()));
        self.state = ToolState::Active {
            start: point,
            current: point,
            preview,
        };
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) {
        let tool = self.current_tool;
        let ToolState::Active { start, current, preview } = &mut self.state else {
            return;
        };
        *current = point;
        let Some(element) = preview else {
            return;
        };
        if let Shape::Freehand(stroke) = &mut element.shape {
            stroke.add_point(point);
        } else if let Some(next) = shape_for(tool, *start, point) {
            element.shape = next;
        }
    }

    /// End the current interaction and return the drawn element, if any.
    ///
    /// Zero-area boxes, zero-length lines and single-point strokes are dropped.
    /// A text-tool release records the text anchor instead.
    pub fn end(&mut self, point: Point) -> Option<Element> {
        self.update(point);
        let state = std::mem::take(&mut self.state);
        let ToolState::Active { preview, .. } = state else {
            return None;
        };
        if self.current_tool == ToolKind::Text {
            self.text_anchor = Some(point);
            log::debug!("Text anchor at ({}, {})", point.x, point.y);
            return None;
        }
        let mut element = preview?;
        if is_degenerate(&element.shape) {
            log::debug!("Discarding degenerate {}", element.shape.kind_name());
            return None;
        }
        element.touch();
        Some(element)
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.text_anchor = None;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// The element being drawn.
    pub fn preview_element(&self) -> Option<&Element> {
        match &self.state {
            ToolState::Active { preview, .. } => preview.as_ref(),
            ToolState::Idle => None,
        }
    }

    /// Consume the pending text anchor.
    pub fn take_text_anchor(&mut self) -> Option<Point> {
        self.text_anchor.take()
    }

    pub fn text_anchor(&self) -> Option<Point> {
        self.text_anchor
    }

    fn shape_between(&self, start: Point, end: Point) -> Option<Shape> {
        shape_for(self.current_tool, start, end)
    }
}

fn shape_for(tool: ToolKind, start: Point, end: Point) -> Option<Shape> {
    match tool {
        ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::from_rect(bounding_box_of(start, end)))),
        ToolKind::Circle => Some(Shape::Circle(Circle::from_rect(bounding_box_of(start, end)))),
        ToolKind::Line => Some(Shape::Line(Line::between(start, end))),
        ToolKind::Arrow => Some(Shape::Arrow(Arrow::between(start, end))),
        ToolKind::Freehand => {
            let mut stroke = Freehand::new();
            stroke.add_point(start);
            stroke.add_point(end);
            Some(Shape::Freehand(stroke))
        }
        ToolKind::Select | ToolKind::Pan | ToolKind::Eraser | ToolKind::Text => None,
    }
}

fn is_degenerate(shape: &Shape) -> bool {
    match shape {
        Shape::Rectangle(r) => r.width <= 0.0 || r.height <= 0.0,
        Shape::Circle(c) => c.width <= 0.0 || c.height <= 0.0,
        Shape::Line(l) => l.width == 0.0 && l.height == 0.0,
        Shape::Arrow(a) => a.width == 0.0 && a.height == 0.0,
        Shape::Freehand(f) => f.len() < 2,
        Shape::Text(t) => t.content.trim().is_empty(),
        Shape::Unsupported => true,
    }
}
