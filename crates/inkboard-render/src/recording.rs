//! Display-list surface.

use crate::surface::Surface;
use inkboard_core::SerializableColor;
use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Color;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushTransform(Affine),
    PopTransform,
    Fill {
        path: BezPath,
        color: SerializableColor,
    },
    Stroke {
        path: BezPath,
        width: f64,
        dashed: bool,
        color: SerializableColor,
    },
    Text {
        content: String,
        origin: Point,
        font_size: f64,
        color: SerializableColor,
    },
}

impl DrawCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::PushTransform(_) => "push",
            DrawCommand::PopTransform => "pop",
            DrawCommand::Fill { .. } => "fill",
            DrawCommand::Stroke { .. } => "stroke",
            DrawCommand::Text { .. } => "text",
        }
    }
}

/// Surface that records every call, for tests and headless inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Transforms pushed and not yet popped.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn push_transform(&mut self, transform: Affine) {
        self.depth += 1;
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopTransform);
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color: color.into(),
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            width: style.width,
            dashed: !style.dash_pattern.is_empty(),
            color: color.into(),
        });
    }

    fn text(&mut self, content: &str, origin: Point, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            content: content.to_string(),
            origin,
            font_size,
            color: color.into(),
        });
    }
}
