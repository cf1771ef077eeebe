//! Frame painting.

use crate::surface::Surface;
use inkboard_core::frame::{Frame, FrameItem};
use inkboard_core::shapes::Shape;
use inkboard_core::transform::{Handle, HandleKind};
use inkboard_core::Element;
use kurbo::{Affine, BezPath, Ellipse, Rect, Shape as KurboShape, Stroke};
use peniko::Color;

/// Colors and sizes for interaction chrome.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Selection highlight color.
    pub selection_color: Color,
    /// Marquee fill.
    pub marquee_fill: Color,
    /// Handle fill.
    pub handle_fill: Color,
    /// Handle size in screen pixels.
    pub handle_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            marquee_fill: Color::from_rgba8(59, 130, 246, 25),
            handle_fill: Color::from_rgba8(255, 255, 255, 255),
            handle_size: 10.0,
        }
    }
}

/// Paint a frame, bottom to top.
///
/// Chrome (outlines, handles, marquee) keeps a constant on-screen size by
/// scaling with the inverse zoom.
pub fn paint_frame(frame: &Frame<'_>, surface: &mut dyn Surface, theme: &Theme) {
    let zoom = frame.viewport.zoom();
    surface.push_transform(frame.viewport.transform());
    for item in &frame.items {
        match item {
            FrameItem::Element { element, opacity } => paint_element(surface, element, *opacity),
            FrameItem::SelectionOutline(rect) => {
                let stroke = Stroke::new(1.0 / zoom);
                surface.stroke(&rect_path(*rect), &stroke, theme.selection_color);
            }
            FrameItem::TransformOutline(rect) => {
                let dash = 4.0 / zoom;
                let stroke = Stroke::new(1.0 / zoom).with_dashes(0.0, [dash, dash]);
                surface.stroke(&rect_path(*rect), &stroke, theme.selection_color);
            }
            FrameItem::Handles(handles) => {
                for handle in handles {
                    paint_handle(surface, handle, theme, zoom);
                }
            }
            FrameItem::Marquee(rect) => {
                let path = rect_path(*rect);
                let dash = 4.0 / zoom;
                surface.fill(&path, theme.marquee_fill);
                surface.stroke(
                    &path,
                    &Stroke::new(1.0 / zoom).with_dashes(0.0, [dash, dash]),
                    theme.selection_color,
                );
            }
        }
    }
    surface.pop_transform();
}

fn paint_element(surface: &mut dyn Surface, element: &Element, opacity: f64) {
    let style = &element.style;
    let stroke_color = style.stroke_with_opacity(opacity);
    let rotation = element.shape.rotation_transform();
    let rotated = rotation != Affine::IDENTITY;
    if rotated {
        surface.push_transform(rotation);
    }

    match &element.shape {
        Shape::Text(text) => {
            surface.text(&text.content, kurbo::Point::new(text.x, text.y), text.font_size, stroke_color);
        }
        Shape::Unsupported => {
            log::trace!("Skipping unsupported element {}", element.id);
        }
        shape => {
            let path = shape.to_path();
            if matches!(shape, Shape::Rectangle(_) | Shape::Circle(_))
                && let Some(fill) = style.fill_with_opacity(opacity)
            {
                surface.fill(&path, fill);
            }
            surface.stroke(&path, &Stroke::new(style.stroke_width as f64), stroke_color);
        }
    }

    if rotated {
        surface.pop_transform();
    }
}

fn paint_handle(surface: &mut dyn Surface, handle: &Handle, theme: &Theme, zoom: f64) {
    let half = theme.handle_size / zoom / 2.0;
    let pos = handle.position;
    let path = match handle.kind {
        HandleKind::Rotate => Ellipse::new(pos, (half, half), 0.0).to_path(0.1),
        HandleKind::Corner(_) | HandleKind::Edge(_) => {
            Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half).to_path(0.1)
        }
    };
    surface.fill(&path, theme.handle_fill);
    surface.stroke(&path, &Stroke::new(1.5 / zoom), theme.selection_color);
}

fn rect_path(rect: Rect) -> BezPath {
    rect.to_path(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use inkboard_core::shapes::{Rectangle, Text};
    use inkboard_core::{ElementStyle, Interaction, SerializableColor};
    use inkboard_core::hooks::NoopHooks;
    use kurbo::Point;

    fn rect(id: &str, z: i64) -> Element {
        Element::with_id(id, Shape::Rectangle(Rectangle::new(0.0, 0.0, 100.0, 100.0)), ElementStyle::default())
            .with_z_index(z)
    }

    #[test]
    fn test_empty_frame_only_sets_viewport() {
        let ix = Interaction::default();
        let frame = ix.compose_frame(&[]);
        let mut surface = RecordingSurface::new();
        paint_frame(&frame, &mut surface, &Theme::default());
        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_fill_before_stroke() {
        let style = ElementStyle::default().with_fill(Some(SerializableColor::white()));
        let elements = vec![Element::with_id(
            "r",
            Shape::Rectangle(Rectangle::new(0.0, 0.0, 10.0, 10.0)),
            style,
        )];
        let ix = Interaction::default();
        let mut surface = RecordingSurface::new();
        paint_frame(&ix.compose_frame(&elements), &mut surface, &Theme::default());

        let kinds: Vec<&str> = surface.commands().iter().map(DrawCommand::name).collect();
        assert_eq!(kinds, vec!["push", "fill", "stroke", "pop"]);
    }

    #[test]
    fn test_rotated_element_wrapped_in_transform() {
        let mut shape = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        shape.angle = 45.0;
        let elements = vec![Element::with_id("r", Shape::Rectangle(shape), ElementStyle::default())];
        let ix = Interaction::default();
        let mut surface = RecordingSurface::new();
        paint_frame(&ix.compose_frame(&elements), &mut surface, &Theme::default());

        let kinds: Vec<&str> = surface.commands().iter().map(DrawCommand::name).collect();
        assert_eq!(kinds, vec!["push", "push", "stroke", "pop", "pop"]);
    }

    #[test]
    fn test_text_goes_to_text_call() {
        let elements = vec![Element::with_id(
            "t",
            Shape::Text(Text::new(5.0, 30.0, "hi".to_string(), 16.0)),
            ElementStyle::default(),
        )];
        let ix = Interaction::default();
        let mut surface = RecordingSurface::new();
        paint_frame(&ix.compose_frame(&elements), &mut surface, &Theme::default());
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { content, origin, .. } if content == "hi" && *origin == Point::new(5.0, 30.0)
        )));
    }

    #[test]
    fn test_selected_element_draws_handles() {
        let elements = vec![rect("a", 0)];
        let mut ix = Interaction::default();
        ix.pointer_down(&elements, Point::new(50.0, 50.0), &mut NoopHooks);
        ix.pointer_up(&elements, Point::new(50.0, 50.0), &mut NoopHooks);

        let mut surface = RecordingSurface::new();
        paint_frame(&ix.compose_frame(&elements), &mut surface, &Theme::default());
        // Element stroke, outline, then fill + stroke per handle
        let fills = surface.commands().iter().filter(|c| c.name() == "fill").count();
        assert_eq!(fills, 9);
    }

    #[test]
    fn test_paint_is_deterministic() {
        let elements = vec![rect("a", 1), rect("b", 0)];
        let ix = Interaction::default();
        let frame = ix.compose_frame(&elements);
        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        paint_frame(&frame, &mut first, &Theme::default());
        paint_frame(&frame, &mut second, &Theme::default());
        assert_eq!(first.commands(), second.commands());
    }
}
