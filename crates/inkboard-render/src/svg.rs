//! SVG export surface.

use crate::surface::{RenderError, RenderResult, Surface};
use kurbo::{Affine, BezPath, Point, Size, Stroke};
use peniko::Color;
use std::path::Path as FsPath;
use svg::Document;
use svg::Node;
use svg::node::element::{Group, Path, Rectangle, Text};

/// Surface that builds an SVG document.
///
/// Transforms map onto nested `<g transform="matrix(..)">` groups, so path
/// data and stroke widths stay in the caller's coordinate space.
#[derive(Debug)]
pub struct SvgSurface {
    size: Size,
    background: Option<Color>,
    root: Vec<Box<dyn Node>>,
    groups: Vec<Group>,
}

impl SvgSurface {
    /// Create a surface of the given size in screen pixels.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            root: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Close the document. Fails if a transform was left open.
    pub fn into_document(self) -> RenderResult<Document> {
        if !self.groups.is_empty() {
            return Err(RenderError::UnbalancedTransform);
        }
        let (w, h) = (self.size.width, self.size.height);
        let mut document = Document::new()
            .set("width", w)
            .set("height", h)
            .set("viewBox", format!("0 0 {w} {h}"));
        if let Some(background) = self.background {
            document.append(paint(Rectangle::new().set("width", w).set("height", h), "fill", background));
        }
        for node in self.root {
            document.append(node);
        }
        Ok(document)
    }

    /// Close the document and serialize it.
    pub fn finish(self) -> RenderResult<String> {
        Ok(self.into_document()?.to_string())
    }

    /// Close the document and write it to `path`.
    pub fn write_to(self, path: impl AsRef<FsPath>) -> RenderResult<()> {
        let path = path.as_ref();
        let document = self.into_document()?;
        svg::save(path, &document)?;
        log::info!("Wrote SVG to {}", path.display());
        Ok(())
    }

    fn append<T: Node + 'static>(&mut self, node: T) {
        match self.groups.last_mut() {
            Some(group) => group.append(node),
            None => self.root.push(Box::new(node)),
        }
    }
}

/// Set a paint attribute, with a separate opacity when not opaque.
fn paint<T: Node>(mut node: T, attr: &str, color: Color) -> T {
    let rgba = color.to_rgba8();
    node.assign(attr, format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b));
    if rgba.a != 255 {
        let opacity = (rgba.a as f64 / 255.0 * 1000.0).round() / 1000.0;
        node.assign(format!("{attr}-opacity"), opacity);
    }
    node
}

impl Surface for SvgSurface {
    fn push_transform(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.groups
            .push(Group::new().set("transform", format!("matrix({a} {b} {c} {d} {e} {f})")));
    }

    fn pop_transform(&mut self) {
        let Some(group) = self.groups.pop() else {
            log::warn!("pop_transform without matching push");
            return;
        };
        self.append(group);
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        let node = paint(Path::new().set("d", path.to_svg()), "fill", color);
        self.append(node);
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        let mut node = Path::new()
            .set("d", path.to_svg())
            .set("fill", "none")
            .set("stroke-width", style.width)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");
        if !style.dash_pattern.is_empty() {
            let dashes: Vec<String> = style.dash_pattern.iter().map(|d| d.to_string()).collect();
            node = node.set("stroke-dasharray", dashes.join(" "));
        }
        let node = paint(node, "stroke", color);
        self.append(node);
    }

    fn text(&mut self, content: &str, origin: Point, font_size: f64, color: Color) {
        let node = Text::new(content)
            .set("x", origin.x)
            .set("y", origin.y)
            .set("font-size", font_size)
            .set("font-family", "sans-serif");
        let node = paint(node, "fill", color);
        self.append(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape as KurboShape};

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new(Size::new(200.0, 100.0)).finish().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transform_groups_nest() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        surface.push_transform(Affine::scale(2.0));
        surface.push_transform(Affine::translate((3.0, 4.0)));
        surface.fill(&Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1), Color::from_rgba8(255, 0, 0, 255));
        surface.pop_transform();
        surface.pop_transform();
        let svg = surface.finish().unwrap();

        let outer = svg.find("matrix(2 0 0 2 0 0)").unwrap();
        let inner = svg.find("matrix(1 0 0 1 3 4)").unwrap();
        let fill = svg.find("fill=\"rgb(255,0,0)\"").unwrap();
        assert!(outer < inner && inner < fill);
        assert_eq!(svg.matches("</g>").count(), 2);
    }

    #[test]
    fn test_unbalanced_push_is_an_error() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        surface.push_transform(Affine::IDENTITY);
        assert!(matches!(surface.finish(), Err(RenderError::UnbalancedTransform)));
    }

    #[test]
    fn test_stray_pop_is_ignored() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        surface.pop_transform();
        assert!(surface.finish().is_ok());
    }

    #[test]
    fn test_text_is_escaped() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        surface.text("a < b & c", Point::new(1.0, 2.0), 12.0, Color::from_rgba8(0, 0, 0, 128));
        let svg = surface.finish().unwrap();
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains("fill-opacity=\"0.502\""));
    }

    #[test]
    fn test_background_comes_first() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0)).with_background(Color::from_rgba8(1, 2, 3, 255));
        surface.fill(&Rect::new(0.0, 0.0, 5.0, 5.0).to_path(0.1), Color::from_rgba8(9, 9, 9, 255));
        let svg = surface.finish().unwrap();
        let background = svg.find("rgb(1,2,3)").unwrap();
        let path = svg.find("<path").unwrap();
        assert!(background < path);
    }

    #[test]
    fn test_dashed_stroke() {
        let mut surface = SvgSurface::new(Size::new(10.0, 10.0));
        let stroke = Stroke::new(1.0).with_dashes(0.0, [4.0, 4.0]);
        surface.stroke(&Rect::new(0.0, 0.0, 5.0, 5.0).to_path(0.1), &stroke, Color::from_rgba8(0, 0, 255, 255));
        let svg = surface.finish().unwrap();
        assert!(svg.contains("stroke-dasharray=\"4 4\""));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke=\"rgb(0,0,255)\""));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        SvgSurface::new(Size::new(10.0, 10.0)).write_to(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
