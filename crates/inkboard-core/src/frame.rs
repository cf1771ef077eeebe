//! Display list for one screen refresh.

use crate::element::Element;
use crate::geometry::Viewport;
use crate::transform::Handle;
use kurbo::Rect;

/// One thing to paint, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameItem<'a> {
    /// An element with an extra opacity multiplier.
    Element { element: &'a Element, opacity: f64 },
    /// Highlight around a selected element.
    SelectionOutline(Rect),
    /// Outline of the live transform preview.
    TransformOutline(Rect),
    /// Resize/rotate handles of the single transformable selection.
    Handles(Vec<Handle>),
    /// Marquee while box-selecting.
    Marquee(Rect),
}

/// Everything the screen should show, in paint order.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub viewport: Viewport,
    pub items: Vec<FrameItem<'a>>,
}

impl<'a> Frame<'a> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: FrameItem<'a>) {
        self.items.push(item);
    }

    pub fn push_element(&mut self, element: &'a Element, opacity: f64) {
        self.items.push(FrameItem::Element { element, opacity });
    }

    /// Painted elements with their opacity, bottom to top.
    pub fn elements(&self) -> impl Iterator<Item = (&'a Element, f64)> + '_ {
        self.items.iter().filter_map(|item| match item {
            FrameItem::Element { element, opacity } => Some((*element, *opacity)),
            _ => None,
        })
    }

    pub fn handles(&self) -> Option<&[Handle]> {
        self.items.iter().find_map(|item| match item {
            FrameItem::Handles(handles) => Some(handles.as_slice()),
            _ => None,
        })
    }

    pub fn marquee(&self) -> Option<Rect> {
        self.items.iter().find_map(|item| match item {
            FrameItem::Marquee(rect) => Some(*rect),
            _ => None,
        })
    }

    pub fn selection_outlines(&self) -> Vec<Rect> {
        self.items
            .iter()
            .filter_map(|item| match item {
                FrameItem::SelectionOutline(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
