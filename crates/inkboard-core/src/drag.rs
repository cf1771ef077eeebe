//! Moving the selected elements.

use crate::element::Element;
use crate::selection::SelectionState;
use kurbo::{Point, Vec2};

/// An in-progress move of the selected elements.
///
/// Works on copies; the snapshot the drag started from is never touched.
#[derive(Debug, Clone)]
pub struct DragState {
    anchor: Point,
    last: Point,
    working: Vec<Element>,
}

impl DragState {
    /// Start dragging the current selection. `None` when nothing is selected.
    pub fn begin(elements: &[Element], selection: &SelectionState, point: Point) -> Option<Self> {
        let working: Vec<Element> = selection.selected_elements(elements).into_iter().cloned().collect();
        if working.is_empty() {
            return None;
        }
        Some(Self {
            anchor: point,
            last: point,
            working,
        })
    }

    /// Move the working copies by the delta since the previous point.
    pub fn update(&mut self, point: Point) -> &[Element] {
        let delta = point - self.last;
        if delta != Vec2::ZERO {
            for element in &mut self.working {
                element.translate(delta);
            }
            self.last = point;
        }
        &self.working
    }

    /// Current working copies.
    pub fn elements(&self) -> &[Element] {
        &self.working
    }

    pub fn contains(&self, id: &str) -> bool {
        self.working.iter().any(|e| e.id == id)
    }

    /// Total displacement since the drag started.
    pub fn total_delta(&self) -> Vec2 {
        self.last - self.anchor
    }

    /// End the drag, yielding the moved elements, or `None` if the total
    /// displacement is zero.
    pub fn finish(self) -> Option<Vec<Element>> {
        if self.total_delta() == Vec2::ZERO {
            return None;
        }
        let mut elements = self.working;
        for element in &mut elements {
            element.touch();
        }
        Some(elements)
    }
}
