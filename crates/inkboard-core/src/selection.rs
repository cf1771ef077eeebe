//! Click and marquee selection.

use crate::config::InteractionConfig;
use crate::element::{Element, ElementId};
use crate::geometry::bounding_box_of;
use crate::hit_test::{find_elements_in_box, topmost_at_point};
use kurbo::{Point, Rect};
use std::collections::HashSet;

/// The selected set plus the marquee in progress, if any.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashSet<ElementId>,
    selection_box: Option<Rect>,
    is_selecting: bool,
    anchor: Point,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a pointer press. Returns true if the selected set changed.
    ///
    /// Clicking an element selects it (or toggles it in with `additive`).
    /// Clicking empty canvas starts a marquee.
    pub fn start(&mut self, elements: &[Element], point: Point, additive: bool, config: &InteractionConfig) -> bool {
        match topmost_at_point(elements, point, config.stroke_padding) {
            Some(hit) if !self.selected.contains(&hit.id) => {
                if !additive {
                    self.selected.clear();
                }
                self.selected.insert(hit.id.clone());
                true
            }
            Some(_) => {
                if additive {
                    false
                } else {
                    self.clear()
                }
            }
            None => {
                self.is_selecting = true;
                self.anchor = point;
                self.selection_box = Some(bounding_box_of(point, point));
                if additive { false } else { self.clear() }
            }
        }
    }

    /// Grow the marquee towards `point`.
    pub fn update(&mut self, point: Point) {
        if self.is_selecting {
            self.selection_box = Some(bounding_box_of(self.anchor, point));
        }
    }

    /// Finish the marquee. Returns true if the selected set changed.
    ///
    /// A box larger than the click threshold on both axes selects every
    /// element fully inside it. A smaller box counts as a click on empty
    /// canvas and clears the selection unless `additive`.
    pub fn end(&mut self, elements: &[Element], point: Point, additive: bool, config: &InteractionConfig) -> bool {
        if !self.is_selecting {
            return false;
        }
        let rect = bounding_box_of(self.anchor, point);
        self.cancel();

        if rect.width() > config.click_threshold && rect.height() > config.click_threshold {
            let inside: HashSet<ElementId> = find_elements_in_box(elements, rect)
                .into_iter()
                .map(|e| e.id.clone())
                .collect();
            if additive {
                let before = self.selected.len();
                self.selected.extend(inside);
                self.selected.len() != before
            } else if inside != self.selected {
                self.selected = inside;
                true
            } else {
                false
            }
        } else if additive {
            false
        } else {
            self.clear()
        }
    }

    /// Drop the marquee without touching the selected set.
    pub fn cancel(&mut self) {
        self.is_selecting = false;
        self.selection_box = None;
    }

    /// Deselect everything. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Select every element. Returns true if the set changed.
    pub fn select_all(&mut self, elements: &[Element]) -> bool {
        let all: HashSet<ElementId> = elements
            .iter()
            .filter(|e| !e.shape.is_unsupported())
            .map(|e| e.id.clone())
            .collect();
        if all == self.selected {
            return false;
        }
        self.selected = all;
        true
    }

    /// Forget ids that no longer exist. Returns true if any were dropped.
    pub fn retain_existing(&mut self, elements: &[Element]) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| elements.iter().any(|e| &e.id == id));
        self.selected.len() != before
    }

    /// Deselect a single id. Returns true if it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &HashSet<ElementId> {
        &self.selected
    }

    /// Selected elements in collection order.
    pub fn selected_elements<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        elements.iter().filter(|e| self.selected.contains(&e.id)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selecting(&self) -> bool {
        self.is_selecting
    }

    /// The marquee while selecting.
    pub fn selection_box(&self) -> Option<Rect> {
        self.selection_box
    }
}
