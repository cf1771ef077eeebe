//! Outbound notifications to whoever owns the element collection.

use crate::element::{Element, ElementId};
use std::collections::HashSet;

/// Receiver for committed mutations.
///
/// The interaction core never edits the collection it is handed. Finished
/// gestures are reported here and the owner decides how to merge them.
/// Every method defaults to doing nothing.
pub trait BoardHooks {
    /// A new element was drawn.
    fn on_element_create(&mut self, _element: Element) {}

    /// Elements were dragged to new positions.
    fn on_elements_move(&mut self, _elements: Vec<Element>) {}

    /// An element was resized or rotated (always a single-element batch).
    fn on_elements_transform(&mut self, _elements: Vec<Element>) {}

    /// An element was erased.
    fn on_element_delete(&mut self, _id: ElementId) {}

    /// The selected set changed.
    fn on_selection_change(&mut self, _selected: &HashSet<ElementId>) {}

    /// Elements got new z-indices.
    fn on_elements_reorder(&mut self, _elements: Vec<Element>) {}
}

/// Hooks that ignore everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl BoardHooks for NoopHooks {}

/// A notification as recorded by [`EventLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    Create(Element),
    Move(Vec<Element>),
    Transform(Vec<Element>),
    Delete(ElementId),
    /// Selected ids, sorted.
    SelectionChange(Vec<ElementId>),
    Reorder(Vec<Element>),
}

/// Hooks that record every notification in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events.
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// The most recently announced selection, if any.
    pub fn last_selection(&self) -> Option<&[ElementId]> {
        self.events.iter().rev().find_map(|event| match event {
            BoardEvent::SelectionChange(ids) => Some(ids.as_slice()),
            _ => None,
        })
    }
}

impl BoardHooks for EventLog {
    fn on_element_create(&mut self, element: Element) {
        self.events.push(BoardEvent::Create(element));
    }

    fn on_elements_move(&mut self, elements: Vec<Element>) {
        self.events.push(BoardEvent::Move(elements));
    }

    fn on_elements_transform(&mut self, elements: Vec<Element>) {
        self.events.push(BoardEvent::Transform(elements));
    }

    fn on_element_delete(&mut self, id: ElementId) {
        self.events.push(BoardEvent::Delete(id));
    }

    fn on_selection_change(&mut self, selected: &HashSet<ElementId>) {
        let mut ids: Vec<ElementId> = selected.iter().cloned().collect();
        ids.sort();
        self.events.push(BoardEvent::SelectionChange(ids));
    }

    fn on_elements_reorder(&mut self, elements: Vec<Element>) {
        self.events.push(BoardEvent::Reorder(elements));
    }
}
