//! In-memory element collection that accepts hook notifications.

use crate::element::{Element, ElementError, ElementId};
use crate::hooks::BoardHooks;
use crate::layers;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A board: the authoritative element list plus the last announced selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    elements: Vec<Element>,
    #[serde(skip)]
    selection: HashSet<ElementId>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from existing elements.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            selection: HashSet::new(),
        }
    }

    /// Snapshot handed to the interaction core.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements in paint order.
    pub fn paint_order(&self) -> Vec<&Element> {
        layers::paint_order(&self.elements)
    }

    /// Ids announced by the last selection change.
    pub fn selection(&self) -> &HashSet<ElementId> {
        &self.selection
    }

    /// Add an element after checking it.
    pub fn insert(&mut self, element: Element) -> Result<(), ElementError> {
        element.validate()?;
        self.elements.push(element);
        Ok(())
    }

    /// Replace the stored element with the same id. Returns false if absent.
    pub fn replace(&mut self, element: Element) -> bool {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Remove an element by id.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        self.selection.remove(id);
        Some(self.elements.remove(index))
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selection.clear();
    }

    fn replace_all(&mut self, elements: Vec<Element>, what: &str) {
        for element in elements {
            let id = element.id.clone();
            if !self.replace(element) {
                log::warn!("Ignoring {what} for unknown element {id}");
            }
        }
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl BoardHooks for Board {
    fn on_element_create(&mut self, element: Element) {
        let id = element.id.clone();
        match self.insert(element) {
            Ok(()) => log::debug!("Created element {id}"),
            Err(err) => log::warn!("Rejected element {id}: {err}"),
        }
    }

    fn on_elements_move(&mut self, elements: Vec<Element>) {
        self.replace_all(elements, "move");
    }

    fn on_elements_transform(&mut self, elements: Vec<Element>) {
        self.replace_all(elements, "transform");
    }

    fn on_element_delete(&mut self, id: ElementId) {
        if self.remove(&id).is_none() {
            log::warn!("Ignoring delete for unknown element {id}");
        }
    }

    fn on_selection_change(&mut self, selected: &HashSet<ElementId>) {
        self.selection = selected.clone();
    }

    fn on_elements_reorder(&mut self, elements: Vec<Element>) {
        self.replace_all(elements, "reorder");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementStyle;
    use crate::shapes::{Freehand, Rectangle, Shape};
    use kurbo::{Point, Vec2};

    fn rect(id: &str) -> Element {
        Element::with_id(id, Shape::Rectangle(Rectangle::new(0.0, 0.0, 10.0, 10.0)), ElementStyle::default())
    }

    #[test]
    fn test_create_move_delete() {
        let mut board = Board::new();
        board.on_element_create(rect("a"));
        assert_eq!(board.len(), 1);

        let mut moved = rect("a");
        moved.translate(Vec2::new(5.0, 5.0));
        board.on_elements_move(vec![moved]);
        assert_eq!(board.get("a").unwrap().shape.position(), Point::new(5.0, 5.0));

        board.on_element_delete("a".to_string());
        assert!(board.is_empty());
    }

    #[test]
    fn test_invalid_element_rejected() {
        let mut board = Board::new();
        let stroke = Element::with_id(
            "s",
            Shape::Freehand(Freehand::from_points(vec![Point::new(1.0, 1.0)])),
            ElementStyle::default(),
        );
        board.on_element_create(stroke);
        assert!(board.is_empty());
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let mut board = Board::from_elements(vec![rect("a")]);
        board.on_elements_transform(vec![rect("zzz")]);
        board.on_element_delete("zzz".to_string());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_delete_drops_selection() {
        let mut board = Board::from_elements(vec![rect("a"), rect("b")]);
        board.on_selection_change(&["a".to_string(), "b".to_string()].into_iter().collect());
        board.on_element_delete("a".to_string());
        assert_eq!(board.selection().len(), 1);
    }

    #[test]
    fn test_json_round_trip_keeps_elements() {
        let board = Board::from_elements(vec![rect("a").with_z_index(3)]);
        let json = board.to_json().unwrap();
        let loaded = Board::from_json(&json).unwrap();
        assert_eq!(loaded.elements(), board.elements());
    }
}
