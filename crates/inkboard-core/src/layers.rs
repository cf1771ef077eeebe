//! Paint order and layer operations.
//!
//! Layer operations never mutate the snapshot. They compute a new stacking
//! order, renumber it to `0..n`, and return only the elements whose z-index
//! changed.

use crate::element::{Element, ElementId};
use std::collections::HashSet;

/// Elements in paint order: z-index ascending, ties in collection order.
pub fn paint_order(elements: &[Element]) -> Vec<&Element> {
    let mut ordered: Vec<&Element> = elements.iter().collect();
    // Stable sort keeps collection order among equal z-indices
    ordered.sort_by_key(|e| e.z_index);
    ordered
}

/// z-index that puts a new element on top of everything.
///
/// Saturates at `i64::MAX`; an appended element still paints last through
/// the collection-order tie break.
pub fn next_z_index(elements: &[Element]) -> i64 {
    elements.iter().map(|e| e.z_index.saturating_add(1)).max().unwrap_or(0)
}

/// Move the given elements above all others, keeping their relative order.
pub fn bring_to_front(elements: &[Element], ids: &HashSet<ElementId>) -> Vec<Element> {
    let (selected, rest): (Vec<&Element>, Vec<&Element>) =
        paint_order(elements).into_iter().partition(|e| ids.contains(&e.id));
    renumber(rest.into_iter().chain(selected))
}

/// Move the given elements below all others, keeping their relative order.
pub fn send_to_back(elements: &[Element], ids: &HashSet<ElementId>) -> Vec<Element> {
    let (selected, rest): (Vec<&Element>, Vec<&Element>) =
        paint_order(elements).into_iter().partition(|e| ids.contains(&e.id));
    renumber(selected.into_iter().chain(rest))
}

/// Move each given element one layer towards the front.
pub fn bring_forward(elements: &[Element], ids: &HashSet<ElementId>) -> Vec<Element> {
    let mut order = paint_order(elements);
    for i in (0..order.len().saturating_sub(1)).rev() {
        if ids.contains(&order[i].id) && !ids.contains(&order[i + 1].id) {
            order.swap(i, i + 1);
        }
    }
    renumber(order)
}

/// Move each given element one layer towards the back.
pub fn send_backward(elements: &[Element], ids: &HashSet<ElementId>) -> Vec<Element> {
    let mut order = paint_order(elements);
    for i in 1..order.len() {
        if ids.contains(&order[i].id) && !ids.contains(&order[i - 1].id) {
            order.swap(i, i - 1);
        }
    }
    renumber(order)
}

/// Renumber z-indices to `0..n` without changing the paint order.
pub fn normalize(elements: &[Element]) -> Vec<Element> {
    renumber(paint_order(elements))
}

fn renumber<'a>(order: impl IntoIterator<Item = &'a Element>) -> Vec<Element> {
    order
        .into_iter()
        .enumerate()
        .filter(|(z, e)| e.z_index != *z as i64)
        .map(|(z, e)| {
            let mut changed = e.clone();
            changed.z_index = z as i64;
            changed.touch();
            changed
        })
        .collect()
}
