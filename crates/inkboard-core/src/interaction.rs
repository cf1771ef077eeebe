//! Pointer routing across the selection, drag, transform and drawing machines.

use crate::config::InteractionConfig;
use crate::drag::DragState;
use crate::element::{Element, ElementId};
use crate::frame::{Frame, FrameItem};
use crate::geometry::Viewport;
use crate::hit_test::topmost_at_point;
use crate::hooks::BoardHooks;
use crate::layers::{self, next_z_index, paint_order};
use crate::selection::SelectionState;
use crate::shapes::{Shape, Text};
use crate::tools::{DrawingStyle, ToolKind, ToolManager};
use crate::transform::{TransformState, handles_for, transform_target};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keyboard modifiers held during a gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Additive selection, aspect-locked resize.
    #[serde(default)]
    pub shift: bool,
}

/// The gesture currently owning the pointer. At most one is ever active.
#[derive(Debug, Clone, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    Selecting,
    Dragging(DragState),
    Transforming(TransformState),
    Drawing,
}

impl GestureMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureMode::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureMode::Idle => "idle",
            GestureMode::Selecting => "selecting",
            GestureMode::Dragging(_) => "dragging",
            GestureMode::Transforming(_) => "transforming",
            GestureMode::Drawing => "drawing",
        }
    }
}

/// Interaction coordinator.
///
/// Receives screen-space pointer events and a read-only snapshot of the
/// board, runs the matching state machine, and reports committed changes
/// through [`BoardHooks`].
#[derive(Debug, Clone)]
pub struct Interaction {
    config: InteractionConfig,
    viewport: Viewport,
    tools: ToolManager,
    selection: SelectionState,
    modifiers: Modifiers,
    mode: GestureMode,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl Interaction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            viewport: Viewport::with_limits(config.min_zoom, config.max_zoom),
            config,
            tools: ToolManager::new(),
            selection: SelectionState::new(),
            modifiers: Modifiers::default(),
            mode: GestureMode::Idle,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// For pan/zoom handlers living outside the core.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn mode(&self) -> &GestureMode {
        &self.mode
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.tools.current_style
    }

    pub fn style_mut(&mut self) -> &mut DrawingStyle {
        &mut self.tools.current_style
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Switch tools. Any gesture in flight is dropped without committing, and
    /// leaving the select tool deselects everything.
    pub fn set_tool(&mut self, tool: ToolKind, hooks: &mut dyn BoardHooks) {
        let previous = self.tools.current_tool;
        self.cancel();
        self.tools.set_tool(tool);
        if previous == ToolKind::Select && tool != ToolKind::Select && self.selection.clear() {
            hooks.on_selection_change(self.selection.selected());
        }
        log::debug!("Tool {previous:?} -> {tool:?}");
    }

    /// Abandon the current gesture. Nothing is committed.
    pub fn cancel(&mut self) {
        if !self.mode.is_idle() {
            log::debug!("Cancelled {} gesture", self.mode.name());
        }
        self.mode = GestureMode::Idle;
        self.selection.cancel();
        self.tools.cancel();
    }

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(&mut self, elements: &[Element], screen_point: Point, hooks: &mut dyn BoardHooks) {
        let point = self.viewport.screen_to_canvas(screen_point);
        if !self.mode.is_idle() {
            // A press without a matching release; start over
            self.mode = GestureMode::Idle;
            self.selection.cancel();
        }
        match self.tools.current_tool {
            ToolKind::Select => self.select_press(elements, point, hooks),
            ToolKind::Eraser => self.erase_at(elements, point, hooks),
            ToolKind::Pan => {}
            _ => {
                self.tools.begin(point);
                self.mode = GestureMode::Drawing;
            }
        }
    }

    fn select_press(&mut self, elements: &[Element], point: Point, hooks: &mut dyn BoardHooks) {
        if self.selection.retain_existing(elements) {
            hooks.on_selection_change(self.selection.selected());
        }

        if let Some(state) = transform_target(elements, self.selection.selected())
            .and_then(|target| TransformState::begin(target, point, &self.config))
        {
            log::debug!("Transform {} via {} handle", state.element_id(), state.handle().name());
            self.mode = GestureMode::Transforming(state);
            return;
        }

        if let Some(hit) = topmost_at_point(elements, point, self.config.stroke_padding)
            && self.selection.is_selected(&hit.id)
            && let Some(drag) = DragState::begin(elements, &self.selection, point)
        {
            log::debug!("Dragging {} elements", drag.elements().len());
            self.mode = GestureMode::Dragging(drag);
            return;
        }

        if self.selection.start(elements, point, self.modifiers.shift, &self.config) {
            hooks.on_selection_change(self.selection.selected());
        }
        if self.selection.is_selecting() {
            self.mode = GestureMode::Selecting;
        }
    }

    fn erase_at(&mut self, elements: &[Element], point: Point, hooks: &mut dyn BoardHooks) {
        let Some(hit) = topmost_at_point(elements, point, self.config.stroke_padding) else {
            return;
        };
        let id = hit.id.clone();
        log::debug!("Erasing {id}");
        let was_selected = self.selection.remove(&id);
        hooks.on_element_delete(id);
        if was_selected {
            hooks.on_selection_change(self.selection.selected());
        }
    }

    /// Handle pointer motion. Only previews change; nothing is committed.
    pub fn pointer_move(&mut self, screen_point: Point) {
        let point = self.viewport.screen_to_canvas(screen_point);
        match &mut self.mode {
            GestureMode::Idle => {}
            GestureMode::Selecting => self.selection.update(point),
            GestureMode::Dragging(drag) => {
                drag.update(point);
                log::trace!("Drag delta {:?}", drag.total_delta());
            }
            GestureMode::Transforming(transform) => {
                transform.update(point, self.modifiers.shift);
            }
            GestureMode::Drawing => self.tools.update(point),
        }
    }

    /// Handle a pointer release, committing the active gesture.
    ///
    /// Drags and transforms commit their previews exactly as the last move
    /// left them; the release point only matters for marquees and drawing.
    pub fn pointer_up(&mut self, elements: &[Element], screen_point: Point, hooks: &mut dyn BoardHooks) {
        let point = self.viewport.screen_to_canvas(screen_point);
        match std::mem::take(&mut self.mode) {
            GestureMode::Idle => {}
            GestureMode::Selecting => {
                if self.selection.end(elements, point, self.modifiers.shift, &self.config) {
                    hooks.on_selection_change(self.selection.selected());
                }
            }
            GestureMode::Dragging(drag) => {
                if let Some(moved) = drag.finish() {
                    log::debug!("Moved {} elements", moved.len());
                    hooks.on_elements_move(moved);
                }
            }
            GestureMode::Transforming(transform) => {
                let element = transform.finish();
                log::debug!("Transformed {}", element.id);
                hooks.on_elements_transform(vec![element]);
            }
            GestureMode::Drawing => {
                if let Some(mut element) = self.tools.end(point) {
                    element.z_index = next_z_index(elements);
                    log::debug!("Drew {} {}", element.shape.kind_name(), element.id);
                    hooks.on_element_create(element);
                }
            }
        }
    }

    /// Create a text element at the pending text-tool anchor.
    ///
    /// Blank content is discarded. Returns the new id.
    pub fn commit_text(&mut self, elements: &[Element], content: &str, hooks: &mut dyn BoardHooks) -> Option<ElementId> {
        let anchor = self.tools.take_text_anchor()?;
        if content.trim().is_empty() {
            log::debug!("Discarding empty text");
            return None;
        }
        let style = &self.tools.current_style;
        let text = Text::new(anchor.x, anchor.y, content.to_string(), style.font_size);
        let element = Element::new(Shape::Text(text), style.style.clone()).with_z_index(next_z_index(elements));
        let id = element.id.clone();
        hooks.on_element_create(element);
        Some(id)
    }

    /// Select every element.
    pub fn select_all(&mut self, elements: &[Element], hooks: &mut dyn BoardHooks) {
        if self.selection.select_all(elements) {
            hooks.on_selection_change(self.selection.selected());
        }
    }

    pub fn clear_selection(&mut self, hooks: &mut dyn BoardHooks) {
        if self.selection.clear() {
            hooks.on_selection_change(self.selection.selected());
        }
    }

    pub fn bring_to_front(&mut self, elements: &[Element], hooks: &mut dyn BoardHooks) {
        self.reorder(layers::bring_to_front(elements, self.selection.selected()), hooks);
    }

    pub fn send_to_back(&mut self, elements: &[Element], hooks: &mut dyn BoardHooks) {
        self.reorder(layers::send_to_back(elements, self.selection.selected()), hooks);
    }

    pub fn bring_forward(&mut self, elements: &[Element], hooks: &mut dyn BoardHooks) {
        self.reorder(layers::bring_forward(elements, self.selection.selected()), hooks);
    }

    pub fn send_backward(&mut self, elements: &[Element], hooks: &mut dyn BoardHooks) {
        self.reorder(layers::send_backward(elements, self.selection.selected()), hooks);
    }

    fn reorder(&self, changed: Vec<Element>, hooks: &mut dyn BoardHooks) {
        if self.selection.is_empty() || changed.is_empty() {
            return;
        }
        log::debug!("Reordered {} elements", changed.len());
        hooks.on_elements_reorder(changed);
    }

    /// Build the display list for the current state.
    pub fn compose_frame<'a>(&'a self, elements: &'a [Element]) -> Frame<'a> {
        let mut frame = Frame::new(self.viewport.clone());
        let (drag, transform) = match &self.mode {
            GestureMode::Dragging(drag) => (Some(drag), None),
            GestureMode::Transforming(transform) => (None, Some(transform)),
            _ => (None, None),
        };
        let hidden = |id: &str| drag.is_some_and(|d| d.contains(id)) || transform.is_some_and(|t| t.element_id() == id);

        for element in paint_order(elements) {
            if !element.shape.is_unsupported() && !hidden(&element.id) {
                frame.push_element(element, 1.0);
            }
        }
        if let Some(drag) = drag {
            for element in drag.elements() {
                frame.push_element(element, 1.0);
            }
        }
        if matches!(self.mode, GestureMode::Drawing)
            && let Some(preview) = self.tools.preview_element()
        {
            frame.push_element(preview, 1.0);
        }

        // Live copies stand in for the snapshot while dragging
        let live: Vec<&Element> = self
            .selection
            .selected_elements(elements)
            .into_iter()
            .filter(|e| transform.is_none_or(|t| t.element_id() != e.id))
            .map(|e| {
                drag.and_then(|d| d.elements().iter().find(|c| c.id == e.id))
                    .unwrap_or(e)
            })
            .collect();
        for element in &live {
            frame.push(FrameItem::SelectionOutline(element.bounds()));
        }

        if let Some(transform) = transform {
            let preview = transform.preview();
            frame.push_element(preview, self.config.transform_preview_opacity);
            if let Some(target) = preview.shape.as_transformable() {
                let bounds = target.frame();
                frame.push(FrameItem::TransformOutline(bounds.to_rect()));
                frame.push(FrameItem::Handles(handles_for(bounds, self.config.rotate_handle_offset)));
            }
        } else if let [single] = live.as_slice()
            && let Some(target) = single.shape.as_transformable()
        {
            frame.push(FrameItem::Handles(handles_for(target.frame(), self.config.rotate_handle_offset)));
        }

        if matches!(self.mode, GestureMode::Selecting)
            && let Some(rect) = self.selection.selection_box()
        {
            frame.push(FrameItem::Marquee(rect));
        }
        frame
    }

    /// Ids currently selected.
    pub fn selected(&self) -> &HashSet<ElementId> {
        self.selection.selected()
    }
}
