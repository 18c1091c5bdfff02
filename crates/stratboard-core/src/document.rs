//! Live document state: elements, selection, tool and history.

use crate::elements::{Element, ElementPatch};
use crate::history::History;
use crate::tools::{ToolKind, ToolSettings};
use kurbo::Point;
use log::debug;

/// The element collection being edited plus its editing context.
///
/// Elements are kept in z-order (back to front); appending puts an element
/// on top. Every operation is total: unknown ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    selected: Option<String>,
    active_tool: ToolKind,
    tool_settings: ToolSettings,
    is_drawing: bool,
    history: History,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Topmost element.
    pub fn last_element(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// First element in z-order whose hit test contains `point`.
    pub fn first_hit(&self, point: Point) -> Option<&Element> {
        self.elements.iter().find(|e| e.hit_test(point))
    }

    /// Topmost element whose hit test contains `point`.
    pub fn topmost_hit(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.hit_test(point))
    }

    /// Append an element on top. An element whose id is already present
    /// is dropped.
    pub fn add_element(&mut self, element: Element) -> bool {
        if self.element(element.id()).is_some() {
            debug!("Ignoring element with duplicate id {}", element.id());
            return false;
        }
        self.history.record_edit(&self.elements);
        self.elements.push(element);
        true
    }

    /// Apply a partial update. Never records history; bracket with
    /// [`Document::start_batch`]/[`Document::end_batch`] when it should be undoable.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.elements.iter_mut().find(|e| e.id() == id) {
            Some(element) => {
                element.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        self.history.record_edit(&self.elements);
        Some(self.elements.remove(index))
    }

    pub fn clear_elements(&mut self) {
        self.history.record_edit(&self.elements);
        self.elements.clear();
    }

    /// Adopt `elements` without touching history.
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    pub fn undo(&mut self) -> bool {
        let current = self.elements.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.elements = previous;
                self.selected = None;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.elements.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.elements = next;
                self.selected = None;
                true
            }
            None => false,
        }
    }

    pub fn start_batch(&mut self) {
        self.history.start_batch(&self.elements);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Set the selection. The id is not validated.
    pub fn set_selected_element_id(&mut self, id: Option<String>) {
        self.selected = id;
    }

    /// The selected element, `None` when nothing or a stale id is selected.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.element(id))
    }

    /// Remove the selected element as one undo step and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selected.take()?;
        self.remove_element(&id)
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
    }

    /// Select `tool`, or return to [`ToolKind::None`] if it is already active.
    pub fn toggle_tool(&mut self, tool: ToolKind) {
        self.active_tool = if self.active_tool == tool {
            ToolKind::None
        } else {
            tool
        };
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        &self.tool_settings
    }

    pub fn set_tool_settings(&mut self, settings: ToolSettings) {
        self.tool_settings = settings;
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn set_is_drawing(&mut self, is_drawing: bool) {
        self.is_drawing = is_drawing;
    }
}
