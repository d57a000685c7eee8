//! Editor state store.
//!
//! [`EditorState`] owns the layout, the current selection and the preview
//! flag. Every operation completes before observers are notified, so a
//! listener always sees a consistent state.

use crate::elements::{Element, ElementProps, PropsPatch};
use crate::error::EditorResult;
use crate::id::{DEFAULT_ID_LENGTH, ElementId};
use crate::layout::Layout;
use std::fmt;

/// A change applied to the editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// An element was appended to the layout.
    ElementAdded(ElementId),
    /// An element's properties were merged.
    ElementUpdated(ElementId),
    /// An element was removed from the layout.
    ElementRemoved(ElementId),
    /// The selection changed.
    SelectionChanged(Option<ElementId>),
    /// Preview mode was entered or exited.
    PreviewModeChanged(bool),
}

/// Observer callback, invoked synchronously after each change.
pub type Listener = Box<dyn FnMut(&EditorEvent, &EditorState)>;

/// Handle returned by [`EditorState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Session-lifetime editor state.
pub struct EditorState {
    layout: Layout,
    /// Selected element, resolved against `layout` on every read.
    selected: Option<ElementId>,
    preview_mode: bool,
    id_length: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("layout", &self.layout)
            .field("selected", &self.selected)
            .field("preview_mode", &self.preview_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EditorState {
    /// Create an empty editor state.
    pub fn new() -> Self {
        Self::with_id_length(DEFAULT_ID_LENGTH)
    }

    /// Create an empty editor state generating ids of `id_length` characters.
    pub fn with_id_length(id_length: usize) -> Self {
        Self {
            layout: Layout::new(),
            selected: None,
            preview_mode: false,
            id_length: id_length.max(1),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register an observer.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&EditorEvent, &EditorState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: EditorEvent) {
        if self.listeners.is_empty() {
            return;
        }
        // Listeners only get a shared borrow, so none can subscribe while we iterate.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(&event, self);
        }
        self.listeners = listeners;
    }

    /// Append a new element and return its id.
    ///
    /// The element is not selected; callers that place elements from the
    /// palette select it themselves.
    pub fn add_element(&mut self, props: ElementProps) -> ElementId {
        let id = self.layout.fresh_id(self.id_length);
        log::debug!("Adding {} element {}", props.kind(), id);
        self.layout.push(id.clone(), props);
        self.notify(EditorEvent::ElementAdded(id.clone()));
        id
    }

    /// Merge a partial update into an element's properties.
    ///
    /// Returns `Ok(false)` without touching anything if no element has `id`.
    pub fn update_element_props(
        &mut self,
        id: &ElementId,
        patch: impl Into<PropsPatch>,
    ) -> EditorResult<bool> {
        let patch = patch.into();
        let Some(element) = self.layout.get_mut(id) else {
            log::debug!("Ignoring update for unknown element {}", id);
            return Ok(false);
        };
        if let Err(e) = element.props.merge(patch) {
            log::warn!("Rejected update for element {}: {}", id, e);
            return Err(e);
        }
        log::debug!("Updated element {}", id);
        self.notify(EditorEvent::ElementUpdated(id.clone()));
        Ok(true)
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let Some(removed) = self.layout.remove(id) else {
            log::debug!("Ignoring removal of unknown element {}", id);
            return None;
        };
        log::debug!("Removed element {}", id);
        self.notify(EditorEvent::ElementRemoved(id.clone()));
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.notify(EditorEvent::SelectionChanged(None));
        }
        Some(removed)
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Only the element's id is kept; see [`EditorState::selected_element`].
    pub fn set_selected_element(&mut self, element: Option<&Element>) {
        self.set_selected(element.map(|e| e.id.clone()));
    }

    /// Select an element by id, or clear the selection with `None`.
    pub fn set_selected(&mut self, id: Option<ElementId>) {
        if self.selected == id {
            return;
        }
        self.selected = id;
        self.notify(EditorEvent::SelectionChanged(self.selected.clone()));
    }

    /// Set the preview flag. Does not touch the selection.
    pub fn set_preview_mode(&mut self, preview: bool) {
        if self.preview_mode == preview {
            return;
        }
        self.preview_mode = preview;
        log::info!("Preview mode {}", if preview { "on" } else { "off" });
        self.notify(EditorEvent::PreviewModeChanged(preview));
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.layout.get(id)
    }

    /// Selected id as stored, which may no longer resolve.
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element as it is in the current layout.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.layout.get(id))
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id) && self.layout.contains(id)
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }
}
