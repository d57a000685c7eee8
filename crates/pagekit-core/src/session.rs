//! Editor session: ties selection, preview mode and the property form together.
//!
//! The store applies whatever it is told. The session is the caller that
//! knows the editing rules:
//! - a dropped element is selected right away
//! - entering preview clears the selection first
//! - nothing can be selected or deleted while previewing
//! - selecting an element opens its form and shows the property panel

use crate::catalog::defaults_for;
use crate::config::EditorConfig;
use crate::editor::{EditorEvent, EditorState, SubscriptionId};
use crate::elements::{Element, ElementKind, ElementProps, ImagePatch};
use crate::error::{EditorError, EditorResult};
use crate::form::PropertyForm;
use crate::id::ElementId;
use crate::layout::Layout;
use crate::upload::{DataUrl, UploadTicket};

/// Per-element affordances shown on the canvas while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementControls {
    /// Type badge.
    pub kind: ElementKind,
    /// Whether the delete button is offered.
    pub deletable: bool,
}

/// One user's editing session.
#[derive(Debug)]
pub struct EditorSession {
    state: EditorState,
    config: EditorConfig,
    /// Form for the selected element, if any.
    form: Option<PropertyForm>,
    /// Property panel shown (mobile off-canvas).
    panel_visible: bool,
    next_upload: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        let config = EditorConfig::default();
        Self {
            state: EditorState::with_id_length(config.id_length),
            config,
            form: None,
            panel_visible: false,
            next_upload: 0,
        }
    }

    /// Create a session with a custom configuration.
    pub fn with_config(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        Ok(Self {
            state: EditorState::with_id_length(config.id_length),
            config,
            form: None,
            panel_visible: false,
            next_upload: 0,
        })
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        self.state.layout()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.state.selected_element()
    }

    pub fn preview_mode(&self) -> bool {
        self.state.preview_mode()
    }

    /// Register an observer on the underlying store.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&EditorEvent, &EditorState) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    fn select(&mut self, id: Option<ElementId>) {
        self.state.set_selected(id);
        self.sync_selection();
    }

    /// Rebuild the form and panel after the selection may have changed.
    fn sync_selection(&mut self) {
        match self.state.selected_element() {
            Some(element) => {
                let stale = self.form.as_ref().is_none_or(|f| f.target() != element.id());
                if stale {
                    self.form = Some(PropertyForm::for_element(element));
                }
                self.panel_visible = true;
            }
            None => {
                self.form = None;
                self.panel_visible = false;
            }
        }
    }

    /// Place a palette element with its default props.
    pub fn drop_element(&mut self, kind: ElementKind) -> ElementId {
        self.drop_props(defaults_for(kind))
    }

    /// Place an element and select it.
    ///
    /// While previewing the element is placed but left unselected.
    pub fn drop_props(&mut self, props: ElementProps) -> ElementId {
        let id = self.state.add_element(props);
        if self.state.preview_mode() {
            log::debug!("Placed {} during preview, not selecting it", id);
        } else {
            self.select(Some(id.clone()));
        }
        id
    }

    /// Handle a click on a placed element. Returns true if it got selected.
    pub fn click_element(&mut self, id: &ElementId) -> bool {
        if self.state.preview_mode() {
            log::debug!("Ignoring click on {} in preview mode", id);
            return false;
        }
        if !self.state.layout().contains(id) {
            log::debug!("Ignoring click on unknown element {}", id);
            return false;
        }
        self.select(Some(id.clone()));
        true
    }

    /// Handle a click on the empty canvas area.
    pub fn click_canvas(&mut self) {
        if !self.state.preview_mode() {
            self.select(None);
        }
    }

    /// Enter or exit preview mode.
    pub fn set_preview_mode(&mut self, preview: bool) {
        if preview && !self.state.preview_mode() {
            self.select(None);
        }
        self.state.set_preview_mode(preview);
    }

    /// Flip preview mode and return the new value.
    pub fn toggle_preview(&mut self) -> bool {
        let preview = !self.state.preview_mode();
        self.set_preview_mode(preview);
        preview
    }

    /// Delete an element through its delete affordance.
    ///
    /// Refused while previewing, since no delete affordance is shown then.
    pub fn delete_element(&mut self, id: &ElementId) -> Option<Element> {
        if self.state.preview_mode() {
            log::debug!("Ignoring delete of {} in preview mode", id);
            return None;
        }
        let removed = self.state.remove_element(id);
        self.sync_selection();
        removed
    }

    /// Affordances for an element, `None` in preview mode.
    pub fn element_controls(&self, id: &ElementId) -> Option<ElementControls> {
        if self.state.preview_mode() {
            return None;
        }
        self.state.element(id).map(|e| ElementControls {
            kind: e.kind(),
            deletable: true,
        })
    }

    /// Live link target of a button (only in preview mode).
    pub fn button_href(&self, id: &ElementId) -> Option<&str> {
        let preview = self.state.preview_mode();
        self.state.element(id)?.props().as_button()?.href(preview)
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Show or hide the property panel. Only possible with a selection.
    pub fn toggle_panel(&mut self) -> bool {
        if self.state.selected_element().is_some() {
            self.panel_visible = !self.panel_visible;
        }
        self.panel_visible
    }

    pub fn close_panel(&mut self) {
        self.panel_visible = false;
    }

    pub fn form(&self) -> Option<&PropertyForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PropertyForm> {
        self.form.as_mut()
    }

    /// Submit the open form. Returns `Ok(false)` if no form is open.
    pub fn submit_form(&mut self) -> EditorResult<bool> {
        match self.form.as_mut() {
            Some(form) => form.submit(&mut self.state, &self.config),
            None => Ok(false),
        }
    }

    /// Start reading a file for an image element.
    ///
    /// Puts the element in upload mode, in the store and in the open form if
    /// it edits that element.
    pub fn begin_image_upload(&mut self, id: &ElementId) -> EditorResult<UploadTicket> {
        let is_image = self
            .state
            .element(id)
            .is_some_and(|e| e.kind() == ElementKind::Image);
        if !is_image {
            return Err(EditorError::NotAnImage(id.to_string()));
        }
        let upload_mode = ImagePatch {
            use_upload: Some(true),
            ..Default::default()
        };
        self.state.update_element_props(id, upload_mode)?;
        if let Some(form) = self.form.as_mut().filter(|f| f.target() == id) {
            form.set_use_upload(true);
        }
        let ticket = UploadTicket {
            target: id.clone(),
            seq: self.next_upload,
        };
        self.next_upload += 1;
        log::debug!("Upload {} started for {}", ticket.seq, id);
        Ok(ticket)
    }

    /// Finish a file read started with [`EditorSession::begin_image_upload`].
    ///
    /// Merges the payload into the element's `src` and `uploadedImage` and,
    /// if the form still edits that element, into the form as well. If the
    /// element was deleted meanwhile the payload is dropped and `Ok(false)`
    /// is returned.
    pub fn complete_image_upload(
        &mut self,
        ticket: UploadTicket,
        data_url: DataUrl,
    ) -> EditorResult<bool> {
        if !self.state.layout().contains(&ticket.target) {
            log::debug!("Dropping upload {}: element {} is gone", ticket.seq, ticket.target);
            return Ok(false);
        }
        self.state
            .update_element_props(&ticket.target, ImagePatch::upload(data_url.as_str()))?;
        if let Some(form) = self.form.as_mut().filter(|f| f.target() == &ticket.target) {
            form.apply_upload(&data_url);
        }
        log::debug!("Upload {} applied to {}", ticket.seq, ticket.target);
        Ok(true)
    }

    /// Encode file bytes and finish the upload in one step.
    pub fn complete_image_upload_bytes(
        &mut self,
        ticket: UploadTicket,
        data: &[u8],
        mime_hint: Option<&str>,
    ) -> EditorResult<bool> {
        let data_url = DataUrl::encode(data, mime_hint)?;
        self.complete_image_upload(ticket, data_url)
    }

    /// Encode a picked file and finish the upload, taking the image type
    /// from the file name's extension.
    pub fn complete_image_upload_file(
        &mut self,
        ticket: UploadTicket,
        file_name: &str,
        data: &[u8],
    ) -> EditorResult<bool> {
        let data_url = DataUrl::encode_file(file_name, data)?;
        self.complete_image_upload(ticket, data_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ButtonVariant, TextPatch};
    use crate::form::ElementDraft;
    use crate::validation::Field;

    #[test]
    fn test_drop_selects_new_element() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Text);

        let selected = session.selected_element().unwrap();
        assert_eq!(selected.id(), &id);
        assert_eq!(selected.props(), &defaults_for(ElementKind::Text));
        assert!(session.panel_visible());
        assert_eq!(session.form().unwrap().target(), &id);
    }

    #[test]
    fn test_drop_during_preview_does_not_select() {
        let mut session = EditorSession::new();
        session.set_preview_mode(true);
        let id = session.drop_element(ElementKind::Button);

        assert!(session.layout().contains(&id));
        assert!(session.selected_element().is_none());
        assert!(session.form().is_none());
    }

    #[test]
    fn test_entering_preview_clears_selection() {
        let mut session = EditorSession::new();
        session.drop_element(ElementKind::Image);
        assert!(session.selected_element().is_some());

        assert!(session.toggle_preview());
        assert!(session.preview_mode());
        assert!(session.selected_element().is_none());
        assert!(session.state().selected_id().is_none());
        assert!(session.form().is_none());
        assert!(!session.panel_visible());

        assert!(!session.toggle_preview());
        assert!(session.selected_element().is_none());
    }

    #[test]
    fn test_selection_cleared_before_preview_flag() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut session = EditorSession::new();
        session.drop_element(ElementKind::Text);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));

        session.set_preview_mode(true);
        assert_eq!(
            *events.borrow(),
            vec![EditorEvent::SelectionChanged(None), EditorEvent::PreviewModeChanged(true)]
        );
    }

    #[test]
    fn test_clicks_select_and_clear() {
        let mut session = EditorSession::new();
        let a = session.drop_element(ElementKind::Text);
        let b = session.drop_element(ElementKind::Button);
        assert_eq!(session.selected_element().unwrap().id(), &b);

        assert!(session.click_element(&a));
        assert_eq!(session.selected_element().unwrap().id(), &a);
        assert_eq!(session.form().unwrap().target(), &a);

        assert!(!session.click_element(&ElementId::from("ghost")));
        assert_eq!(session.selected_element().unwrap().id(), &a);

        session.click_canvas();
        assert!(session.selected_element().is_none());
        assert!(session.form().is_none());
    }

    #[test]
    fn test_preview_blocks_selection_and_delete() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Button);
        session.set_preview_mode(true);

        assert!(!session.click_element(&id));
        assert!(session.selected_element().is_none());
        assert!(session.element_controls(&id).is_none());
        assert!(session.delete_element(&id).is_none());
        assert_eq!(session.layout().len(), 1);

        session.set_preview_mode(false);
        assert_eq!(
            session.element_controls(&id),
            Some(ElementControls {
                kind: ElementKind::Button,
                deletable: true
            })
        );
    }

    #[test]
    fn test_delete_selected_button() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Button);
        assert!(session.selected_element().is_some());

        let removed = session.delete_element(&id).unwrap();
        assert_eq!(removed.kind(), ElementKind::Button);
        assert!(session.layout().is_empty());
        assert!(session.selected_element().is_none());
        assert!(session.state().selected_id().is_none());
        assert!(session.form().is_none());
        assert!(!session.panel_visible());
    }

    #[test]
    fn test_button_href_only_in_preview() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Button);
        assert_eq!(session.button_href(&id), None);
        session.set_preview_mode(true);
        assert_eq!(session.button_href(&id), Some("#"));
    }

    #[test]
    fn test_panel_toggle() {
        let mut session = EditorSession::new();
        assert!(!session.toggle_panel());

        session.drop_element(ElementKind::Text);
        assert!(session.panel_visible());
        session.close_panel();
        assert!(!session.panel_visible());
        assert!(session.toggle_panel());
        assert!(!session.toggle_panel());
    }

    #[test]
    fn test_font_size_out_of_range_scenario() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Text);

        let form = session.form_mut().unwrap();
        form.set_field(Field::FontSize, "100");
        let result = session.submit_form();

        let Err(EditorError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.get(Field::FontSize).unwrap().kind.is_range_error());
        assert_eq!(session.layout().get(&id).unwrap().props(), &defaults_for(ElementKind::Text));
        assert!(session.form().unwrap().error(Field::FontSize).is_some());
    }

    #[test]
    fn test_submit_form_commits() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Button);

        let form = session.form_mut().unwrap();
        form.set_field(Field::Label, "Sign up");
        form.select_variant(ButtonVariant::Success);
        assert!(session.submit_form().unwrap());

        let button = session.layout().get(&id).unwrap().props().as_button().unwrap();
        assert_eq!(button.label, "Sign up");
        assert_eq!(button.variant, ButtonVariant::Success);
        assert_eq!(button.link, "#");
    }

    #[test]
    fn test_submit_without_form() {
        let mut session = EditorSession::new();
        assert!(!session.submit_form().unwrap());
    }

    #[test]
    fn test_external_update_keeps_form_edits() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Text);
        session.form_mut().unwrap().set_field(Field::Content, "Draft");

        // Selecting the same element again keeps the open form
        assert!(session.click_element(&id));
        assert!(session.form().unwrap().is_dirty());

        let state_update = TextPatch {
            color: Some("#00ff00".to_string()),
            ..Default::default()
        };
        session.state.update_element_props(&id, state_update).unwrap();
        assert_eq!(
            session.selected_element().unwrap().props().as_text().unwrap().color,
            "#00ff00"
        );
        assert!(session.form().unwrap().is_dirty());
    }

    #[test]
    fn test_image_upload_scenario() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Image);
        let ticket = session.begin_image_upload(&id).unwrap();

        let data_url = DataUrl::parse("data:image/png;base64,AAA").unwrap();
        assert!(session.complete_image_upload(ticket, data_url).unwrap());

        let image = session.layout().get(&id).unwrap().props().as_image().unwrap();
        assert_eq!(image.src, "data:image/png;base64,AAA");
        assert_eq!(image.uploaded_image.as_deref(), Some("data:image/png;base64,AAA"));
        assert_eq!(image.alt, "Image description");
    }

    #[test]
    fn test_upload_preserves_pending_form_edits() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Image);
        session.form_mut().unwrap().set_field(Field::Alt, "Team photo");
        let ticket = session.begin_image_upload(&id).unwrap();

        session
            .complete_image_upload_bytes(ticket, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A], None)
            .unwrap();

        let ElementDraft::Image(d) = session.form().unwrap().draft() else {
            panic!("expected image draft");
        };
        assert!(d.use_upload);
        assert_eq!(d.alt, "Team photo");
        assert!(d.src.starts_with("data:image/png;base64,"));
        assert_eq!(d.uploaded_image.as_deref(), Some(d.src.as_str()));

        // Upload mode skips URL validation on submit
        assert!(session.submit_form().unwrap());
        let image = session.layout().get(&id).unwrap().props().as_image().unwrap();
        assert!(image.use_upload);
        assert_eq!(image.alt, "Team photo");
    }

    #[test]
    fn test_upload_survives_reselect_and_submit() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Image);
        let ticket = session.begin_image_upload(&id).unwrap();
        let data_url = DataUrl::parse("data:image/png;base64,AAA").unwrap();
        assert!(session.complete_image_upload(ticket, data_url).unwrap());

        let stored = session.layout().get(&id).unwrap().props().as_image().unwrap();
        assert!(stored.use_upload);
        assert_eq!(stored.src, "data:image/png;base64,AAA");

        // Rebuild the form from the stored props
        session.click_canvas();
        assert!(session.click_element(&id));
        let ElementDraft::Image(d) = session.form().unwrap().draft() else {
            panic!("expected image draft");
        };
        assert!(d.use_upload);

        session.form_mut().unwrap().set_field(Field::Alt, "Logo");
        assert!(session.submit_form().unwrap());
        let image = session.layout().get(&id).unwrap().props().as_image().unwrap();
        assert_eq!(image.alt, "Logo");
        assert_eq!(image.src, "data:image/png;base64,AAA");
    }

    #[test]
    fn test_upload_from_named_file() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Image);
        let ticket = session.begin_image_upload(&id).unwrap();

        assert!(
            session
                .complete_image_upload_file(ticket, "photo.JPG", &[0x00, 0x01, 0x02])
                .unwrap()
        );
        let image = session.layout().get(&id).unwrap().props().as_image().unwrap();
        assert!(image.src.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_ids_widen_when_short_ids_run_out() {
        let config = EditorConfig {
            id_length: 1,
            ..Default::default()
        };
        let mut session = EditorSession::with_config(config).unwrap();
        for _ in 0..37 {
            session.drop_element(ElementKind::Text);
        }

        assert_eq!(session.layout().len(), 37);
        let ids: std::collections::HashSet<_> = session.layout().iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), 37);
        assert!(session.layout().iter().any(|e| e.id().as_str().len() == 2));
    }

    #[test]
    fn test_upload_after_delete_is_dropped() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Image);
        let ticket = session.begin_image_upload(&id).unwrap();
        session.delete_element(&id);

        let data_url = DataUrl::parse("data:image/png;base64,AAA").unwrap();
        assert!(!session.complete_image_upload(ticket, data_url).unwrap());
        assert!(session.layout().is_empty());
    }

    #[test]
    fn test_upload_after_selection_change_skips_form() {
        let mut session = EditorSession::new();
        let image = session.drop_element(ElementKind::Image);
        let ticket = session.begin_image_upload(&image).unwrap();
        let text = session.drop_element(ElementKind::Text);

        let data_url = DataUrl::parse("data:image/gif;base64,R0lG").unwrap();
        assert!(session.complete_image_upload(ticket, data_url).unwrap());

        assert_eq!(session.form().unwrap().target(), &text);
        let props = session.layout().get(&image).unwrap().props().as_image().unwrap();
        assert_eq!(props.src, "data:image/gif;base64,R0lG");
    }

    #[test]
    fn test_upload_requires_image() {
        let mut session = EditorSession::new();
        let id = session.drop_element(ElementKind::Text);
        assert!(matches!(
            session.begin_image_upload(&id),
            Err(EditorError::NotAnImage(_))
        ));
        assert!(matches!(
            session.begin_image_upload(&ElementId::from("missing")),
            Err(EditorError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_custom_config() {
        let config = EditorConfig {
            id_length: 12,
            font_size_max: 96.0,
            ..Default::default()
        };
        let mut session = EditorSession::with_config(config).unwrap();
        let id = session.drop_element(ElementKind::Text);
        assert_eq!(id.as_str().len(), 12);

        session.form_mut().unwrap().set_field(Field::FontSize, "90");
        assert!(session.submit_form().unwrap());

        let bad = EditorConfig {
            id_length: 0,
            ..Default::default()
        };
        assert!(EditorSession::with_config(bad).is_err());
    }
}
