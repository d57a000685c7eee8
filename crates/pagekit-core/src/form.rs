//! Property form state for the selected element.

use crate::config::EditorConfig;
use crate::editor::EditorState;
use crate::elements::{ButtonVariant, Element, ElementKind, ElementProps};
use crate::error::{EditorError, EditorResult};
use crate::id::ElementId;
use crate::upload::DataUrl;
use crate::validation::{self, Field, FieldError, ValidationErrors};

/// Raw text block inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    pub content: String,
    /// As typed into the number input.
    pub font_size: String,
    pub color: String,
}

/// Raw image inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraft {
    pub src: String,
    pub alt: String,
    pub use_upload: bool,
    pub uploaded_image: Option<String>,
}

/// Raw button inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonDraft {
    pub label: String,
    pub link: String,
    /// Style name as picked from the select.
    pub variant: String,
}

/// Unvalidated form values for one element type.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementDraft {
    Text(TextDraft),
    Image(ImageDraft),
    Button(ButtonDraft),
}

impl ElementDraft {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementDraft::Text(_) => ElementKind::Text,
            ElementDraft::Image(_) => ElementKind::Image,
            ElementDraft::Button(_) => ElementKind::Button,
        }
    }
}

impl From<&ElementProps> for ElementDraft {
    fn from(props: &ElementProps) -> Self {
        match props {
            ElementProps::Text(p) => ElementDraft::Text(TextDraft {
                content: p.content.clone(),
                font_size: p.font_size.to_string(),
                color: p.color.clone(),
            }),
            ElementProps::Image(p) => ElementDraft::Image(ImageDraft {
                src: p.src.clone(),
                alt: p.alt.clone(),
                use_upload: p.use_upload,
                uploaded_image: p.uploaded_image.clone(),
            }),
            ElementProps::Button(p) => ElementDraft::Button(ButtonDraft {
                label: p.label.clone(),
                link: p.link.clone(),
                variant: p.variant.name().to_string(),
            }),
        }
    }
}

/// Edit form bound to one element.
///
/// Holds the values being edited, the values the form was opened with (for
/// dirty tracking) and the errors from the last failed submit.
#[derive(Debug, Clone)]
pub struct PropertyForm {
    target: ElementId,
    initial: ElementDraft,
    draft: ElementDraft,
    errors: ValidationErrors,
}

impl PropertyForm {
    /// Open a form initialized from an element's current props.
    pub fn for_element(element: &Element) -> Self {
        let draft = ElementDraft::from(element.props());
        Self {
            target: element.id().clone(),
            initial: draft.clone(),
            draft,
            errors: ValidationErrors::default(),
        }
    }

    /// Re-initialize from the element, discarding edits and errors.
    pub fn reset(&mut self, element: &Element) {
        *self = Self::for_element(element);
    }

    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn kind(&self) -> ElementKind {
        self.draft.kind()
    }

    /// Panel header, e.g. "Edit Text".
    pub fn title(&self) -> String {
        format!("Edit {}", self.kind())
    }

    pub fn draft(&self) -> &ElementDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ElementDraft {
        &mut self.draft
    }

    /// Check whether any value differs from what the form was opened with.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    /// Errors from the last failed submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Set a free-text field. Returns false if the field is not part of
    /// this element type's form.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match (&mut self.draft, field) {
            (ElementDraft::Text(d), Field::Content) => &mut d.content,
            (ElementDraft::Text(d), Field::FontSize) => &mut d.font_size,
            (ElementDraft::Text(d), Field::Color) => &mut d.color,
            (ElementDraft::Image(d), Field::Src) => &mut d.src,
            (ElementDraft::Image(d), Field::Alt) => &mut d.alt,
            (ElementDraft::Button(d), Field::Label) => &mut d.label,
            (ElementDraft::Button(d), Field::Link) => &mut d.link,
            (ElementDraft::Button(d), Field::Variant) => &mut d.variant,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Flip an image between URL and upload source. No-op for other types.
    pub fn set_use_upload(&mut self, use_upload: bool) -> bool {
        match &mut self.draft {
            ElementDraft::Image(d) => {
                d.use_upload = use_upload;
                true
            }
            _ => false,
        }
    }

    /// Pick a button style swatch. No-op for other types.
    pub fn select_variant(&mut self, variant: ButtonVariant) -> bool {
        self.set_field(Field::Variant, variant.name())
    }

    /// Put a finished upload into the draft, leaving other edits alone.
    pub fn apply_upload(&mut self, data_url: &DataUrl) -> bool {
        match &mut self.draft {
            ElementDraft::Image(d) => {
                d.src = data_url.as_str().to_string();
                d.uploaded_image = Some(data_url.as_str().to_string());
                true
            }
            _ => false,
        }
    }

    /// Validate and commit the draft into the target element.
    ///
    /// On success the form re-initializes from the committed element. On a
    /// validation failure the errors are kept for display and returned.
    pub fn submit(&mut self, state: &mut EditorState, config: &EditorConfig) -> EditorResult<bool> {
        match validation::commit(state, &self.target, &self.draft, config) {
            Ok(applied) => {
                self.errors = ValidationErrors::default();
                if let Some(element) = state.element(&self.target) {
                    self.reset(element);
                }
                Ok(applied)
            }
            Err(EditorError::Validation(errors)) => {
                self.errors = errors.clone();
                Err(EditorError::Validation(errors))
            }
            Err(e) => Err(e),
        }
    }
}
