//! PageKit Core Library
//!
//! Platform-agnostic editor state for the PageKit visual page builder: the
//! layout of placed elements, selection, preview mode and validated property
//! edits. Rendering and input handling live in the embedding UI.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod elements;
pub mod error;
pub mod form;
pub mod id;
pub mod layout;
pub mod session;
pub mod upload;
pub mod validation;

pub use catalog::{CatalogEntry, Section, defaults_for};
pub use config::EditorConfig;
pub use editor::{EditorEvent, EditorState, Listener, SubscriptionId};
pub use elements::{
    ButtonPatch, ButtonProps, ButtonVariant, Element, ElementKind, ElementProps, ImageFormat,
    ImagePatch, ImageProps, PropsPatch, TextPatch, TextProps,
};
pub use error::{EditorError, EditorResult};
pub use form::{ButtonDraft, ElementDraft, ImageDraft, PropertyForm, TextDraft};
pub use id::ElementId;
pub use layout::Layout;
pub use session::{EditorSession, ElementControls};
pub use upload::{DataUrl, UploadTicket};
pub use validation::{Field, FieldError, FieldErrorKind, ValidationErrors, validate};
