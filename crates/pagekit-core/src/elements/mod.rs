//! Element definitions for the page canvas.

mod button;
mod image;
mod text;

pub use button::{ButtonPatch, ButtonProps, ButtonVariant};
pub use image::{ImageFormat, ImagePatch, ImageProps};
pub use text::{TextPatch, TextProps};

use crate::error::EditorError;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Text,
    Image,
    Button,
}

impl ElementKind {
    /// Get the type tag as shown in badges and panel headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::Button => "Button",
        }
    }

    /// Parse a type tag (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(ElementKind::Text),
            "image" => Some(ElementKind::Image),
            "button" => Some(ElementKind::Button),
            _ => None,
        }
    }

    /// Get all element kinds.
    pub fn all() -> &'static [ElementKind] {
        &[ElementKind::Text, ElementKind::Image, ElementKind::Button]
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific properties of an element.
///
/// The variant is the element's type, so a props value can never carry
/// fields belonging to another type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementProps {
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
}

impl ElementProps {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementProps::Text(_) => ElementKind::Text,
            ElementProps::Image(_) => ElementKind::Image,
            ElementProps::Button(_) => ElementKind::Button,
        }
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match self {
            ElementProps::Text(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageProps> {
        match self {
            ElementProps::Image(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&ButtonProps> {
        match self {
            ElementProps::Button(p) => Some(p),
            _ => None,
        }
    }

    /// Shallow-merge a patch into these props.
    ///
    /// Fields set in the patch overwrite, unset fields are kept. A patch for a
    /// different element type is rejected and leaves the props untouched.
    pub fn merge(&mut self, patch: PropsPatch) -> Result<(), EditorError> {
        match (self, patch) {
            (ElementProps::Text(p), PropsPatch::Text(patch)) => p.apply(patch),
            (ElementProps::Image(p), PropsPatch::Image(patch)) => p.apply(patch),
            (ElementProps::Button(p), PropsPatch::Button(patch)) => p.apply(patch),
            (props, patch) => {
                return Err(EditorError::KindMismatch {
                    expected: props.kind(),
                    found: patch.kind(),
                });
            }
        }
        Ok(())
    }
}

/// A partial update for one element type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropsPatch {
    Text(TextPatch),
    Image(ImagePatch),
    Button(ButtonPatch),
}

impl PropsPatch {
    pub fn kind(&self) -> ElementKind {
        match self {
            PropsPatch::Text(_) => ElementKind::Text,
            PropsPatch::Image(_) => ElementKind::Image,
            PropsPatch::Button(_) => ElementKind::Button,
        }
    }

    /// Check whether the patch sets no fields at all.
    pub fn is_empty(&self) -> bool {
        match self {
            PropsPatch::Text(p) => *p == TextPatch::default(),
            PropsPatch::Image(p) => *p == ImagePatch::default(),
            PropsPatch::Button(p) => *p == ButtonPatch::default(),
        }
    }
}

impl From<TextPatch> for PropsPatch {
    fn from(patch: TextPatch) -> Self {
        PropsPatch::Text(patch)
    }
}

impl From<ImagePatch> for PropsPatch {
    fn from(patch: ImagePatch) -> Self {
        PropsPatch::Image(patch)
    }
}

impl From<ButtonPatch> for PropsPatch {
    fn from(patch: ButtonPatch) -> Self {
        PropsPatch::Button(patch)
    }
}

/// A full props value as a patch that sets every field.
impl From<ElementProps> for PropsPatch {
    fn from(props: ElementProps) -> Self {
        match props {
            ElementProps::Text(p) => PropsPatch::Text(p.into()),
            ElementProps::Image(p) => PropsPatch::Image(p.into()),
            ElementProps::Button(p) => PropsPatch::Button(p.into()),
        }
    }
}

/// A placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) props: ElementProps,
}

impl Element {
    pub(crate) fn new(id: ElementId, props: ElementProps) -> Self {
        Self { id, props }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }

    pub fn props(&self) -> &ElementProps {
        &self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults_for;

    #[test]
    fn test_kind_names() {
        for kind in ElementKind::all() {
            assert_eq!(ElementKind::from_name(kind.as_str()), Some(*kind));
        }
        assert_eq!(ElementKind::from_name("BUTTON"), Some(ElementKind::Button));
        assert_eq!(ElementKind::from_name("video"), None);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut props = defaults_for(ElementKind::Text);
        props
            .merge(TextPatch {
                font_size: Some(24.0),
                ..Default::default()
            }
            .into())
            .unwrap();

        let text = props.as_text().unwrap();
        assert_eq!(text.font_size, 24.0);
        assert_eq!(text.content, "Text content");
        assert_eq!(text.color, "#000000");
    }

    #[test]
    fn test_merge_rejects_other_kind() {
        let mut props = defaults_for(ElementKind::Button);
        let before = props.clone();
        let result = props.merge(
            TextPatch {
                content: Some("hi".to_string()),
                ..Default::default()
            }
            .into(),
        );

        assert!(matches!(
            result,
            Err(EditorError::KindMismatch {
                expected: ElementKind::Button,
                found: ElementKind::Text
            })
        ));
        assert_eq!(props, before);
    }

    #[test]
    fn test_full_props_as_patch() {
        let patch = PropsPatch::from(defaults_for(ElementKind::Image));
        assert_eq!(patch.kind(), ElementKind::Image);
        assert!(!patch.is_empty());
        assert!(PropsPatch::Image(ImagePatch::default()).is_empty());
    }

    #[test]
    fn test_props_json_shape() {
        let json = serde_json::to_value(defaults_for(ElementKind::Text)).unwrap();
        assert_eq!(json["type"], "Text");
        assert_eq!(json["fontSize"], 16.0);

        let json = serde_json::to_value(defaults_for(ElementKind::Image)).unwrap();
        assert_eq!(json["useUpload"], false);
        assert!(json["uploadedImage"].is_null());
    }
}
