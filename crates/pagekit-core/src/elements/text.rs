//! Text block element.

use serde::{Deserialize, Serialize};

/// Properties of a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS color, `#rrggbb` when set from the picker.
    pub color: String,
}

impl TextProps {
    pub(crate) fn apply(&mut self, patch: TextPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial update for a text block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPatch {
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
}

impl From<TextProps> for TextPatch {
    fn from(props: TextProps) -> Self {
        Self {
            content: Some(props.content),
            font_size: Some(props.font_size),
            color: Some(props.color),
        }
    }
}
