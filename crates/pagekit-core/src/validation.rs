//! Property validation and commit.
//!
//! Form drafts are checked field by field before anything reaches the store.
//! A draft that passes becomes typed [`ElementProps`]; one that fails yields
//! every field error at once so the form can show them side by side.

use crate::config::EditorConfig;
use crate::editor::EditorState;
use crate::elements::{ButtonProps, ButtonVariant, ElementProps, ImageProps, TextProps};
use crate::error::EditorResult;
use crate::form::{ButtonDraft, ElementDraft, ImageDraft, TextDraft};
use crate::id::ElementId;
use std::fmt;
use thiserror::Error;
use url::Url;

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Content,
    FontSize,
    Color,
    Src,
    Alt,
    Label,
    Link,
    Variant,
}

impl Field {
    /// Property key as the form names it.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Content => "content",
            Field::FontSize => "fontSize",
            Field::Color => "color",
            Field::Src => "src",
            Field::Alt => "alt",
            Field::Label => "label",
            Field::Link => "link",
            Field::Variant => "variant",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldErrorKind {
    #[error("Required")]
    Required,
    #[error("Must be a number")]
    NotANumber,
    #[error("Min {min}px")]
    TooSmall { min: f64 },
    #[error("Max {max}px")]
    TooLarge { max: f64 },
    #[error("Must be a valid URL")]
    InvalidUrl,
    #[error("Unknown button style")]
    UnknownVariant,
}

impl FieldErrorKind {
    /// Check if this is a numeric range violation.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::TooSmall { .. } | Self::TooLarge { .. })
    }
}

/// A single field-level error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

/// All field errors found in one draft.
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    fn push(&mut self, field: Field, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First error reported for a field.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }
}

/// Validate a draft, producing typed props when every field passes.
pub fn validate(
    draft: &ElementDraft,
    config: &EditorConfig,
) -> Result<ElementProps, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let props = match draft {
        ElementDraft::Text(d) => validate_text(d, config, &mut errors).map(ElementProps::Text),
        ElementDraft::Image(d) => validate_image(d, config, &mut errors).map(ElementProps::Image),
        ElementDraft::Button(d) => validate_button(d, &mut errors).map(ElementProps::Button),
    };
    match props {
        Some(props) if errors.is_empty() => Ok(props),
        _ => Err(errors),
    }
}

/// Validate a draft and, if it passes, merge it into the element.
///
/// On failure the store is untouched and the field errors come back as
/// [`EditorError::Validation`](crate::EditorError::Validation).
/// Returns `Ok(false)` if the element no longer exists.
pub fn commit(
    state: &mut EditorState,
    id: &ElementId,
    draft: &ElementDraft,
    config: &EditorConfig,
) -> EditorResult<bool> {
    let props = validate(draft, config)?;
    state.update_element_props(id, props)
}

fn required(value: &str, field: Field, errors: &mut ValidationErrors) -> bool {
    if value.trim().is_empty() {
        errors.push(field, FieldErrorKind::Required);
        false
    } else {
        true
    }
}

fn validate_text(
    draft: &TextDraft,
    config: &EditorConfig,
    errors: &mut ValidationErrors,
) -> Option<TextProps> {
    required(&draft.content, Field::Content, errors);
    let font_size = parse_font_size(&draft.font_size, config, errors);
    required(&draft.color, Field::Color, errors);

    Some(TextProps {
        content: draft.content.clone(),
        font_size: font_size?,
        color: draft.color.clone(),
    })
}

fn parse_font_size(raw: &str, config: &EditorConfig, errors: &mut ValidationErrors) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(Field::FontSize, FieldErrorKind::Required);
        return None;
    }
    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            errors.push(Field::FontSize, FieldErrorKind::NotANumber);
            return None;
        }
    };
    if value < config.font_size_min {
        let kind = FieldErrorKind::TooSmall {
            min: config.font_size_min,
        };
        errors.push(Field::FontSize, kind);
        return None;
    }
    if value > config.font_size_max {
        let kind = FieldErrorKind::TooLarge {
            max: config.font_size_max,
        };
        errors.push(Field::FontSize, kind);
        return None;
    }
    Some(value)
}

fn validate_image(
    draft: &ImageDraft,
    config: &EditorConfig,
    errors: &mut ValidationErrors,
) -> Option<ImageProps> {
    // Uploaded sources hold a data payload, not a URL.
    if !draft.use_upload
        && required(&draft.src, Field::Src, errors)
        && !is_absolute_url(draft.src.trim(), config)
    {
        errors.push(Field::Src, FieldErrorKind::InvalidUrl);
    }
    required(&draft.alt, Field::Alt, errors);

    Some(ImageProps {
        src: draft.src.clone(),
        alt: draft.alt.clone(),
        use_upload: draft.use_upload,
        uploaded_image: draft.uploaded_image.clone(),
    })
}

fn is_absolute_url(raw: &str, config: &EditorConfig) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            config.accepts_scheme(url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

fn validate_button(draft: &ButtonDraft, errors: &mut ValidationErrors) -> Option<ButtonProps> {
    required(&draft.label, Field::Label, errors);
    required(&draft.link, Field::Link, errors);
    let variant = if required(&draft.variant, Field::Variant, errors) {
        let variant = ButtonVariant::from_name(draft.variant.trim());
        if variant.is_none() {
            errors.push(Field::Variant, FieldErrorKind::UnknownVariant);
        }
        variant
    } else {
        None
    };

    Some(ButtonProps {
        label: draft.label.clone(),
        link: draft.link.clone(),
        variant: variant?,
    })
}
