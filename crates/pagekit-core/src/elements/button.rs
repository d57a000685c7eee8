//! Button element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
    OutlinePrimary,
    OutlineSecondary,
}

impl ButtonVariant {
    /// Style name used in forms and markup.
    pub fn name(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Success => "success",
            ButtonVariant::Danger => "danger",
            ButtonVariant::Warning => "warning",
            ButtonVariant::Info => "info",
            ButtonVariant::Light => "light",
            ButtonVariant::Dark => "dark",
            ButtonVariant::OutlinePrimary => "outline-primary",
            ButtonVariant::OutlineSecondary => "outline-secondary",
        }
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "Primary",
            ButtonVariant::Secondary => "Secondary",
            ButtonVariant::Success => "Success",
            ButtonVariant::Danger => "Danger",
            ButtonVariant::Warning => "Warning",
            ButtonVariant::Info => "Info",
            ButtonVariant::Light => "Light",
            ButtonVariant::Dark => "Dark",
            ButtonVariant::OutlinePrimary => "Outline Primary",
            ButtonVariant::OutlineSecondary => "Outline Secondary",
        }
    }

    /// Parse a style name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.name() == name)
    }

    /// Get all variants, in the order the style picker lists them.
    pub fn all() -> &'static [ButtonVariant] {
        &[
            ButtonVariant::Primary,
            ButtonVariant::Secondary,
            ButtonVariant::Success,
            ButtonVariant::Danger,
            ButtonVariant::Warning,
            ButtonVariant::Info,
            ButtonVariant::Light,
            ButtonVariant::Dark,
            ButtonVariant::OutlinePrimary,
            ButtonVariant::OutlineSecondary,
        ]
    }

    /// Variants offered as one-click swatches.
    pub fn swatches() -> &'static [ButtonVariant] {
        &Self::all()[..6]
    }
}

impl fmt::Display for ButtonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Properties of a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonProps {
    /// Button text.
    pub label: String,
    /// Link target.
    pub link: String,
    /// Button style.
    pub variant: ButtonVariant,
}

impl ButtonProps {
    /// Link target, live only in preview mode.
    pub fn href(&self, preview: bool) -> Option<&str> {
        preview.then_some(self.link.as_str())
    }

    pub(crate) fn apply(&mut self, patch: ButtonPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(variant) = patch.variant {
            self.variant = variant;
        }
    }
}

/// Partial update for a button.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonPatch {
    pub label: Option<String>,
    pub link: Option<String>,
    pub variant: Option<ButtonVariant>,
}

impl From<ButtonProps> for ButtonPatch {
    fn from(props: ButtonProps) -> Self {
        Self {
            label: Some(props.label),
            link: Some(props.link),
            variant: Some(props.variant),
        }
    }
}
