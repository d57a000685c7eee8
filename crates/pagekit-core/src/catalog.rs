//! Element catalog: default properties and the sidebar palette.

use crate::elements::{ButtonProps, ButtonVariant, ElementKind, ElementProps, ImageProps, TextProps};

/// Placeholder shown for a freshly placed image.
pub const DEFAULT_IMAGE_SRC: &str = "https://via.placeholder.com/300x200";

/// Palette section an entry is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Content,
    Interactive,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Content => "Content",
            Section::Interactive => "Interactive",
        }
    }
}

/// A draggable palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: ElementKind,
    pub label: &'static str,
    pub section: Section,
}

static ENTRIES: [CatalogEntry; 3] = [
    CatalogEntry {
        kind: ElementKind::Text,
        label: "Text Block",
        section: Section::Content,
    },
    CatalogEntry {
        kind: ElementKind::Image,
        label: "Image",
        section: Section::Content,
    },
    CatalogEntry {
        kind: ElementKind::Button,
        label: "Button",
        section: Section::Interactive,
    },
];

/// Default properties for a new element of `kind`.
///
/// Every call builds a fresh value, so elements never share defaults.
pub fn defaults_for(kind: ElementKind) -> ElementProps {
    match kind {
        ElementKind::Text => ElementProps::Text(TextProps {
            content: "Text content".to_string(),
            font_size: 16.0,
            color: "#000000".to_string(),
        }),
        ElementKind::Image => ElementProps::Image(ImageProps {
            src: DEFAULT_IMAGE_SRC.to_string(),
            alt: "Image description".to_string(),
            use_upload: false,
            uploaded_image: None,
        }),
        ElementKind::Button => ElementProps::Button(ButtonProps {
            label: "Button".to_string(),
            link: "#".to_string(),
            variant: ButtonVariant::Primary,
        }),
    }
}

/// All palette entries in display order.
pub fn entries() -> &'static [CatalogEntry] {
    &ENTRIES
}

/// Palette entries listed under one section.
pub fn entries_in(section: Section) -> impl Iterator<Item = &'static CatalogEntry> {
    ENTRIES.iter().filter(move |e| e.section == section)
}

/// Look up the palette entry for a kind.
pub fn entry(kind: ElementKind) -> &'static CatalogEntry {
    match kind {
        ElementKind::Text => &ENTRIES[0],
        ElementKind::Image => &ENTRIES[1],
        ElementKind::Button => &ENTRIES[2],
    }
}
