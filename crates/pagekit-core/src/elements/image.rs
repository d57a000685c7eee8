//! Image element, sourced from a URL or an uploaded file.

use serde::{Deserialize, Serialize};

/// Image format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// GIF format.
    Gif,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Format named by a file extension such as `jpg` or `PNG`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        [
            ("png", ImageFormat::Png),
            ("jpg", ImageFormat::Jpeg),
            ("jpeg", ImageFormat::Jpeg),
            ("gif", ImageFormat::Gif),
            ("webp", ImageFormat::WebP),
        ]
        .into_iter()
        .find(|(name, _)| ext.eq_ignore_ascii_case(name))
        .map(|(_, format)| format)
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return Some(ImageFormat::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// Properties of an image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// Image source: an absolute URL, or a data URL after an upload.
    pub src: String,
    /// Alternative text.
    pub alt: String,
    /// Whether the source comes from a local upload instead of a URL.
    pub use_upload: bool,
    /// The uploaded data URL, if a file has been read.
    pub uploaded_image: Option<String>,
}

impl ImageProps {
    /// Caption shown under the image while editing.
    pub fn caption(&self) -> &str {
        if self.alt.is_empty() { "Image" } else { &self.alt }
    }

    pub(crate) fn apply(&mut self, patch: ImagePatch) {
        if let Some(src) = patch.src {
            self.src = src;
        }
        if let Some(alt) = patch.alt {
            self.alt = alt;
        }
        if let Some(use_upload) = patch.use_upload {
            self.use_upload = use_upload;
        }
        if let Some(uploaded_image) = patch.uploaded_image {
            self.uploaded_image = uploaded_image;
        }
    }
}

/// Partial update for an image element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePatch {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub use_upload: Option<bool>,
    /// `Some(None)` clears the uploaded image.
    pub uploaded_image: Option<Option<String>>,
}

impl ImagePatch {
    /// Patch touching only the two fields an upload produces.
    pub fn upload(data_url: &str) -> Self {
        Self {
            src: Some(data_url.to_string()),
            uploaded_image: Some(Some(data_url.to_string())),
            ..Default::default()
        }
    }
}

impl From<ImageProps> for ImagePatch {
    fn from(props: ImageProps) -> Self {
        Self {
            src: Some(props.src),
            alt: Some(props.alt),
            use_upload: Some(props.use_upload),
            uploaded_image: Some(props.uploaded_image),
        }
    }
}
