//! Image upload conversion.
//!
//! A file picked by the user is turned into a self-contained `data:` URL that
//! can stand in for an image's `src`. Reading the file happens outside the
//! core; the editor hands out an [`UploadTicket`] when the read starts and
//! takes it back with the payload when the read completes.

use crate::elements::ImageFormat;
use crate::error::{EditorError, EditorResult};
use crate::id::ElementId;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;
use std::path::Path;

const DATA_PREFIX: &str = "data:";

/// An embedded image payload, `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode raw file bytes.
    ///
    /// `mime_hint` is the type the file picker reported. It is used when it
    /// names an image type; otherwise the format is sniffed from the bytes.
    pub fn encode(data: &[u8], mime_hint: Option<&str>) -> EditorResult<Self> {
        if data.is_empty() {
            return Err(EditorError::UnsupportedImage("empty file".to_string()));
        }
        let mime = match mime_hint.map(str::trim).filter(|m| m.starts_with("image/")) {
            Some(mime) => mime.to_string(),
            None => ImageFormat::from_magic_bytes(data)
                .map(|f| f.mime_type().to_string())
                .ok_or_else(|| {
                    EditorError::UnsupportedImage("unrecognized image format".to_string())
                })?,
        };
        Ok(Self(format!("{DATA_PREFIX}{mime};base64,{}", STANDARD.encode(data))))
    }

    /// Encode a picked file, typed by its extension when it has a known one.
    pub fn encode_file(file_name: &str, data: &[u8]) -> EditorResult<Self> {
        let format = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension);
        Self::encode(data, format.map(|f| f.mime_type()))
    }

    /// Accept a payload that is already a data URL.
    pub fn parse(raw: &str) -> EditorResult<Self> {
        let Some(rest) = raw.strip_prefix(DATA_PREFIX) else {
            return Err(EditorError::InvalidDataUrl("missing data: prefix".to_string()));
        };
        if !rest.contains(',') {
            return Err(EditorError::InvalidDataUrl("missing payload separator".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type from the header, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        let header = self.header();
        header.split(';').next().unwrap_or(header)
    }

    /// Decode the payload if it is base64-encoded.
    pub fn decode(&self) -> Option<Vec<u8>> {
        if !self.header().ends_with(";base64") {
            return None;
        }
        let (_, payload) = self.0.split_once(',')?;
        STANDARD.decode(payload).ok()
    }

    fn header(&self) -> &str {
        let rest = &self.0[DATA_PREFIX.len()..];
        rest.split_once(',').map_or(rest, |(header, _)| header)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file read in flight for one image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub(crate) target: ElementId,
    pub(crate) seq: u64,
}

impl UploadTicket {
    /// The image element the upload was started for.
    pub fn target(&self) -> &ElementId {
        &self.target
    }

    /// Sequence number within the session.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}
