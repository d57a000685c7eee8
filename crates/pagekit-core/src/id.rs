//! Element identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default number of characters in a generated id.
pub const DEFAULT_ID_LENGTH: usize = 9;

/// Number of characters shown in the property panel badge.
const SHORT_ID_LENGTH: usize = 4;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique identifier for a placed element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a random base-36 id of `len` characters.
    ///
    /// Randomness comes from v4 UUIDs; a fresh one is drawn every 20 characters.
    pub fn generate(len: usize) -> Self {
        let mut out = String::with_capacity(len);
        let mut bits = Uuid::new_v4().as_u128();
        let mut remaining = 122u32;
        while out.len() < len {
            if remaining < 6 {
                bits = Uuid::new_v4().as_u128();
                remaining = 122;
            }
            out.push(ALPHABET[(bits % 36) as usize] as char);
            bits /= 36;
            remaining -= 6;
        }
        Self(out)
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters shown in the property panel badge.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LENGTH) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
