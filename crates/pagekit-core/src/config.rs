//! Editor configuration.

use crate::error::{EditorError, EditorResult};
use crate::id::DEFAULT_ID_LENGTH;
use serde::{Deserialize, Serialize};

/// Tunable limits for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest accepted text font size (inclusive).
    pub font_size_min: f64,
    /// Largest accepted text font size (inclusive).
    pub font_size_max: f64,
    /// Length of generated element ids.
    pub id_length: usize,
    /// URL schemes accepted for image sources.
    pub url_schemes: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size_min: 8.0,
            font_size_max: 72.0,
            id_length: DEFAULT_ID_LENGTH,
            url_schemes: vec!["http".to_string(), "https".to_string(), "ftp".to_string()],
        }
    }
}

impl EditorConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> EditorResult<()> {
        if !self.font_size_min.is_finite() || !self.font_size_max.is_finite() {
            return Err(EditorError::Config("font size bounds must be finite".to_string()));
        }
        if self.font_size_min > self.font_size_max {
            return Err(EditorError::Config(format!(
                "font_size_min {} exceeds font_size_max {}",
                self.font_size_min, self.font_size_max
            )));
        }
        if self.id_length == 0 {
            return Err(EditorError::Config("id_length must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Check whether a URL scheme is accepted for image sources.
    pub fn accepts_scheme(&self, scheme: &str) -> bool {
        self.url_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.font_size_min, 8.0);
        assert_eq!(config.font_size_max, 72.0);
        assert_eq!(config.id_length, 9);
        assert!(config.accepts_scheme("https"));
        assert!(config.accepts_scheme("HTTP"));
        assert!(!config.accepts_scheme("javascript"));
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "font_size_max": 96 }"#).unwrap();
        assert_eq!(config.font_size_max, 96.0);
        assert_eq!(config.font_size_min, 8.0);
        assert_eq!(config.id_length, 9);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result = EditorConfig::from_json(r#"{ "font_size_min": 80, "font_size_max": 72 }"#);
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_id_length() {
        let result = EditorConfig::from_json(r#"{ "id_length": 0 }"#);
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(EditorError::ConfigParse(_))));
    }
}
