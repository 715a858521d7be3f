//! Configuration for the extractors

use serde::{Deserialize, Serialize};

/// Configuration shared by the concrete extractors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum document text length sent to the model (characters);
    /// longer documents are truncated with a warning
    pub max_text_length: usize,

    /// Confidence assigned to values recovered by the line-scan fallback
    /// when the model's reply contains no parseable JSON
    pub fallback_confidence: f64,

    /// Default priority of the personal-data extractor (higher runs earlier)
    pub personal_priority: i32,

    /// Default priority of the tabular-data extractor
    pub tabular_priority: i32,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.fallback_confidence) {
            return Err("fallback_confidence must be within [0.0, 1.0]".to_string());
        }
        Ok(())
    }

    /// Lenient preset: larger documents for slower but fuller processing
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            fallback_confidence: 0.6,
            personal_priority: 100,
            tabular_priority: 50,
        }
    }
}
