//! Matching thresholds.
//!
//! The confidence values below are part of the engine's contract: callers
//! route on them (auto-add vs. ask the user), so overrides go through
//! [`MatchingConfig`] rather than edits to the constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confidence reported for a single exact/substring hit. Not configurable.
pub const EXACT_CONFIDENCE: f64 = 1.0;

/// Confidence reported when several products pass the exact/substring pass.
pub const AMBIGUOUS_CONFIDENCE: f64 = 0.9;

/// Confidence reported for candidates found by the token-overlap fallback.
pub const TOKEN_OVERLAP_CONFIDENCE: f64 = 0.7;

/// Minimum confidence at which a match may skip user confirmation.
pub const DEFAULT_AUTO_ADD_THRESHOLD: f64 = 0.9;

const ENV_AMBIGUOUS_CONFIDENCE: &str = "SHELFSCAN_AMBIGUOUS_CONFIDENCE";
const ENV_TOKEN_OVERLAP_CONFIDENCE: &str = "SHELFSCAN_TOKEN_OVERLAP_CONFIDENCE";
const ENV_AUTO_ADD_THRESHOLD: &str = "SHELFSCAN_AUTO_ADD_THRESHOLD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid matching config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a number within [0, 1] (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Confidence values and the auto-add threshold used by the classifier and
/// its callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub ambiguous_confidence: f64,
    pub token_overlap_confidence: f64,
    pub auto_add_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            ambiguous_confidence: AMBIGUOUS_CONFIDENCE,
            token_overlap_confidence: TOKEN_OVERLAP_CONFIDENCE,
            auto_add_threshold: DEFAULT_AUTO_ADD_THRESHOLD,
        }
    }
}

impl MatchingConfig {
    pub fn with_ambiguous_confidence(mut self, confidence: f64) -> Self {
        self.ambiguous_confidence = confidence;
        self
    }

    pub fn with_token_overlap_confidence(mut self, confidence: f64) -> Self {
        self.token_overlap_confidence = confidence;
        self
    }

    pub fn with_auto_add_threshold(mut self, threshold: f64) -> Self {
        self.auto_add_threshold = threshold;
        self
    }

    /// Parse a JSON object; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from `SHELFSCAN_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and
    /// ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str, default: f64| match lookup(key) {
            None => default,
            Some(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, default, "ignoring unparsable matching setting");
                default
            }),
        };

        let defaults = Self::default();
        let config = Self {
            ambiguous_confidence: read(ENV_AMBIGUOUS_CONFIDENCE, defaults.ambiguous_confidence),
            token_overlap_confidence: read(
                ENV_TOKEN_OVERLAP_CONFIDENCE,
                defaults.token_overlap_confidence,
            ),
            auto_add_threshold: read(ENV_AUTO_ADD_THRESHOLD, defaults.auto_add_threshold),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ambiguous_confidence", self.ambiguous_confidence),
            ("token_overlap_confidence", self.token_overlap_confidence),
            ("auto_add_threshold", self.auto_add_threshold),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Whether `confidence` clears this config's auto-add threshold.
    pub fn should_auto_add(&self, confidence: f64) -> bool {
        crate::policy::should_auto_add(confidence, self.auto_add_threshold)
    }
}
