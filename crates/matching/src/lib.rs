//! Label matching engine.
//!
//! Turns noisy OCR text from a product label into a match decision against a
//! catalog snapshot. Everything here is pure: no IO, no shared state, and no
//! error paths. Empty or garbage input simply classifies as [`MatchResult::None`].

pub mod classify;
pub mod config;
pub mod normalize;
pub mod policy;
pub mod similarity;

pub use classify::{MatchResult, classify_match, classify_match_with};
pub use config::{
    AMBIGUOUS_CONFIDENCE, ConfigError, DEFAULT_AUTO_ADD_THRESHOLD, EXACT_CONFIDENCE,
    MatchingConfig, TOKEN_OVERLAP_CONFIDENCE,
};
pub use normalize::normalize_for_storage;
pub use policy::should_auto_add;
pub use similarity::{levenshtein, similarity};
