//! Codec configuration.
//!
//! Both option structs deserialize with defaults for missing fields, so an
//! application can embed them in its own config file.

use serde::{Deserialize, Serialize};

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What the decoder does when an object repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeys {
    /// First occurrence fixes the position, last occurrence sets the value.
    #[default]
    LastWins,
    /// First occurrence fixes both position and value.
    FirstWins,
    /// Fail with [`ParseError::DuplicateKey`](super::ParseError::DuplicateKey).
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub duplicate_keys: DuplicateKeys,
    /// Maximum number of nested containers, counting the top-level object.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Maximum number of nested containers, counting the top-level object.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
