//! Session configuration.
//!
//! Loaded from a JSON file where every field is optional:
//!
//! ```json
//! {
//!   "enforce_height_policy": true,
//!   "height_policy": { "edge_heights": [1, 3, 5] },
//!   "expand_rotations": true,
//!   "generation": { "width": 12, "height": 6, "seed": 7 }
//! }
//! ```

use crate::error::CatalogError;
use crate::policy::HeightPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one placement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Validate catalog grids (and sculpting) against `height_policy`.
    pub enforce_height_policy: bool,
    pub height_policy: HeightPolicy,
    /// Add Z quarter-turn variants of every catalog block.
    pub expand_rotations: bool,
    /// Drop rotation variants whose edges duplicate an earlier variant.
    pub dedupe_variants: bool,
    pub generation: GenerationConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enforce_height_policy: false,
            height_policy: HeightPolicy::default(),
            expand_rotations: false,
            dedupe_variants: true,
            generation: GenerationConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Policy to apply, if enforcement is enabled.
    pub fn active_policy(&self) -> Option<&HeightPolicy> {
        self.enforce_height_policy.then_some(&self.height_policy)
    }
}

/// Region size and randomness for the generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    /// Restarts allowed after a contradiction.
    pub tries: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            seed: 0,
            tries: 10,
        }
    }
}
