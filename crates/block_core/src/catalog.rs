//! Block catalogs loaded from JSON.
//!
//! ```json
//! {
//!   "blocks": [
//!     { "id": "flat", "grid": "333333333", "weight": 4.0 },
//!     { "id": "ramp", "grid": "135135135", "rotation": { "axis": "z", "angle": 90 } }
//!   ]
//! }
//! ```
//!
//! Entries are validated on load: the grid must parse, the axis must be one of
//! x/y/z, the weight must be positive, and (when the session enforces it) the
//! grid must satisfy the height policy.

use crate::block::{rotation_variants, BlockConfiguration, KEY_SEPARATOR};
use crate::cache::AdjacencyCache;
use crate::config::SessionConfig;
use crate::edges::HeightGrid;
use crate::error::{BlockError, BlockResult, CatalogError};
use crate::rotation::{Axis, Rotation};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockEntry {
    id: String,
    grid: String,
    #[serde(default)]
    rotation: Option<RotationEntry>,
    #[serde(default = "default_weight")]
    weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RotationEntry {
    axis: String,
    #[serde(default)]
    angle: i32,
}

fn default_weight() -> f64 {
    1.0
}

/// The finite set of block configurations for one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    blocks: Vec<BlockConfiguration>,
}

impl Catalog {
    /// Wrap already-validated blocks, expanding rotations if configured.
    pub fn from_blocks(blocks: Vec<BlockConfiguration>, config: &SessionConfig) -> Self {
        if !config.expand_rotations {
            return Self { blocks };
        }

        let base_count = blocks.len();
        let blocks: Vec<BlockConfiguration> = blocks
            .iter()
            .flat_map(|b| rotation_variants(b, config.dedupe_variants))
            .collect();
        tracing::debug!(
            "Expanded {} catalog blocks into {} rotation variants",
            base_count,
            blocks.len()
        );
        Self { blocks }
    }

    pub fn load(path: impl AsRef<Path>, config: &SessionConfig) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text, config)?;
        tracing::info!("Loaded {} blocks from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(text: &str, config: &SessionConfig) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;

        let mut blocks = Vec::with_capacity(file.blocks.len());
        for entry in file.blocks {
            if !(entry.weight.is_finite() && entry.weight > 0.0) {
                return Err(CatalogError::InvalidWeight {
                    id: entry.id,
                    weight: entry.weight,
                });
            }
            let block = entry_to_block(&entry, config).map_err(|source| CatalogError::Block {
                id: entry.id.clone(),
                source,
            })?;
            blocks.push(block);
        }

        Ok(Self::from_blocks(blocks, config))
    }

    pub fn blocks(&self) -> &[BlockConfiguration] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn build_cache(&self) -> BlockResult<AdjacencyCache> {
        AdjacencyCache::build(&self.blocks)
    }
}

fn entry_to_block(entry: &BlockEntry, config: &SessionConfig) -> BlockResult<BlockConfiguration> {
    if entry.id.is_empty() {
        return Err(BlockError::invalid_id(&entry.id, "empty base id"));
    }
    if entry.id.contains(KEY_SEPARATOR) {
        return Err(BlockError::invalid_id(
            &entry.id,
            format!("base id may not contain '{}'", KEY_SEPARATOR),
        ));
    }

    let grid = HeightGrid::parse(&entry.grid)?;
    if let Some(policy) = config.active_policy() {
        policy.validate(&grid)?;
    }

    let mut block = BlockConfiguration::new(entry.id.clone(), grid).with_weight(entry.weight);
    if let Some(rotation) = &entry.rotation {
        let axis: Axis = rotation.axis.parse()?;
        block = block.with_rotation(Rotation::new(axis, rotation.angle));
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "blocks": [
            { "id": "flat", "grid": "333333333", "weight": 4.0 },
            { "id": "ramp", "grid": "135135135", "rotation": { "axis": "z", "angle": 90 } }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::from_json(SAMPLE, &SessionConfig::default()).unwrap();
        assert_eq!(catalog.len(), 2);

        let keys: Vec<String> = catalog.blocks().iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["flat", "ramp_z90"]);
        assert_eq!(catalog.blocks()[0].weight, 4.0);
        assert_eq!(catalog.blocks()[1].weight, 1.0);
    }

    #[test]
    fn test_expand_rotations() {
        let config = SessionConfig {
            expand_rotations: true,
            ..SessionConfig::default()
        };
        let catalog = Catalog::from_json(SAMPLE, &config).unwrap();
        // flat is uniform (1 variant), ramp has 4 distinct orientations.
        assert_eq!(catalog.len(), 5);
        let cache = catalog.build_cache().unwrap();
        assert!(cache.contains("ramp"));
        assert!(cache.contains("ramp_z270"));
    }

    #[test]
    fn test_expand_keeps_x_rotated_entry_whole() {
        let json = r#"{
            "blocks": [
                { "id": "ramp", "grid": "135135135" },
                { "id": "ramp", "grid": "135135135", "rotation": { "axis": "x", "angle": 90 } }
            ]
        }"#;
        let config = SessionConfig {
            expand_rotations: true,
            dedupe_variants: false,
            ..SessionConfig::default()
        };
        let catalog = Catalog::from_json(json, &config).unwrap();
        let keys: Vec<String> = catalog.blocks().iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["ramp", "ramp_z90", "ramp_z180", "ramp_z270", "ramp_x90"]);
        assert_eq!(catalog.build_cache().unwrap().len(), 5);
    }

    #[test]
    fn test_bad_axis_is_reported_with_id() {
        let json = r#"{ "blocks": [ { "id": "odd", "grid": "111111111", "rotation": { "axis": "w", "angle": 90 } } ] }"#;
        let err = Catalog::from_json(json, &SessionConfig::default()).unwrap_err();
        match err {
            CatalogError::Block { id, source } => {
                assert_eq!(id, "odd");
                assert_eq!(source, BlockError::InvalidAxis("w".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_grid_and_ids() {
        let config = SessionConfig::default();
        for json in [
            r#"{ "blocks": [ { "id": "short", "grid": "1111" } ] }"#,
            r#"{ "blocks": [ { "id": "a_b", "grid": "111111111" } ] }"#,
            r#"{ "blocks": [ { "id": "", "grid": "111111111" } ] }"#,
        ] {
            assert!(matches!(
                Catalog::from_json(json, &config),
                Err(CatalogError::Block { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_weight() {
        let json = r#"{ "blocks": [ { "id": "a", "grid": "111111111", "weight": 0.0 } ] }"#;
        assert!(matches!(
            Catalog::from_json(json, &SessionConfig::default()),
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_height_policy_enforced_when_enabled() {
        let json = r#"{ "blocks": [ { "id": "even", "grid": "222222222" } ] }"#;
        assert!(Catalog::from_json(json, &SessionConfig::default()).is_ok());

        let strict = SessionConfig {
            enforce_height_policy: true,
            ..SessionConfig::default()
        };
        assert!(matches!(
            Catalog::from_json(json, &strict),
            Err(CatalogError::Block {
                source: BlockError::InvalidGrid(_),
                ..
            })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path(), &SessionConfig::default()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{ not json", &SessionConfig::default()),
            Err(CatalogError::Json(_))
        ));
    }
}
