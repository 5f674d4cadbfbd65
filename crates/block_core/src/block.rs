//! Block configurations and their composite keys.
//!
//! A block is an identifier, a height grid and an optional rotation. Rotated
//! variants of the same base block are separate placement candidates and are
//! addressed by a composite key, `"<base>_<axis><angle>"` (e.g. `"ramp_z90"`).
//! Unrotated and zero-angle blocks use the bare base id.

use crate::edges::{extract_edges, EdgeSet, HeightGrid};
use crate::error::{BlockError, BlockResult};
use crate::rotation::{Axis, Rotation};

/// Separator between base id and rotation suffix in composite keys.
pub const KEY_SEPARATOR: char = '_';

/// A block placement candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockConfiguration {
    pub id: String,
    pub grid: HeightGrid,
    pub rotation: Option<Rotation>,
    /// Relative likelihood of being picked during generation.
    pub weight: f64,
}

impl BlockConfiguration {
    pub fn new(id: impl Into<String>, grid: HeightGrid) -> Self {
        Self {
            id: id.into(),
            grid,
            rotation: None,
            weight: 1.0,
        }
    }

    /// Convenience constructor from a digit string.
    pub fn parse(id: impl Into<String>, digits: &str) -> BlockResult<Self> {
        Ok(Self::new(id, HeightGrid::parse(digits)?))
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Composite key distinguishing this rotation variant.
    pub fn key(&self) -> String {
        block_key(&self.id, self.rotation)
    }
}

/// Edges of `block` after applying its rotation.
pub fn effective_edges(block: &BlockConfiguration) -> EdgeSet {
    let edges = extract_edges(&block.grid);
    match block.rotation {
        Some(rotation) => rotation.apply(&edges),
        None => edges,
    }
}

/// Encode a composite key.
pub fn block_key(base_id: &str, rotation: Option<Rotation>) -> String {
    match rotation {
        Some(r) if !r.is_identity() => {
            format!("{}{}{}{}", base_id, KEY_SEPARATOR, r.axis.letter(), r.angle())
        }
        _ => base_id.to_string(),
    }
}

/// Decode a composite key back into base id and rotation.
///
/// A bare id decodes to no rotation. Fails on more than one separator, an
/// empty base, an unknown axis letter, or an angle that is not a
/// multiple of 90.
pub fn decode_block_key(key: &str) -> BlockResult<(String, Option<Rotation>)> {
    let mut parts = key.split(KEY_SEPARATOR);
    let base = parts.next().unwrap_or_default();
    let suffix = parts.next();

    if parts.next().is_some() {
        return Err(BlockError::invalid_id(key, "more than one separator"));
    }
    if base.is_empty() {
        return Err(BlockError::invalid_id(key, "empty base id"));
    }

    let Some(suffix) = suffix else {
        return Ok((base.to_string(), None));
    };

    let mut chars = suffix.chars();
    let axis = chars
        .next()
        .and_then(Axis::from_letter)
        .ok_or_else(|| BlockError::invalid_id(key, "unrecognized axis letter"))?;

    let angle_str = chars.as_str();
    let angle: i32 = angle_str
        .parse()
        .map_err(|_| BlockError::invalid_id(key, format!("non-numeric angle '{}'", angle_str)))?;
    if angle % 90 != 0 {
        return Err(BlockError::invalid_id(
            key,
            format!("angle {} is not a multiple of 90", angle),
        ));
    }

    let rotation = Rotation::new(axis, angle);
    if rotation.is_identity() {
        return Ok((base.to_string(), None));
    }
    Ok((base.to_string(), Some(rotation)))
}

/// The block followed by its Z-axis quarter-turn variants.
///
/// With `dedupe`, a variant whose effective edges equal an earlier variant of
/// the same base is dropped, since it can never place differently.
///
/// A composite key carries a single rotation, so blocks already rotated about
/// X or Y are returned unexpanded.
pub fn rotation_variants(block: &BlockConfiguration, dedupe: bool) -> Vec<BlockConfiguration> {
    let base_turns = match block.rotation {
        None => 0,
        Some(r) if r.axis == Axis::Z || r.is_identity() => r.angle() as i32,
        Some(r) => {
            tracing::warn!(
                "not expanding {}: Z variants cannot be combined with a {} rotation",
                block.key(),
                r
            );
            return vec![block.clone()];
        }
    };

    let mut variants: Vec<BlockConfiguration> = Vec::with_capacity(4);
    let mut seen: Vec<EdgeSet> = Vec::with_capacity(4);

    for quarter in 0..4 {
        let variant = if quarter == 0 {
            block.clone()
        } else {
            let rotation = Rotation::new(Axis::Z, base_turns + quarter * 90);
            BlockConfiguration {
                rotation: Some(rotation),
                ..block.clone()
            }
        };

        let edges = effective_edges(&variant);
        if dedupe && seen.contains(&edges) {
            tracing::debug!("skipping symmetric variant {}", variant.key());
            continue;
        }
        seen.push(edges);
        variants.push(variant);
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_key_encoding() {
        assert_eq!(block_key("ramp", None), "ramp");
        assert_eq!(block_key("ramp", Some(Rotation::new(Axis::Z, 0))), "ramp");
        assert_eq!(block_key("ramp", Some(Rotation::new(Axis::Z, 90))), "ramp_z90");
        assert_eq!(block_key("ramp", Some(Rotation::new(Axis::X, -90))), "ramp_x270");
    }

    #[test]
    fn test_key_roundtrip() {
        for base in ["a", "hill", "Block9"] {
            assert_eq!(
                decode_block_key(&block_key(base, None)).unwrap(),
                (base.to_string(), None)
            );
            for axis in Axis::ALL {
                for angle in [90, 180, 270] {
                    let r = Rotation::new(axis, angle);
                    assert_eq!(
                        decode_block_key(&block_key(base, Some(r))).unwrap(),
                        (base.to_string(), Some(r))
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_angle_suffix_decodes_to_none() {
        assert_eq!(decode_block_key("hill_z0").unwrap(), ("hill".to_string(), None));
    }

    #[test]
    fn test_decode_rejects_malformed_keys() {
        for key in ["a_z90_x90", "_z90", "a_q90", "a_zabc", "a_z", "a_z45", "a_"] {
            assert!(
                matches!(decode_block_key(key), Err(BlockError::InvalidId { .. })),
                "{} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_effective_edges_applies_rotation() {
        let block = BlockConfiguration::parse("a", "123456789").unwrap();
        let rotated = block.clone().with_rotation(Rotation::new(Axis::Z, 90));

        assert_eq!(effective_edges(&block), extract_edges(&block.grid));
        assert_eq!(effective_edges(&rotated).east, extract_edges(&block.grid).north);
    }

    #[test]
    fn test_rotation_variants() {
        let block = BlockConfiguration::parse("a", "123456789").unwrap();
        let variants = rotation_variants(&block, true);
        let keys: Vec<String> = variants.iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["a", "a_z90", "a_z180", "a_z270"]);

        let flat = BlockConfiguration::parse("flat", "555555555").unwrap();
        assert_eq!(rotation_variants(&flat, true).len(), 1);
        assert_eq!(rotation_variants(&flat, false).len(), 4);
    }

    #[test]
    fn test_rotation_variants_of_rotated_block() {
        let block = BlockConfiguration::parse("a", "123456789")
            .unwrap()
            .with_rotation(Rotation::new(Axis::Z, 180));
        let keys: Vec<String> = rotation_variants(&block, false)
            .iter()
            .map(|b| b.key())
            .collect();
        assert_eq!(keys, vec!["a_z180", "a_z270", "a", "a_z90"]);
    }

    #[test]
    fn test_x_or_y_rotated_block_is_not_expanded() {
        let ramp = BlockConfiguration::parse("ramp", "135135135").unwrap();
        for axis in [Axis::X, Axis::Y] {
            let tilted = ramp.clone().with_rotation(Rotation::new(axis, 90));
            let variants = rotation_variants(&tilted, false);
            assert_eq!(variants, vec![tilted.clone()]);
        }

        // The plain ramp's variants and the tilted ramp coexist without
        // key collisions.
        let tilted = ramp.clone().with_rotation(Rotation::new(Axis::X, 90));
        let mut catalog = rotation_variants(&ramp, false);
        catalog.extend(rotation_variants(&tilted, false));
        let keys: Vec<String> = catalog.iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["ramp", "ramp_z90", "ramp_z180", "ramp_z270", "ramp_x90"]);
        assert!(crate::cache::AdjacencyCache::build(&catalog).is_ok());
    }
}
