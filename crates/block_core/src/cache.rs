//! Precomputed pairwise compatibility for a fixed block catalog.
//!
//! The cache is built once per placement session and is read-only afterwards.
//! Storage is a dense boolean table indexed `[direction][a][b]`, with composite
//! keys mapped to catalog indices.

use crate::adjacency::edges_compatible;
use crate::block::{effective_edges, BlockConfiguration};
use crate::edges::{Direction, EdgeSet};
use crate::error::{BlockError, BlockResult};
use std::collections::HashMap;

/// Immutable adjacency table for one catalog.
#[derive(Debug, Clone)]
pub struct AdjacencyCache {
    /// Composite keys in catalog order.
    keys: Vec<String>,
    index: HashMap<String, usize>,
    /// `allowed[d * n * n + a * n + b]`: `b` may sit on the `d` side of `a`.
    allowed: Vec<bool>,
}

impl AdjacencyCache {
    /// Compute compatibility for every ordered pair and direction.
    pub fn build(catalog: &[BlockConfiguration]) -> BlockResult<Self> {
        let n = catalog.len();
        let mut keys = Vec::with_capacity(n);
        let mut index = HashMap::with_capacity(n);

        for (i, block) in catalog.iter().enumerate() {
            let key = block.key();
            if index.insert(key.clone(), i).is_some() {
                return Err(BlockError::DuplicateKey(key));
            }
            keys.push(key);
        }

        let edges: Vec<EdgeSet> = catalog.iter().map(effective_edges).collect();

        let mut allowed = vec![false; Direction::ALL.len() * n * n];
        let mut compatible_pairs = 0usize;
        for dir in Direction::ALL {
            let base = dir.index() * n * n;
            for (a, edges_a) in edges.iter().enumerate() {
                for (b, edges_b) in edges.iter().enumerate() {
                    let ok = edges_compatible(edges_a, edges_b, dir);
                    allowed[base + a * n + b] = ok;
                    compatible_pairs += ok as usize;
                }
            }
        }

        tracing::debug!(
            "Built adjacency cache: {} blocks, {} compatible (pair, direction) entries",
            n,
            compatible_pairs
        );

        Ok(Self {
            keys,
            index,
            allowed,
        })
    }

    /// Whether block `key_b` may sit on the `direction` side of `key_a`.
    pub fn lookup(&self, key_a: &str, direction: Direction, key_b: &str) -> BlockResult<bool> {
        let a = self.position(key_a)?;
        let b = self.position(key_b)?;
        let n = self.keys.len();
        Ok(self.allowed[direction.index() * n * n + a * n + b])
    }

    /// Keys of every block that may sit on the `direction` side of `key_a`,
    /// in catalog order.
    pub fn compatible(&self, key_a: &str, direction: Direction) -> BlockResult<Vec<&str>> {
        let a = self.position(key_a)?;
        let n = self.keys.len();
        let row = direction.index() * n * n + a * n;
        Ok(self.allowed[row..row + n]
            .iter()
            .zip(&self.keys)
            .filter(|(ok, _)| **ok)
            .map(|(_, key)| key.as_str())
            .collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn position(&self, key: &str) -> BlockResult<usize> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| BlockError::CacheMiss(key.to_string()))
    }
}
