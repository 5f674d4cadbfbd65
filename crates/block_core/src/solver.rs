//! Constraint queries over a partially filled placement grid.
//!
//! The solver only reads the grid. Picking one of the surviving candidates is
//! left to the caller (see [`crate::generate`] for a weighted-random picker).

use crate::block::BlockConfiguration;
use crate::cache::AdjacencyCache;
use crate::edges::Direction;
use crate::error::BlockResult;
use glam::IVec2;
use std::collections::HashMap;

/// Blocks placed so far, keyed by integer grid coordinate.
#[derive(Debug, Clone, Default)]
pub struct PlacementGrid {
    cells: HashMap<IVec2, BlockConfiguration>,
}

impl PlacementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block, returning whatever previously occupied the cell.
    pub fn place(&mut self, position: IVec2, block: BlockConfiguration) -> Option<BlockConfiguration> {
        self.cells.insert(position, block)
    }

    pub fn get(&self, position: IVec2) -> Option<&BlockConfiguration> {
        self.cells.get(&position)
    }

    /// Placed neighbors of `position`, paired with the direction they lie in.
    pub fn neighbors(&self, position: IVec2) -> impl Iterator<Item = (Direction, &BlockConfiguration)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(position + dir.offset()).map(|block| (dir, block)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IVec2, &BlockConfiguration)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Filters candidate blocks against already-placed neighbors.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSolver<'a> {
    cache: &'a AdjacencyCache,
}

impl<'a> ConstraintSolver<'a> {
    pub fn new(cache: &'a AdjacencyCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &'a AdjacencyCache {
        self.cache
    }

    /// Candidates compatible with every placed cardinal neighbor of
    /// `position`, in input order.
    ///
    /// A neighbor lying `d` of `position` must accept the candidate on its
    /// `d.opposite()` side.
    pub fn get_valid_blocks<'c>(
        &self,
        position: IVec2,
        placed: &PlacementGrid,
        candidates: &'c [BlockConfiguration],
    ) -> BlockResult<Vec<&'c BlockConfiguration>> {
        let neighbors: Vec<(Direction, String)> = placed
            .neighbors(position)
            .map(|(dir, block)| (dir, block.key()))
            .collect();

        let mut valid = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let key = candidate.key();
            let mut fits = true;
            for (dir, neighbor_key) in &neighbors {
                if !self.cache.lookup(neighbor_key, dir.opposite(), &key)? {
                    fits = false;
                    break;
                }
            }
            if fits {
                valid.push(candidate);
            }
        }
        Ok(valid)
    }
}
