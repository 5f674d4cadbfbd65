//! Optional height-domain validation.
//!
//! Grid cells play one of three roles. The default policy restricts edge
//! midpoints to odd heights {1, 3, 5} and lets corners and the center take
//! any height. Matching never consults the policy; hosts enable it for
//! catalog loading and sculpting.

use crate::edges::{HeightGrid, GRID_CELLS, MAX_HEIGHT};
use crate::error::{BlockError, BlockResult};
use serde::{Deserialize, Serialize};

/// Role of a cell within the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Corner,
    Edge,
    Center,
}

impl CellRole {
    pub fn of(index: usize) -> Option<Self> {
        match index {
            0 | 2 | 6 | 8 => Some(CellRole::Corner),
            1 | 3 | 5 | 7 => Some(CellRole::Edge),
            4 => Some(CellRole::Center),
            _ => None,
        }
    }
}

/// Allowed heights per cell role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightPolicy {
    /// Allowed heights for edge midpoints, ascending.
    pub edge_heights: Vec<u8>,
    pub corner_min: u8,
    pub corner_max: u8,
    pub center_min: u8,
    pub center_max: u8,
}

impl Default for HeightPolicy {
    fn default() -> Self {
        Self {
            edge_heights: vec![1, 3, 5],
            corner_min: 0,
            corner_max: MAX_HEIGHT,
            center_min: 0,
            center_max: MAX_HEIGHT,
        }
    }
}

impl HeightPolicy {
    /// Allowed heights for a role, ascending.
    pub fn allowed(&self, role: CellRole) -> Vec<u8> {
        match role {
            CellRole::Edge => {
                let mut heights: Vec<u8> = self
                    .edge_heights
                    .iter()
                    .copied()
                    .filter(|&h| h <= MAX_HEIGHT)
                    .collect();
                heights.sort_unstable();
                heights.dedup();
                heights
            }
            CellRole::Corner => height_range(self.corner_min, self.corner_max),
            CellRole::Center => height_range(self.center_min, self.center_max),
        }
    }

    pub fn permits(&self, index: usize, height: u8) -> bool {
        CellRole::of(index).is_some_and(|role| self.allowed(role).contains(&height))
    }

    /// Check every cell of `grid` against its role.
    pub fn validate(&self, grid: &HeightGrid) -> BlockResult<()> {
        for index in 0..GRID_CELLS {
            let height = grid.cells()[index];
            if !self.permits(index, height) {
                return Err(BlockError::InvalidGrid(format!(
                    "height {} not allowed at cell {} ({:?})",
                    height,
                    index,
                    CellRole::of(index).unwrap_or(CellRole::Center)
                )));
            }
        }
        Ok(())
    }
}

fn height_range(min: u8, max: u8) -> Vec<u8> {
    (min..=max.min(MAX_HEIGHT)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        assert_eq!(CellRole::of(0), Some(CellRole::Corner));
        assert_eq!(CellRole::of(5), Some(CellRole::Edge));
        assert_eq!(CellRole::of(4), Some(CellRole::Center));
        assert_eq!(CellRole::of(9), None);
    }

    #[test]
    fn test_default_policy() {
        let policy = HeightPolicy::default();
        assert!(policy.validate(&HeightGrid::parse("913353919").unwrap()).is_ok());
        assert!(policy.validate(&HeightGrid::parse("555555555").unwrap()).is_ok());

        let err = policy
            .validate(&HeightGrid::parse("020000000").unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("cell 1"));
    }

    #[test]
    fn test_custom_ranges() {
        let policy = HeightPolicy {
            edge_heights: vec![5, 1, 5],
            corner_min: 2,
            corner_max: 4,
            ..HeightPolicy::default()
        };
        assert_eq!(policy.allowed(CellRole::Edge), vec![1, 5]);
        assert_eq!(policy.allowed(CellRole::Corner), vec![2, 3, 4]);
        assert!(!policy.permits(0, 1));
        assert!(policy.permits(4, 0));
    }
}
