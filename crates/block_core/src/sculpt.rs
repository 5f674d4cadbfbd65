//! Height stepping requests from the input layer.
//!
//! The input collaborator owns the selection state and sends an explicit
//! [`SculptRequest`] naming the cell; the core answers with a new grid and
//! never mutates the source.

use crate::edges::{HeightGrid, GRID_CELLS, MAX_HEIGHT};
use crate::error::{BlockError, BlockResult};
use crate::policy::{CellRole, HeightPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightStep {
    Raise,
    Lower,
}

/// One sculpting action on one cell of one block's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SculptRequest {
    pub cell: usize,
    pub step: HeightStep,
}

/// Apply `request` to `grid`.
///
/// Without a policy the height moves by one, saturating at 0 and
/// [`MAX_HEIGHT`]. With a policy it moves to the next allowed height for the
/// cell's role, saturating at the ends of the allowed set.
pub fn sculpt(
    grid: &HeightGrid,
    request: SculptRequest,
    policy: Option<&HeightPolicy>,
) -> BlockResult<HeightGrid> {
    let current = grid.get(request.cell).ok_or_else(|| {
        BlockError::InvalidGrid(format!(
            "cell {} out of range (grid has {} cells)",
            request.cell, GRID_CELLS
        ))
    })?;

    let next = match policy {
        None => match request.step {
            HeightStep::Raise => (current + 1).min(MAX_HEIGHT),
            HeightStep::Lower => current.saturating_sub(1),
        },
        Some(policy) => {
            let role = CellRole::of(request.cell).unwrap_or(CellRole::Center);
            constrained_step(current, &policy.allowed(role), request.step).ok_or_else(|| {
                BlockError::InvalidGrid(format!(
                    "policy allows no heights for cell {} ({:?})",
                    request.cell, role
                ))
            })?
        }
    };

    Ok(grid.with_cell(request.cell, next))
}

/// Next height in `allowed` (ascending) from `current`. Off-policy values
/// snap to the nearest allowed height in the step direction.
fn constrained_step(current: u8, allowed: &[u8], step: HeightStep) -> Option<u8> {
    let (first, last) = (*allowed.first()?, *allowed.last()?);
    let next = match step {
        HeightStep::Raise => allowed.iter().copied().find(|&h| h > current).unwrap_or(last),
        HeightStep::Lower => allowed.iter().rev().copied().find(|&h| h < current).unwrap_or(first),
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raise(cell: usize) -> SculptRequest {
        SculptRequest {
            cell,
            step: HeightStep::Raise,
        }
    }

    fn lower(cell: usize) -> SculptRequest {
        SculptRequest {
            cell,
            step: HeightStep::Lower,
        }
    }

    #[test]
    fn test_direct_stepping_saturates() {
        let grid = HeightGrid::parse("090000000").unwrap();
        assert_eq!(sculpt(&grid, raise(0), None).unwrap().to_string(), "190000000");
        assert_eq!(sculpt(&grid, raise(1), None).unwrap(), grid);
        assert_eq!(sculpt(&grid, lower(0), None).unwrap(), grid);
    }

    #[test]
    fn test_source_grid_untouched() {
        let grid = HeightGrid::parse("111111111").unwrap();
        let raised = sculpt(&grid, raise(4), None).unwrap();
        assert_eq!(grid.to_string(), "111111111");
        assert_eq!(raised.to_string(), "111121111");
    }

    #[test]
    fn test_constrained_edge_stepping() {
        let policy = HeightPolicy::default();
        let mut grid = HeightGrid::parse("010000000").unwrap();

        grid = sculpt(&grid, raise(1), Some(&policy)).unwrap();
        assert_eq!(grid.get(1), Some(3));
        grid = sculpt(&grid, raise(1), Some(&policy)).unwrap();
        assert_eq!(grid.get(1), Some(5));
        grid = sculpt(&grid, raise(1), Some(&policy)).unwrap();
        assert_eq!(grid.get(1), Some(5));
        grid = sculpt(&grid, lower(1), Some(&policy)).unwrap();
        assert_eq!(grid.get(1), Some(3));
    }

    #[test]
    fn test_constrained_snaps_off_policy_values() {
        let policy = HeightPolicy::default();
        let grid = HeightGrid::parse("080000000").unwrap();
        assert_eq!(sculpt(&grid, raise(1), Some(&policy)).unwrap().get(1), Some(5));
        assert_eq!(sculpt(&grid, lower(1), Some(&policy)).unwrap().get(1), Some(5));

        let grid = HeightGrid::parse("020000000").unwrap();
        assert_eq!(sculpt(&grid, raise(1), Some(&policy)).unwrap().get(1), Some(3));
        assert_eq!(sculpt(&grid, lower(1), Some(&policy)).unwrap().get(1), Some(1));
    }

    #[test]
    fn test_corner_uses_full_range() {
        let policy = HeightPolicy::default();
        let grid = HeightGrid::parse("411111111").unwrap();
        assert_eq!(sculpt(&grid, raise(0), Some(&policy)).unwrap().get(0), Some(5));
    }

    #[test]
    fn test_out_of_range_cell() {
        let grid = HeightGrid::uniform(1);
        assert!(matches!(
            sculpt(&grid, raise(9), None),
            Err(BlockError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_empty_allowed_set() {
        let policy = HeightPolicy {
            edge_heights: vec![],
            ..HeightPolicy::default()
        };
        assert!(sculpt(&HeightGrid::uniform(1), raise(1), Some(&policy)).is_err());
    }
}
