//! Seeded layout generation on top of the constraint solver.
//!
//! Cells of a `width x height` region are filled in row-major order. At each
//! cell the solver narrows the catalog to blocks that fit the already-placed
//! neighbors, and one survivor is drawn by weight. If no block fits, the
//! attempt is a contradiction and generation restarts with fresh draws from
//! the same RNG, up to the configured number of tries.

use crate::block::BlockConfiguration;
use crate::cache::AdjacencyCache;
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::solver::{ConstraintSolver, PlacementGrid};
use glam::IVec2;
use rand::Rng;

/// A completed layout.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub grid: PlacementGrid,
    /// Attempts used, including the successful one.
    pub attempts: usize,
}

/// Fill the configured region with mutually compatible blocks.
pub fn generate<R: Rng + ?Sized>(
    cache: &AdjacencyCache,
    catalog: &[BlockConfiguration],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<GenerationResult, GenerationError> {
    if catalog.is_empty() {
        return Err(GenerationError::EmptyCatalog);
    }

    let solver = ConstraintSolver::new(cache);
    let tries = config.tries.max(1);
    let mut last_failure = IVec2::ZERO;

    for attempt in 1..=tries {
        match fill_region(&solver, catalog, config, rng)? {
            Ok(grid) => {
                tracing::info!(
                    "Generated {}x{} layout ({} blocks) in {} attempt(s)",
                    config.width,
                    config.height,
                    grid.len(),
                    attempt
                );
                return Ok(GenerationResult {
                    grid,
                    attempts: attempt,
                });
            }
            Err(position) => {
                tracing::debug!(
                    "Contradiction at ({}, {}) on attempt {}/{}",
                    position.x,
                    position.y,
                    attempt,
                    tries
                );
                last_failure = position;
            }
        }
    }

    Err(GenerationError::Contradiction {
        position: last_failure,
        tries,
    })
}

/// One row-major pass. The inner `Err` is the cell where no block fit.
fn fill_region<R: Rng + ?Sized>(
    solver: &ConstraintSolver<'_>,
    catalog: &[BlockConfiguration],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Result<PlacementGrid, IVec2>, GenerationError> {
    let mut grid = PlacementGrid::new();

    for y in 0..config.height as i32 {
        for x in 0..config.width as i32 {
            let position = IVec2::new(x, y);
            let valid = solver.get_valid_blocks(position, &grid, catalog)?;
            match pick_weighted(&valid, rng) {
                Some(block) => {
                    grid.place(position, block.clone());
                }
                None => return Ok(Err(position)),
            }
        }
    }

    Ok(Ok(grid))
}

/// Draw one candidate with probability proportional to its weight.
///
/// Non-positive weights never win unless every weight is non-positive, in
/// which case the first candidate is returned.
pub fn pick_weighted<'a, R: Rng + ?Sized>(
    candidates: &[&'a BlockConfiguration],
    rng: &mut R,
) -> Option<&'a BlockConfiguration> {
    let first = *candidates.first()?;
    let sum: f64 = candidates.iter().map(|b| b.weight.max(0.0)).sum();
    if sum <= 0.0 {
        return Some(first);
    }

    let threshold = rng.gen::<f64>() * sum;
    let mut partial_sum = 0.0;
    for &candidate in candidates {
        let weight = candidate.weight.max(0.0);
        partial_sum += weight;
        if weight > 0.0 && partial_sum >= threshold {
            return Some(candidate);
        }
    }

    candidates.iter().rev().find(|b| b.weight > 0.0).copied()
}
