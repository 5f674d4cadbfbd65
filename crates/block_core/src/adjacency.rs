//! Pairwise adjacency matching between (possibly rotated) blocks.

use crate::block::{effective_edges, BlockConfiguration};
use crate::edges::{Direction, EdgeSet};

/// Whether edge sets `a` and `b` fit with `b` placed `direction` of `a`.
///
/// Compares A's edge facing `direction` against B's edge on the opposite side.
pub fn edges_compatible(a: &EdgeSet, b: &EdgeSet, direction: Direction) -> bool {
    a.get(direction).matches(&b.get(direction.opposite()))
}

/// Whether `b` may be placed on the `direction` side of `a`.
pub fn can_be_adjacent(a: &BlockConfiguration, b: &BlockConfiguration, direction: Direction) -> bool {
    edges_compatible(&effective_edges(a), &effective_edges(b), direction)
}

/// Candidates that may sit on the `direction` side of `source`, in input order.
pub fn find_valid_adjacents<'a>(
    source: &BlockConfiguration,
    direction: Direction,
    candidates: &'a [BlockConfiguration],
) -> Vec<&'a BlockConfiguration> {
    let source_edges = effective_edges(source);
    candidates
        .iter()
        .filter(|candidate| edges_compatible(&source_edges, &effective_edges(candidate), direction))
        .collect()
}
