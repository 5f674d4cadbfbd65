//! Edge matching and constrained placement for height-grid blocks.
//!
//! This crate provides:
//! - Edge extraction from 3x3 height grids
//! - Edge rotation about the X, Y and Z axes
//! - Adjacency matching between (possibly rotated) blocks
//! - A precomputed adjacency cache for a fixed catalog
//! - Constraint queries over a partially filled placement grid
//! - Catalog/session loading, optional height validation, sculpting requests
//!   and a seeded weighted-random generator
//!
//! ## Example
//!
//! ```
//! use block_core::{AdjacencyCache, BlockConfiguration, ConstraintSolver, PlacementGrid};
//! use glam::IVec2;
//!
//! let catalog = vec![
//!     BlockConfiguration::parse("flat", "555555555").unwrap(),
//!     BlockConfiguration::parse("low", "111111111").unwrap(),
//! ];
//! let cache = AdjacencyCache::build(&catalog).unwrap();
//!
//! let mut placed = PlacementGrid::new();
//! placed.place(IVec2::new(0, -1), catalog[0].clone());
//!
//! let valid = ConstraintSolver::new(&cache)
//!     .get_valid_blocks(IVec2::ZERO, &placed, &catalog)
//!     .unwrap();
//! assert_eq!(valid.len(), 1);
//! assert_eq!(valid[0].id, "flat");
//! ```

pub mod adjacency;
pub mod block;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod edges;
pub mod error;
pub mod generate;
pub mod policy;
pub mod rotation;
pub mod sculpt;
pub mod solver;

pub use adjacency::{can_be_adjacent, edges_compatible, find_valid_adjacents};
pub use block::{
    block_key, decode_block_key, effective_edges, rotation_variants, BlockConfiguration,
    KEY_SEPARATOR,
};
pub use cache::AdjacencyCache;
pub use catalog::Catalog;
pub use config::{GenerationConfig, SessionConfig};
pub use edges::{
    extract_edges, Direction, EdgeSet, EdgeSignature, HeightGrid, GRID_CELLS, GRID_SIZE,
    MAX_HEIGHT,
};
pub use error::{BlockError, BlockResult, CatalogError, GenerationError};
pub use generate::{generate, pick_weighted, GenerationResult};
pub use policy::{CellRole, HeightPolicy};
pub use rotation::{quarter_turns, rotate_edges, rotate_edges_named, Axis, Rotation};
pub use sculpt::{sculpt, HeightStep, SculptRequest};
pub use solver::{ConstraintSolver, PlacementGrid};
