//! Height grids and the edge signatures derived from them.
//!
//! A block's shape is a 3x3 grid of single-digit heights, row-major with the
//! top-left cell first. Each side of the grid becomes an [`EdgeSignature`].
//! South and west are stored reversed, so two facing edges match with plain
//! element-wise equality:
//!
//! ```text
//!   north ->            0 1 2
//!   east  (top→bottom)  2 5 8        0 1 2
//!   south <-            8 7 6        3 4 5
//!   west  (bottom→top)  6 3 0        6 7 8
//! ```

use crate::error::{BlockError, BlockResult};
use glam::IVec2;
use std::fmt;

/// Cells per side of a height grid.
pub const GRID_SIZE: usize = 3;

/// Total cells in a height grid.
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Largest height a single cell can hold.
pub const MAX_HEIGHT: u8 = 9;

/// An immutable 3x3 grid of heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeightGrid {
    cells: [u8; GRID_CELLS],
}

impl HeightGrid {
    /// Parse a 9-character digit string such as `"123456789"`.
    pub fn parse(digits: &str) -> BlockResult<Self> {
        let count = digits.chars().count();
        if count != GRID_CELLS {
            return Err(BlockError::InvalidGrid(format!(
                "expected {} digits, got {} in \"{}\"",
                GRID_CELLS, count, digits
            )));
        }

        let mut cells = [0u8; GRID_CELLS];
        for (i, ch) in digits.chars().enumerate() {
            let value = ch.to_digit(10).ok_or_else(|| {
                BlockError::InvalidGrid(format!("non-digit '{}' at cell {}", ch, i))
            })?;
            cells[i] = value as u8;
        }
        Ok(Self { cells })
    }

    /// Build a grid from raw heights.
    pub fn from_values(values: &[u8]) -> BlockResult<Self> {
        if values.len() != GRID_CELLS {
            return Err(BlockError::InvalidGrid(format!(
                "expected {} values, got {}",
                GRID_CELLS,
                values.len()
            )));
        }
        if let Some(i) = values.iter().position(|&v| v > MAX_HEIGHT) {
            return Err(BlockError::InvalidGrid(format!(
                "height {} at cell {} exceeds {}",
                values[i], i, MAX_HEIGHT
            )));
        }

        let mut cells = [0u8; GRID_CELLS];
        cells.copy_from_slice(values);
        Ok(Self { cells })
    }

    /// A grid with every cell at `height` (clamped to [`MAX_HEIGHT`]).
    pub fn uniform(height: u8) -> Self {
        Self {
            cells: [height.min(MAX_HEIGHT); GRID_CELLS],
        }
    }

    pub fn cells(&self) -> &[u8; GRID_CELLS] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// Copy of this grid with one cell replaced. The caller guarantees
    /// `index < GRID_CELLS` and `height <= MAX_HEIGHT`.
    pub(crate) fn with_cell(&self, index: usize, height: u8) -> Self {
        let mut cells = self.cells;
        cells[index] = height;
        Self { cells }
    }

    /// Serialize back to the digit-string form.
    pub fn to_digit_string(&self) -> String {
        self.cells
            .iter()
            .map(|&h| char::from(b'0' + h))
            .collect()
    }
}

impl fmt::Display for HeightGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_digit_string())
    }
}

impl std::str::FromStr for HeightGrid {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeightGrid::parse(s)
    }
}

/// Heights along one side of a grid, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSignature(pub [u8; GRID_SIZE]);

impl EdgeSignature {
    pub fn reversed(self) -> Self {
        let mut values = self.0;
        values.reverse();
        EdgeSignature(values)
    }

    pub fn values(&self) -> &[u8] {
        &self.0
    }

    /// Element-wise equality over equal-length signatures.
    pub fn matches(&self, other: &EdgeSignature) -> bool {
        self.values().len() == other.values().len()
            && self
                .values()
                .iter()
                .zip(other.values())
                .all(|(a, b)| a == b)
    }
}

/// Cardinal placement direction. Also selects an edge of a block.
///
/// Coordinates follow the grid layout: the top row faces north and `y` grows
/// southward, so north is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::South => IVec2::new(0, 1),
            Direction::West => IVec2::new(-1, 0),
        }
    }

    /// Stable index in [`Direction::ALL`] order.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// The four edge signatures of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSet {
    pub north: EdgeSignature,
    pub east: EdgeSignature,
    pub south: EdgeSignature,
    pub west: EdgeSignature,
}

impl EdgeSet {
    pub fn get(&self, direction: Direction) -> EdgeSignature {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Derive the four edge signatures of a grid.
pub fn extract_edges(grid: &HeightGrid) -> EdgeSet {
    let c = grid.cells();
    EdgeSet {
        north: EdgeSignature([c[0], c[1], c[2]]),
        east: EdgeSignature([c[2], c[5], c[8]]),
        south: EdgeSignature([c[8], c[7], c[6]]),
        west: EdgeSignature([c[6], c[3], c[0]]),
    }
}
