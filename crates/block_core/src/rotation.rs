//! Rotations of edge sets by multiples of 90° about the three principal axes.
//!
//! Each axis has an elementary quarter-turn step; a rotation applies that step
//! `floor(angle / 90) mod 4` times.
//!
//! - Z (yaw): the four edges cycle, `N' = rev(W)`, `E' = N`, `S' = rev(E)`, `W' = S`
//! - Y (pitch): north and south swap reversed, east and west reverse in place
//! - X (roll): east and west swap reversed, north and south reverse in place

use crate::edges::EdgeSet;
use crate::error::{BlockError, BlockResult};
use std::fmt;
use std::str::FromStr;

/// Principal rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase letter used in composite block keys.
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl FromStr for Axis {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Axis::from_letter(c).ok_or_else(|| BlockError::InvalidAxis(s.into())),
            _ => Err(BlockError::InvalidAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Number of quarter turns for an angle in degrees.
///
/// Uses floor division so negative angles wrap correctly (-90° is three
/// quarter turns).
pub fn quarter_turns(angle: i32) -> u8 {
    angle.div_euclid(90).rem_euclid(4) as u8
}

/// An axis plus an angle normalized to {0, 90, 180, 270}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub axis: Axis,
    turns: u8,
}

impl Rotation {
    pub fn new(axis: Axis, angle: i32) -> Self {
        Self {
            axis,
            turns: quarter_turns(angle),
        }
    }

    /// Normalized angle in degrees.
    pub fn angle(&self) -> u16 {
        self.turns as u16 * 90
    }

    pub fn quarter_turns(&self) -> u8 {
        self.turns
    }

    pub fn is_identity(&self) -> bool {
        self.turns == 0
    }

    pub fn apply(&self, edges: &EdgeSet) -> EdgeSet {
        rotate_edges(edges, self.axis, self.angle() as i32)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis.letter(), self.angle())
    }
}

/// Rotate an edge set by `angle` degrees about `axis`.
pub fn rotate_edges(edges: &EdgeSet, axis: Axis, angle: i32) -> EdgeSet {
    let steps = quarter_turns(angle);
    if steps == 0 {
        return *edges;
    }

    let step: fn(&EdgeSet) -> EdgeSet = match axis {
        Axis::X => x_step,
        Axis::Y => y_step,
        Axis::Z => z_step,
    };

    let mut current = *edges;
    for _ in 0..steps {
        current = step(&current);
    }
    current
}

/// Like [`rotate_edges`] but with the axis given by name, as it arrives from
/// config files or the input layer.
pub fn rotate_edges_named(edges: &EdgeSet, axis: &str, angle: i32) -> BlockResult<EdgeSet> {
    let axis: Axis = axis.parse()?;
    Ok(rotate_edges(edges, axis, angle))
}

fn z_step(e: &EdgeSet) -> EdgeSet {
    EdgeSet {
        north: e.west.reversed(),
        east: e.north,
        south: e.east.reversed(),
        west: e.south,
    }
}

fn y_step(e: &EdgeSet) -> EdgeSet {
    EdgeSet {
        north: e.south.reversed(),
        east: e.east.reversed(),
        south: e.north.reversed(),
        west: e.west.reversed(),
    }
}

fn x_step(e: &EdgeSet) -> EdgeSet {
    EdgeSet {
        north: e.north.reversed(),
        east: e.west.reversed(),
        south: e.south.reversed(),
        west: e.east.reversed(),
    }
}
