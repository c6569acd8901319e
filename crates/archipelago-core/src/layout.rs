//! Fixed board positions and the hex directions between them.
//!
//! The board is a row-offset hex grid: seven rows of `[5, 6, 7, 6, 7, 6, 5]`
//! cells, each row centred on x = 0. Neighbouring rows are shifted by half a
//! cell, so every hex neighbour sits at one of six bearings:
//! - `Position`: one cell, with its index and layout coordinate
//! - `Direction`: the six hex directions, in clockwise order from East
//!
//! Coordinates use screen orientation: y grows downwards, so bearings are
//! measured clockwise from East.

use serde::{Deserialize, Serialize};

/// Cells per row of the standard board, top to bottom
pub const STANDARD_ROWS: [usize; 7] = [5, 6, 7, 6, 7, 6, 5];

/// Vertical distance between row centres, in cell widths
pub const ROW_SPACING: f64 = 0.88;

/// Horizontal render scale (percent of container per cell width)
const RENDER_X_SCALE: f64 = 10.0;

/// Vertical render scale (percent of container per layout unit)
const RENDER_Y_SCALE: f64 = 9.8;

/// Direction from one hex to a neighbouring hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Right
    East,
    /// Bottom-right
    SouthEast,
    /// Bottom-left
    SouthWest,
    /// Left
    West,
    /// Top-left
    NorthWest,
    /// Top-right
    NorthEast,
}

impl Direction {
    /// All directions in clockwise order starting from East
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// Bearing of this direction in degrees, clockwise from East
    pub fn degrees(&self) -> u16 {
        match self {
            Direction::East => 0,
            Direction::SouthEast => 60,
            Direction::SouthWest => 120,
            Direction::West => 180,
            Direction::NorthWest => 240,
            Direction::NorthEast => 300,
        }
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
        }
    }

    /// Snap a bearing (degrees, any range) to the nearest hex direction
    pub fn from_bearing(degrees: f64) -> Direction {
        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized / 60.0).round() as usize) % 6;
        Direction::ALL[sector]
    }
}

/// A fixed cell of the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Row-major index, `0..N`
    pub index: usize,
    /// Horizontal layout coordinate (cell widths, centred on 0)
    pub x: f64,
    /// Vertical layout coordinate (grows downwards, centred on 0)
    pub y: f64,
}

impl Position {
    pub const fn new(index: usize, x: f64, y: f64) -> Self {
        Self { index, x, y }
    }

    /// Squared euclidean distance between two layout coordinates
    pub fn distance_squared(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Bearing from this position towards `other`, in degrees clockwise from East
    pub fn bearing_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// Nearest hex direction from this position towards `other`
    pub fn direction_to(&self, other: &Position) -> Direction {
        Direction::from_bearing(self.bearing_to(other))
    }

    /// Placement as `(left, top)` percentages of the render container
    pub fn render_hint(&self) -> (f64, f64) {
        (
            50.0 + self.x * RENDER_X_SCALE,
            50.0 + self.y * RENDER_Y_SCALE,
        )
    }
}

/// Build positions for a row-offset hex layout with the given row sizes.
///
/// Rows are centred vertically around the middle row and each row is
/// centred horizontally on x = 0.
pub fn row_layout(rows: &[usize]) -> Vec<Position> {
    let middle = rows.len().saturating_sub(1) as f64 / 2.0;
    let mut positions = Vec::with_capacity(rows.iter().sum());

    for (row, &count) in rows.iter().enumerate() {
        let y = (row as f64 - middle) * ROW_SPACING;
        let start_x = -(count as f64 - 1.0) / 2.0;
        for column in 0..count {
            positions.push(Position::new(positions.len(), start_x + column as f64, y));
        }
    }

    positions
}

/// The 42 positions of the standard board
pub fn standard_positions() -> Vec<Position> {
    row_layout(&STANDARD_ROWS)
}
