//! Adjacency graph of board positions, derived from their layout coordinates.

use crate::layout::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Squared-distance cutoff for neighbours.
///
/// Immediate neighbours sit at 1.0 (same row) or ~1.024 (adjacent rows);
/// the next ring starts at ~3.0.
pub const NEIGHBOR_DISTANCE_SQUARED: f64 = 1.5;

/// Immutable neighbour sets for every position.
///
/// Built once and shared read-only by every generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    positions: Vec<Position>,
    neighbors: Vec<Vec<usize>>,
}

/// Build the adjacency graph for a fixed set of positions.
///
/// Two positions are neighbours iff their squared layout distance is below
/// [`NEIGHBOR_DISTANCE_SQUARED`]. Positions are expected to be indexed
/// `0..N` in order.
pub fn build_adjacency(positions: &[Position]) -> AdjacencyGraph {
    let mut neighbors = vec![Vec::new(); positions.len()];

    for (i, a) in positions.iter().enumerate() {
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            if a.distance_squared(b) < NEIGHBOR_DISTANCE_SQUARED {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }

    AdjacencyGraph {
        positions: positions.to_vec(),
        neighbors,
    }
}

impl AdjacencyGraph {
    /// Number of positions in the graph
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions, by index
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position at an index
    pub fn position(&self, index: usize) -> &Position {
        &self.positions[index]
    }

    /// Neighbour indices of a position, ascending
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Check whether two positions are neighbours
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Neighbour of a position in a given direction, if one exists
    pub fn neighbor_in(&self, index: usize, direction: Direction) -> Option<usize> {
        let origin = &self.positions[index];
        self.neighbors[index]
            .iter()
            .copied()
            .find(|&n| origin.direction_to(&self.positions[n]) == direction)
    }

    /// Directions in which a position has no neighbour (the map edge)
    pub fn gaps(&self, index: usize) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.neighbor_in(index, d).is_none())
            .collect()
    }
}
