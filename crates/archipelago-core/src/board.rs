//! Generated board representation: terrain, number tokens and harbors.
//!
//! This module contains:
//! - Resource and terrain types
//! - Harbor types and their placement on a tile
//! - The per-position `Tile` record and the `Board` handed to renderers
//! - Board query methods

use crate::layout::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Number token value (2-12, never 7)
pub type TokenValue = u8;

/// Probability weight of a token value: the number of dice combinations
/// that roll it (the dots printed on the token).
pub fn pips(value: TokenValue) -> u8 {
    6u8.saturating_sub((7i16 - value as i16).unsigned_abs() as u8)
}

/// Resources produced by the five standard producing terrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Brick,
    Wood,
    Sheep,
    Wheat,
    Ore,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Wood,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Ore,
    ];
}

/// Kind of terrain on a board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    /// Open water between and around the islands
    Sea,
    /// Land that produces nothing and carries no token
    Desert,
    /// Bonus field, produces a resource of the owner's choice
    Gold,
    /// Produces a resource when its number is rolled
    Resource(Resource),
}

impl Terrain {
    /// Anything that is not sea
    pub fn is_land(&self) -> bool {
        !matches!(self, Terrain::Sea)
    }

    /// Land that receives a number token
    pub fn is_producing(&self) -> bool {
        matches!(self, Terrain::Gold | Terrain::Resource(_))
    }

    /// Single-letter code used by text renderings
    pub fn code(&self) -> char {
        match self {
            Terrain::Sea => '~',
            Terrain::Desert => 'D',
            Terrain::Gold => 'G',
            Terrain::Resource(Resource::Brick) => 'B',
            Terrain::Resource(Resource::Wood) => 'W',
            Terrain::Resource(Resource::Sheep) => 'S',
            Terrain::Resource(Resource::Wheat) => 'H',
            Terrain::Resource(Resource::Ore) => 'O',
        }
    }
}

/// Maritime trade offered by a harbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Harbor {
    /// Any resource at 3:1
    Generic,
    /// One resource at 2:1
    Specific(Resource),
}

impl Harbor {
    /// Cards given per card received
    pub fn rate(&self) -> u32 {
        match self {
            Harbor::Generic => 3,
            Harbor::Specific(_) => 2,
        }
    }

    /// Short trade label such as `3:1` or `2:1 Ore`
    pub fn label(&self) -> String {
        match self {
            Harbor::Generic => format!("{}:1", self.rate()),
            Harbor::Specific(resource) => format!("{}:1 {:?}", self.rate(), resource),
        }
    }
}

/// A harbor marker placed on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarborPlacement {
    /// Type of harbor (generic or specific resource)
    pub harbor_type: Harbor,
    /// Direction the harbor faces, towards the land it services
    pub facing: Direction,
    /// Rotation for renderers, in degrees clockwise from East
    pub rotation: u16,
    /// Whether the marker sits on the land tile itself rather than on sea
    pub on_land: bool,
}

impl HarborPlacement {
    pub fn new(harbor_type: Harbor, facing: Direction, on_land: bool) -> Self {
        Self {
            harbor_type,
            facing,
            rotation: facing.degrees(),
            on_land,
        }
    }
}

/// A single position of a generated board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Fixed layout position
    pub position: Position,
    /// Horizontal placement, percent of the render container
    pub left: f64,
    /// Vertical placement, percent of the render container
    pub top: f64,
    /// Terrain placed here
    pub terrain: Terrain,
    /// Number token (producing terrain only)
    pub token: Option<TokenValue>,
    /// Harbor hosted on this position, if any
    pub harbor: Option<HarborPlacement>,
}

impl Tile {
    /// Create a bare tile with no token or harbor
    pub fn new(position: Position, terrain: Terrain) -> Self {
        let (left, top) = position.render_hint();
        Self {
            position,
            left,
            top,
            terrain,
            token: None,
            harbor: None,
        }
    }
}

/// Non-fatal notice that some constraints were relaxed to produce a board
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GenerationWarning {
    #[error("No island layout satisfied the settings after {attempts} attempts; terrain was placed without constraints")]
    UnconstrainedLayout { attempts: usize },

    #[error("No token placement satisfied the number rules after {attempts} attempts; the last shuffle was kept")]
    TokenConstraintsRelaxed { attempts: usize },
}

/// A complete generated board, ordered by position index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<GenerationWarning>,
}

impl Board {
    pub fn new(tiles: Vec<Tile>, warnings: Vec<GenerationWarning>) -> Self {
        Self { tiles, warnings }
    }

    // ==================== Query Methods ====================

    /// All tiles, by position index
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile by position index
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get all land tiles (non-sea)
    pub fn land_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.terrain.is_land())
    }

    /// Get all tiles hosting a harbor
    pub fn harbor_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.harbor.is_some())
    }

    /// Constraint relaxations that happened while generating this board
    pub fn warnings(&self) -> &[GenerationWarning] {
        &self.warnings
    }

    /// True when any constraint had to be relaxed
    pub fn is_relaxed(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// How many tiles of each terrain kind were placed
    pub fn terrain_counts(&self) -> BTreeMap<Terrain, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.terrain).or_insert(0) += 1;
        }
        counts
    }

    /// How many tokens of each value were placed
    pub fn token_counts(&self) -> BTreeMap<TokenValue, usize> {
        let mut counts = BTreeMap::new();
        for token in self.tiles.iter().filter_map(|t| t.token) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// How many harbors of each type were placed
    pub fn harbor_counts(&self) -> BTreeMap<Harbor, usize> {
        let mut counts = BTreeMap::new();
        for placement in self.tiles.iter().filter_map(|t| t.harbor) {
            *counts.entry(placement.harbor_type).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pips_match_dice_combinations() {
        assert_eq!(pips(2), 1);
        assert_eq!(pips(6), 5);
        assert_eq!(pips(7), 6);
        assert_eq!(pips(8), 5);
        assert_eq!(pips(11), 2);
        assert_eq!(pips(12), 1);
    }

    #[test]
    fn test_terrain_classification() {
        assert!(!Terrain::Sea.is_land());
        assert!(Terrain::Desert.is_land());
        assert!(!Terrain::Desert.is_producing());
        assert!(Terrain::Gold.is_producing());
        assert!(Terrain::Resource(Resource::Ore).is_producing());
    }

    #[test]
    fn test_harbor_labels_carry_the_rate() {
        assert_eq!(Harbor::Generic.label(), "3:1");
        assert_eq!(Harbor::Specific(Resource::Ore).label(), "2:1 Ore");
        for resource in Resource::ALL {
            assert_eq!(Harbor::Specific(resource).rate(), 2);
        }
    }

    #[test]
    fn test_tile_json_is_camel_case_with_render_hints() {
        let mut tile = Tile::new(Position::new(3, -3.0, 0.88), Terrain::Sea);
        tile.harbor = Some(HarborPlacement::new(Harbor::Generic, Direction::SouthWest, false));
        let value = serde_json::to_value(&tile).unwrap();

        assert!((value["left"].as_f64().unwrap() - 20.0).abs() < 1e-9);
        assert!((value["top"].as_f64().unwrap() - 58.624).abs() < 1e-9);
        assert_eq!(value["harbor"]["harborType"], "Generic");
        assert_eq!(value["harbor"]["onLand"], false);
        assert_eq!(value["harbor"]["rotation"], 120);
        assert!(value["harbor"].get("on_land").is_none());
    }

    #[test]
    fn test_board_counts() {
        let mut water = Tile::new(Position::new(0, 0.0, 0.0), Terrain::Sea);
        water.harbor = Some(HarborPlacement::new(Harbor::Generic, Direction::East, false));
        let mut field = Tile::new(Position::new(1, 1.0, 0.0), Terrain::Resource(Resource::Brick));
        field.token = Some(8);

        let board = Board::new(vec![water, field], Vec::new());
        assert_eq!(board.len(), 2);
        assert_eq!(board.land_tiles().count(), 1);
        assert_eq!(board.harbor_tiles().count(), 1);
        assert_eq!(board.token_counts().get(&8), Some(&1));
        assert_eq!(board.harbor_counts().get(&Harbor::Generic), Some(&1));
        assert_eq!(board.terrain_counts().get(&Terrain::Sea), Some(&1));
        assert!(!board.is_relaxed());
    }

    #[test]
    fn test_warnings_are_omitted_from_json_when_empty() {
        let board = Board::new(vec![Tile::new(Position::new(0, 0.0, 0.0), Terrain::Sea)], Vec::new());
        let json = serde_json::to_string(&board).unwrap();
        assert!(!json.contains("warnings"));

        let relaxed = Board::new(
            Vec::new(),
            vec![GenerationWarning::TokenConstraintsRelaxed { attempts: 10 }],
        );
        let json = serde_json::to_string(&relaxed).unwrap();
        assert!(json.contains("TokenConstraintsRelaxed"));
        assert!(relaxed.is_relaxed());
    }
}
