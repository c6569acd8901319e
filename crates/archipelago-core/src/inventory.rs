//! Fixed supply of terrain tiles, number tokens and harbors.

use crate::board::{pips, Harbor, Resource, Terrain, TokenValue};
use serde::{Deserialize, Serialize};

/// Counts of every piece a board is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub terrain: Vec<(Terrain, usize)>,
    pub tokens: Vec<(TokenValue, usize)>,
    pub harbors: Vec<(Harbor, usize)>,
}

impl Inventory {
    /// The 42-field island set: 19 sea, 2 gold and 21 resource fields,
    /// 23 number tokens and 10 harbors.
    pub fn standard() -> Self {
        Self {
            terrain: vec![
                (Terrain::Sea, 19),
                (Terrain::Gold, 2),
                (Terrain::Resource(Resource::Brick), 4),
                (Terrain::Resource(Resource::Wood), 4),
                (Terrain::Resource(Resource::Sheep), 4),
                (Terrain::Resource(Resource::Wheat), 5),
                (Terrain::Resource(Resource::Ore), 4),
            ],
            tokens: vec![
                (2, 1),
                (3, 3),
                (4, 3),
                (5, 3),
                (6, 2),
                (8, 2),
                (9, 3),
                (10, 3),
                (11, 2),
                (12, 1),
            ],
            harbors: vec![
                (Harbor::Generic, 5),
                (Harbor::Specific(Resource::Brick), 1),
                (Harbor::Specific(Resource::Wood), 1),
                (Harbor::Specific(Resource::Sheep), 1),
                (Harbor::Specific(Resource::Wheat), 1),
                (Harbor::Specific(Resource::Ore), 1),
            ],
        }
    }

    /// Every terrain tile, sea included, flattened in inventory order
    pub fn terrain_tiles(&self) -> Vec<Terrain> {
        flatten(&self.terrain)
    }

    /// Every non-sea terrain tile, flattened in inventory order
    pub fn land_tiles(&self) -> Vec<Terrain> {
        self.terrain_tiles()
            .into_iter()
            .filter(Terrain::is_land)
            .collect()
    }

    /// Total number of terrain tiles
    pub fn tile_count(&self) -> usize {
        self.terrain.iter().map(|(_, count)| count).sum()
    }

    /// Number of sea tiles
    pub fn sea_count(&self) -> usize {
        self.terrain
            .iter()
            .filter(|(terrain, _)| !terrain.is_land())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of land tiles (everything that is not sea)
    pub fn land_count(&self) -> usize {
        self.tile_count() - self.sea_count()
    }

    /// Every number token, flattened in inventory order
    pub fn token_values(&self) -> Vec<TokenValue> {
        flatten(&self.tokens)
    }

    /// Every harbor, flattened in inventory order
    pub fn harbor_types(&self) -> Vec<Harbor> {
        flatten(&self.harbors)
    }

    /// Token values carrying the highest roll probability in this inventory
    pub fn high_value_tokens(&self) -> Vec<TokenValue> {
        let best = self
            .tokens
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(value, _)| pips(*value))
            .max();

        match best {
            Some(best) => self
                .tokens
                .iter()
                .filter(|(value, count)| *count > 0 && pips(*value) == best)
                .map(|(value, _)| *value)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::standard()
    }
}

fn flatten<T: Copy>(counts: &[(T, usize)]) -> Vec<T> {
    counts
        .iter()
        .flat_map(|&(item, count)| std::iter::repeat(item).take(count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_inventory_fills_42_positions() {
        let inventory = Inventory::standard();
        assert_eq!(inventory.tile_count(), 42);
        assert_eq!(inventory.sea_count(), 19);
        assert_eq!(inventory.land_count(), 23);
        assert_eq!(inventory.land_tiles().len(), 23);
    }

    #[test]
    fn test_one_token_per_producing_field() {
        let inventory = Inventory::standard();
        let producing = inventory
            .land_tiles()
            .iter()
            .filter(|t| t.is_producing())
            .count();
        assert_eq!(inventory.token_values().len(), producing);
        assert!(!inventory.token_values().contains(&7));
    }

    #[test]
    fn test_standard_harbors() {
        let harbors = Inventory::standard().harbor_types();
        assert_eq!(harbors.len(), 10);
        assert_eq!(harbors.iter().filter(|h| **h == Harbor::Generic).count(), 5);
        for resource in Resource::ALL {
            assert!(harbors.contains(&Harbor::Specific(resource)));
        }
    }

    #[test]
    fn test_high_value_tokens_are_six_and_eight() {
        assert_eq!(Inventory::standard().high_value_tokens(), vec![6, 8]);
    }

    #[test]
    fn test_high_value_tokens_follow_inventory() {
        let mut inventory = Inventory::standard();
        inventory.tokens.retain(|(value, _)| *value != 6 && *value != 8);
        assert_eq!(inventory.high_value_tokens(), vec![5, 9]);

        inventory.tokens.clear();
        assert!(inventory.high_value_tokens().is_empty());
    }
}
