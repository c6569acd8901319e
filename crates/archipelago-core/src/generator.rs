//! Board generation pipeline: island layout, then tokens, then harbors.

use crate::board::{Board, GenerationWarning, Tile};
use crate::harbors::place_harbors;
use crate::inventory::Inventory;
use crate::islands::generate_islands;
use crate::layout::standard_positions;
use crate::settings::Settings;
use crate::tokens::assign_tokens;
use crate::topology::{build_adjacency, AdjacencyGraph};
use rand::Rng;

/// Generate a board from the standard inventory.
///
/// Always returns a full board. Constraints that could not be met are
/// listed in [`Board::warnings`].
pub fn generate_board<R: Rng + ?Sized>(settings: &Settings, graph: &AdjacencyGraph, rng: &mut R) -> Board {
    generate_board_with_inventory(settings, graph, &Inventory::standard(), rng)
}

/// Generate a board from a custom inventory.
///
/// The inventory is expected to hold one terrain tile per graph position
/// and one token per producing tile; mismatches give a degenerate board
/// rather than a panic.
pub fn generate_board_with_inventory<R: Rng + ?Sized>(
    settings: &Settings,
    graph: &AdjacencyGraph,
    inventory: &Inventory,
    rng: &mut R,
) -> Board {
    let mut warnings = Vec::new();

    let layout = generate_islands(graph, inventory, settings, rng);
    if !layout.is_constrained() {
        warnings.push(GenerationWarning::UnconstrainedLayout {
            attempts: layout.attempts,
        });
    }

    let assignment = assign_tokens(graph, &layout.terrain, &layout.deal_order(), inventory, settings, rng);
    if !assignment.satisfied {
        warnings.push(GenerationWarning::TokenConstraintsRelaxed {
            attempts: assignment.attempts,
        });
    }

    let mut tiles: Vec<Tile> = graph
        .positions()
        .iter()
        .zip(layout.terrain)
        .zip(assignment.tokens)
        .map(|((position, terrain), token)| Tile {
            token,
            ..Tile::new(*position, terrain)
        })
        .collect();

    place_harbors(
        graph,
        &mut tiles,
        &inventory.harbor_types(),
        settings.harbor_placement,
        rng,
    );

    Board::new(tiles, warnings)
}

/// Owns the adjacency graph and inventory so callers build them once
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    graph: AdjacencyGraph,
    inventory: Inventory,
}

impl BoardGenerator {
    pub fn new(graph: AdjacencyGraph, inventory: Inventory) -> Self {
        Self { graph, inventory }
    }

    /// The 42-position board with the standard inventory
    pub fn standard() -> Self {
        Self::new(build_adjacency(&standard_positions()), Inventory::standard())
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Number of land tiles the settings have to work with
    pub fn land_count(&self) -> usize {
        self.inventory.land_count().min(self.graph.len())
    }

    /// Generate a board using the thread-local RNG
    pub fn generate(&self, settings: &Settings) -> Board {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(settings, &mut rng)
    }

    /// Generate a board with a provided RNG.
    /// This allows for deterministic generation when needed
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, settings: &Settings, rng: &mut R) -> Board {
        generate_board_with_inventory(settings, &self.graph, &self.inventory, rng)
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Resource, Terrain};
    use crate::layout::row_layout;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_generator_shape() {
        let generator = BoardGenerator::standard();
        assert_eq!(generator.graph().len(), 42);
        assert_eq!(generator.land_count(), 23);
    }

    #[test]
    fn test_board_follows_position_order() {
        let generator = BoardGenerator::standard();
        let board = generator.generate(&Settings::default());
        assert_eq!(board.len(), 42);
        for (i, tile) in board.tiles().iter().enumerate() {
            assert_eq!(tile.position.index, i);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let generator = BoardGenerator::standard();
        let settings = Settings::default();

        let first = generator.generate_with_rng(&settings, &mut StdRng::seed_from_u64(2024));
        let second = generator.generate_with_rng(&settings, &mut StdRng::seed_from_u64(2024));
        assert_eq!(first, second);
    }

    #[test]
    fn test_impossible_islands_are_reported() {
        let generator = BoardGenerator::standard();
        let settings = Settings {
            island_count: 12,
            min_fields_per_island: 5,
            ..Settings::default()
        };
        let board = generator.generate_with_rng(&settings, &mut StdRng::seed_from_u64(8));

        assert!(board.is_relaxed());
        assert!(board
            .warnings()
            .contains(&GenerationWarning::UnconstrainedLayout { attempts: 500 }));
        assert_eq!(board.len(), 42);
    }

    #[test]
    fn test_undersized_inventory_gives_degenerate_board() {
        // Three positions in a row, but only one land tile and no tokens
        let graph = build_adjacency(&row_layout(&[3]));
        let inventory = Inventory {
            terrain: vec![(Terrain::Resource(Resource::Wood), 1)],
            tokens: Vec::new(),
            harbors: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(0);

        let board = generate_board_with_inventory(&Settings::default(), &graph, &inventory, &mut rng);
        assert_eq!(board.len(), 3);
        assert!(board.tiles().iter().all(|t| t.token.is_none()));
        assert!(board.harbor_tiles().next().is_none());
    }
}
