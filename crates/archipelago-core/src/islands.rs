//! Island layout: which positions are land, which island each belongs to,
//! and which terrain each land position gets.
//!
//! Generation is a randomized constructive search retried until it
//! succeeds:
//! 1. Seed one position per island, no two seeds touching
//! 2. Grow the islands round-robin, always keeping a one-tile sea gap
//!    between different islands
//! 3. Reject layouts with an island below the minimum size
//! 4. Shuffle the land terrain over the fixed partition until no
//!    same-terrain cluster is too large
//!
//! When every attempt fails the terrain inventory is scattered without
//! constraints, so a board is always produced.

use crate::board::Terrain;
use crate::cluster::validate_clusters;
use crate::inventory::Inventory;
use crate::settings::Settings;
use crate::topology::AdjacencyGraph;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Attempts at seeding + growth + coloring before giving up on constraints
pub const MAX_LAYOUT_ATTEMPTS: usize = 500;

/// Terrain shuffles per layout attempt, divided by the cluster bound
const TERRAIN_SHUFFLE_BUDGET: usize = 300;

/// Island id for positions that belong to no island
pub const NO_ISLAND: usize = 0;

/// Assignment of land positions to islands, before any terrain is placed.
///
/// Island ids run `1..=island_count`; [`NO_ISLAND`] marks sea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandPartition {
    island_of: Vec<usize>,
    sizes: Vec<usize>,
    placement_order: Vec<usize>,
}

impl IslandPartition {
    /// Island id of a position (`NO_ISLAND` for sea)
    pub fn island_id(&self, index: usize) -> usize {
        self.island_of[index]
    }

    /// Island ids of every position
    pub fn island_ids(&self) -> &[usize] {
        &self.island_of
    }

    pub fn island_count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of each island, by id - 1
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Land positions in the order they were claimed
    pub fn placement_order(&self) -> &[usize] {
        &self.placement_order
    }

    /// Land positions in index order
    pub fn land_positions(&self) -> Vec<usize> {
        (0..self.island_of.len())
            .filter(|&i| self.island_of[i] != NO_ISLAND)
            .collect()
    }

    pub fn is_land(&self, index: usize) -> bool {
        self.island_of[index] != NO_ISLAND
    }
}

/// Result of island layout generation
#[derive(Debug, Clone)]
pub struct IslandLayout {
    /// Terrain for every position
    pub terrain: Vec<Terrain>,
    /// The island partition the terrain was colored onto, `None` when the
    /// unconstrained fallback was used
    pub partition: Option<IslandPartition>,
    /// Layout attempts consumed
    pub attempts: usize,
}

impl IslandLayout {
    /// Whether the layout honours the island and clustering settings
    pub fn is_constrained(&self) -> bool {
        self.partition.is_some()
    }

    /// Order in which tokens are dealt: the growth order of the islands, or
    /// plain index order for the unconstrained fallback
    pub fn deal_order(&self) -> Vec<usize> {
        match &self.partition {
            Some(partition) => partition.placement_order().to_vec(),
            None => (0..self.terrain.len()).collect(),
        }
    }
}

/// Generate terrain for every position of `graph` from the inventory.
pub fn generate_islands<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    inventory: &Inventory,
    settings: &Settings,
    rng: &mut R,
) -> IslandLayout {
    let island_count = settings.island_count.max(1) as usize;
    let min_fields = settings.min_fields_per_island as usize;
    let max_touching = settings.max_touching_same_resource.max(1) as usize;

    let land_terrain: Vec<Terrain> = inventory.land_tiles().into_iter().take(graph.len()).collect();

    for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
        let Some(partition) =
            partition_islands(graph, land_terrain.len(), island_count, min_fields, rng)
        else {
            continue;
        };

        if let Some(terrain) = color_terrain(graph, &partition, &land_terrain, max_touching, rng) {
            debug!(attempt, islands = island_count, "Island layout found");
            return IslandLayout {
                terrain,
                partition: Some(partition),
                attempts: attempt,
            };
        }
    }

    warn!(
        attempts = MAX_LAYOUT_ATTEMPTS,
        islands = island_count,
        min_fields,
        max_touching,
        "Island constraints not satisfiable, scattering terrain without constraints"
    );

    IslandLayout {
        terrain: unconstrained_terrain(graph.len(), inventory, rng),
        partition: None,
        attempts: MAX_LAYOUT_ATTEMPTS,
    }
}

/// One seeding + growth attempt.
///
/// Returns `None` when seeding fails, growth gets stuck, or an island ends
/// up smaller than `min_fields`.
pub fn partition_islands<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    land_count: usize,
    island_count: usize,
    min_fields: usize,
    rng: &mut R,
) -> Option<IslandPartition> {
    if island_count == 0 || island_count > land_count {
        return None;
    }

    let seeds = seed_islands(graph, island_count, rng)?;

    let mut partition = IslandPartition {
        island_of: vec![NO_ISLAND; graph.len()],
        sizes: vec![1; island_count],
        placement_order: seeds.clone(),
    };
    for (i, &seed) in seeds.iter().enumerate() {
        partition.island_of[seed] = i + 1;
    }

    if !grow_islands(graph, &mut partition, land_count, rng) {
        return None;
    }

    if partition.sizes.iter().any(|&size| size < min_fields) {
        return None;
    }

    Some(partition)
}

/// Pick `count` random positions, no two of them adjacent
fn seed_islands<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    count: usize,
    rng: &mut R,
) -> Option<Vec<usize>> {
    let mut candidates: Vec<usize> = (0..graph.len()).collect();
    candidates.shuffle(rng);

    let mut seeds = Vec::with_capacity(count);
    for candidate in candidates {
        if seeds.len() == count {
            break;
        }
        if seeds.iter().all(|&seed| !graph.are_adjacent(seed, candidate)) {
            seeds.push(candidate);
        }
    }

    (seeds.len() == count).then_some(seeds)
}

/// Grow every island by one position per round until `land_count`
/// positions are claimed. Returns false if a round places nothing.
fn grow_islands<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    partition: &mut IslandPartition,
    land_count: usize,
    rng: &mut R,
) -> bool {
    let mut placed = partition.placement_order.len();
    let mut round: Vec<usize> = (1..=partition.sizes.len()).collect();

    while placed < land_count {
        round.shuffle(rng);
        let mut progress = false;

        for &island in &round {
            if placed >= land_count {
                break;
            }
            let candidates = growth_candidates(graph, &partition.island_of, island);
            if let Some(&next) = candidates.choose(rng) {
                partition.island_of[next] = island;
                partition.sizes[island - 1] += 1;
                partition.placement_order.push(next);
                placed += 1;
                progress = true;
            }
        }

        if !progress {
            return false;
        }
    }

    true
}

/// Unclaimed positions touching `island` whose own neighbours belong to no
/// other island
fn growth_candidates(graph: &AdjacencyGraph, island_of: &[usize], island: usize) -> Vec<usize> {
    let mut candidates = Vec::new();

    for member in (0..island_of.len()).filter(|&i| island_of[i] == island) {
        for &next in graph.neighbors(member) {
            if island_of[next] != NO_ISLAND || candidates.contains(&next) {
                continue;
            }
            let touches_other = graph
                .neighbors(next)
                .iter()
                .any(|&n| island_of[n] != NO_ISLAND && island_of[n] != island);
            if !touches_other {
                candidates.push(next);
            }
        }
    }

    candidates
}

/// Shuffle the land terrain onto the partition's land positions until no
/// same-terrain cluster exceeds `max_touching`.
///
/// Island membership plays no part here; only which positions are land.
pub fn color_terrain<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    partition: &IslandPartition,
    land_terrain: &[Terrain],
    max_touching: usize,
    rng: &mut R,
) -> Option<Vec<Terrain>> {
    let max_touching = max_touching.max(1);
    let land = partition.land_positions();
    let attempts = (TERRAIN_SHUFFLE_BUDGET / max_touching).max(1);
    let mut shuffled = land_terrain.to_vec();

    for _ in 0..attempts {
        shuffled.shuffle(rng);

        let mut terrain = vec![Terrain::Sea; graph.len()];
        for (&index, &kind) in land.iter().zip(shuffled.iter()) {
            terrain[index] = kind;
        }

        let valid = validate_clusters(graph, max_touching, |i| {
            terrain[i].is_producing().then_some(terrain[i])
        });
        if valid {
            return Some(terrain);
        }
    }

    None
}

/// Scatter the whole terrain inventory over the board, ignoring every
/// island and clustering rule
pub fn unconstrained_terrain<R: Rng + ?Sized>(
    position_count: usize,
    inventory: &Inventory,
    rng: &mut R,
) -> Vec<Terrain> {
    let mut terrain = inventory.terrain_tiles();
    terrain.shuffle(rng);
    terrain.resize(position_count, Terrain::Sea);
    terrain
}
