//! Harbor placement along the coasts of a finished terrain map.
//!
//! Harbors dock in one of two ways:
//! - on a sea position next to land, facing the land it services
//! - on a land position at the map edge, facing back in from the edge
//!
//! Harbors never sit next to each other and each land position is serviced
//! by at most one harbor. Running out of slots is fine; leftover harbors
//! are simply not placed.

use crate::board::{Harbor, HarborPlacement, Terrain, Tile};
use crate::cluster::label_clusters;
use crate::layout::Direction;
use crate::settings::HarborPlacementMode;
use crate::topology::AdjacencyGraph;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// A place a harbor could go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarborSlot {
    /// Position the harbor marker sits on
    pub host: usize,
    /// Land position the harbor gives access to
    pub serviced: usize,
    /// Whether the host is the land position itself
    pub on_land: bool,
    /// Direction the harbor faces
    pub facing: Direction,
    /// Island of the serviced land position
    pub island: usize,
}

/// A harbor that was placed, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedHarbor {
    pub slot: HarborSlot,
    pub harbor_type: Harbor,
}

/// Label connected land regions of a finished terrain map.
///
/// Ids start at 0 in order of each island's lowest position; sea is `None`.
pub fn detect_islands(graph: &AdjacencyGraph, terrain: &[Terrain]) -> Vec<Option<usize>> {
    label_clusters(graph, |i| terrain[i].is_land().then_some(()))
}

/// Every candidate harbor slot for the terrain map
pub fn harbor_slots(
    graph: &AdjacencyGraph,
    terrain: &[Terrain],
    islands: &[Option<usize>],
) -> Vec<HarborSlot> {
    let mut slots = Vec::new();

    for host in 0..terrain.len() {
        if terrain[host].is_land() {
            let Some(island) = islands[host] else {
                continue;
            };
            for gap in graph.gaps(host) {
                slots.push(HarborSlot {
                    host,
                    serviced: host,
                    on_land: true,
                    facing: gap.opposite(),
                    island,
                });
            }
        } else {
            let origin = graph.position(host);
            for &land in graph.neighbors(host) {
                let Some(island) = islands[land] else {
                    continue;
                };
                slots.push(HarborSlot {
                    host,
                    serviced: land,
                    on_land: false,
                    facing: origin.direction_to(graph.position(land)),
                    island,
                });
            }
        }
    }

    slots
}

/// Which positions already host a harbor or are serviced by one
struct Occupancy {
    hosting: Vec<bool>,
    serviced: Vec<bool>,
}

impl Occupancy {
    fn new(len: usize) -> Self {
        Self {
            hosting: vec![false; len],
            serviced: vec![false; len],
        }
    }

    fn accepts(&self, graph: &AdjacencyGraph, slot: &HarborSlot) -> bool {
        !self.hosting[slot.host]
            && !self.serviced[slot.serviced]
            && !graph.neighbors(slot.host).iter().any(|&n| self.hosting[n])
    }

    fn claim(&mut self, slot: &HarborSlot) {
        self.hosting[slot.host] = true;
        self.serviced[slot.serviced] = true;
    }
}

/// Place harbors from `harbors` onto the coast of `tiles`, in place.
///
/// In balanced mode every island first gets one harbor (while any are
/// left), then the remainder is spread greedily over the shuffled slots.
pub fn place_harbors<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    tiles: &mut [Tile],
    harbors: &[Harbor],
    mode: HarborPlacementMode,
    rng: &mut R,
) -> Vec<PlacedHarbor> {
    let terrain: Vec<Terrain> = tiles.iter().map(|t| t.terrain).collect();
    let islands = detect_islands(graph, &terrain);
    let island_count = islands.iter().flatten().max().map_or(0, |&max| max + 1);

    let mut slots = harbor_slots(graph, &terrain, &islands);
    slots.shuffle(rng);
    let mut supply = harbors.to_vec();
    supply.shuffle(rng);

    let mut occupancy = Occupancy::new(tiles.len());
    let mut placed = Vec::new();

    if mode == HarborPlacementMode::Balanced {
        for island in 0..island_count {
            let Some(slot) = slots
                .iter()
                .find(|s| s.island == island && occupancy.accepts(graph, s))
            else {
                continue;
            };
            let Some(harbor_type) = supply.pop() else {
                break;
            };
            occupancy.claim(slot);
            placed.push(PlacedHarbor { slot: *slot, harbor_type });
        }
    }

    for slot in &slots {
        if supply.is_empty() {
            break;
        }
        if !occupancy.accepts(graph, slot) {
            continue;
        }
        if let Some(harbor_type) = supply.pop() {
            occupancy.claim(slot);
            placed.push(PlacedHarbor { slot: *slot, harbor_type });
        }
    }

    for harbor in &placed {
        tiles[harbor.slot.host].harbor = Some(HarborPlacement::new(
            harbor.harbor_type,
            harbor.slot.facing,
            harbor.slot.on_land,
        ));
    }

    debug!(
        placed = placed.len(),
        supply = harbors.len(),
        islands = island_count,
        "Harbors placed"
    );

    placed
}
