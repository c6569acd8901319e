//! Number token placement on producing terrain.

use crate::board::{Terrain, TokenValue};
use crate::cluster::validate_clusters;
use crate::inventory::Inventory;
use crate::settings::Settings;
use crate::topology::AdjacencyGraph;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Shuffles allowed when no same-number tokens may touch
const TOKEN_SHUFFLE_BUDGET: usize = 3000;

/// Outcome of token placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAssignment {
    /// Token for every position (`None` on sea, desert, or when the
    /// inventory runs out)
    pub tokens: Vec<Option<TokenValue>>,
    /// Shuffles tried
    pub attempts: usize,
    /// False when the budget ran out and the last shuffle was kept
    pub satisfied: bool,
}

/// Shuffle budget for a same-number cluster setting.
///
/// Looser bounds pass sooner, so they get fewer tries.
pub fn token_attempts(max_touching_same_number: u8) -> usize {
    match max_touching_same_number {
        0 => TOKEN_SHUFFLE_BUDGET,
        1 => TOKEN_SHUFFLE_BUDGET / 2,
        _ => TOKEN_SHUFFLE_BUDGET / 6,
    }
}

/// Distribute the inventory's tokens over the producing positions of
/// `terrain`, retrying until both number rules hold.
///
/// Shuffled values are dealt along `order`; positions missing from it get
/// no token. Never fails: if the budget runs out the last shuffle is returned with
/// `satisfied = false`.
pub fn assign_tokens<R: Rng + ?Sized>(
    graph: &AdjacencyGraph,
    terrain: &[Terrain],
    order: &[usize],
    inventory: &Inventory,
    settings: &Settings,
    rng: &mut R,
) -> TokenAssignment {
    let slots: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| terrain.get(i).is_some_and(Terrain::is_producing))
        .collect();
    let high_values = inventory.high_value_tokens();
    let max_cluster = settings.max_touching_same_number as usize + 1;
    let attempts = token_attempts(settings.max_touching_same_number);

    let mut values = inventory.token_values();
    let mut last = None;

    for attempt in 1..=attempts {
        values.shuffle(rng);
        let tokens = place_tokens(terrain.len(), &slots, &values);

        let high_ok = !settings.prevent_high_value_adjacency
            || high_values_separated(graph, &tokens, &high_values);
        if high_ok && validate_clusters(graph, max_cluster, |i| tokens[i]) {
            debug!(attempt, "Token placement found");
            return TokenAssignment {
                tokens,
                attempts: attempt,
                satisfied: true,
            };
        }
        last = Some(tokens);
    }

    warn!(
        attempts,
        max_cluster,
        prevent_high_value_adjacency = settings.prevent_high_value_adjacency,
        "Token rules not satisfiable, keeping last shuffle"
    );

    TokenAssignment {
        tokens: last.unwrap_or_else(|| vec![None; terrain.len()]),
        attempts,
        satisfied: false,
    }
}

/// Lay `values` onto `slots` in order
fn place_tokens(len: usize, slots: &[usize], values: &[TokenValue]) -> Vec<Option<TokenValue>> {
    let mut tokens = vec![None; len];
    for (&slot, &value) in slots.iter().zip(values) {
        tokens[slot] = Some(value);
    }
    tokens
}

/// Check that no high-value token touches another high-value token
pub fn high_values_separated(
    graph: &AdjacencyGraph,
    tokens: &[Option<TokenValue>],
    high_values: &[TokenValue],
) -> bool {
    let is_high = |i: usize| tokens[i].is_some_and(|t| high_values.contains(&t));

    for i in (0..tokens.len()).filter(|&i| is_high(i)) {
        if graph.neighbors(i).iter().any(|&n| is_high(n)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Resource;
    use crate::layout::{row_layout, standard_positions};
    use crate::topology::build_adjacency;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Standard board with the first 23 positions as land, in inventory order
    fn top_rows_terrain() -> Vec<Terrain> {
        let inventory = Inventory::standard();
        let mut terrain = inventory.land_tiles();
        terrain.resize(42, Terrain::Sea);
        terrain
    }

    fn index_order(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    #[test]
    fn test_attempt_budget_scales_down() {
        assert_eq!(token_attempts(0), 3000);
        assert_eq!(token_attempts(1), 1500);
        assert_eq!(token_attempts(2), 500);
        assert_eq!(token_attempts(5), 500);
    }

    #[test]
    fn test_tokens_only_on_producing_terrain() {
        let graph = build_adjacency(&standard_positions());
        let terrain = top_rows_terrain();
        let inventory = Inventory::standard();
        let mut rng = StdRng::seed_from_u64(42);

        let assignment = assign_tokens(&graph, &terrain, &index_order(42), &inventory, &Settings::default(), &mut rng);

        for (i, token) in assignment.tokens.iter().enumerate() {
            assert_eq!(token.is_some(), terrain[i].is_producing(), "position {}", i);
        }
        let mut placed: Vec<TokenValue> = assignment.tokens.iter().flatten().copied().collect();
        placed.sort();
        assert_eq!(placed, inventory.token_values());
    }

    #[test]
    fn test_rules_hold_when_satisfied() {
        let graph = build_adjacency(&standard_positions());
        let terrain = top_rows_terrain();
        let inventory = Inventory::standard();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = assign_tokens(&graph, &terrain, &index_order(42), &inventory, &Settings::default(), &mut rng);
            assert!(assignment.satisfied);

            let tokens = &assignment.tokens;
            assert!(high_values_separated(&graph, tokens, &[6, 8]));
            for i in 0..tokens.len() {
                for &n in graph.neighbors(i) {
                    if tokens[i].is_some() {
                        assert_ne!(tokens[i], tokens[n], "Same number touching at {} and {}", i, n);
                    }
                }
            }
        }
    }

    #[test]
    fn test_high_value_check() {
        // Path of four positions: 0-1-2-3
        let graph = build_adjacency(&row_layout(&[4]));
        assert!(high_values_separated(&graph, &[Some(6), Some(3), Some(8), None], &[6, 8]));
        assert!(!high_values_separated(&graph, &[Some(6), Some(8), Some(3), None], &[6, 8]));
        assert!(!high_values_separated(&graph, &[None, Some(8), Some(8), None], &[6, 8]));
        assert!(high_values_separated(&graph, &[Some(6), Some(8)], &[]));
    }

    #[test]
    fn test_unsatisfiable_rules_keep_last_shuffle() {
        // Two touching fields that must hold a 6 and an 8
        let graph = build_adjacency(&row_layout(&[2]));
        let field = Terrain::Resource(Resource::Ore);
        let inventory = Inventory {
            terrain: vec![(field, 2)],
            tokens: vec![(6, 1), (8, 1)],
            harbors: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(9);

        let assignment = assign_tokens(&graph, &[field, field], &[0, 1], &inventory, &Settings::default(), &mut rng);
        assert!(!assignment.satisfied);
        assert_eq!(assignment.attempts, token_attempts(0));
        assert_eq!(assignment.tokens.iter().flatten().count(), 2);

        let relaxed = Settings {
            prevent_high_value_adjacency: false,
            ..Settings::default()
        };
        let assignment = assign_tokens(&graph, &[field, field], &[0, 1], &inventory, &relaxed, &mut rng);
        assert!(assignment.satisfied);
        assert_eq!(assignment.attempts, 1);
    }

    #[test]
    fn test_tokens_follow_deal_order() {
        // Three fields but a single token: it lands on the first dealt position
        let graph = build_adjacency(&row_layout(&[3]));
        let field = Terrain::Resource(Resource::Sheep);
        let inventory = Inventory {
            terrain: vec![(field, 3)],
            tokens: vec![(5, 1)],
            harbors: Vec::new(),
        };
        let terrain = [field, field, field];
        let mut rng = StdRng::seed_from_u64(1);

        let assignment = assign_tokens(&graph, &terrain, &[2, 0, 1], &inventory, &Settings::default(), &mut rng);
        assert_eq!(assignment.tokens, vec![None, None, Some(5)]);

        let assignment = assign_tokens(&graph, &terrain, &[1], &inventory, &Settings::default(), &mut rng);
        assert_eq!(assignment.tokens, vec![None, Some(5), None]);
    }
}
