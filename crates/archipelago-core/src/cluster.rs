//! Connected-component checks over the adjacency graph.
//!
//! A cluster is a maximal connected set of positions that share a category
//! (a terrain kind, a token value, "is land", ...). The category of each
//! position is supplied by a closure returning `None` for positions that do
//! not take part in the check, so one BFS serves every use site.

use crate::topology::AdjacencyGraph;
use std::collections::VecDeque;

/// Check that no same-category cluster is larger than `max_cluster_size`.
///
/// Every position is visited at most once across all traversals, so the
/// whole check is linear in the board size. Stops at the first oversized
/// cluster.
pub fn validate_clusters<K, F>(graph: &AdjacencyGraph, max_cluster_size: usize, category: F) -> bool
where
    K: PartialEq,
    F: Fn(usize) -> Option<K>,
{
    let mut visited = vec![false; graph.len()];

    for start in 0..graph.len() {
        if visited[start] {
            continue;
        }
        let Some(kind) = category(start) else {
            continue;
        };
        let size = flood(graph, start, &kind, &category, &mut visited, |_| {});
        if size > max_cluster_size {
            return false;
        }
    }

    true
}

/// Size of the largest same-category cluster (0 if nothing is categorised)
pub fn largest_cluster<K, F>(graph: &AdjacencyGraph, category: F) -> usize
where
    K: PartialEq,
    F: Fn(usize) -> Option<K>,
{
    let mut visited = vec![false; graph.len()];
    let mut largest = 0;

    for start in 0..graph.len() {
        if visited[start] {
            continue;
        }
        if let Some(kind) = category(start) {
            let size = flood(graph, start, &kind, &category, &mut visited, |_| {});
            largest = largest.max(size);
        }
    }

    largest
}

/// Label every categorised position with the id of its cluster.
///
/// Ids are assigned `0, 1, 2, ...` in order of each cluster's lowest index.
/// Uncategorised positions are labelled `None`.
pub fn label_clusters<K, F>(graph: &AdjacencyGraph, category: F) -> Vec<Option<usize>>
where
    K: PartialEq,
    F: Fn(usize) -> Option<K>,
{
    let mut visited = vec![false; graph.len()];
    let mut labels = vec![None; graph.len()];
    let mut next_id = 0;

    for start in 0..graph.len() {
        if visited[start] {
            continue;
        }
        if let Some(kind) = category(start) {
            flood(graph, start, &kind, &category, &mut visited, |i| labels[i] = Some(next_id));
            next_id += 1;
        }
    }

    labels
}

/// Breadth-first traversal of the cluster containing `start`.
///
/// Marks members as visited, calls `on_member` for each, returns the size.
fn flood<K, F, M>(
    graph: &AdjacencyGraph,
    start: usize,
    kind: &K,
    category: &F,
    visited: &mut [bool],
    mut on_member: M,
) -> usize
where
    K: PartialEq,
    F: Fn(usize) -> Option<K>,
    M: FnMut(usize),
{
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    let mut size = 0;

    while let Some(current) = queue.pop_front() {
        size += 1;
        on_member(current);

        for &neighbor in graph.neighbors(current) {
            if visited[neighbor] {
                continue;
            }
            if category(neighbor).as_ref() == Some(kind) {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }

    size
}
