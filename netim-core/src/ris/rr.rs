//! Reverse Reachable set generation.

use rand::{Rng, distributions::Standard, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::graph::{Graph, NodeId};

use super::ModelKind;

/// Samples one RR set rooted at `root`. The root is always the first element.
pub(super) fn sample_rr_set(
    graph: &Graph,
    kind: ModelKind,
    root: NodeId,
    rng: &mut SmallRng,
) -> Vec<NodeId> {
    match kind {
        ModelKind::IndependentCascade => rr_independent_cascade(graph, root, rng),
        ModelKind::LinearThreshold => rr_linear_threshold(graph, root, rng),
    }
}

/// Reverse BFS over independently sampled live in-edges.
fn rr_independent_cascade(graph: &Graph, root: NodeId, rng: &mut SmallRng) -> Vec<NodeId> {
    let mut visited = FxHashSet::default();
    visited.insert(root);
    let mut queue = vec![root];
    let mut front = 0;

    while front < queue.len() {
        let node = queue[front];
        front += 1;
        for (source, weight) in graph.weighted_in_neighbours(node) {
            if visited.contains(&source) {
                continue;
            }
            let draw: f64 = rng.sample(Standard);
            if draw < weight {
                visited.insert(source);
                queue.push(source);
            }
        }
    }
    queue
}

/// Reverse random walk: at each node at most one live in-edge is drawn, with
/// probability proportional to its weight and remainder probability of
/// stopping. The walk is a simple path, so reaching a node already collected
/// terminates it.
fn rr_linear_threshold(graph: &Graph, root: NodeId, rng: &mut SmallRng) -> Vec<NodeId> {
    let mut visited = FxHashSet::default();
    visited.insert(root);
    let mut path = vec![root];
    let mut current = root;

    loop {
        let total: f64 = graph
            .weighted_in_neighbours(current)
            .map(|(_, weight)| weight)
            .sum();
        let draw: f64 = rng.sample(Standard);
        if draw >= total {
            break;
        }
        let mut cumulative = 0.0;
        let mut chosen = None;
        for (source, weight) in graph.weighted_in_neighbours(current) {
            cumulative += weight;
            if draw < cumulative {
                chosen = Some(source);
                break;
            }
        }
        // Rounding in the prefix sum can leave the draw uncovered; treat it
        // as the stop outcome.
        let Some(source) = chosen else { break };
        if !visited.insert(source) {
            break;
        }
        path.push(source);
        current = source;
    }
    path
}
