//! Small shared helpers.

use crate::graph::Graph;

/// Estimates the epidemic threshold of `graph` from its degree distribution,
/// `⟨k⟩ / (⟨k²⟩ − ⟨k⟩)`.
///
/// Used as the default infection probability of the SI and SIR models. The
/// closed form ignores edge orientation, so directed graphs contribute their
/// total (in plus out) degree per node. The value is clamped into `(0, 1]`;
/// graphs where every total degree is at most one have no finite threshold
/// and yield `1.0`.
#[must_use]
pub fn infection_threshold(graph: &Graph) -> f64 {
    let degree_sum: usize = (0..graph.node_count())
        .map(|node| total_degree(graph, node))
        .sum();
    let degree_sq_sum: usize = (0..graph.node_count())
        .map(|node| total_degree(graph, node).pow(2))
        .sum();
    if degree_sq_sum <= degree_sum {
        return 1.0;
    }
    (degree_sum as f64 / (degree_sq_sum - degree_sum) as f64).min(1.0)
}

fn total_degree(graph: &Graph, node: usize) -> usize {
    if graph.is_directed() {
        graph.in_degree(node) + graph.out_degree(node)
    } else {
        // Undirected adjacency already counts every incident edge once.
        graph.degree(node)
    }
}
