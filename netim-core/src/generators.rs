//! Graph builders for tests, benchmarks, and quick experiments.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};

use crate::{
    error::{ImError, Result},
    graph::Graph,
};

/// Builds an Erdős–Rényi `G(n, p)` graph, deterministic for a fixed seed.
///
/// Every ordered pair (directed) or unordered pair (undirected) of distinct
/// nodes carries an edge of weight `1.0` with probability `p`.
///
/// # Errors
/// Returns [`ImError::InvalidParameter`] when `p` is outside `[0, 1]`.
pub fn gnp_random_graph(node_count: usize, p: f64, seed: u64, directed: bool) -> Result<Graph> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ImError::InvalidParameter {
            reason: format!("edge probability {p} must be in [0, 1]"),
        });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::new(node_count, directed);
    for source in 0..node_count {
        let targets = if directed { 0 } else { source + 1 };
        for target in targets..node_count {
            if source == target {
                continue;
            }
            let draw: f64 = rng.sample(Standard);
            if draw < p {
                graph.add_edge(source, target, 1.0)?;
            }
        }
    }
    Ok(graph)
}

/// Builds Zachary's karate-club graph: 34 nodes, 78 undirected edges, all
/// weights `1.0`.
#[must_use]
pub fn karate_club_graph() -> Graph {
    const EDGES: [(usize, usize); 78] = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (0, 5),
        (0, 6),
        (0, 7),
        (0, 8),
        (0, 10),
        (0, 11),
        (0, 12),
        (0, 13),
        (0, 17),
        (0, 19),
        (0, 21),
        (0, 31),
        (1, 2),
        (1, 3),
        (1, 7),
        (1, 13),
        (1, 17),
        (1, 19),
        (1, 21),
        (1, 30),
        (2, 3),
        (2, 7),
        (2, 8),
        (2, 9),
        (2, 13),
        (2, 27),
        (2, 28),
        (2, 32),
        (3, 7),
        (3, 12),
        (3, 13),
        (4, 6),
        (4, 10),
        (5, 6),
        (5, 10),
        (5, 16),
        (6, 16),
        (8, 30),
        (8, 32),
        (8, 33),
        (9, 33),
        (13, 33),
        (14, 32),
        (14, 33),
        (15, 32),
        (15, 33),
        (18, 32),
        (18, 33),
        (19, 33),
        (20, 32),
        (20, 33),
        (22, 32),
        (22, 33),
        (23, 25),
        (23, 27),
        (23, 29),
        (23, 32),
        (23, 33),
        (24, 25),
        (24, 27),
        (24, 31),
        (25, 31),
        (26, 29),
        (26, 33),
        (27, 33),
        (28, 31),
        (28, 33),
        (29, 32),
        (29, 33),
        (30, 32),
        (30, 33),
        (31, 32),
        (31, 33),
        (32, 33),
    ];
    Graph::from_edges(34, false, &EDGES).expect("the karate-club edge list is in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnp_is_deterministic_for_a_seed() {
        let first = gnp_random_graph(30, 0.2, 9, true).expect("p is valid");
        let second = gnp_random_graph(30, 0.2, 9, true).expect("p is valid");
        assert_eq!(first.edge_count(), second.edge_count());
        for source in 0..30 {
            for target in 0..30 {
                assert_eq!(first.has_edge(source, target), second.has_edge(source, target));
            }
        }
    }

    #[test]
    fn gnp_extremes_are_empty_and_complete() {
        let empty = gnp_random_graph(10, 0.0, 1, true).expect("p is valid");
        assert_eq!(empty.edge_count(), 0);
        let complete = gnp_random_graph(10, 1.0, 1, false).expect("p is valid");
        assert_eq!(complete.edge_count(), 10 * 9 / 2);
    }

    #[test]
    fn gnp_rejects_bad_probability() {
        let err = gnp_random_graph(5, 1.2, 0, true).expect_err("p is invalid");
        assert!(matches!(err, ImError::InvalidParameter { .. }));
    }

    #[test]
    fn karate_club_has_the_classic_shape() {
        let graph = karate_club_graph();
        assert_eq!(graph.node_count(), 34);
        assert_eq!(graph.edge_count(), 78);
        assert!(!graph.is_directed());
        assert_eq!(graph.degree(33), 17);
        assert_eq!(graph.degree(0), 16);
    }
}
