//! Degree-discount heuristics.
//!
//! Both selectors run off a lazy max-heap: discounting a neighbour pushes a
//! fresh entry, and popped entries whose score no longer matches the node's
//! current score are discarded, so the accepted node always carries its
//! up-to-date priority.

use std::collections::BinaryHeap;

use crate::{
    error::{ImError, Result},
    graph::{Graph, NodeId},
};

use super::Candidate;

/// Single-discount heuristic: pick the highest out-degree node, then treat
/// each chosen node as removed by decrementing its neighbours' degrees.
#[derive(Clone, Debug)]
pub struct SingleDiscount<'g> {
    graph: &'g Graph,
}

impl<'g> SingleDiscount<'g> {
    /// Binds the selector to `graph`.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Selects up to `k` seeds (clamped to the node count).
    #[must_use]
    pub fn run(&self, k: usize) -> Vec<NodeId> {
        let node_count = self.graph.node_count();
        let k = k.min(node_count);

        let mut score: Vec<f64> = (0..node_count)
            .map(|node| self.graph.out_degree(node) as f64)
            .collect();
        let mut heap: BinaryHeap<Candidate> = score
            .iter()
            .enumerate()
            .map(|(node, &score)| Candidate { score, node })
            .collect();
        let mut selected = vec![false; node_count];
        let mut seeds = Vec::with_capacity(k);

        while seeds.len() < k {
            let Some(candidate) = heap.pop() else { break };
            if selected[candidate.node] || candidate.score != score[candidate.node] {
                continue;
            }
            selected[candidate.node] = true;
            seeds.push(candidate.node);

            for &target in self.graph.out_neighbours(candidate.node) {
                if !selected[target] {
                    score[target] -= 1.0;
                    heap.push(Candidate {
                        score: score[target],
                        node: target,
                    });
                }
            }
        }
        seeds
    }
}

/// Degree-discount heuristic of Chen et al.
///
/// For a node with out-degree `d` and `t` already-selected out-neighbours the
/// score is `d − 2t − (d − t)·t·p`, where `p` is the uniform propagation
/// probability.
#[derive(Clone, Debug)]
pub struct DegreeDiscount<'g> {
    graph: &'g Graph,
}

impl<'g> DegreeDiscount<'g> {
    /// Binds the selector to `graph`.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Selects up to `k` seeds (clamped to the node count) under propagation
    /// probability `p`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] when `p` is outside `[0, 1]`.
    pub fn run(&self, k: usize, p: f64) -> Result<Vec<NodeId>> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ImError::InvalidParameter {
                reason: format!("propagation probability {p} must be in [0, 1]"),
            });
        }
        let node_count = self.graph.node_count();
        let k = k.min(node_count);

        let degree: Vec<f64> = (0..node_count)
            .map(|node| self.graph.out_degree(node) as f64)
            .collect();
        let mut score = degree.clone();
        let mut discounted_neighbours = vec![0.0_f64; node_count];
        let mut heap: BinaryHeap<Candidate> = score
            .iter()
            .enumerate()
            .map(|(node, &score)| Candidate { score, node })
            .collect();
        let mut selected = vec![false; node_count];
        let mut seeds = Vec::with_capacity(k);

        while seeds.len() < k {
            let Some(candidate) = heap.pop() else { break };
            if selected[candidate.node] || candidate.score != score[candidate.node] {
                continue;
            }
            selected[candidate.node] = true;
            seeds.push(candidate.node);

            for &target in self.graph.out_neighbours(candidate.node) {
                if selected[target] {
                    continue;
                }
                discounted_neighbours[target] += 1.0;
                let t = discounted_neighbours[target];
                let d = degree[target];
                score[target] = d - 2.0 * t - (d - t) * t * p;
                heap.push(Candidate {
                    score: score[target],
                    node: target,
                });
            }
        }
        Ok(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    /// Two hubs: node 0 covers {1, 2, 3}, node 4 covers {5, 6}, and node 1
    /// also points at 2 and 3.
    fn two_hub_graph() -> Graph {
        Graph::from_edges(
            7,
            true,
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (4, 5), (4, 6)],
        )
        .expect("edges are valid")
    }

    #[test]
    fn single_discount_prefers_undiminished_degree() {
        let graph = two_hub_graph();
        // Selecting 0 discounts its neighbour 1 from 2 to 1, so the untouched
        // hub 4 is next.
        let seeds = SingleDiscount::new(&graph).run(2);
        assert_eq!(seeds, vec![0, 4]);
    }

    #[test]
    fn single_discount_discounts_chosen_neighbourhoods() {
        // A chain 0 -> 1 -> 2 plus a hub 3 -> {4, 5}.
        let graph = Graph::from_edges(6, true, &[(0, 1), (1, 2), (3, 4), (3, 5)])
            .expect("edges are valid");
        let seeds = SingleDiscount::new(&graph).run(2);
        // Hub 3 first (degree 2); then 0 and 1 tie at degree 1 and 0 wins.
        assert_eq!(seeds, vec![3, 0]);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    fn single_discount_clamps_budget(#[case] extra: usize) {
        let graph = Graph::from_edges(3, true, &[(0, 1)]).expect("edges are valid");
        let seeds = SingleDiscount::new(&graph).run(3 + extra);
        assert_eq!(seeds.len(), 3);
    }

    #[test]
    fn degree_discount_penalises_selected_neighbours() {
        let graph = two_hub_graph();
        let seeds = DegreeDiscount::new(&graph)
            .run(2, 0.5)
            .expect("p is a probability");
        // Node 0 scores 3. Its neighbour 1 then scores
        // 2 - 2 - (2 - 1)·1·0.5 = -0.5, so hub 4 (score 2) is next.
        assert_eq!(seeds, vec![0, 4]);
    }

    #[test]
    fn degree_discount_rejects_bad_probability() {
        let graph = two_hub_graph();
        let err = DegreeDiscount::new(&graph)
            .run(2, 1.5)
            .expect_err("1.5 is not a probability");
        assert!(matches!(err, ImError::InvalidParameter { .. }));
    }

    #[test]
    fn empty_graph_yields_no_seeds() {
        let graph = Graph::new(0, true);
        assert!(SingleDiscount::new(&graph).run(4).is_empty());
        let seeds = DegreeDiscount::new(&graph).run(4, 0.1).expect("p is valid");
        assert!(seeds.is_empty());
    }
}
