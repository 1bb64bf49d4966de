//! Fixed-budget Reverse Influence Sampling.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::graph::{Graph, NodeId};

use super::{ModelKind, cover::max_cover, rr::sample_rr_set};

/// The simplest RIS selector: the caller fixes the RR-set budget directly
/// instead of deriving it from an approximation guarantee.
///
/// # Examples
/// ```
/// use netim_core::{BaseRis, Graph, ModelKind};
///
/// let graph = Graph::from_weighted_edges(4, true, &[(0, 1), (0, 2), (0, 3)], &[1.0; 3])?;
/// let seeds = BaseRis::new(&graph, ModelKind::IndependentCascade).run(1, 200, 42);
/// assert_eq!(seeds, vec![0]);
/// # Ok::<(), netim_core::ImError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BaseRis<'g> {
    graph: &'g Graph,
    kind: ModelKind,
}

impl<'g> BaseRis<'g> {
    /// Binds the selector to `graph` under the given live-edge model.
    #[must_use]
    pub fn new(graph: &'g Graph, kind: ModelKind) -> Self {
        Self { graph, kind }
    }

    /// Samples `num_rr_sets` RR sets with roots drawn uniformly, then selects
    /// up to `k` seeds (clamped to the node count) by greedy max-cover.
    ///
    /// A zero budget in either argument selects nothing. Fewer than `k`
    /// seeds come back when the sampled collection is exhausted first.
    #[instrument(name = "base_ris.run", skip(self))]
    #[must_use]
    pub fn run(&self, k: usize, num_rr_sets: usize, seed: u64) -> Vec<NodeId> {
        let node_count = self.graph.node_count();
        if k == 0 || num_rr_sets == 0 || node_count == 0 {
            return Vec::new();
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let rr_sets: Vec<Vec<NodeId>> = (0..num_rr_sets)
            .map(|_| {
                let root = rng.gen_range(0..node_count);
                sample_rr_set(self.graph, self.kind, root, &mut rng)
            })
            .collect();

        let outcome = max_cover(&rr_sets, node_count, k);
        debug!(
            rr_sets = rr_sets.len(),
            covered = outcome.covered,
            "max-cover complete"
        );
        outcome.seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn hub_graph() -> Graph {
        // 0 reaches {1, 2, 3} with certainty; 4 reaches {5}.
        Graph::from_weighted_edges(6, true, &[(0, 1), (0, 2), (0, 3), (4, 5)], &[1.0; 4])
            .expect("edges are valid")
    }

    #[rstest]
    #[case(ModelKind::IndependentCascade)]
    #[case(ModelKind::LinearThreshold)]
    fn finds_the_hub_under_both_models(#[case] kind: ModelKind) {
        let graph = hub_graph();
        let seeds = BaseRis::new(&graph, kind).run(2, 400, 7);
        // With 400 samples every root appears, so the cover is exact: 0
        // dominates four of the six root classes and 4 the remaining two.
        assert_eq!(seeds, vec![0, 4]);
    }

    #[test]
    fn zero_budgets_select_nothing() {
        let graph = hub_graph();
        let selector = BaseRis::new(&graph, ModelKind::IndependentCascade);
        assert!(selector.run(0, 100, 0).is_empty());
        assert!(selector.run(2, 0, 0).is_empty());
    }

    #[test]
    fn is_deterministic_for_a_seed() {
        let graph = hub_graph();
        let selector = BaseRis::new(&graph, ModelKind::IndependentCascade);
        assert_eq!(selector.run(3, 150, 9), selector.run(3, 150, 9));
    }
}
