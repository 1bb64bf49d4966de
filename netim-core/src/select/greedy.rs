//! Greedy simulation-based seed selection.

use tracing::{debug, instrument};

use crate::{
    diffusion::DiffusionModel,
    error::Result,
    graph::NodeId,
};

/// Plain greedy selection: each round evaluates every remaining candidate
/// with an independent, deterministically seeded Monte-Carlo run and keeps
/// the argmax.
///
/// # Examples
/// ```
/// use netim_core::{Graph, Greedy, IndependentCascade};
///
/// let graph = Graph::from_weighted_edges(4, true, &[(0, 1), (0, 2), (3, 1)], &[1.0; 3])?;
/// let model = IndependentCascade::new(&graph, &[])?;
/// let seeds = Greedy::new(model).run(2, 50, 42)?;
/// assert_eq!(seeds[0], 0);
/// # Ok::<(), netim_core::ImError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Greedy<M> {
    model: M,
    use_multithread: bool,
}

impl<M: DiffusionModel> Greedy<M> {
    /// Wraps a diffusion model to be used as the spread oracle.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            use_multithread: false,
        }
    }

    /// Runs each oracle call's trial loop across the thread pool.
    #[must_use]
    pub fn with_multithread(mut self, use_multithread: bool) -> Self {
        self.use_multithread = use_multithread;
        self
    }

    /// Selects up to `k` seeds (clamped to the node count), evaluating each
    /// candidate with `rounds` Monte-Carlo trials derived from `seed`.
    ///
    /// Ties break on the smaller node id. The model is left bound to the
    /// returned seed set.
    ///
    /// # Errors
    /// Propagates [`crate::ImError`] from the model's seed validation.
    #[instrument(name = "greedy.run", skip(self))]
    pub fn run(&mut self, k: usize, rounds: usize, seed: u64) -> Result<Vec<NodeId>> {
        let node_count = self.model.graph().node_count();
        let k = k.min(node_count);
        let mut seeds: Vec<NodeId> = Vec::with_capacity(k);

        for round in 0..k {
            let mut best: Option<(f64, NodeId)> = None;
            for node in 0..node_count {
                if seeds.contains(&node) {
                    continue;
                }
                let mut candidate = seeds.clone();
                candidate.push(node);
                self.model.set_seeds(&candidate)?;
                let spread =
                    self.model
                        .run_monte_carlo_diffusion(rounds, seed, self.use_multithread);
                if best.is_none_or(|(gain, _)| spread > gain) {
                    best = Some((spread, node));
                }
            }
            let (spread, chosen) = best.expect("the budget is clamped to the node count");
            debug!(round, chosen, spread, "selected seed");
            seeds.push(chosen);
        }

        self.model.set_seeds(&seeds)?;
        Ok(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{diffusion::IndependentCascade, graph::Graph};

    #[test]
    fn picks_the_deterministic_hub_first() {
        // 0 reaches {1, 2, 3} with certainty; 4 reaches only {5}.
        let graph = Graph::from_weighted_edges(
            6,
            true,
            &[(0, 1), (0, 2), (0, 3), (4, 5)],
            &[1.0, 1.0, 1.0, 1.0],
        )
        .expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[]).expect("empty seeds are valid");
        let seeds = Greedy::new(model).run(2, 20, 7).expect("selection must run");
        assert_eq!(seeds, vec![0, 4]);
    }

    #[test]
    fn clamps_budget_to_node_count() {
        let graph = Graph::from_edges(3, true, &[(0, 1)]).expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[]).expect("empty seeds are valid");
        let seeds = Greedy::new(model).run(10, 5, 0).expect("selection must run");
        assert_eq!(seeds.len(), 3);
    }

    #[test]
    fn ties_break_on_the_smaller_node() {
        // Two identical disjoint edges; 0 and 2 tie, 0 must win.
        let graph = Graph::from_weighted_edges(4, true, &[(0, 1), (2, 3)], &[1.0, 1.0])
            .expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[]).expect("empty seeds are valid");
        let seeds = Greedy::new(model).run(1, 10, 0).expect("selection must run");
        assert_eq!(seeds, vec![0]);
    }

    #[test]
    fn zero_budget_returns_no_seeds() {
        let graph = Graph::from_edges(2, true, &[(0, 1)]).expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[]).expect("empty seeds are valid");
        let seeds = Greedy::new(model).run(0, 10, 0).expect("selection must run");
        assert!(seeds.is_empty());
    }
}
