//! Independent Cascade diffusion.

use rand::{Rng, distributions::Standard, rngs::SmallRng};

use crate::{
    error::Result,
    graph::{Graph, NodeId},
};

use super::{DiffusionModel, normalise_seeds};

/// The Independent Cascade model.
///
/// Each newly activated node gets exactly one chance to activate each
/// out-neighbour, succeeding with the edge's probability.
///
/// # Examples
/// ```
/// use netim_core::{DiffusionModel, Graph, IndependentCascade};
///
/// let graph = Graph::from_weighted_edges(3, true, &[(0, 1), (1, 2)], &[1.0, 1.0])?;
/// let model = IndependentCascade::new(&graph, &[0])?;
/// let spread = model.run_monte_carlo_diffusion(100, 42, false);
/// assert_eq!(spread, 3.0);
/// # Ok::<(), netim_core::ImError>(())
/// ```
#[derive(Clone, Debug)]
pub struct IndependentCascade<'g> {
    graph: &'g Graph,
    seeds: Vec<NodeId>,
}

impl<'g> IndependentCascade<'g> {
    /// Binds the model to `graph` with the given initial seed set.
    ///
    /// # Errors
    /// Returns [`crate::ImError::InvalidNode`] when a seed is out of range.
    pub fn new(graph: &'g Graph, seeds: &[NodeId]) -> Result<Self> {
        Ok(Self {
            graph,
            seeds: normalise_seeds(graph, seeds)?,
        })
    }
}

impl DiffusionModel for IndependentCascade<'_> {
    fn graph(&self) -> &Graph {
        self.graph
    }

    fn seeds(&self) -> &[NodeId] {
        &self.seeds
    }

    fn set_seeds(&mut self, seeds: &[NodeId]) -> Result<()> {
        self.seeds = normalise_seeds(self.graph, seeds)?;
        Ok(())
    }

    fn run_single_trial(&self, rng: &mut SmallRng) -> usize {
        let mut activated = vec![false; self.graph.node_count()];
        // The frontier doubles as the queue: a running front index avoids
        // clearing between levels, and its final length is the spread.
        let mut frontier = self.seeds.clone();
        for &seed in &frontier {
            activated[seed] = true;
        }

        let mut front = 0;
        while front < frontier.len() {
            let node = frontier[front];
            front += 1;
            for (target, weight) in self.graph.weighted_out_neighbours(node) {
                if !activated[target] {
                    let draw: f64 = rng.sample(Standard);
                    if draw < weight {
                        activated[target] = true;
                        frontier.push(target);
                    }
                }
            }
        }
        frontier.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rng::trial_rng;

    #[test]
    fn certain_edges_activate_the_whole_path() {
        let graph =
            Graph::from_weighted_edges(4, true, &[(0, 1), (1, 2), (2, 3)], &[1.0, 1.0, 1.0])
                .expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[0]).expect("seed is valid");
        assert_eq!(model.run_single_trial(&mut trial_rng(1)), 4);
    }

    #[test]
    fn impossible_edges_never_fire() {
        let graph = Graph::from_weighted_edges(2, true, &[(0, 1)], &[0.0]).expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[0]).expect("seed is valid");
        for trial in 0..50 {
            assert_eq!(model.run_single_trial(&mut trial_rng(trial)), 1);
        }
    }

    #[test]
    fn empty_seed_set_spreads_nothing() {
        let graph = Graph::from_edges(3, true, &[(0, 1)]).expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[]).expect("empty seeds are valid");
        assert_eq!(model.run_single_trial(&mut trial_rng(0)), 0);
        assert_eq!(model.run_monte_carlo_diffusion(10, 0, false), 0.0);
    }

    #[test]
    fn duplicate_seeds_collapse() {
        let graph = Graph::from_edges(3, true, &[]).expect("no edges");
        let model = IndependentCascade::new(&graph, &[1, 1, 1]).expect("seed is valid");
        assert_eq!(model.seeds(), &[1]);
        assert_eq!(model.run_single_trial(&mut trial_rng(0)), 1);
    }

    #[test]
    fn spread_never_drops_below_seed_count() {
        let graph = Graph::from_weighted_edges(5, true, &[(0, 1), (2, 3)], &[0.5, 0.5])
            .expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[0, 2, 4]).expect("seeds are valid");
        for trial in 0..100 {
            assert!(model.run_single_trial(&mut trial_rng(trial)) >= 3);
        }
    }

    #[test]
    fn zero_rounds_return_zero() {
        let graph = Graph::from_edges(2, true, &[(0, 1)]).expect("edges are valid");
        let model = IndependentCascade::new(&graph, &[0]).expect("seed is valid");
        assert_eq!(model.run_monte_carlo_diffusion(0, 3, false), 0.0);
    }
}
