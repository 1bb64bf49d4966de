//! Stochastic diffusion models and the Monte-Carlo simulation harness.
//!
//! Every model is bound to a read-only [`Graph`] snapshot and a seed set, and
//! exposes one stochastic cascade per call to
//! [`DiffusionModel::run_single_trial`]. The provided
//! [`DiffusionModel::run_monte_carlo_diffusion`] aggregates trials into a mean
//! spread that is bit-identical for any thread count.

mod epidemic;
mod independent_cascade;
mod linear_threshold;
mod monte_carlo;

use rand::rngs::SmallRng;

use crate::{
    error::{ImError, Result},
    graph::{Graph, NodeId},
};

pub use self::{
    epidemic::{SusceptibleInfected, SusceptibleInfectedRecovered},
    independent_cascade::IndependentCascade,
    linear_threshold::LinearThreshold,
};

/// A stochastic diffusion process over a shared graph snapshot.
///
/// Implementations are reused across many trials; the seed set is the only
/// mutable state and is replaced wholesale via [`DiffusionModel::set_seeds`].
pub trait DiffusionModel: Sync {
    /// Returns the graph this model diffuses over.
    fn graph(&self) -> &Graph;

    /// Returns the current seed set, sorted and free of duplicates.
    fn seeds(&self) -> &[NodeId];

    /// Replaces the seed set; duplicates collapse to the set.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] when a seed is out of range.
    fn set_seeds(&mut self, seeds: &[NodeId]) -> Result<()>;

    /// Runs one stochastic cascade and returns the number of activated nodes.
    ///
    /// An empty seed set activates nothing and returns `0`.
    fn run_single_trial(&self, rng: &mut SmallRng) -> usize;

    /// Runs `rounds` independent trials and returns the mean spread.
    ///
    /// The per-trial seed table is derived from `seed` up front, so the
    /// result is identical whether the trials run on one thread or many.
    /// Zero rounds yield `0.0`.
    fn run_monte_carlo_diffusion(&self, rounds: usize, seed: u64, use_multithread: bool) -> f64 {
        monte_carlo::mean_spread(self, rounds, seed, use_multithread)
    }
}

/// Validates `seeds` against `graph` and collapses them to a sorted set.
pub(crate) fn normalise_seeds(graph: &Graph, seeds: &[NodeId]) -> Result<Vec<NodeId>> {
    for &seed in seeds {
        if seed >= graph.node_count() {
            return Err(ImError::InvalidNode {
                node: seed,
                node_count: graph.node_count(),
            });
        }
    }
    let mut seeds = seeds.to_vec();
    seeds.sort_unstable();
    seeds.dedup();
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_collapses_duplicates() {
        let graph = Graph::new(5, true);
        let seeds = normalise_seeds(&graph, &[3, 1, 3, 0, 1]).expect("seeds are in range");
        assert_eq!(seeds, vec![0, 1, 3]);
    }

    #[test]
    fn normalise_rejects_out_of_range_seed() {
        let graph = Graph::new(2, true);
        let err = normalise_seeds(&graph, &[0, 7]).expect_err("7 is out of range");
        assert_eq!(
            err,
            ImError::InvalidNode {
                node: 7,
                node_count: 2
            }
        );
    }
}
