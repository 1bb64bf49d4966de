//! CELF (Cost-Effective Lazy Forward) seed selection.

use std::collections::BinaryHeap;

use tracing::{debug, instrument};

use crate::{
    diffusion::DiffusionModel,
    error::Result,
    graph::NodeId,
};

/// A heap entry carrying the round in which its marginal gain was computed.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CelfEntry {
    gain: f64,
    node: NodeId,
    round: usize,
}

impl Eq for CelfEntry {}

impl Ord for CelfEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.gain
            .total_cmp(&other.gain)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for CelfEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy-forward greedy selection.
///
/// Marginal gains are kept in a max-heap; a popped entry is accepted only if
/// it was computed in the current round, otherwise its gain is refreshed and
/// it is pushed back. Submodularity makes every stale gain an upper bound on
/// the true one, so an entry that survives the refresh is the true argmax and
/// the result matches [`crate::Greedy`] for identical inputs, up to the
/// shared smallest-node-id tie-break.
#[derive(Clone, Debug)]
pub struct Celf<M> {
    model: M,
    use_multithread: bool,
}

impl<M: DiffusionModel> Celf<M> {
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

    /// Selects up to `k` seeds (clamped to the node count), evaluating
    /// candidates with `rounds` Monte-Carlo trials derived from `seed`.
    ///
    /// The model is left bound to the returned seed set.
    ///
    /// # Errors
    /// Propagates [`crate::ImError`] from the model's seed validation.
    #[instrument(name = "celf.run", skip(self))]
    pub fn run(&mut self, k: usize, rounds: usize, seed: u64) -> Result<Vec<NodeId>> {
        let node_count = self.model.graph().node_count();
        let k = k.min(node_count);
        let mut seeds: Vec<NodeId> = Vec::with_capacity(k);
        if k == 0 {
            self.model.set_seeds(&seeds)?;
            return Ok(seeds);
        }

        let mut heap = BinaryHeap::with_capacity(node_count);
        for node in 0..node_count {
            let gain = self.spread(&[node], rounds, seed)?;
            heap.push(CelfEntry {
                gain,
                node,
                round: 0,
            });
        }

        let mut base_spread = 0.0;
        let mut refreshes = 0_usize;
        while seeds.len() < k {
            let Some(entry) = heap.pop() else { break };
            if entry.round == seeds.len() {
                debug!(node = entry.node, gain = entry.gain, refreshes, "accepted seed");
                seeds.push(entry.node);
                if seeds.len() < k {
                    base_spread = self.spread(&seeds, rounds, seed)?;
                }
            } else {
                let mut candidate = seeds.clone();
                candidate.push(entry.node);
                let spread = self.spread(&candidate, rounds, seed)?;
                refreshes += 1;
                heap.push(CelfEntry {
                    gain: spread - base_spread,
                    node: entry.node,
                    round: seeds.len(),
                });
            }
        }

        self.model.set_seeds(&seeds)?;
        Ok(seeds)
    }

    fn spread(&mut self, seeds: &[NodeId], rounds: usize, seed: u64) -> Result<f64> {
        self.model.set_seeds(seeds)?;
        Ok(self
            .model
            .run_monte_carlo_diffusion(rounds, seed, self.use_multithread))
    }
}
