//! Influence Maximization via Martingales.

use std::f64::consts::{E, LN_2, SQRT_2};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    error::{ImError, Result},
    graph::{Graph, NodeId},
};

use super::{ModelKind, cover::max_cover, rr::sample_rr_set};

/// The two-phase IMM selector of Tang, Shi, and Xiao.
///
/// The sampling phase grows the RR collection geometrically until a
/// martingale-based lower bound on the optimum is established, then extends
/// it to the sample size the `(1 − 1/e − ε)` guarantee requires. The
/// node-selection phase is a greedy max-cover over the final collection.
///
/// With probability at least `1 − n^(−ℓ)` the returned seed set's spread is
/// at least `(1 − 1/e − ε)` times the optimum.
#[derive(Clone, Debug)]
pub struct Imm<'g> {
    graph: &'g Graph,
    kind: ModelKind,
}

impl<'g> Imm<'g> {
    /// Binds the selector to `graph` under the given live-edge model.
    #[must_use]
    pub fn new(graph: &'g Graph, kind: ModelKind) -> Self {
        Self { graph, kind }
    }

    /// Selects up to `k` seeds with approximation parameter `epsilon` and
    /// failure exponent `ell`.
    ///
    /// A budget of zero selects nothing, and a budget covering every node
    /// returns all of them.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] when `epsilon <= 0` or
    /// `ell <= 0`.
    #[instrument(name = "imm.run", skip(self))]
    pub fn run(&self, k: usize, epsilon: f64, ell: f64, seed: u64) -> Result<Vec<NodeId>> {
        if epsilon <= 0.0 {
            return Err(ImError::InvalidParameter {
                reason: format!("epsilon ({epsilon}) must be positive"),
            });
        }
        if ell <= 0.0 {
            return Err(ImError::InvalidParameter {
                reason: format!("ell ({ell}) must be positive"),
            });
        }
        let node_count = self.graph.node_count();
        if k == 0 {
            return Ok(Vec::new());
        }
        if node_count <= k {
            return Ok((0..node_count).collect());
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let rr_sets = self.sampling(k, epsilon, ell, &mut rng);
        debug!(rr_sets = rr_sets.len(), "sampling phase complete");
        Ok(max_cover(&rr_sets, node_count, k).seeds)
    }

    /// The sampling phase: doubling search for a lower bound on the optimum,
    /// then extension to the bound-derived sample size.
    fn sampling(&self, k: usize, epsilon: f64, ell: f64, rng: &mut SmallRng) -> Vec<Vec<NodeId>> {
        let node_count = self.graph.node_count();
        let n = node_count as f64;
        // Spread the failure probability over both phases.
        let ell = ell * (1.0 + LN_2 / n.ln());

        let eps_prime = epsilon * SQRT_2;
        let log_binom = log_binomial(node_count, k);
        let lambda_prime = (2.0 + 2.0 * eps_prime / 3.0)
            * (log_binom + ell * n.ln() + n.log2().ln())
            * n
            / (eps_prime * eps_prime);

        let mut rr_sets: Vec<Vec<NodeId>> = Vec::new();
        let mut lower_bound = 1.0;

        let doubling_rounds = n.log2() as usize;
        for i in 1..=doubling_rounds {
            let x = n / 2_f64.powi(i as i32);
            let target = (lambda_prime / x).ceil() as usize;
            self.extend(&mut rr_sets, target, rng);

            let outcome = max_cover(&rr_sets, node_count, k);
            let estimate = n * outcome.coverage_fraction(rr_sets.len());
            debug!(round = i, rr_sets = rr_sets.len(), estimate, "doubling round");
            if estimate >= (1.0 + eps_prime) * x {
                lower_bound = estimate / (1.0 + eps_prime);
                break;
            }
        }

        let one_minus_inv_e = 1.0 - 1.0 / E;
        let alpha = (ell * n.ln() + LN_2).sqrt();
        let beta = (one_minus_inv_e * (log_binom + ell * n.ln() + LN_2)).sqrt();
        let lambda_star =
            2.0 * n * (one_minus_inv_e * alpha + beta).powi(2) / (epsilon * epsilon);
        let theta = (lambda_star / lower_bound).ceil() as usize;
        self.extend(&mut rr_sets, theta, rng);
        rr_sets
    }

    fn extend(&self, rr_sets: &mut Vec<Vec<NodeId>>, target: usize, rng: &mut SmallRng) {
        let node_count = self.graph.node_count();
        while rr_sets.len() < target {
            let root = rng.gen_range(0..node_count);
            rr_sets.push(sample_rr_set(self.graph, self.kind, root, rng));
        }
    }
}

/// `ln C(n, k)` without materialising the binomial.
fn log_binomial(n: usize, k: usize) -> f64 {
    if k == 0 || k >= n {
        return 0.0;
    }
    let mut result = 0.0;
    for i in (n - k + 1)..=n {
        result += (i as f64).ln();
    }
    for i in 1..=k {
        result -= (i as f64).ln();
    }
    result
}
