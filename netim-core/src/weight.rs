//! Edge-weight assignment policies.
//!
//! A policy materialises influence probabilities onto an existing graph. Every
//! stored direction of an edge is assigned independently, so for weighted
//! cascade the in-weights of each node sum to one even on undirected graphs.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};

use crate::{
    error::{ImError, Result},
    graph::Graph,
};

/// The closed set of edge-weighting policies.
#[derive(Clone, Debug, PartialEq)]
pub enum WeightingScheme {
    /// Weighted cascade: `w(u, v) = 1 / in_degree(v)`. Targets with zero
    /// in-degree keep their current weight (such an edge cannot exist, so the
    /// case is vacuous).
    WeightedCascade,
    /// Every edge weight becomes the given probability.
    Uniform(f64),
    /// Every edge weight is drawn uniformly from `[low, high]`, deterministic
    /// for a fixed seed.
    Random { low: f64, high: f64, seed: u64 },
    /// Keep the weights provided at construction.
    Keep,
}

/// Applies `scheme` to every edge of `graph`.
///
/// # Errors
/// Returns [`ImError::InvalidParameter`] when a probability parameter is
/// outside `[0, 1]` or when `low > high`.
pub fn assign_edge_weights(graph: &mut Graph, scheme: &WeightingScheme) -> Result<()> {
    match *scheme {
        WeightingScheme::WeightedCascade => {
            let edges: Vec<_> = graph.stored_edges().collect();
            for (source, target) in edges {
                let in_degree = graph.in_degree(target);
                if in_degree > 0 {
                    graph.set_stored_weight(source, target, 1.0 / in_degree as f64);
                }
            }
        }
        WeightingScheme::Uniform(probability) => {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ImError::InvalidParameter {
                    reason: format!("uniform weight {probability} must be in [0, 1]"),
                });
            }
            let edges: Vec<_> = graph.stored_edges().collect();
            for (source, target) in edges {
                graph.set_stored_weight(source, target, probability);
            }
        }
        WeightingScheme::Random { low, high, seed } => {
            if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
                return Err(ImError::InvalidParameter {
                    reason: format!("random weight range [{low}, {high}] must satisfy 0 <= low <= high <= 1"),
                });
            }
            let mut rng = SmallRng::seed_from_u64(seed);
            let edges: Vec<_> = graph.stored_edges().collect();
            for (source, target) in edges {
                let draw: f64 = rng.sample(Standard);
                graph.set_stored_weight(source, target, low + draw * (high - low));
            }
        }
        WeightingScheme::Keep => {}
    }
    Ok(())
}
