//! Linear Threshold diffusion.

use rand::{Rng, distributions::Standard, rngs::SmallRng};

use crate::{
    error::{ImError, Result},
    graph::{Graph, NodeId},
};

use super::{DiffusionModel, normalise_seeds};

/// The Linear Threshold model.
///
/// Each trial samples a threshold `θ_v ∈ [θ_low, θ_high)` per node; a node
/// activates once the summed weights of its activated in-neighbours reach its
/// threshold. `θ_low = 0.0, θ_high = 1.0` (the defaults of
/// [`LinearThreshold::new`]) recover the classical model.
#[derive(Clone, Debug)]
pub struct LinearThreshold<'g> {
    graph: &'g Graph,
    seeds: Vec<NodeId>,
    theta_low: f64,
    theta_high: f64,
}

impl<'g> LinearThreshold<'g> {
    /// Binds the model to `graph` with the classical threshold interval
    /// `[0, 1)`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] when a seed is out of range.
    pub fn new(graph: &'g Graph, seeds: &[NodeId]) -> Result<Self> {
        Self::with_threshold_interval(graph, seeds, 0.0, 1.0)
    }

    /// Binds the model with an explicit threshold interval.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] unless
    /// `0 ≤ theta_low ≤ theta_high ≤ 1`, and [`ImError::InvalidNode`] when a
    /// seed is out of range.
    pub fn with_threshold_interval(
        graph: &'g Graph,
        seeds: &[NodeId],
        theta_low: f64,
        theta_high: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&theta_low) || !(0.0..=1.0).contains(&theta_high) {
            return Err(ImError::InvalidParameter {
                reason: format!(
                    "threshold interval [{theta_low}, {theta_high}) must lie within [0, 1]"
                ),
            });
        }
        if theta_low > theta_high {
            return Err(ImError::InvalidParameter {
                reason: format!("theta_low ({theta_low}) must not exceed theta_high ({theta_high})"),
            });
        }
        Ok(Self {
            graph,
            seeds: normalise_seeds(graph, seeds)?,
            theta_low,
            theta_high,
        })
    }

    /// Returns the configured threshold interval.
    #[must_use]
    pub fn threshold_interval(&self) -> (f64, f64) {
        (self.theta_low, self.theta_high)
    }
}

impl DiffusionModel for LinearThreshold<'_> {
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
        let node_count = self.graph.node_count();
        let span = self.theta_high - self.theta_low;
        let mut thresholds = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let draw: f64 = rng.sample(Standard);
            thresholds.push(self.theta_low + draw * span);
        }

        let mut activated = vec![false; node_count];
        let mut influence = vec![0.0_f64; node_count];
        let mut frontier = self.seeds.clone();
        for &seed in &frontier {
            activated[seed] = true;
        }

        let mut front = 0;
        while front < frontier.len() {
            let node = frontier[front];
            front += 1;
            for (target, weight) in self.graph.weighted_out_neighbours(node) {
                if activated[target] {
                    continue;
                }
                influence[target] += weight;
                if influence[target] >= thresholds[target] {
                    activated[target] = true;
                    frontier.push(target);
                }
            }
        }
        frontier.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(-0.1, 0.5)]
    #[case(0.0, 1.5)]
    #[case(0.8, 0.2)]
    fn invalid_intervals_are_rejected(#[case] low: f64, #[case] high: f64) {
        let graph = Graph::from_edges(2, true, &[(0, 1)]).expect("edges are valid");
        let err = LinearThreshold::with_threshold_interval(&graph, &[0], low, high)
            .expect_err("interval is invalid");
        assert!(matches!(err, ImError::InvalidParameter { .. }));
    }

    #[test]
    fn boundary_threshold_activates_at_equality() {
        let graph = Graph::from_weighted_edges(2, true, &[(0, 1)], &[0.5]).expect("edges are valid");
        let model = LinearThreshold::with_threshold_interval(&graph, &[0], 0.5, 0.5)
            .expect("interval is valid");
        // The degenerate interval pins every threshold to exactly 0.5, and the
        // incoming influence 0.5 meets it.
        assert_eq!(model.run_monte_carlo_diffusion(200, 7, false), 2.0);
    }

    #[test]
    fn influence_below_threshold_never_activates() {
        let graph = Graph::from_weighted_edges(2, true, &[(0, 1)], &[0.5]).expect("edges are valid");
        let above = 0.5 + 1e-9;
        let model = LinearThreshold::with_threshold_interval(&graph, &[0], above, above)
            .expect("interval is valid");
        assert_eq!(model.run_monte_carlo_diffusion(200, 7, false), 1.0);
    }

    #[test]
    fn accumulated_influence_crosses_threshold() {
        // Both in-neighbours of node 2 contribute 0.5; thresholds are pinned
        // to 1.0, reachable only by the sum.
        let graph = Graph::from_weighted_edges(3, true, &[(0, 2), (1, 2)], &[0.5, 0.5])
            .expect("edges are valid");
        let model = LinearThreshold::with_threshold_interval(&graph, &[0, 1], 1.0, 1.0)
            .expect("interval is valid");
        assert_eq!(model.run_monte_carlo_diffusion(50, 3, false), 3.0);

        let partial = LinearThreshold::with_threshold_interval(&graph, &[0], 1.0, 1.0)
            .expect("interval is valid");
        assert_eq!(partial.run_monte_carlo_diffusion(50, 3, false), 1.0);
    }

    #[test]
    fn classical_interval_is_the_default() {
        let graph = Graph::from_edges(2, true, &[(0, 1)]).expect("edges are valid");
        let model = LinearThreshold::new(&graph, &[0]).expect("seed is valid");
        assert_eq!(model.threshold_interval(), (0.0, 1.0));
    }
}
