//! SI and SIR epidemic models.
//!
//! Both reuse the diffusion harness: a trial's spread is the number of nodes
//! ever infected. Unlike the cascade models, every currently infected node
//! retries its susceptible neighbours each step, so SI only terminates via the
//! step cap (or by saturating the graph) while SIR terminates once recovery
//! has emptied the infected set.

use rand::{Rng, distributions::Standard, rngs::SmallRng};

use crate::{
    error::{ImError, Result},
    graph::{Graph, NodeId},
    utils::infection_threshold,
};

use super::{DiffusionModel, normalise_seeds};

fn check_probability(value: f64, name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ImError::InvalidParameter {
            reason: format!("{name} ({value}) must be in [0, 1]"),
        });
    }
    Ok(())
}

/// The Susceptible-Infected model.
///
/// Infected nodes stay infected forever and attempt to infect each
/// susceptible out-neighbour with probability `beta` every step. A step cap is
/// mandatory because a disconnected graph never saturates.
#[derive(Clone, Debug)]
pub struct SusceptibleInfected<'g> {
    graph: &'g Graph,
    seeds: Vec<NodeId>,
    beta: f64,
    max_steps: usize,
}

impl<'g> SusceptibleInfected<'g> {
    /// Binds the model to `graph`.
    ///
    /// `beta` defaults to the graph's epidemic threshold
    /// (see [`infection_threshold`]) when `None`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] when `beta` is outside `[0, 1]`
    /// or `max_steps` is zero, and [`ImError::InvalidNode`] when a seed is out
    /// of range.
    pub fn new(
        graph: &'g Graph,
        seeds: &[NodeId],
        beta: Option<f64>,
        max_steps: usize,
    ) -> Result<Self> {
        let beta = beta.unwrap_or_else(|| infection_threshold(graph));
        check_probability(beta, "beta")?;
        if max_steps == 0 {
            return Err(ImError::InvalidParameter {
                reason: "max_steps must be at least 1".into(),
            });
        }
        Ok(Self {
            graph,
            seeds: normalise_seeds(graph, seeds)?,
            beta,
            max_steps,
        })
    }

    /// Returns the infection probability in use.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl DiffusionModel for SusceptibleInfected<'_> {
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
        if self.seeds.is_empty() {
            return 0;
        }
        let node_count = self.graph.node_count();
        let mut infected = vec![false; node_count];
        let mut infected_nodes = self.seeds.clone();
        for &seed in &infected_nodes {
            infected[seed] = true;
        }

        for _ in 0..self.max_steps {
            let mut newly = Vec::new();
            for &node in &infected_nodes {
                for &target in self.graph.out_neighbours(node) {
                    if infected[target] {
                        continue;
                    }
                    let draw: f64 = rng.sample(Standard);
                    if draw < self.beta {
                        infected[target] = true;
                        newly.push(target);
                    }
                }
            }
            infected_nodes.extend(newly);
            if infected_nodes.len() == node_count {
                break;
            }
        }
        infected_nodes.len()
    }
}

/// The Susceptible-Infected-Recovered model.
///
/// Each step first recovers every infected node with probability `gamma`,
/// then lets the survivors attempt infection with probability `beta`.
/// Recovered nodes cannot be re-infected, so the process terminates once the
/// infected set empties.
#[derive(Clone, Debug)]
pub struct SusceptibleInfectedRecovered<'g> {
    graph: &'g Graph,
    seeds: Vec<NodeId>,
    beta: f64,
    gamma: f64,
    max_steps: Option<usize>,
}

#[derive(Clone, Copy, PartialEq)]
enum Compartment {
    Susceptible,
    Infected,
    Recovered,
}

impl<'g> SusceptibleInfectedRecovered<'g> {
    /// Binds the model to `graph`.
    ///
    /// `beta` defaults to the graph's epidemic threshold when `None`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] when `beta` is outside `[0, 1]`
    /// or `gamma` is outside `(0, 1]`, and [`ImError::InvalidNode`] when a
    /// seed is out of range.
    pub fn new(
        graph: &'g Graph,
        seeds: &[NodeId],
        beta: Option<f64>,
        gamma: f64,
        max_steps: Option<usize>,
    ) -> Result<Self> {
        let beta = beta.unwrap_or_else(|| infection_threshold(graph));
        check_probability(beta, "beta")?;
        check_probability(gamma, "gamma")?;
        if gamma == 0.0 {
            // Without recovery the infected set never empties.
            return Err(ImError::InvalidParameter {
                reason: "gamma must be positive".into(),
            });
        }
        Ok(Self {
            graph,
            seeds: normalise_seeds(graph, seeds)?,
            beta,
            gamma,
            max_steps,
        })
    }
}

impl DiffusionModel for SusceptibleInfectedRecovered<'_> {
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
        let mut state = vec![Compartment::Susceptible; self.graph.node_count()];
        let mut infected_nodes = self.seeds.clone();
        for &seed in &infected_nodes {
            state[seed] = Compartment::Infected;
        }
        let mut ever_infected = infected_nodes.len();

        let mut step = 0;
        while !infected_nodes.is_empty() {
            infected_nodes.retain(|&node| {
                let draw: f64 = rng.sample(Standard);
                if draw < self.gamma {
                    state[node] = Compartment::Recovered;
                    false
                } else {
                    true
                }
            });

            let mut newly = Vec::new();
            for &node in &infected_nodes {
                for &target in self.graph.out_neighbours(node) {
                    if state[target] != Compartment::Susceptible {
                        continue;
                    }
                    let draw: f64 = rng.sample(Standard);
                    if draw < self.beta {
                        state[target] = Compartment::Infected;
                        newly.push(target);
                    }
                }
            }
            ever_infected += newly.len();
            infected_nodes.extend(newly);

            step += 1;
            if self.max_steps.is_some_and(|cap| step >= cap) {
                break;
            }
        }
        ever_infected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rng::trial_rng;

    fn path_graph() -> Graph {
        Graph::from_edges(4, true, &[(0, 1), (1, 2), (2, 3)]).expect("edges are valid")
    }

    #[test]
    fn si_with_certain_infection_saturates_reachable_nodes() {
        let graph = path_graph();
        let model =
            SusceptibleInfected::new(&graph, &[0], Some(1.0), 10).expect("parameters are valid");
        assert_eq!(model.run_monte_carlo_diffusion(20, 5, false), 4.0);
    }

    #[test]
    fn si_honours_the_step_cap() {
        let graph = path_graph();
        let model =
            SusceptibleInfected::new(&graph, &[0], Some(1.0), 1).expect("parameters are valid");
        // One step of certain infection reaches exactly one neighbour.
        assert_eq!(model.run_monte_carlo_diffusion(20, 5, false), 2.0);
    }

    #[test]
    fn si_rejects_zero_step_cap() {
        let graph = path_graph();
        let err = SusceptibleInfected::new(&graph, &[0], Some(0.5), 0)
            .expect_err("a zero cap never terminates");
        assert!(matches!(err, ImError::InvalidParameter { .. }));
    }

    #[test]
    fn si_defaults_beta_to_the_epidemic_threshold() {
        let graph = path_graph();
        let model = SusceptibleInfected::new(&graph, &[0], None, 5).expect("parameters are valid");
        assert!((model.beta() - infection_threshold(&graph)).abs() < 1e-12);
    }

    #[test]
    fn sir_counts_recovered_nodes_in_the_spread() {
        let graph = path_graph();
        // Certain recovery: each seed recovers before infecting anyone.
        let model = SusceptibleInfectedRecovered::new(&graph, &[0, 2], Some(1.0), 1.0, None)
            .expect("parameters are valid");
        assert_eq!(model.run_single_trial(&mut trial_rng(3)), 2);
    }

    #[test]
    fn sir_rejects_zero_gamma() {
        let graph = path_graph();
        let err = SusceptibleInfectedRecovered::new(&graph, &[0], Some(0.5), 0.0, None)
            .expect_err("zero gamma never terminates");
        assert!(matches!(err, ImError::InvalidParameter { .. }));
    }

    #[test]
    fn sir_terminates_without_a_step_cap() {
        let graph = path_graph();
        let model = SusceptibleInfectedRecovered::new(&graph, &[0], Some(0.8), 0.3, None)
            .expect("parameters are valid");
        for trial in 0..50 {
            let spread = model.run_single_trial(&mut trial_rng(trial));
            assert!((1..=4).contains(&spread));
        }
    }
}
