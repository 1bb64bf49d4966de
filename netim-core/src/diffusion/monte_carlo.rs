//! Data-parallel Monte-Carlo aggregation.
//!
//! Trials are partitioned round-robin by `trial mod workers`; each worker
//! accumulates an integer partial sum and never touches another worker's
//! state. Per-trial spreads are node counts, so the grand total is exact and
//! the mean cannot depend on summation order or thread count.

use rayon::prelude::*;

use crate::rng;

use super::DiffusionModel;

pub(super) fn mean_spread<M>(model: &M, rounds: usize, seed: u64, use_multithread: bool) -> f64
where
    M: DiffusionModel + ?Sized,
{
    if rounds == 0 {
        return 0.0;
    }
    let trial_seeds = rng::trial_seeds(seed, rounds);

    let total: u64 = if use_multithread {
        let workers = rayon::current_num_threads().max(1);
        let partials: Vec<u64> = (0..workers)
            .into_par_iter()
            .map(|worker| {
                trial_seeds
                    .iter()
                    .skip(worker)
                    .step_by(workers)
                    .map(|&trial_seed| {
                        let mut rng = rng::trial_rng(trial_seed);
                        model.run_single_trial(&mut rng) as u64
                    })
                    .sum()
            })
            .collect();
        partials.into_iter().sum()
    } else {
        trial_seeds
            .iter()
            .map(|&trial_seed| {
                let mut rng = rng::trial_rng(trial_seed);
                model.run_single_trial(&mut rng) as u64
            })
            .sum()
    };

    total as f64 / rounds as f64
}
