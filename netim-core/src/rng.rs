//! Reproducible per-trial seed derivation for Monte-Carlo simulation.
//!
//! A single master RNG initialised from the user seed emits one seed per
//! trial. Trial `i` therefore depends only on `trial_seeds[i]`, never on which
//! worker thread runs it, so the sum of per-trial spreads is identical for any
//! thread count.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};

/// Derives the per-trial seed table for `rounds` trials from `master_seed`.
pub(crate) fn trial_seeds(master_seed: u64, rounds: usize) -> Vec<u64> {
    let mut master = SmallRng::seed_from_u64(master_seed);
    (0..rounds).map(|_| master.sample(Standard)).collect()
}

/// Constructs the RNG for one trial from its entry in the seed table.
pub(crate) fn trial_rng(trial_seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(trial_seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_table_is_deterministic() {
        assert_eq!(trial_seeds(42, 16), trial_seeds(42, 16));
    }

    #[test]
    fn seed_table_prefix_is_stable_across_lengths() {
        let short = trial_seeds(7, 8);
        let long = trial_seeds(7, 32);
        assert_eq!(short, long[..8]);
    }

    #[test]
    fn distinct_master_seeds_diverge() {
        assert_ne!(trial_seeds(1, 8), trial_seeds(2, 8));
    }
}
