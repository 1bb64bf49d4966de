//! Greedy max-coverage over a collection of RR sets.

use crate::graph::NodeId;

/// The outcome of one max-cover pass.
pub(super) struct CoverOutcome {
    /// Selected nodes in marginal-coverage order.
    pub(super) seeds: Vec<NodeId>,
    /// How many RR sets the selection covers.
    pub(super) covered: usize,
}

impl CoverOutcome {
    /// The fraction of RR sets covered; the expected-spread estimate for the
    /// selection is `node_count * fraction`.
    pub(super) fn coverage_fraction(&self, rr_set_count: usize) -> f64 {
        if rr_set_count == 0 {
            return 0.0;
        }
        self.covered as f64 / rr_set_count as f64
    }
}

/// Greedily selects up to `k` nodes maximising the number of covered RR sets.
///
/// Ties break on the smallest node id. Selection stops early once no
/// candidate covers an uncovered set; padding the result with zero-gain nodes
/// would fabricate selections.
pub(super) fn max_cover(rr_sets: &[Vec<NodeId>], node_count: usize, k: usize) -> CoverOutcome {
    let mut hits = vec![0_usize; node_count];
    let mut memberships: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (index, rr_set) in rr_sets.iter().enumerate() {
        for &node in rr_set {
            hits[node] += 1;
            memberships[node].push(index);
        }
    }

    let mut covered = vec![false; rr_sets.len()];
    let mut selected = vec![false; node_count];
    let mut seeds = Vec::with_capacity(k.min(node_count));
    let mut covered_count = 0;

    for _ in 0..k.min(node_count) {
        let mut best: Option<NodeId> = None;
        for node in 0..node_count {
            if selected[node] {
                continue;
            }
            if best.is_none_or(|current| hits[node] > hits[current]) {
                best = Some(node);
            }
        }
        let Some(node) = best else { break };
        if hits[node] == 0 {
            break;
        }
        selected[node] = true;
        seeds.push(node);

        for &index in &memberships[node] {
            if covered[index] {
                continue;
            }
            covered[index] = true;
            covered_count += 1;
            for &member in &rr_sets[index] {
                hits[member] -= 1;
            }
        }
    }

    CoverOutcome {
        seeds,
        covered: covered_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_heaviest_node_first() {
        let rr_sets = vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![4]];
        let outcome = max_cover(&rr_sets, 5, 2);
        assert_eq!(outcome.seeds, vec![0, 4]);
        assert_eq!(outcome.covered, 4);
    }

    #[test]
    fn covered_sets_stop_counting() {
        // Node 1 appears in three sets but all of them also contain 0.
        let rr_sets = vec![vec![0, 1], vec![0, 1], vec![0, 1], vec![2]];
        let outcome = max_cover(&rr_sets, 3, 2);
        assert_eq!(outcome.seeds, vec![0, 2]);
        assert_eq!(outcome.covered, 4);
    }

    #[test]
    fn stops_once_nothing_is_coverable() {
        let rr_sets = vec![vec![1], vec![1]];
        let outcome = max_cover(&rr_sets, 3, 3);
        assert_eq!(outcome.seeds, vec![1]);
        assert_eq!(outcome.covered, 2);
    }

    #[test]
    fn ties_break_on_the_smaller_node() {
        let rr_sets = vec![vec![2], vec![1]];
        let outcome = max_cover(&rr_sets, 3, 1);
        assert_eq!(outcome.seeds, vec![1]);
    }

    #[test]
    fn empty_collection_selects_nothing() {
        let outcome = max_cover(&[], 4, 2);
        assert!(outcome.seeds.is_empty());
        assert_eq!(outcome.coverage_fraction(0), 0.0);
    }
}
