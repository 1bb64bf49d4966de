//! Reverse Influence Sampling selectors.
//!
//! RR sets are sampled under the live-edge interpretation of the chosen
//! diffusion model, and seeds come out of a greedy max-cover over the sampled
//! collection. Generation is sequential: the core's only parallelism is the
//! Monte-Carlo trial loop of the simulators.

mod base;
mod cover;
mod imm;
mod rr;

pub use self::{base::BaseRis, imm::Imm};

/// Which diffusion model's live-edge distribution RR sets are drawn from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelKind {
    /// Independent Cascade: every in-edge is live independently with its
    /// weight.
    IndependentCascade,
    /// Linear Threshold: each node keeps at most one live in-edge, chosen
    /// with probability proportional to its weight.
    LinearThreshold,
}
