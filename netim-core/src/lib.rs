//! Netim core library: influence maximization on directed weighted graphs.
//!
//! The crate is organised leaves-first: a compact [`Graph`] substrate, edge
//! [`WeightingScheme`] policies, reproducible Monte-Carlo diffusion models
//! ([`IndependentCascade`], [`LinearThreshold`], plus the SI/SIR epidemic
//! variants), simulation-based selectors ([`Greedy`], [`Celf`]) and degree
//! heuristics, and the Reverse Influence Sampling family ([`BaseRis`],
//! [`Imm`]).
//!
//! Every randomised component is deterministic for a fixed seed, including
//! multi-threaded Monte-Carlo runs: trials draw from a pre-generated
//! per-trial seed table, so the mean spread is bit-identical for any thread
//! count.

mod diffusion;
mod error;
mod generators;
mod graph;
mod ris;
mod rng;
mod select;
mod utils;
mod weight;

pub use crate::{
    diffusion::{
        DiffusionModel, IndependentCascade, LinearThreshold, SusceptibleInfected,
        SusceptibleInfectedRecovered,
    },
    error::{ImError, ImErrorCode, Result},
    generators::{gnp_random_graph, karate_club_graph},
    graph::{Graph, NodeId},
    ris::{BaseRis, Imm, ModelKind},
    select::{Celf, DegreeDiscount, Greedy, SingleDiscount},
    utils::infection_threshold,
    weight::{WeightingScheme, assign_edge_weights},
};
