//! Command-line interface orchestration for netim.
//!
//! Offers a `simulate` command that estimates the spread of a given seed set
//! and a `select` command that runs one of the seed-selection algorithms, both
//! against an edge-list graph loaded from disk.

mod commands;

pub use commands::{
    Algorithm, Cli, CliError, Command, ExecutionSummary, GraphArgs, Model, SelectCommand,
    SimulateCommand, Weighting, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
