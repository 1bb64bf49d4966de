//! Command implementations and argument parsing for the netim CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use netim_core::{
    BaseRis, Celf, DegreeDiscount, DiffusionModel, Graph, Greedy, ImError, Imm,
    IndependentCascade, LinearThreshold, ModelKind, NodeId, SingleDiscount, WeightingScheme,
    assign_edge_weights,
};
use thiserror::Error;
use tracing::{info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "netim", about = "Influence maximization on edge-list graphs.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Estimate the spread of a fixed seed set via Monte-Carlo simulation.
    Simulate(SimulateCommand),
    /// Select a seed set with one of the influence-maximization algorithms.
    Select(SelectCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Simulate(_) => "simulate",
            Command::Select(_) => "select",
        }
    }
}

/// Graph loading and weighting options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Path to a whitespace-separated edge list: `source target [weight]`,
    /// one edge per line, `#` starting a comment.
    pub path: PathBuf,

    /// Treat edges as directed.
    #[arg(long)]
    pub directed: bool,

    /// Node count override; defaults to the highest referenced id plus one.
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Weighting policy applied after loading.
    #[arg(long, value_enum, default_value_t = Weighting::Keep)]
    pub weighting: Weighting,

    /// Probability used by the `uniform` policy.
    #[arg(long, default_value_t = 0.1)]
    pub probability: f64,

    /// Bounds of the `random` policy.
    #[arg(long, default_value_t = 0.0)]
    pub low: f64,
    #[arg(long, default_value_t = 1.0)]
    pub high: f64,

    /// Seed for the `random` policy.
    #[arg(long, default_value_t = 0)]
    pub weight_seed: u64,
}

/// Weighting policies selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Weighting {
    /// Keep the weights from the edge list.
    Keep,
    /// Weighted cascade: `1 / in_degree(target)`.
    Wc,
    /// A single uniform probability.
    Uniform,
    /// Uniformly random weights in `[low, high]`.
    Random,
}

/// Diffusion models selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Model {
    /// Independent Cascade.
    Ic,
    /// Linear Threshold.
    Lt,
}

impl Model {
    fn kind(self) -> ModelKind {
        match self {
            Model::Ic => ModelKind::IndependentCascade,
            Model::Lt => ModelKind::LinearThreshold,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Model::Ic => "ic",
            Model::Lt => "lt",
        }
    }
}

/// Options accepted by the `simulate` command.
#[derive(Debug, Args, Clone)]
pub struct SimulateCommand {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Diffusion model to simulate.
    #[arg(long, value_enum, default_value_t = Model::Ic)]
    pub model: Model,

    /// Seed nodes, comma-separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub seeds: Vec<NodeId>,

    /// Monte-Carlo trials.
    #[arg(long, default_value_t = 1_000)]
    pub rounds: usize,

    /// Master seed for the trial RNGs.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Run trials across the thread pool.
    #[arg(long)]
    pub multithread: bool,

    /// Linear-threshold sampling interval.
    #[arg(long, default_value_t = 0.0)]
    pub theta_low: f64,
    #[arg(long, default_value_t = 1.0)]
    pub theta_high: f64,
}

/// Options accepted by the `select` command.
#[derive(Debug, Args, Clone)]
pub struct SelectCommand {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Selection algorithm.
    #[arg(long, value_enum)]
    pub algorithm: Algorithm,

    /// Diffusion model backing the simulation and RIS algorithms.
    #[arg(long, value_enum, default_value_t = Model::Ic)]
    pub model: Model,

    /// Seed-set budget.
    #[arg(short = 'k', long)]
    pub budget: usize,

    /// Monte-Carlo trials per oracle call (greedy, celf).
    #[arg(long, default_value_t = 1_000)]
    pub rounds: usize,

    /// RR-set budget (base-ris).
    #[arg(long, default_value_t = 10_000)]
    pub rr_sets: usize,

    /// Approximation parameter epsilon (imm).
    #[arg(long, default_value_t = 0.5)]
    pub epsilon: f64,

    /// Failure exponent ell (imm).
    #[arg(long, default_value_t = 1.0)]
    pub ell: f64,

    /// Propagation probability (degree-discount).
    #[arg(long, default_value_t = 0.1)]
    pub discount_probability: f64,

    /// Master seed for every randomised stage.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Run oracle trials across the thread pool.
    #[arg(long)]
    pub multithread: bool,
}

/// Selection algorithms selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Algorithm {
    /// Single-discount degree heuristic.
    SingleDiscount,
    /// Degree-discount heuristic of Chen et al.
    DegreeDiscount,
    /// Plain greedy over the simulation oracle.
    Greedy,
    /// Lazy-forward greedy over the simulation oracle.
    Celf,
    /// Reverse Influence Sampling with a fixed RR-set budget.
    BaseRis,
    /// Influence Maximization via Martingales.
    Imm,
}

impl Algorithm {
    fn label(self) -> &'static str {
        match self {
            Algorithm::SingleDiscount => "single-discount",
            Algorithm::DegreeDiscount => "degree-discount",
            Algorithm::Greedy => "greedy",
            Algorithm::Celf => "celf",
            Algorithm::BaseRis => "base-ris",
            Algorithm::Imm => "imm",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the edge list.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list contained an unparsable line.
    #[error("`{path}` line {line}: {reason}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// The core library rejected the request.
    #[error(transparent)]
    Core(#[from] ImError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Mean spread estimated by `simulate`.
    Spread { spread: f64 },
    /// Ordered seed set produced by `select`.
    Seeds { seeds: Vec<NodeId> },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, parsing, or execution fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = %cli.command.name()))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Simulate(simulate) => run_simulate(simulate),
        Command::Select(select) => run_select(select),
    }
}

#[instrument(
    name = "cli.simulate",
    err,
    skip(command),
    fields(model = command.model.label(), rounds = command.rounds),
)]
fn run_simulate(command: SimulateCommand) -> Result<ExecutionSummary, CliError> {
    let graph = load_graph(&command.graph)?;
    let spread = match command.model {
        Model::Ic => IndependentCascade::new(&graph, &command.seeds)?.run_monte_carlo_diffusion(
            command.rounds,
            command.seed,
            command.multithread,
        ),
        Model::Lt => LinearThreshold::with_threshold_interval(
            &graph,
            &command.seeds,
            command.theta_low,
            command.theta_high,
        )?
        .run_monte_carlo_diffusion(command.rounds, command.seed, command.multithread),
    };
    info!(spread, seeds = command.seeds.len(), "simulation complete");
    Ok(ExecutionSummary::Spread { spread })
}

#[instrument(
    name = "cli.select",
    err,
    skip(command),
    fields(
        algorithm = command.algorithm.label(),
        model = command.model.label(),
        budget = command.budget,
    ),
)]
fn run_select(command: SelectCommand) -> Result<ExecutionSummary, CliError> {
    let graph = load_graph(&command.graph)?;
    let seeds = match command.algorithm {
        Algorithm::SingleDiscount => SingleDiscount::new(&graph).run(command.budget),
        Algorithm::DegreeDiscount => {
            DegreeDiscount::new(&graph).run(command.budget, command.discount_probability)?
        }
        Algorithm::Greedy => match command.model {
            Model::Ic => Greedy::new(IndependentCascade::new(&graph, &[])?)
                .with_multithread(command.multithread)
                .run(command.budget, command.rounds, command.seed)?,
            Model::Lt => Greedy::new(LinearThreshold::new(&graph, &[])?)
                .with_multithread(command.multithread)
                .run(command.budget, command.rounds, command.seed)?,
        },
        Algorithm::Celf => match command.model {
            Model::Ic => Celf::new(IndependentCascade::new(&graph, &[])?)
                .with_multithread(command.multithread)
                .run(command.budget, command.rounds, command.seed)?,
            Model::Lt => Celf::new(LinearThreshold::new(&graph, &[])?)
                .with_multithread(command.multithread)
                .run(command.budget, command.rounds, command.seed)?,
        },
        Algorithm::BaseRis => BaseRis::new(&graph, command.model.kind()).run(
            command.budget,
            command.rr_sets,
            command.seed,
        ),
        Algorithm::Imm => Imm::new(&graph, command.model.kind()).run(
            command.budget,
            command.epsilon,
            command.ell,
            command.seed,
        )?,
    };
    info!(selected = seeds.len(), "selection complete");
    Ok(ExecutionSummary::Seeds { seeds })
}

/// Loads, sizes, and weights a graph per `args`.
#[instrument(name = "cli.load_graph", err, skip(args), fields(path = %args.path.display()))]
fn load_graph(args: &GraphArgs) -> Result<Graph, CliError> {
    let contents = fs::read_to_string(&args.path).map_err(|source| CliError::Io {
        path: args.path.clone(),
        source,
    })?;
    let (edges, weights) = parse_edge_list(&args.path, &contents)?;

    let highest = edges
        .iter()
        .map(|&(source, target)| source.max(target))
        .max();
    let node_count = args
        .nodes
        .unwrap_or_else(|| highest.map_or(0, |highest| highest + 1));

    let mut graph = Graph::from_weighted_edges(node_count, args.directed, &edges, &weights)?;
    let scheme = match args.weighting {
        Weighting::Keep => WeightingScheme::Keep,
        Weighting::Wc => WeightingScheme::WeightedCascade,
        Weighting::Uniform => WeightingScheme::Uniform(args.probability),
        Weighting::Random => WeightingScheme::Random {
            low: args.low,
            high: args.high,
            seed: args.weight_seed,
        },
    };
    assign_edge_weights(&mut graph, &scheme)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parses `source target [weight]` lines; `#` starts a comment.
pub(super) fn parse_edge_list(
    path: &Path,
    contents: &str,
) -> Result<(Vec<(NodeId, NodeId)>, Vec<f64>), CliError> {
    let mut edges = Vec::new();
    let mut weights = Vec::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let parse = |token: Option<&str>, what: &str| -> Result<String, CliError> {
            token.map(ToOwned::to_owned).ok_or_else(|| CliError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("missing {what}"),
            })
        };
        let invalid = |what: &str, token: &str| CliError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            reason: format!("invalid {what} `{token}`"),
        };

        let mut tokens = line.split_whitespace();
        let source_token = parse(tokens.next(), "source node")?;
        let target_token = parse(tokens.next(), "target node")?;
        let source: NodeId = source_token
            .parse()
            .map_err(|_| invalid("source node", &source_token))?;
        let target: NodeId = target_token
            .parse()
            .map_err(|_| invalid("target node", &target_token))?;
        let weight = match tokens.next() {
            Some(token) => token.parse().map_err(|_| invalid("weight", token))?,
            None => 1.0,
        };
        if let Some(extra) = tokens.next() {
            return Err(invalid("trailing token", extra));
        }
        edges.push((source, target));
        weights.push(weight);
    }
    Ok((edges, weights))
}

/// Renders `summary` to `writer` in a line-oriented text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Spread { spread } => writeln!(writer, "spread: {spread}"),
        ExecutionSummary::Seeds { seeds } => {
            writeln!(writer, "seeds: {}", seeds.len())?;
            for seed in seeds {
                writeln!(writer, "{seed}")?;
            }
            Ok(())
        }
    }
}
