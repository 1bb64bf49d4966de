//! CLI entry point for netim.
//!
//! Parses command-line arguments with clap, runs the requested simulation or
//! selection, and prints the summary to stdout. Diagnostics go to `stderr`
//! via `tracing` so seed lists on stdout stay machine-readable; `RUST_LOG`
//! controls the filter and `NETIM_LOG_FORMAT=json` switches the output to
//! JSON.

use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use netim_cli::cli::{Cli, CliError, render_summary, run_cli};

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let summary = match run_cli(cli) {
        Ok(summary) => summary,
        Err(err) => {
            log_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = render_summary(&summary, &mut stdout).and_then(|()| stdout.flush()) {
        error!(error = %err, "failed to render summary");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Core errors carry a stable code worth surfacing; everything else is
/// already self-describing.
fn log_failure(err: &CliError) {
    match err {
        CliError::Core(core) => error!(error = %core, code = %core.code(), "command failed"),
        other => error!(error = %other, "command failed"),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    let fmt_layer = if json_logs_requested() {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn json_logs_requested() -> bool {
    env::var("NETIM_LOG_FORMAT").is_ok_and(|format| format.trim().eq_ignore_ascii_case("json"))
}
