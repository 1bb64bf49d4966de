//! Unit tests for CLI parsing and the command pipeline.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tempfile::NamedTempFile;

use super::commands::parse_edge_list;
use super::{Cli, CliError, ExecutionSummary, render_summary, run_cli};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn edge_list_file(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn parse_edge_list_accepts_comments_and_default_weights() -> TestResult {
    let contents = "# a comment\n0 1\n1 2 0.5  # trailing comment\n\n";
    let (edges, weights) = parse_edge_list(Path::new("edges.txt"), contents)?;
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
    assert_eq!(weights, vec![1.0, 0.5]);
    Ok(())
}

#[rstest]
#[case::missing_target("0\n", "missing target node")]
#[case::bad_source("x 1\n", "invalid source node")]
#[case::bad_weight("0 1 heavy\n", "invalid weight")]
#[case::extra_token("0 1 0.5 9\n", "invalid trailing token")]
fn parse_edge_list_rejects_malformed_lines(#[case] contents: &str, #[case] fragment: &str) {
    let err = parse_edge_list(Path::new("edges.txt"), contents).expect_err("line is malformed");
    match err {
        CliError::Parse { line, reason, .. } => {
            assert_eq!(line, 1);
            assert!(reason.contains(fragment), "unexpected reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn simulate_reports_the_deterministic_spread() -> TestResult {
    let file = edge_list_file("0 1 1.0\n1 2 1.0\n")?;
    let cli = Cli::parse_from([
        "netim",
        "simulate",
        file.path().to_str().expect("path is valid UTF-8"),
        "--directed",
        "--seeds",
        "0",
        "--rounds",
        "50",
    ]);
    let summary = run_cli(cli)?;
    assert_eq!(summary, ExecutionSummary::Spread { spread: 3.0 });
    Ok(())
}

#[test]
fn select_returns_the_hub_first() -> TestResult {
    let file = edge_list_file("0 1\n0 2\n0 3\n4 5\n")?;
    let cli = Cli::parse_from([
        "netim",
        "select",
        file.path().to_str().expect("path is valid UTF-8"),
        "--directed",
        "--algorithm",
        "single-discount",
        "-k",
        "2",
    ]);
    let summary = run_cli(cli)?;
    assert_eq!(
        summary,
        ExecutionSummary::Seeds {
            seeds: vec![0, 4]
        }
    );
    Ok(())
}

#[test]
fn select_surfaces_core_validation_errors() -> TestResult {
    let file = edge_list_file("0 1\n")?;
    let cli = Cli::parse_from([
        "netim",
        "select",
        file.path().to_str().expect("path is valid UTF-8"),
        "--algorithm",
        "imm",
        "-k",
        "1",
        "--epsilon=-0.5",
    ]);
    let err = run_cli(cli).expect_err("epsilon is invalid");
    assert!(matches!(err, CliError::Core(_)));
    Ok(())
}

#[test]
fn missing_file_maps_to_an_io_error() {
    let cli = Cli::parse_from([
        "netim",
        "simulate",
        "/nonexistent/edges.txt",
        "--seeds",
        "0",
    ]);
    let err = run_cli(cli).expect_err("the path does not exist");
    assert!(matches!(err, CliError::Io { .. }));
}

#[test]
fn render_summary_lists_seeds_line_by_line() -> TestResult {
    let mut buffer = Vec::new();
    render_summary(
        &ExecutionSummary::Seeds {
            seeds: vec![4, 0, 7],
        },
        &mut buffer,
    )?;
    assert_eq!(String::from_utf8(buffer)?, "seeds: 3\n4\n0\n7\n");
    Ok(())
}
