//! keiro-bench: CLI tool for running the engines and collecting diagnostics.
//!
//! Runs a step-recording algorithm on a graph loaded from a JSON file,
//! printing per-stage timing and count diagnostics. Useful for:
//!
//! - Comparing the two engines on the same graph
//! - Measuring stage durations on large graphs
//! - Replaying a recorded trace to stdout (instantaneous playback)
//! - Dumping JSON trace documents and DOT renderings for inspection
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin keiro-bench -- [OPTIONS] <GRAPH_PATH>
//! ```
//!
//! The graph file carries the same node/edge collections the canvas
//! layer persists:
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "x": 100.0, "y": 100.0}, ...],
//!   "edges": [{"a": 0, "b": 1, "weight": 4.0}, ...]
//! }
//! ```
//!
//! Node order matters: the first node is the source/root and the last
//! node is the shortest-path target.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use keiro_engine::diagnostics::{RunDiagnostics, SystemClock, run_with_diagnostics};
use keiro_engine::{AlgorithmKind, Edge, Node, RunResult};
use serde::Deserialize;

/// Engine experimentation and diagnostics for keiro.
///
/// Runs the selected algorithm on a graph JSON file and prints detailed
/// per-stage timing and count diagnostics.
#[derive(Parser)]
#[command(name = "keiro-bench", version)]
struct Cli {
    /// Path to the graph JSON file.
    graph_path: PathBuf,

    /// Which algorithm to run.
    #[arg(long, value_enum, default_value_t = Algorithm::ShortestPath)]
    algorithm: Algorithm,

    /// Replay the recorded steps to stdout (instantaneous playback).
    #[arg(long)]
    steps: bool,

    /// Output diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Write a Graphviz DOT rendering (answer edges highlighted) to file.
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Write the full JSON trace document to file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

/// Algorithm selection.
#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Single-source shortest path, first node to last node (Dijkstra).
    ShortestPath,
    /// Minimum spanning tree rooted at the first node (Prim).
    SpanningTree,
}

/// Maps the local CLI [`Algorithm`] enum to [`AlgorithmKind`].
const fn kind_from_cli(algorithm: Algorithm) -> AlgorithmKind {
    match algorithm {
        Algorithm::ShortestPath => AlgorithmKind::ShortestPath,
        Algorithm::SpanningTree => AlgorithmKind::SpanningTree,
    }
}

/// On-disk graph shape: the same node/edge collections the canvas layer
/// persists for saved graphs.
#[derive(Deserialize)]
struct GraphFile {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let graph_bytes = match std::fs::read(&cli.graph_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.graph_path.display());
            return ExitCode::FAILURE;
        }
    };

    let graph: GraphFile = match serde_json::from_slice(&graph_bytes) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", cli.graph_path.display());
            return ExitCode::FAILURE;
        }
    };

    let kind = kind_from_cli(cli.algorithm);

    eprintln!(
        "Graph: {} ({} nodes, {} edges)",
        cli.graph_path.display(),
        graph.nodes.len(),
        graph.edges.len(),
    );
    eprintln!("Algorithm: {kind:?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match run_with_diagnostics(kind, &graph.nodes, &graph.edges, &SystemClock) {
            Ok((result, diagnostics)) => {
                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                // Trace replay and file outputs happen on the first run only.
                if run == 0 {
                    if cli.steps {
                        print_steps(&result);
                    }
                    print_answer(&result);

                    if let Some(ref dot_path) = cli.dot {
                        let dot = keiro_export::to_dot(&graph.nodes, &graph.edges, &result);
                        write_output(dot_path, &dot, "DOT");
                    }

                    if let Some(ref trace_path) = cli.trace {
                        match keiro_export::to_trace_json(
                            kind,
                            &graph.nodes,
                            &graph.edges,
                            &result,
                        ) {
                            Ok(json) => write_output(trace_path, &json, "trace"),
                            Err(e) => eprintln!("Error serializing trace: {e}"),
                        }
                    }
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Engine error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Replay the step trace to stdout, sub-steps before the finalization
/// that closed their window.
fn print_steps(result: &RunResult) {
    println!();
    println!("Steps\n{}", "=".repeat(60));
    for (i, step) in result.steps.iter().enumerate() {
        for sub in &step.sub_steps {
            println!("       consider {} -> {} (w={})", sub.from, sub.to, sub.weight);
        }
        println!(
            "{:>4}.  finalize {} -> {} (priority {})",
            i + 1,
            step.from,
            step.to,
            step.weight,
        );
    }
}

/// Print the answer edges and total weight (the summary display).
fn print_answer(result: &RunResult) {
    println!();
    let edges: Vec<String> = result
        .answer
        .iter()
        .map(|edge| format!("{}-{} ({})", edge.a, edge.b, edge.weight))
        .collect();
    println!("Answer: {}", edges.join(", "));
    println!("Total weight: {}", result.total);
}

/// Write a serialized document to a file, reporting the outcome.
fn write_output(path: &Path, contents: &str, what: &str) {
    match std::fs::write(path, contents) {
        Ok(()) => {
            eprintln!("{what} written to {} ({} bytes)", path.display(), contents.len());
        }
        Err(e) => {
            eprintln!("Error writing {what} to {}: {e}", path.display());
        }
    }
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&RunDiagnostics) -> Duration;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[RunDiagnostics]) {
    debug_assert!(!all_diagnostics.is_empty(), "no diagnostics to summarize");

    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    // Per-stage means.
    println!();
    println!("{:<16} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(32));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Index", |d| d.index.duration),
        ("Traversal", |d| d.traversal.duration),
        ("Assembly", |d| d.assembly.duration),
    ];

    for (name, extractor) in stage_extractors {
        let stage_mean = all_diagnostics
            .iter()
            .map(|d| extractor(d).as_secs_f64() * 1000.0)
            .sum::<f64>()
            / all_diagnostics.len() as f64;
        println!("{name:<16} {stage_mean:>10.3}ms");
    }
}
