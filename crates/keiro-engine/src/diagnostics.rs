//! Run diagnostics: timing and counts for each engine stage.
//!
//! These diagnostics are permanent instrumentation intended for
//! experimentation on large graphs. Duration measurements use
//! [`std::time::Duration`] (platform-agnostic); timestamps are captured
//! through the [`Clock`] trait so native hosts can use
//! [`std::time::Instant`] and WASM hosts `performance.now()` — the
//! bundled [`SystemClock`] covers both via the `web-time` crate.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adjacency::Adjacency;
use crate::types::{Edge, EngineError, Node, RunResult};
use crate::{AlgorithmKind, assemble, dijkstra, prim};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Clock abstraction for stage timing.
pub trait Clock {
    /// Opaque instant type produced by [`Clock::now`].
    type Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Elapsed wall-clock time since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// [`Clock`] backed by [`web_time::Instant`]: `std::time::Instant` on
/// native targets, `performance.now()` under WASM.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = web_time::Instant;

    fn now(&self) -> web_time::Instant {
        web_time::Instant::now()
    }

    fn elapsed(&self, since: &web_time::Instant) -> Duration {
        since.elapsed()
    }
}

/// Diagnostics collected from a single engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Stage 1: adjacency construction.
    pub index: StageDiagnostics,
    /// Stage 2: the frontier/finalize/relax loop.
    pub traversal: StageDiagnostics,
    /// Stage 3: result assembly.
    pub assembly: StageDiagnostics,
    /// Total wall-clock duration of the entire run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts for the whole run.
    pub summary: RunSummary,
}

/// Diagnostics for a single engine stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by engine stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Adjacency construction metrics.
    Index {
        /// Number of input nodes.
        node_count: usize,
        /// Number of input edges.
        edge_count: usize,
        /// Total neighbor entries across all slots (twice the edge
        /// count for a well-formed undirected graph).
        neighbor_entry_count: usize,
    },
    /// Traversal loop metrics.
    Traversal {
        /// Nodes finalized at a finite priority.
        finalized_count: usize,
        /// Steps recorded (finalizations with a parent).
        step_count: usize,
        /// Relaxation attempts recorded across all steps.
        sub_step_count: usize,
    },
    /// Result assembly metrics.
    Assembly {
        /// Edges in the answer (path or tree).
        answer_edge_count: usize,
        /// Total answer weight.
        total_weight: f64,
    },
}

/// High-level summary counts for the entire run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Which algorithm ran.
    pub algorithm: AlgorithmKind,
    /// Number of input nodes.
    pub node_count: usize,
    /// Number of input edges.
    pub edge_count: usize,
    /// Steps in the recorded trace.
    pub step_count: usize,
    /// Edges in the answer.
    pub answer_edge_count: usize,
    /// Total answer weight.
    pub total_weight: f64,
}

/// Run an engine while timing each stage.
///
/// Identical in output to [`AlgorithmKind::run`], with a
/// [`RunDiagnostics`] record alongside.
///
/// # Errors
///
/// Propagates any [`EngineError`] the plain run would produce.
pub fn run_with_diagnostics<C: Clock>(
    algorithm: AlgorithmKind,
    nodes: &[Node],
    edges: &[Edge],
    clock: &C,
) -> Result<(RunResult, RunDiagnostics), EngineError> {
    let run_start = clock.now();

    let stage_start = clock.now();
    let adjacency = Adjacency::build(nodes, edges)?;
    let index = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Index {
            node_count: nodes.len(),
            edge_count: edges.len(),
            neighbor_entry_count: (0..adjacency.node_count())
                .map(|i| adjacency.neighbors(i).len())
                .sum(),
        },
    };

    let stage_start = clock.now();
    let traversal = match algorithm {
        AlgorithmKind::ShortestPath => dijkstra::traverse(&adjacency)?,
        AlgorithmKind::SpanningTree => prim::traverse(&adjacency)?,
    };
    let traversal_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Traversal {
            finalized_count: traversal.finalized.iter().filter(|&&done| done).count(),
            step_count: traversal.steps.len(),
            sub_step_count: traversal.steps.iter().map(|s| s.sub_steps.len()).sum(),
        },
    };

    let stage_start = clock.now();
    let result = match algorithm {
        AlgorithmKind::ShortestPath => assemble::path(&adjacency, traversal),
        AlgorithmKind::SpanningTree => assemble::tree(&adjacency, traversal),
    };
    let assembly = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Assembly {
            answer_edge_count: result.answer.len(),
            total_weight: result.total,
        },
    };

    let diagnostics = RunDiagnostics {
        index,
        traversal: traversal_stage,
        assembly,
        total_duration: clock.elapsed(&run_start),
        summary: RunSummary {
            algorithm,
            node_count: nodes.len(),
            edge_count: edges.len(),
            step_count: result.steps.len(),
            answer_edge_count: result.answer.len(),
            total_weight: result.total,
        },
    };

    Ok((result, diagnostics))
}

impl RunDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Engine Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Graph: {} nodes, {} edges  |  Algorithm: {:?}",
            self.summary.node_count, self.summary.edge_count, self.summary.algorithm,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        // Per-stage breakdown.
        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages = [
            ("Index", &self.index),
            ("Traversal", &self.traversal),
            ("Assembly", &self.assembly),
        ];

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Steps: {}  |  Answer edges: {}  |  Total weight: {}",
            self.summary.step_count, self.summary.answer_edge_count, self.summary.total_weight,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Index {
            node_count,
            edge_count,
            neighbor_entry_count,
        } => {
            format!("{node_count} nodes, {edge_count} edges -> {neighbor_entry_count} entries")
        }
        StageMetrics::Traversal {
            finalized_count,
            step_count,
            sub_step_count,
        } => {
            format!("{finalized_count} finalized, {step_count} steps, {sub_step_count} sub-steps")
        }
        StageMetrics::Assembly {
            answer_edge_count,
            total_weight,
        } => {
            format!("{answer_edge_count} answer edges, total={total_weight}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn diamond() -> (Vec<Node>, Vec<Edge>) {
        let nodes = (0..4).map(|id| Node::new(id, 0.0, 0.0)).collect();
        let edges = vec![
            Edge::new(0, 1, 1.0),
            Edge::new(1, 2, 2.0),
            Edge::new(0, 2, 4.0),
            Edge::new(2, 3, 1.0),
        ];
        (nodes, edges)
    }

    #[test]
    fn duration_round_trips_as_seconds() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "duration_serde")]
            duration: Duration,
        }

        let wrapper = Wrapper {
            duration: Duration::from_millis(1500),
        };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"duration":1.5}"#);

        let parsed: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.duration, Duration::from_millis(1500));
    }

    #[test]
    fn negative_duration_rejected() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "duration_serde")]
            duration: Duration,
        }

        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"duration":-1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn diagnostics_match_the_result() {
        let (nodes, edges) = diamond();
        let (result, diagnostics) = run_with_diagnostics(
            AlgorithmKind::ShortestPath,
            &nodes,
            &edges,
            &SystemClock,
        )
        .unwrap();

        assert_eq!(diagnostics.summary.node_count, 4);
        assert_eq!(diagnostics.summary.edge_count, 4);
        assert_eq!(diagnostics.summary.step_count, result.steps.len());
        assert_eq!(diagnostics.summary.answer_edge_count, result.answer.len());

        assert!(matches!(
            diagnostics.index.metrics,
            StageMetrics::Index {
                neighbor_entry_count: 8,
                ..
            }
        ));
    }

    #[test]
    fn diagnosed_run_equals_plain_run() {
        let (nodes, edges) = diamond();
        let (diagnosed, _) =
            run_with_diagnostics(AlgorithmKind::SpanningTree, &nodes, &edges, &SystemClock)
                .unwrap();
        let plain = AlgorithmKind::SpanningTree.run(&nodes, &edges).unwrap();
        assert_eq!(diagnosed, plain);
    }

    #[test]
    fn report_names_every_stage() {
        let (nodes, edges) = diamond();
        let (_, diagnostics) =
            run_with_diagnostics(AlgorithmKind::ShortestPath, &nodes, &edges, &SystemClock)
                .unwrap();

        let report = diagnostics.report();
        assert!(report.contains("Index"));
        assert!(report.contains("Traversal"));
        assert!(report.contains("Assembly"));
        assert!(report.contains("Total weight: 4"));
    }

    #[test]
    fn errors_propagate() {
        let nodes = vec![Node::new(0, 0.0, 0.0), Node::new(1, 0.0, 0.0)];
        let err = run_with_diagnostics(AlgorithmKind::ShortestPath, &nodes, &[], &SystemClock)
            .unwrap_err();
        assert_eq!(err, EngineError::UnreachableTarget { target: 1 });
    }
}
