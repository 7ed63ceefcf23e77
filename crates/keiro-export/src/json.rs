//! JSON trace serializer.
//!
//! Wraps one run's input graph and its [`RunResult`] into a single JSON
//! document. Embedding the graph alongside the trace keeps exported
//! runs self-contained: the playback layer can replay a saved document
//! without the canvas state it was recorded from.
//!
//! This is a pure function with no I/O — it returns a `String`.

use keiro_engine::{AlgorithmKind, Edge, Node, RunResult};
use serde::{Deserialize, Serialize};

use crate::ExportError;

/// A self-contained, replayable record of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Which algorithm produced the trace.
    pub algorithm: AlgorithmKind,
    /// The input node collection, in index order.
    pub nodes: Vec<Node>,
    /// The input edge collection.
    pub edges: Vec<Edge>,
    /// The recorded result: step trace, answer edges, total weight.
    pub result: RunResult,
}

/// Serialize a run into a pretty-printed JSON trace document.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails; not expected
/// for well-formed inputs.
pub fn to_trace_json(
    algorithm: AlgorithmKind,
    nodes: &[Node],
    edges: &[Edge],
    result: &RunResult,
) -> Result<String, ExportError> {
    let document = TraceDocument {
        algorithm,
        nodes: nodes.to_vec(),
        edges: edges.to_vec(),
        result: result.clone(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trace_document_round_trips() {
        let nodes = vec![Node::new(0, 0.0, 0.0), Node::new(1, 40.0, 0.0)];
        let edges = vec![Edge::new(0, 1, 2.5)];
        let result = keiro_engine::shortest_path(&nodes, &edges).unwrap();

        let json = to_trace_json(AlgorithmKind::ShortestPath, &nodes, &edges, &result).unwrap();
        let parsed: TraceDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.algorithm, AlgorithmKind::ShortestPath);
        assert_eq!(parsed.nodes, nodes);
        assert_eq!(parsed.edges, edges);
        assert_eq!(parsed.result, result);
    }

    #[test]
    fn document_is_pretty_printed() {
        let nodes = vec![Node::new(0, 0.0, 0.0)];
        let result = keiro_engine::spanning_tree(&nodes, &[]).unwrap();

        let json = to_trace_json(AlgorithmKind::SpanningTree, &nodes, &[], &result).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"algorithm\""));
    }
}
