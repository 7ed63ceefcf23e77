//! Integration test: run both engines over the diamond demo graph and
//! export the traces through every serializer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use keiro_engine::{AlgorithmKind, Edge, Node};
use keiro_export::TraceDocument;

/// The demo graph from the engine documentation: the cheap 0-1-2-3
/// chain beats the direct 0-2 edge for both algorithms.
fn diamond() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::new(0, 100.0, 100.0),
        Node::new(1, 300.0, 100.0),
        Node::new(2, 300.0, 300.0),
        Node::new(3, 100.0, 300.0),
    ];
    let edges = vec![
        Edge::new(0, 1, 1.0),
        Edge::new(1, 2, 2.0),
        Edge::new(0, 2, 4.0),
        Edge::new(2, 3, 1.0),
    ];
    (nodes, edges)
}

#[test]
fn shortest_path_trace_round_trips_through_json() {
    let (nodes, edges) = diamond();
    let result = AlgorithmKind::ShortestPath
        .run(&nodes, &edges)
        .expect("diamond graph is connected");

    let json = keiro_export::to_trace_json(AlgorithmKind::ShortestPath, &nodes, &edges, &result)
        .unwrap();
    eprintln!("trace document: {} bytes", json.len());

    let parsed: TraceDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.result, result);
    assert_eq!(parsed.nodes, nodes);
    assert_eq!(parsed.edges, edges);
    assert!((parsed.result.total - 4.0).abs() < f64::EPSILON);
}

#[test]
fn spanning_tree_dot_marks_the_tree() {
    let (nodes, edges) = diamond();
    let result = AlgorithmKind::SpanningTree
        .run(&nodes, &edges)
        .expect("diamond graph is connected");

    let dot = keiro_export::to_dot(&nodes, &edges, &result);
    eprintln!("dot document:\n{dot}");

    assert!(dot.starts_with("graph {"));
    // All four input edges render; the three tree edges are stroked.
    assert_eq!(dot.matches("--").count(), 4);
    assert_eq!(dot.matches("penwidth").count(), 3);
}
