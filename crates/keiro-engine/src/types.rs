//! Shared types for the keiro graph-algorithm engines.

use serde::{Deserialize, Serialize};

/// A graph node as drawn on the canvas.
///
/// The identifier is opaque to the engines and used only to resolve edge
/// endpoints. The position is carried for the presentation layer and is
/// never read by the algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Caller-assigned identifier.
    pub id: u32,
    /// Horizontal canvas position.
    pub x: f64,
    /// Vertical canvas position.
    pub y: f64,
}

impl Node {
    /// Create a new node.
    #[must_use]
    pub const fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// An undirected weighted edge between two nodes.
///
/// The endpoint pair is unordered; the `a`/`b` naming carries no
/// direction. Weights must be non-negative (negative weights are out of
/// scope for both engines).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// One endpoint's node id.
    pub a: u32,
    /// The other endpoint's node id.
    pub b: u32,
    /// Non-negative edge weight.
    pub weight: f64,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(a: u32, b: u32, weight: f64) -> Self {
        Self { a, b, weight }
    }
}

/// A single relaxation attempt.
///
/// Recorded whether or not the attempt improved the candidate's
/// priority: the playback layer must show every edge the algorithm
/// considered, not only the winning ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubStep {
    /// Index of the active (most recently finalized) node.
    pub from: usize,
    /// Index of the fringe neighbor under consideration.
    pub to: usize,
    /// Weight of the edge between them.
    pub weight: f64,
}

/// One node-finalization event of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Index of the finalized node's parent.
    pub from: usize,
    /// Index of the finalized node.
    pub to: usize,
    /// The node's priority at finalization: accumulated distance from
    /// the source for shortest-path runs, connecting-edge weight for
    /// spanning-tree runs.
    pub weight: f64,
    /// Relaxation attempts collected strictly between the previous
    /// finalization and this one.
    pub sub_steps: Vec<SubStep>,
}

/// The fully materialized output of one engine run.
///
/// The playback layer iterates `steps` in order (optionally flattening
/// each step's `sub_steps` first); the summary display reads `answer`
/// and `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Finalization events in order, one per node reached.
    pub steps: Vec<Step>,
    /// The answer edges: the shortest path in start-to-target order, or
    /// the spanning tree in discovery order. Endpoints are the original
    /// caller-assigned node ids.
    pub answer: Vec<Edge>,
    /// Sum of the answer edges' weights.
    pub total: f64,
}

/// Errors that can occur while running a graph algorithm.
///
/// The priority-queue variants (`DuplicateKey`, `UnknownKey`,
/// `PriorityIncrease`, `EmptyQueue`) are internal invariant failures;
/// reaching one through the public entry points is a defect, not a
/// user-facing condition. `UnreachableTarget` and `DisconnectedGraph`
/// report a violated connectivity precondition the caller should have
/// checked before invoking the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum EngineError {
    /// An edge references a node id absent from the node collection.
    #[error("edge {a}-{b} references a node not present in the graph")]
    InvalidGraph {
        /// One endpoint id of the offending edge.
        a: u32,
        /// The other endpoint id of the offending edge.
        b: u32,
    },

    /// A key was inserted into the priority queue twice.
    #[error("priority queue already contains key {key}")]
    DuplicateKey {
        /// The key that was already present.
        key: usize,
    },

    /// `decrease_key` was called for a key not in the queue.
    #[error("priority queue does not contain key {key}")]
    UnknownKey {
        /// The absent key.
        key: usize,
    },

    /// `decrease_key` was called with a priority that does not decrease.
    #[error("new priority {new} for key {key} does not decrease current priority {current}")]
    PriorityIncrease {
        /// The key whose priority was to change.
        key: usize,
        /// The priority currently stored for the key.
        current: f64,
        /// The rejected replacement priority.
        new: f64,
    },

    /// `extract_min` was called on an empty queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// The shortest-path target cannot be reached from the source.
    #[error("target node {target} is unreachable from the source")]
    UnreachableTarget {
        /// Dense index of the target node.
        target: usize,
    },

    /// A node can never join the spanning tree.
    #[error("graph is disconnected: node {node} cannot join the spanning tree")]
    DisconnectedGraph {
        /// Dense index of the first node found unreachable.
        node: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn node_new() {
        let node = Node::new(3, 120.0, 44.5);
        assert_eq!(node.id, 3);
        assert!((node.x - 120.0).abs() < f64::EPSILON);
        assert!((node.y - 44.5).abs() < f64::EPSILON);
    }

    #[test]
    fn edge_equality() {
        assert_eq!(Edge::new(0, 1, 2.0), Edge::new(0, 1, 2.0));
        assert_ne!(Edge::new(0, 1, 2.0), Edge::new(1, 0, 2.0));
    }

    #[test]
    fn run_result_serde_round_trip() {
        let result = RunResult {
            steps: vec![Step {
                from: 0,
                to: 1,
                weight: 1.0,
                sub_steps: vec![SubStep {
                    from: 0,
                    to: 1,
                    weight: 1.0,
                }],
            }],
            answer: vec![Edge::new(0, 1, 1.0)],
            total: 1.0,
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = EngineError::InvalidGraph { a: 4, b: 9 };
        assert_eq!(
            err.to_string(),
            "edge 4-9 references a node not present in the graph"
        );

        let err = EngineError::PriorityIncrease {
            key: 2,
            current: 3.0,
            new: 5.0,
        };
        assert!(err.to_string().contains("key 2"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn error_serde_round_trip() {
        let err = EngineError::DisconnectedGraph { node: 7 };
        let json = serde_json::to_string(&err).unwrap();
        let parsed: EngineError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }
}
