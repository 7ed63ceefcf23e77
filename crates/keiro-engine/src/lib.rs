//! keiro-engine: step-recording graph-algorithm engines (sans-IO).
//!
//! Executes single-source shortest path (Dijkstra) or minimum spanning
//! tree (Prim) over a user-drawn weighted graph and returns a fully
//! materialized, ordered trace of every edge relaxation/selection event,
//! so a playback layer can replay the run deterministically — timed,
//! sped up, or all at once.
//!
//! The engines share one traversal core: a decrease-key-capable indexed
//! min-heap over a dense adjacency structure, with per-run state that
//! never outlives the call. The node collection's order carries meaning:
//! the first node is the shortest-path source and the spanning-tree
//! root, the last node is the shortest-path target.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! node/edge collections and returns structured data. Serialization to
//! interchange formats lives in `keiro-export`.
//!
//! # Example
//!
//! ```
//! use keiro_engine::{Edge, Node, shortest_path};
//!
//! let nodes = vec![
//!     Node::new(0, 10.0, 10.0),
//!     Node::new(1, 50.0, 10.0),
//!     Node::new(2, 50.0, 50.0),
//! ];
//! let edges = vec![
//!     Edge::new(0, 1, 2.0),
//!     Edge::new(1, 2, 3.0),
//!     Edge::new(0, 2, 9.0),
//! ];
//!
//! let result = shortest_path(&nodes, &edges)?;
//! assert_eq!(result.answer.len(), 2);
//! assert!((result.total - 5.0).abs() < f64::EPSILON);
//! # Ok::<(), keiro_engine::EngineError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod adjacency;
pub mod diagnostics;
pub mod dijkstra;
pub mod heap;
pub mod prim;
pub mod types;

mod assemble;
mod traversal;

pub use adjacency::{Adjacency, Neighbor};
pub use dijkstra::shortest_path;
pub use heap::IndexedMinHeap;
pub use prim::spanning_tree;
pub use types::{Edge, EngineError, Node, RunResult, Step, SubStep};

/// Selects which algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// Single-source shortest path from the first input node to the
    /// last (Dijkstra).
    #[default]
    ShortestPath,

    /// Minimum spanning tree rooted at the first input node (Prim).
    SpanningTree,
}

impl AlgorithmKind {
    /// Run the selected algorithm over a node/edge collection.
    ///
    /// # Errors
    ///
    /// Returns whatever error the selected engine produces: see
    /// [`shortest_path`] and [`spanning_tree`].
    pub fn run(self, nodes: &[Node], edges: &[Edge]) -> Result<RunResult, EngineError> {
        match self {
            Self::ShortestPath => dijkstra::shortest_path(nodes, edges),
            Self::SpanningTree => prim::spanning_tree(nodes, edges),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_shortest_path() {
        assert_eq!(AlgorithmKind::default(), AlgorithmKind::ShortestPath);
    }

    #[test]
    fn kind_dispatch_matches_direct_calls() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
        ];
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0)];

        assert_eq!(
            AlgorithmKind::ShortestPath.run(&nodes, &edges).unwrap(),
            shortest_path(&nodes, &edges).unwrap()
        );
        assert_eq!(
            AlgorithmKind::SpanningTree.run(&nodes, &edges).unwrap(),
            spanning_tree(&nodes, &edges).unwrap()
        );
    }
}
