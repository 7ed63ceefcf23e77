//! Minimum spanning tree with step recording (Prim).
//!
//! Rooted at the first input node. A node's priority is the weight of
//! the cheapest known edge connecting it to the growing tree — not a
//! distance from the root — and the loop always runs the fringe dry,
//! since every node must join the tree. A node surfacing with its
//! priority still infinite means no edge can ever attach it, which is
//! reported instead of returning a partial tree.

use crate::adjacency::Adjacency;
use crate::assemble;
use crate::traversal::{self, Relaxation, Traversal};
use crate::types::{Edge, EngineError, Node, RunResult};

/// Compute a minimum spanning tree rooted at the first input node.
///
/// Returns the ordered step trace, the tree edges in discovery order,
/// and the total tree weight.
///
/// # Errors
///
/// Returns [`EngineError::InvalidGraph`] if an edge references an
/// unknown node, and [`EngineError::DisconnectedGraph`] if any node can
/// never join the tree — the input violated the connectivity
/// precondition the caller is expected to check.
pub fn spanning_tree(nodes: &[Node], edges: &[Edge]) -> Result<RunResult, EngineError> {
    let adjacency = Adjacency::build(nodes, edges)?;
    let traversal = traverse(&adjacency)?;
    Ok(assemble::tree(&adjacency, traversal))
}

/// Run the traversal to exhaustion and enforce full connectivity.
pub(crate) fn traverse(adjacency: &Adjacency) -> Result<Traversal, EngineError> {
    let traversal = traversal::run(adjacency, Relaxation::EdgeWeight, None)?;
    if let Some(node) = traversal.unreached {
        return Err(EngineError::DisconnectedGraph { node });
    }
    Ok(traversal)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
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

    fn xorshift(state: &mut u64) -> u64 {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        *state
    }

    fn random_connected_graph(seed: u64) -> (Vec<Node>, Vec<Edge>) {
        let mut state = seed | 1;
        let n = 2 + xorshift(&mut state) as usize % 7;
        let nodes: Vec<Node> = (0..n).map(|i| Node::new(i as u32, 0.0, 0.0)).collect();

        let mut edges = Vec::new();
        for i in 1..n {
            let j = xorshift(&mut state) as usize % i;
            let weight = (1 + xorshift(&mut state) % 9) as f64;
            edges.push(Edge::new(j as u32, i as u32, weight));
        }
        for _ in 0..xorshift(&mut state) % 6 {
            let a = xorshift(&mut state) as usize % n;
            let b = xorshift(&mut state) as usize % n;
            if a == b {
                continue;
            }
            let weight = (1 + xorshift(&mut state) % 9) as f64;
            edges.push(Edge::new(a as u32, b as u32, weight));
        }
        (nodes, edges)
    }

    #[test]
    fn diamond_tree_and_total() {
        let (nodes, edges) = diamond();
        let result = spanning_tree(&nodes, &edges).unwrap();

        assert_eq!(
            result.answer,
            vec![
                Edge::new(0, 1, 1.0),
                Edge::new(1, 2, 2.0),
                Edge::new(2, 3, 1.0),
            ]
        );
        assert!((result.total - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn step_weights_are_edge_weights() {
        // Unlike the shortest-path trace, spanning-tree step weights are
        // bare connecting-edge weights, never accumulated distances.
        let (nodes, edges) = diamond();
        let result = spanning_tree(&nodes, &edges).unwrap();

        let weights: Vec<f64> = result.steps.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn disconnected_graph_is_an_error() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
        ];
        let edges = vec![Edge::new(0, 1, 1.0)];

        let err = spanning_tree(&nodes, &edges).unwrap_err();
        assert_eq!(err, EngineError::DisconnectedGraph { node: 2 });
    }

    #[test]
    fn single_node_graph() {
        let nodes = vec![Node::new(0, 0.0, 0.0)];
        let result = spanning_tree(&nodes, &[]).unwrap();

        assert!(result.steps.is_empty());
        assert!(result.answer.is_empty());
        assert!(result.total.abs() < f64::EPSILON);
    }

    #[test]
    fn runs_are_idempotent() {
        let (nodes, edges) = diamond();
        let first = spanning_tree(&nodes, &edges).unwrap();
        let second = spanning_tree(&nodes, &edges).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tree_spans_every_node_exactly_once() {
        for seed in 1..=20 {
            let (nodes, edges) = random_connected_graph(seed);
            let result = spanning_tree(&nodes, &edges).unwrap();

            assert_eq!(result.answer.len(), nodes.len() - 1);

            // Every node except the root joins through exactly one step.
            let mut seen = vec![false; nodes.len()];
            seen[0] = true;
            for step in &result.steps {
                assert!(!seen[step.to], "node {} finalized twice", step.to);
                seen[step.to] = true;
            }
            assert!(seen.iter().all(|&joined| joined));
        }
    }

    #[test]
    fn totals_match_petgraph_kruskal() {
        use petgraph::data::Element;
        use petgraph::graph::UnGraph;

        for seed in 1..=25 {
            let (nodes, edges) = random_connected_graph(seed);

            let mut graph = UnGraph::<u32, f64>::new_undirected();
            let indices: Vec<_> = nodes.iter().map(|node| graph.add_node(node.id)).collect();
            for edge in &edges {
                let a = nodes.iter().position(|n| n.id == edge.a).unwrap();
                let b = nodes.iter().position(|n| n.id == edge.b).unwrap();
                graph.add_edge(indices[a], indices[b], edge.weight);
            }

            let expected: f64 = petgraph::algo::min_spanning_tree(&graph)
                .filter_map(|element| match element {
                    Element::Edge { weight, .. } => Some(weight),
                    Element::Node { .. } => None,
                })
                .sum();

            let result = spanning_tree(&nodes, &edges).unwrap();
            assert!(
                (result.total - expected).abs() < 1e-9,
                "seed {seed}: engine total {} != oracle {expected}",
                result.total,
            );
        }
    }
}
