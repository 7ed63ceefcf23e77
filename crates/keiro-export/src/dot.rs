//! Graphviz DOT serializer.
//!
//! Renders the input graph as an undirected DOT document with the
//! answer edges (shortest path or spanning tree) highlighted, suitable
//! for quick inspection with `dot -Tsvg`. Node labels are the caller's
//! node ids; edge labels are weights.
//!
//! This is a pure function with no I/O — it returns a `String`.

use std::collections::{HashMap, HashSet};

use keiro_engine::{Edge, Node, RunResult};
use petgraph::dot::Dot;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Stroke used for answer edges in the rendered document.
const ANSWER_EDGE_ATTRS: &str = "color = \"#1a7f37\" penwidth = 2";

/// Normalize an endpoint pair so unordered edges compare equal.
const fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Render a graph and its answer edges as a Graphviz DOT document.
///
/// Edges whose endpoint pair appears in `result.answer` are stroked;
/// parallel edges between the same endpoints are highlighted together,
/// since DOT output carries no way to tell them apart.
#[must_use]
pub fn to_dot(nodes: &[Node], edges: &[Edge], result: &RunResult) -> String {
    let mut graph = UnGraph::<u32, f64>::with_capacity(nodes.len(), edges.len());

    let mut index_of = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let index = graph.add_node(node.id);
        index_of.entry(node.id).or_insert(index);
    }
    for edge in edges {
        if let (Some(&a), Some(&b)) = (index_of.get(&edge.a), index_of.get(&edge.b)) {
            graph.add_edge(a, b, edge.weight);
        }
    }

    let answer: HashSet<(u32, u32)> = result
        .answer
        .iter()
        .map(|edge| ordered(edge.a, edge.b))
        .collect();

    let edge_attrs = |g: &UnGraph<u32, f64>, edge: petgraph::graph::EdgeReference<'_, f64>| {
        let pair = ordered(g[edge.source()], g[edge.target()]);
        if answer.contains(&pair) {
            ANSWER_EDGE_ATTRS.to_owned()
        } else {
            String::new()
        }
    };
    let node_attrs = |_: &UnGraph<u32, f64>, _: (petgraph::graph::NodeIndex, &u32)| String::new();
    let dot = Dot::with_attr_getters(&graph, &[], &edge_attrs, &node_attrs);

    format!("{dot}")
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
    fn document_is_undirected() {
        let (nodes, edges) = diamond();
        let result = keiro_engine::spanning_tree(&nodes, &edges).unwrap();
        let dot = to_dot(&nodes, &edges, &result);

        assert!(dot.starts_with("graph {"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn answer_edges_are_highlighted() {
        let (nodes, edges) = diamond();
        let result = keiro_engine::spanning_tree(&nodes, &edges).unwrap();
        let dot = to_dot(&nodes, &edges, &result);

        // The tree has three edges; the losing 0-2 edge stays plain.
        assert_eq!(dot.matches("penwidth").count(), 3);
    }

    #[test]
    fn every_input_edge_is_rendered() {
        let (nodes, edges) = diamond();
        let result = keiro_engine::shortest_path(&nodes, &edges).unwrap();
        let dot = to_dot(&nodes, &edges, &result);

        assert_eq!(dot.matches("--").count(), edges.len());
    }
}
