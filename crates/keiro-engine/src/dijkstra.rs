//! Single-source shortest paths with step recording (Dijkstra).
//!
//! The source is the first node of the input collection and the target
//! is the last; both are fixed by the caller's node ordering. Every
//! relaxation attempt is recorded as a [`SubStep`](crate::SubStep) so
//! the playback layer can animate exactly what the algorithm
//! considered, not only the winning edges.

use crate::adjacency::Adjacency;
use crate::assemble;
use crate::traversal::{self, Relaxation, Traversal};
use crate::types::{Edge, EngineError, Node, RunResult};

/// Compute the shortest path from the first to the last input node.
///
/// Returns the ordered step trace, the path edges in start-to-target
/// order, and the total path weight.
///
/// # Errors
///
/// Returns [`EngineError::InvalidGraph`] if an edge references an
/// unknown node, and [`EngineError::UnreachableTarget`] if the target is
/// never finalized — the input violated the connectivity precondition
/// the caller is expected to check.
pub fn shortest_path(nodes: &[Node], edges: &[Edge]) -> Result<RunResult, EngineError> {
    let adjacency = Adjacency::build(nodes, edges)?;
    let traversal = traverse(&adjacency)?;
    Ok(assemble::path(&adjacency, traversal))
}

/// Run the traversal toward the target and enforce its reachability.
pub(crate) fn traverse(adjacency: &Adjacency) -> Result<Traversal, EngineError> {
    let n = adjacency.node_count();
    if n == 0 {
        return Ok(Traversal::empty());
    }

    let target = n - 1;
    let traversal = traversal::run(adjacency, Relaxation::AccumulatedDistance, Some(target))?;
    if !traversal.finalized[target] {
        return Err(EngineError::UnreachableTarget { target });
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
    use crate::types::{Step, SubStep};

    /// The diamond graph: shortest 0-to-3 path is 0-1-2-3 with total 4,
    /// beating the direct 0-2 edge.
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

    /// Connected pseudo-random graph with 2..=8 nodes and small integer
    /// weights: a random attachment tree plus a few extra edges.
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

    /// All-pairs shortest distances by Floyd-Warshall, as an oracle.
    fn floyd_warshall_distance(nodes: &[Node], edges: &[Edge]) -> f64 {
        let n = nodes.len();
        let index_of =
            |id: u32| nodes.iter().position(|node| node.id == id).unwrap();

        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for edge in edges {
            let (i, j) = (index_of(edge.a), index_of(edge.b));
            if edge.weight < dist[i][j] {
                dist[i][j] = edge.weight;
                dist[j][i] = edge.weight;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }
        dist[0][n - 1]
    }

    #[test]
    fn diamond_path_and_total() {
        let (nodes, edges) = diamond();
        let result = shortest_path(&nodes, &edges).unwrap();

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
    fn diamond_step_trace() {
        let (nodes, edges) = diamond();
        let result = shortest_path(&nodes, &edges).unwrap();

        // Step weights are accumulated distances at finalization; the
        // first step carries both relaxations attempted from the source.
        assert_eq!(
            result.steps,
            vec![
                Step {
                    from: 0,
                    to: 1,
                    weight: 1.0,
                    sub_steps: vec![
                        SubStep {
                            from: 0,
                            to: 1,
                            weight: 1.0
                        },
                        SubStep {
                            from: 0,
                            to: 2,
                            weight: 4.0
                        },
                    ],
                },
                Step {
                    from: 1,
                    to: 2,
                    weight: 3.0,
                    sub_steps: vec![SubStep {
                        from: 1,
                        to: 2,
                        weight: 2.0
                    }],
                },
                Step {
                    from: 2,
                    to: 3,
                    weight: 4.0,
                    sub_steps: vec![SubStep {
                        from: 2,
                        to: 3,
                        weight: 1.0
                    }],
                },
            ]
        );
    }

    #[test]
    fn answer_uses_caller_node_ids() {
        // Same diamond shape, but with non-contiguous unsorted ids; the
        // path must come back in id space, not index space.
        let nodes = vec![
            Node::new(7, 0.0, 0.0),
            Node::new(3, 1.0, 0.0),
            Node::new(9, 2.0, 0.0),
            Node::new(5, 3.0, 0.0),
        ];
        let edges = vec![
            Edge::new(7, 3, 1.0),
            Edge::new(3, 9, 2.0),
            Edge::new(7, 9, 4.0),
            Edge::new(9, 5, 1.0),
        ];

        let result = shortest_path(&nodes, &edges).unwrap();
        assert_eq!(
            result.answer,
            vec![
                Edge::new(7, 3, 1.0),
                Edge::new(3, 9, 2.0),
                Edge::new(9, 5, 1.0),
            ]
        );
    }

    #[test]
    fn terminates_early_at_the_target() {
        // Target (last node) sits one cheap hop from the source; the
        // expensive spokes must never be finalized.
        let nodes = (0..5).map(|id| Node::new(id, 0.0, 0.0)).collect::<Vec<_>>();
        let edges = vec![
            Edge::new(0, 1, 10.0),
            Edge::new(0, 2, 10.0),
            Edge::new(0, 3, 10.0),
            Edge::new(0, 4, 1.0),
        ];

        let result = shortest_path(&nodes, &edges).unwrap();
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].to, 4);
        assert_eq!(result.answer, vec![Edge::new(0, 4, 1.0)]);
    }

    #[test]
    fn unreachable_target_is_an_error() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
        ];
        let edges = vec![Edge::new(0, 1, 1.0)];

        let err = shortest_path(&nodes, &edges).unwrap_err();
        assert_eq!(err, EngineError::UnreachableTarget { target: 2 });
    }

    #[test]
    fn single_node_graph() {
        let nodes = vec![Node::new(0, 0.0, 0.0)];
        let result = shortest_path(&nodes, &[]).unwrap();

        assert!(result.steps.is_empty());
        assert!(result.answer.is_empty());
        assert!(result.total.abs() < f64::EPSILON);
    }

    #[test]
    fn runs_are_idempotent() {
        let (nodes, edges) = diamond();
        let first = shortest_path(&nodes, &edges).unwrap();
        let second = shortest_path(&nodes, &edges).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn step_targets_are_unique() {
        for seed in 1..=20 {
            let (nodes, edges) = random_connected_graph(seed);
            let result = shortest_path(&nodes, &edges).unwrap();

            let mut seen = vec![false; nodes.len()];
            for step in &result.steps {
                assert!(!seen[step.to], "node {} finalized twice", step.to);
                seen[step.to] = true;
            }
        }
    }

    #[test]
    fn totals_match_floyd_warshall() {
        for seed in 1..=25 {
            let (nodes, edges) = random_connected_graph(seed);
            let expected = floyd_warshall_distance(&nodes, &edges);
            let result = shortest_path(&nodes, &edges).unwrap();
            assert!(
                (result.total - expected).abs() < 1e-9,
                "seed {seed}: engine total {} != oracle {expected}",
                result.total,
            );
        }
    }

    #[test]
    fn totals_match_petgraph() {
        use petgraph::graph::UnGraph;

        for seed in 1..=20 {
            let (nodes, edges) = random_connected_graph(seed);

            let mut graph = UnGraph::<u32, f64>::new_undirected();
            let indices: Vec<_> = nodes.iter().map(|node| graph.add_node(node.id)).collect();
            for edge in &edges {
                let a = nodes.iter().position(|n| n.id == edge.a).unwrap();
                let b = nodes.iter().position(|n| n.id == edge.b).unwrap();
                graph.add_edge(indices[a], indices[b], edge.weight);
            }

            let target = indices[nodes.len() - 1];
            let costs =
                petgraph::algo::dijkstra(&graph, indices[0], Some(target), |e| *e.weight());

            let result = shortest_path(&nodes, &edges).unwrap();
            assert!((result.total - costs[&target]).abs() < 1e-9);
        }
    }

    #[test]
    fn answer_is_a_contiguous_path() {
        for seed in 1..=20 {
            let (nodes, edges) = random_connected_graph(seed);
            let result = shortest_path(&nodes, &edges).unwrap();

            assert!(!result.answer.is_empty());
            assert!(result.answer.len() <= nodes.len() - 1);

            // Consecutive answer edges chain a-b, b-c, ... from the
            // source id to the target id.
            assert_eq!(result.answer[0].a, nodes[0].id);
            assert_eq!(
                result.answer[result.answer.len() - 1].b,
                nodes[nodes.len() - 1].id
            );
            for pair in result.answer.windows(2) {
                assert_eq!(pair[0].b, pair[1].a);
            }

            // Every answer edge exists in the input with that weight.
            for edge in &result.answer {
                assert!(edges.iter().any(|e| {
                    ((e.a == edge.a && e.b == edge.b) || (e.a == edge.b && e.b == edge.a))
                        && (e.weight - edge.weight).abs() < f64::EPSILON
                }));
            }
        }
    }
}
