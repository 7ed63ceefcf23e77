//! Result assembly: raw traversal output into the caller-facing
//! [`RunResult`].
//!
//! The shortest-path engine discovers its path target-to-source, so the
//! answer is reversed into start-to-target order here. Spanning-tree
//! edges have no canonical direction and stay in discovery order. In
//! both cases `total` is recomputed from the answer edges and checked
//! against the traversal's own priority figures.

use crate::adjacency::Adjacency;
use crate::traversal::Traversal;
use crate::types::{Edge, RunResult};

/// Assemble a shortest-path result.
///
/// Walks parent pointers from the target back to the source, collecting
/// edges, then reverses them into start-to-target order. Answer edge
/// endpoints are mapped back to the caller's node ids.
pub(crate) fn path(adjacency: &Adjacency, traversal: Traversal) -> RunResult {
    let Some(target) = adjacency.node_count().checked_sub(1) else {
        return RunResult {
            steps: traversal.steps,
            answer: Vec::new(),
            total: 0.0,
        };
    };

    let mut answer = Vec::new();
    let mut node = target;
    while node != 0 {
        // A finalized target implies an unbroken parent chain back to
        // index 0, so this loop always terminates at the source.
        let Some(parent) = traversal.parents[node] else {
            break;
        };
        answer.push(Edge::new(
            adjacency.id_of(parent.index),
            adjacency.id_of(node),
            parent.weight,
        ));
        node = parent.index;
    }
    answer.reverse();

    let total = answer_total(&answer);
    debug_assert!(
        (total - traversal.priorities[target]).abs() < 1e-9,
        "path total must match the target's final priority"
    );

    RunResult {
        steps: traversal.steps,
        answer,
        total,
    }
}

/// Assemble a spanning-tree result.
///
/// Tree edges are the steps' `(from, to, weight)` triples reinterpreted
/// as undirected edges, in discovery order.
pub(crate) fn tree(adjacency: &Adjacency, traversal: Traversal) -> RunResult {
    let answer: Vec<Edge> = traversal
        .steps
        .iter()
        .map(|step| {
            Edge::new(
                adjacency.id_of(step.from),
                adjacency.id_of(step.to),
                step.weight,
            )
        })
        .collect();

    let total = answer_total(&answer);
    debug_assert!(
        (total
            - traversal
                .steps
                .iter()
                .map(|step| traversal.priorities[step.to])
                .sum::<f64>())
        .abs()
            < 1e-9,
        "tree total must match the sum of finalized priorities"
    );

    RunResult {
        steps: traversal.steps,
        answer,
        total,
    }
}

fn answer_total(answer: &[Edge]) -> f64 {
    answer.iter().map(|edge| edge.weight).sum()
}
