//! Shared frontier/finalize/relax traversal core.
//!
//! Dijkstra and Prim run the same state machine over node statuses
//! {in-fringe, finalized}; they differ only in how a relaxation
//! candidate is computed and in whether the loop may stop early. Both
//! variants are expressed here once, parameterized by [`Relaxation`]
//! and a stop-at-target policy.
//!
//! All per-run state (priorities, parent pointers, fringe membership,
//! step buffer) lives in a record owned exclusively by the running call
//! and dropped with it. Nothing persists across runs.

use crate::adjacency::Adjacency;
use crate::heap::IndexedMinHeap;
use crate::types::{EngineError, Step, SubStep};

/// How a candidate priority for a fringe neighbor is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    /// Accumulated distance from the source: `priority(u) + weight`.
    AccumulatedDistance,
    /// Bare connecting-edge weight: the cheapest known edge into the
    /// growing tree, independent of any distance from the root.
    EdgeWeight,
}

impl Relaxation {
    fn candidate(self, active_priority: f64, edge_weight: f64) -> f64 {
        match self {
            Self::AccumulatedDistance => active_priority + edge_weight,
            Self::EdgeWeight => edge_weight,
        }
    }
}

/// The edge through which a node joined the tree under construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Parent {
    /// Dense index of the parent node.
    pub index: usize,
    /// Weight of the connecting edge.
    pub weight: f64,
}

/// Everything a traversal run leaves behind for result assembly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Traversal {
    /// One step per node finalized at a finite priority, in
    /// finalization order.
    pub steps: Vec<Step>,
    /// Parent pointer per node index; `None` for the start node and for
    /// nodes never reached.
    pub parents: Vec<Option<Parent>>,
    /// Final priority per node index (`f64::INFINITY` when unreached).
    pub priorities: Vec<f64>,
    /// Whether each node index was finalized.
    pub finalized: Vec<bool>,
    /// First node extracted with its priority still infinite, if any.
    /// `Some` means part of the graph is cut off from the start node.
    pub unreached: Option<usize>,
}

impl Traversal {
    pub(crate) const fn empty() -> Self {
        Self {
            steps: Vec::new(),
            parents: Vec::new(),
            priorities: Vec::new(),
            finalized: Vec::new(),
            unreached: None,
        }
    }
}

/// Run the traversal from node index 0.
///
/// When `stop_at` is `Some(t)`, the loop terminates as soon as `t` is
/// finalized and the remaining fringe is abandoned. Extracting a node
/// whose priority is still infinite also terminates the loop: every
/// later extraction would be infinite too, so nothing further can ever
/// be finalized.
pub(crate) fn run(
    adjacency: &Adjacency,
    relaxation: Relaxation,
    stop_at: Option<usize>,
) -> Result<Traversal, EngineError> {
    let n = adjacency.node_count();
    if n == 0 {
        return Ok(Traversal::empty());
    }

    let mut fringe = IndexedMinHeap::with_capacity(n);
    let mut priorities = vec![f64::INFINITY; n];
    let mut parents: Vec<Option<Parent>> = vec![None; n];
    let mut in_fringe = vec![true; n];
    let mut finalized = vec![false; n];
    let mut steps = Vec::new();
    let mut unreached = None;

    priorities[0] = 0.0;
    fringe.insert(0, 0.0)?;
    for index in 1..n {
        fringe.insert(index, f64::INFINITY)?;
    }

    let mut sub_steps: Vec<SubStep> = Vec::new();
    while !fringe.is_empty() {
        let (node, priority) = fringe.extract_min()?;

        if priority.is_infinite() {
            unreached = Some(node);
            break;
        }

        in_fringe[node] = false;
        finalized[node] = true;

        // The start node has no parent and emits no step; every other
        // finite finalization closes the current sub-step window.
        if let Some(parent) = parents[node] {
            steps.push(Step {
                from: parent.index,
                to: node,
                weight: priority,
                sub_steps: std::mem::take(&mut sub_steps),
            });
        }

        if stop_at == Some(node) {
            break;
        }

        for neighbor in adjacency.neighbors(node) {
            if !in_fringe[neighbor.index] {
                continue;
            }

            // Attempted relaxations are recorded even when they do not
            // improve the neighbor's priority.
            sub_steps.push(SubStep {
                from: node,
                to: neighbor.index,
                weight: neighbor.weight,
            });

            let candidate = relaxation.candidate(priority, neighbor.weight);
            if candidate < priorities[neighbor.index] {
                priorities[neighbor.index] = candidate;
                parents[neighbor.index] = Some(Parent {
                    index: node,
                    weight: neighbor.weight,
                });
                fringe.decrease_key(neighbor.index, candidate)?;
            }
        }
    }

    Ok(Traversal {
        steps,
        parents,
        priorities,
        finalized,
        unreached,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node};

    fn adjacency(nodes: &[Node], edges: &[Edge]) -> Adjacency {
        Adjacency::build(nodes, edges).unwrap()
    }

    fn triangle() -> Adjacency {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 0.5, 1.0),
        ];
        let edges = vec![
            Edge::new(0, 1, 1.0),
            Edge::new(1, 2, 1.0),
            Edge::new(0, 2, 5.0),
        ];
        adjacency(&nodes, &edges)
    }

    #[test]
    fn sub_steps_attach_to_the_following_finalization() {
        let traversal = run(&triangle(), Relaxation::AccumulatedDistance, None).unwrap();

        // Extracting node 0 relaxes toward 1 and 2; both attempts belong
        // to node 1's step (the next finalization).
        assert_eq!(traversal.steps[0].to, 1);
        assert_eq!(traversal.steps[0].sub_steps.len(), 2);
        assert_eq!(traversal.steps[0].sub_steps[0].to, 1);
        assert_eq!(traversal.steps[0].sub_steps[1].to, 2);

        // Node 1's relaxation toward 2 belongs to node 2's step.
        assert_eq!(traversal.steps[1].to, 2);
        assert_eq!(traversal.steps[1].sub_steps.len(), 1);
        assert_eq!(traversal.steps[1].sub_steps[0].from, 1);
    }

    #[test]
    fn losing_relaxations_are_still_recorded() {
        let traversal = run(&triangle(), Relaxation::AccumulatedDistance, None).unwrap();

        // The 0-2 edge (weight 5) never wins, yet its attempt appears.
        let all_subs: Vec<_> = traversal
            .steps
            .iter()
            .flat_map(|step| step.sub_steps.iter())
            .collect();
        assert!(all_subs.iter().any(|s| s.from == 0 && s.to == 2));
    }

    #[test]
    fn stop_at_abandons_the_remaining_fringe() {
        // Star around 0; stopping at node 1 leaves 2 and 3 unfinalized.
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
            Node::new(3, 3.0, 0.0),
        ];
        let edges = vec![
            Edge::new(0, 1, 1.0),
            Edge::new(0, 2, 2.0),
            Edge::new(0, 3, 3.0),
        ];
        let traversal = run(
            &adjacency(&nodes, &edges),
            Relaxation::AccumulatedDistance,
            Some(1),
        )
        .unwrap();

        assert!(traversal.finalized[1]);
        assert!(!traversal.finalized[2]);
        assert!(!traversal.finalized[3]);
        assert_eq!(traversal.steps.len(), 1);
    }

    #[test]
    fn infinite_extraction_stops_the_loop() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
        ];
        let edges = vec![Edge::new(0, 1, 1.0)];
        let traversal = run(&adjacency(&nodes, &edges), Relaxation::EdgeWeight, None).unwrap();

        assert_eq!(traversal.unreached, Some(2));
        assert!(!traversal.finalized[2]);
        assert!(traversal.priorities[2].is_infinite());
    }

    #[test]
    fn empty_graph_yields_empty_traversal() {
        let traversal = run(
            &adjacency(&[], &[]),
            Relaxation::AccumulatedDistance,
            None,
        )
        .unwrap();
        assert!(traversal.steps.is_empty());
        assert_eq!(traversal.unreached, None);
    }
}
