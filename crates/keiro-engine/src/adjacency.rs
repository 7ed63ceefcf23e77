//! Graph indexing: dense integer-indexed adjacency construction.
//!
//! Node indices are assigned by first-appearance order in the input node
//! collection. Index 0 is the algorithms' start node (shortest-path
//! source, spanning-tree root) and index n-1 is the shortest-path
//! target; the caller fixes both by ordering the node collection.

use std::collections::HashMap;

use crate::types::{Edge, EngineError, Node};

/// A neighbor entry in one adjacency slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Dense index of the adjacent node.
    pub index: usize,
    /// Weight of the connecting edge.
    pub weight: f64,
}

/// Dense adjacency structure over node indices `0..n`.
///
/// Undirected edges are stored symmetrically: an edge between indices
/// `i` and `j` appears in both slot `i` and slot `j`. Parallel edges and
/// self-loops are kept as given; input sanity beyond endpoint validity
/// is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    slots: Vec<Vec<Neighbor>>,
    ids: Vec<u32>,
}

impl Adjacency {
    /// Build the adjacency structure for a node/edge collection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidGraph`] if an edge references a
    /// node id not present in `nodes`.
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Result<Self, EngineError> {
        let mut index_of = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_of.entry(node.id).or_insert(index);
        }

        let mut slots = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let (Some(&i), Some(&j)) = (index_of.get(&edge.a), index_of.get(&edge.b)) else {
                return Err(EngineError::InvalidGraph {
                    a: edge.a,
                    b: edge.b,
                });
            };
            slots[i].push(Neighbor {
                index: j,
                weight: edge.weight,
            });
            slots[j].push(Neighbor {
                index: i,
                weight: edge.weight,
            });
        }

        Ok(Self {
            slots,
            ids: nodes.iter().map(|node| node.id).collect(),
        })
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Neighbors of the node at `index`, in edge input order.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        &self.slots[index]
    }

    /// Original caller-assigned id of the node at `index`.
    #[must_use]
    pub fn id_of(&self, index: usize) -> u32 {
        self.ids[index]
    }
}
