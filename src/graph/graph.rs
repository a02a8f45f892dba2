use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type NodeId = u32;

/// Unordered node pair, stored with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { u: a, v: b }
        } else {
            Edge { u: b, v: a }
        }
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.u, self.v)
    }

    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((a, b): (NodeId, NodeId)) -> Self {
        Edge::new(a, b)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// Undirected simple graph shared by both protocol parties.
///
/// Invariants: no self-loops, every edge endpoint is a known node, and the
/// edge list is sorted without duplicates. Deserialized graphs go through the
/// same checks as [`Graph::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    nodes: BTreeSet<NodeId>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new<N, E>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let nodes: BTreeSet<NodeId> = nodes.into_iter().collect();
        let mut unique = BTreeSet::new();
        for (a, b) in edges {
            let edge = Edge::new(a, b);
            if edge.is_loop() {
                return Err(ProtocolError::InvalidGraph(format!(
                    "self-loop on node {}",
                    edge.u
                )));
            }
            for endpoint in [edge.u, edge.v] {
                if !nodes.contains(&endpoint) {
                    return Err(ProtocolError::InvalidGraph(format!(
                        "edge {edge} references unknown node {endpoint}"
                    )));
                }
            }
            unique.insert(edge);
        }

        Ok(Graph {
            nodes,
            edges: unique.into_iter().collect(),
        })
    }

    /// Graph on nodes `0..n` with the given edges.
    pub fn with_node_count<E>(n: u32, edges: E) -> Result<Self>
    where
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        Graph::new(0..n, edges)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.binary_search(&Edge::new(edge.u, edge.v)).is_ok()
    }

    pub fn edge_at(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }
}

#[derive(Serialize, Deserialize)]
struct GraphRepr {
    nodes: Vec<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = ProtocolError;

    fn try_from(repr: GraphRepr) -> Result<Self> {
        Graph::new(repr.nodes, repr.edges)
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        GraphRepr {
            nodes: graph.nodes.into_iter().collect(),
            edges: graph.edges.iter().map(Edge::endpoints).collect(),
        }
    }
}
