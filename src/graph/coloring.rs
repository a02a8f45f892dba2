use crate::error::{ProtocolError, Result};
use crate::graph::{Edge, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Yellow];

    pub fn to_u8(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Yellow => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Yellow),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self.to_u8() as usize
    }
}

impl TryFrom<u8> for Color {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        Color::from_u8(value).ok_or(ProtocolError::InvalidColor(value))
    }
}

/// Assignment of a color to each node.
///
/// A coloring is not required to be proper: the prover accepts any complete
/// coloring, and an improper one is exactly what the verifier is meant to catch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    colors: BTreeMap<NodeId, Color>,
}

impl Coloring {
    pub fn new() -> Self {
        Coloring::default()
    }

    /// Builds a coloring from raw `(node, value)` pairs with values in {0, 1, 2}.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, u8)>,
    {
        values
            .into_iter()
            .map(|(node, value)| Color::try_from(value).map(|color| (node, color)))
            .collect()
    }

    pub fn set(&mut self, node: NodeId, color: Color) {
        self.colors.insert(node, color);
    }

    pub fn get(&self, node: NodeId) -> Option<Color> {
        self.colors.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Color)> + '_ {
        self.colors.iter().map(|(&node, &color)| (node, color))
    }

    /// Fails with the first node of `graph` that has no color.
    pub fn ensure_covers(&self, graph: &Graph) -> Result<()> {
        match graph.nodes().find(|node| !self.colors.contains_key(node)) {
            Some(node) => Err(ProtocolError::MissingColor(node)),
            None => Ok(()),
        }
    }

    /// Edges whose endpoints share a color (uncolored endpoints are ignored).
    pub fn conflicting_edges(&self, graph: &Graph) -> Vec<Edge> {
        graph
            .edges()
            .iter()
            .filter(|edge| match (self.get(edge.u), self.get(edge.v)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            })
            .copied()
            .collect()
    }

    /// True when every node is colored and no edge is monochromatic.
    pub fn is_proper_for(&self, graph: &Graph) -> bool {
        self.ensure_covers(graph).is_ok() && self.conflicting_edges(graph).is_empty()
    }
}

impl FromIterator<(NodeId, Color)> for Coloring {
    fn from_iter<I: IntoIterator<Item = (NodeId, Color)>>(iter: I) -> Self {
        Coloring {
            colors: iter.into_iter().collect(),
        }
    }
}
