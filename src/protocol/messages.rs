use crate::crypto::commitment::Salt;
use crate::crypto::hash::Digest;
use crate::graph::{Color, Edge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-node digests sent to the verifier before the challenge of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub digests: BTreeMap<NodeId, Digest>,
}

impl Commitment {
    pub fn digest(&self, node: NodeId) -> Option<&Digest> {
        self.digests.get(&node)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub color: Color,
    pub salt: Salt,
}

/// Openings for both endpoints of the challenged edge, `u` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub u: Opening,
    pub v: Opening,
}

impl Reveal {
    pub fn colors(&self) -> (Color, Color) {
        (self.u.color, self.v.color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRound {
    pub commitment: Commitment,
    pub edge: Edge,
    pub reveal: Reveal,
}

/// Messages exchanged during a run, in round order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolTranscript {
    pub rounds: Vec<TranscriptRound>,
}
