use crate::crypto::commitment::CommitmentScheme;
use crate::crypto::randomness::{RandomSource, SystemRandomness};
use crate::error::{ProtocolError, Result};
use crate::graph::{Edge, Graph, NodeId};
use crate::protocol::confidence;
use crate::protocol::messages::{Commitment, Opening, ProtocolTranscript, Reveal};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    pub rounds: u32,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig { rounds: 8 }
    }
}

impl VerifierConfig {
    pub fn new(rounds: u32) -> Result<Self> {
        if rounds == 0 {
            return Err(ProtocolError::InvalidParameter(
                "round count must be at least 1".to_string(),
            ));
        }
        Ok(VerifierConfig { rounds })
    }

    /// Enough rounds for a cheating prover to survive with probability
    /// about `1 - target` on a graph with `edge_count` edges.
    pub fn for_confidence(edge_count: usize, target: f64) -> Result<Self> {
        let rounds = confidence::required_rounds(edge_count, target)?;
        let rounds = u32::try_from(rounds).map_err(|_| {
            ProtocolError::InvalidParameter(format!("{rounds} rounds do not fit in a u32"))
        })?;
        VerifierConfig::new(rounds)
    }
}

/// Commitment received for the current round, and the edge drawn against it.
struct PendingRound {
    commitment: Commitment,
    edge: Option<Edge>,
}

pub struct Verifier<R: RandomSource = SystemRandomness> {
    graph: Graph,
    configuration: VerifierConfig,
    scheme: CommitmentScheme,
    rng: R,
    pending: Option<PendingRound>,
}

impl Verifier<SystemRandomness> {
    pub fn with_system_randomness(
        graph: Graph,
        configuration: VerifierConfig,
        scheme: CommitmentScheme,
    ) -> Self {
        Verifier::new(graph, configuration, scheme, SystemRandomness)
    }
}

impl<R: RandomSource> Verifier<R> {
    pub fn new(graph: Graph, configuration: VerifierConfig, scheme: CommitmentScheme, rng: R) -> Self {
        Verifier {
            graph,
            configuration,
            scheme,
            rng,
            pending: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn rounds(&self) -> u32 {
        self.configuration.rounds
    }

    /// Starts a round. Any unfinished previous round is discarded.
    pub fn receive_commitment(&mut self, commitment: Commitment) {
        self.pending = Some(PendingRound {
            commitment,
            edge: None,
        });
    }

    /// Draws the challenge for the pending commitment.
    pub fn choose_edge(&mut self) -> Result<Edge> {
        if self.graph.edge_count() == 0 {
            return Err(ProtocolError::EmptyEdgeSet);
        }
        let pending = self
            .pending
            .as_mut()
            .ok_or(ProtocolError::InvalidState("challenge requested before commitment"))?;
        if pending.edge.is_some() {
            return Err(ProtocolError::InvalidState("challenge already issued for this commitment"));
        }
        let index = self.rng.uniform_below(self.graph.edge_count());
        let edge = self
            .graph
            .edge_at(index)
            .ok_or(ProtocolError::EmptyEdgeSet)?;
        pending.edge = Some(edge);
        Ok(edge)
    }

    /// Checks `reveal` against the pending commitment and challenge, closing the round.
    pub fn check_reveal(&mut self, reveal: &Reveal) -> Result<bool> {
        let pending = self
            .pending
            .take()
            .ok_or(ProtocolError::InvalidState("reveal received before commitment"))?;
        let edge = match pending.edge {
            Some(edge) => edge,
            None => {
                self.pending = Some(pending);
                return Err(ProtocolError::InvalidState("reveal received before challenge"));
            }
        };
        Ok(self.verify(&edge, &pending.commitment, reveal))
    }

    /// Both openings must match their digests and the two colors must differ.
    pub fn verify(&self, edge: &Edge, commitment: &Commitment, reveal: &Reveal) -> bool {
        if !self.graph.contains_edge(edge) {
            debug!(%edge, "rejected: challenged edge is not part of the graph");
            return false;
        }
        if commitment.len() != self.graph.node_count()
            || !self.graph.nodes().all(|node| commitment.digest(node).is_some())
        {
            debug!(
                committed = commitment.len(),
                nodes = self.graph.node_count(),
                "rejected: commitment does not cover the graph"
            );
            return false;
        }
        if !self.opening_matches(commitment, edge.u, &reveal.u)
            || !self.opening_matches(commitment, edge.v, &reveal.v)
        {
            return false;
        }
        if reveal.u.color == reveal.v.color {
            debug!(%edge, "rejected: endpoints revealed the same color");
            return false;
        }
        true
    }

    /// Re-checks the openings of a recorded run. Whether the recorded edges
    /// were drawn at random cannot be established after the fact.
    pub fn replay(&self, transcript: &ProtocolTranscript) -> bool {
        if transcript.rounds.is_empty() {
            return false;
        }
        transcript.rounds.iter().enumerate().all(|(idx, round)| {
            let passed = self.verify(&round.edge, &round.commitment, &round.reveal);
            if !passed {
                debug!(round = idx, "transcript replay failed");
            }
            passed
        })
    }

    fn opening_matches(&self, commitment: &Commitment, node: NodeId, opening: &Opening) -> bool {
        let digest = match commitment.digest(node) {
            Some(digest) => digest,
            None => return false,
        };
        if !self.scheme.verify(opening.color, &opening.salt, digest) {
            debug!(
                node,
                digest = %hex::encode(digest),
                "rejected: opening does not match commitment"
            );
            return false;
        }
        true
    }
}
