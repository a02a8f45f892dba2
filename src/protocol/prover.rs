use crate::crypto::commitment::{CommitmentScheme, Salt};
use crate::crypto::randomness::{RandomSource, SystemRandomness};
use crate::error::{ProtocolError, Result};
use crate::graph::{Coloring, Edge, Graph, NodeId};
use crate::protocol::messages::{Commitment, Opening, Reveal};
use crate::utils::permutation::ColorPermutation;
use std::collections::BTreeMap;

/// Scratch state of one round. Replaced as a whole by every `commit` and
/// consumed by the `reveal` that opens it.
struct RoundSecrets {
    openings: BTreeMap<NodeId, Opening>,
}

impl RoundSecrets {
    fn opening(&self, node: NodeId) -> Result<Opening> {
        self.openings
            .get(&node)
            .copied()
            .ok_or(ProtocolError::MissingColor(node))
    }
}

pub struct ProverState<R: RandomSource = SystemRandomness> {
    graph: Graph,
    coloring: Coloring,
    scheme: CommitmentScheme,
    rng: R,
    round: Option<RoundSecrets>,
}

impl ProverState<SystemRandomness> {
    pub fn with_system_randomness(
        graph: Graph,
        coloring: Coloring,
        scheme: CommitmentScheme,
    ) -> Result<Self> {
        ProverState::new(graph, coloring, scheme, SystemRandomness)
    }
}

impl<R: RandomSource> ProverState<R> {
    /// Every node needs a color. Properness is not checked here: proving an
    /// improper coloring is allowed and ends in rejection.
    pub fn new(graph: Graph, coloring: Coloring, scheme: CommitmentScheme, rng: R) -> Result<Self> {
        coloring.ensure_covers(&graph)?;
        Ok(ProverState {
            graph,
            coloring,
            scheme,
            rng,
            round: None,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn has_pending_round(&self) -> bool {
        self.round.is_some()
    }

    pub fn commit(&mut self) -> Result<Commitment> {
        // Drop the previous round before drawing anything for the new one.
        self.round = None;

        let permutation = ColorPermutation::sample(&mut self.rng);
        let shuffled = permutation.shuffle(&self.coloring);

        let mut openings = BTreeMap::new();
        let mut digests = BTreeMap::new();
        for node in self.graph.nodes() {
            let color = shuffled.get(node).ok_or(ProtocolError::MissingColor(node))?;
            let salt = Salt::random(&mut self.rng)?;
            digests.insert(node, self.scheme.commit(color, &salt));
            openings.insert(node, Opening { color, salt });
        }

        self.round = Some(RoundSecrets { openings });
        Ok(Commitment { digests })
    }

    /// Opens both endpoints of `edge` for the current round. The round's
    /// secrets are consumed, so a commitment is opened at most once.
    pub fn reveal(&mut self, edge: &Edge) -> Result<Reveal> {
        if !self.graph.contains_edge(edge) {
            return Err(ProtocolError::InvalidEdge(edge.u, edge.v));
        }
        let secrets = self
            .round
            .take()
            .ok_or(ProtocolError::InvalidState("reveal requested before commit"))?;
        Ok(Reveal {
            u: secrets.opening(edge.u)?,
            v: secrets.opening(edge.v)?,
        })
    }
}
