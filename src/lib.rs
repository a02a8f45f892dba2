//! Interactive zero-knowledge proof of knowledge of a graph 3-coloring.
//!
//! Each round the prover recolors its graph with a fresh permutation of the
//! three colors, commits to every node with a salted hash, and opens only the
//! two endpoints of the edge the verifier challenges. Repeating the round
//! drives down the chance that an improper coloring goes unnoticed.

pub mod config;
pub mod crypto;
pub mod error;
pub mod graph;
pub mod protocol;
pub mod utils;

pub use config::ProtocolConfig;
pub use crypto::*;
pub use error::{ProtocolError, Result};
pub use graph::*;
pub use protocol::confidence::{confidence, required_rounds, soundness_bound};
pub use protocol::{
	execute_parallel,
	execute_protocol,
	Commitment,
	NoopObserver,
	Opening,
	ProgressObserver,
	ProtocolOrchestrator,
	ProtocolOutcome,
	ProtocolState,
	ProtocolTranscript,
	ProverState,
	Reveal,
	RoundObserver,
	Verifier,
	VerifierConfig,
};
pub use utils::permutation::ColorPermutation;
