pub mod confidence;
pub mod messages;
pub mod observer;
pub mod orchestrator;
pub mod prover;
pub mod verifier;

pub use messages::{Commitment, Opening, ProtocolTranscript, Reveal, TranscriptRound};
pub use observer::{NoopObserver, ProgressObserver, RoundObserver};
pub use orchestrator::{
    execute_parallel, execute_protocol, ProtocolOrchestrator, ProtocolOutcome, ProtocolState,
};
pub use prover::ProverState;
pub use verifier::{Verifier, VerifierConfig};
