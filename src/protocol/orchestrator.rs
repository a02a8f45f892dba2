use crate::crypto::commitment::CommitmentScheme;
use crate::crypto::randomness::RandomSource;
use crate::error::{ProtocolError, Result};
use crate::graph::{Coloring, Graph};
use crate::protocol::confidence;
use crate::protocol::messages::{ProtocolTranscript, TranscriptRound};
use crate::protocol::observer::{NoopObserver, RoundObserver};
use crate::protocol::prover::ProverState;
use crate::protocol::verifier::{Verifier, VerifierConfig};
use rayon::prelude::*;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Idle,
    RoundInProgress { round: u32 },
    Accepted,
    Rejected { round: u32 },
}

impl ProtocolState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProtocolState::Accepted | ProtocolState::Rejected { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ProtocolOutcome {
    pub accepted: bool,
    /// Rounds executed, including the failing one on rejection.
    pub rounds_run: u32,
    pub failed_round: Option<u32>,
    pub edge_count: usize,
    pub transcript: Option<ProtocolTranscript>,
}

impl ProtocolOutcome {
    fn accept(rounds: u32, edge_count: usize, transcript: Option<ProtocolTranscript>) -> Self {
        ProtocolOutcome {
            accepted: true,
            rounds_run: rounds,
            failed_round: None,
            edge_count,
            transcript,
        }
    }

    fn reject(round: u32, edge_count: usize, transcript: Option<ProtocolTranscript>) -> Self {
        ProtocolOutcome {
            accepted: false,
            rounds_run: round + 1,
            failed_round: Some(round),
            edge_count,
            transcript,
        }
    }

    /// Heuristic confidence of an accepted run; `None` on rejection.
    pub fn confidence(&self) -> Option<f64> {
        self.accepted
            .then(|| confidence::confidence(self.rounds_run as u64, self.edge_count))
    }
}

/// Drives commit, challenge, reveal and verify for the verifier's round count,
/// stopping at the first failed round.
pub struct ProtocolOrchestrator<'a, P: RandomSource, V: RandomSource> {
    prover: &'a mut ProverState<P>,
    verifier: &'a mut Verifier<V>,
    state: ProtocolState,
    record_transcript: bool,
}

impl<'a, P: RandomSource, V: RandomSource> ProtocolOrchestrator<'a, P, V> {
    pub fn new(prover: &'a mut ProverState<P>, verifier: &'a mut Verifier<V>) -> Self {
        ProtocolOrchestrator {
            prover,
            verifier,
            state: ProtocolState::Idle,
            record_transcript: false,
        }
    }

    pub fn record_transcript(mut self, enabled: bool) -> Self {
        self.record_transcript = enabled;
        self
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn run(&mut self) -> Result<ProtocolOutcome> {
        self.run_observed(&mut NoopObserver)
    }

    pub fn run_observed<O: RoundObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<ProtocolOutcome> {
        if self.state != ProtocolState::Idle {
            return Err(ProtocolError::InvalidState("protocol run already finished"));
        }
        if self.prover.graph() != self.verifier.graph() {
            return Err(ProtocolError::InvalidParameter(
                "prover and verifier hold different graphs".to_string(),
            ));
        }
        let rounds = self.verifier.rounds();
        if rounds == 0 {
            return Err(ProtocolError::InvalidParameter(
                "round count must be at least 1".to_string(),
            ));
        }

        let edge_count = self.verifier.graph().edge_count();
        let mut transcript = self.record_transcript.then(ProtocolTranscript::default);

        for round in 0..rounds {
            self.state = ProtocolState::RoundInProgress { round };
            let (passed, record) = self.run_round(round)?;
            if let (Some(transcript), Some(record)) = (transcript.as_mut(), record) {
                transcript.rounds.push(record);
            }
            observer.on_round(round, passed);

            if !passed {
                self.state = ProtocolState::Rejected { round };
                info!(round, rounds, "proof rejected");
                observer.on_finish(false);
                return Ok(ProtocolOutcome::reject(round, edge_count, transcript));
            }
        }

        self.state = ProtocolState::Accepted;
        info!(rounds, edge_count, "proof accepted");
        observer.on_finish(true);
        Ok(ProtocolOutcome::accept(rounds, edge_count, transcript))
    }

    fn run_round(&mut self, round: u32) -> Result<(bool, Option<TranscriptRound>)> {
        let commitment = self.prover.commit()?;
        let recorded = self.record_transcript.then(|| commitment.clone());
        self.verifier.receive_commitment(commitment);

        let edge = self.verifier.choose_edge()?;
        let reveal = self.prover.reveal(&edge)?;
        let passed = self.verifier.check_reveal(&reveal)?;
        trace!(round, %edge, passed, "round finished");

        let record = recorded.map(|commitment| TranscriptRound {
            commitment,
            edge,
            reveal,
        });
        Ok((passed, record))
    }
}

/// Runs a full protocol and returns only the verdict.
pub fn execute_protocol<P: RandomSource, V: RandomSource>(
    prover: &mut ProverState<P>,
    verifier: &mut Verifier<V>,
) -> Result<bool> {
    Ok(ProtocolOrchestrator::new(prover, verifier).run()?.accepted)
}

/// Runs the rounds across the rayon pool. Each worker holds its own prover and
/// verifier over system randomness, and the outcome is the first failing round
/// by index. Transcripts are not recorded in this mode.
pub fn execute_parallel<O: RoundObserver + ?Sized>(
    graph: &Graph,
    coloring: &Coloring,
    configuration: &VerifierConfig,
    scheme: CommitmentScheme,
    observer: &mut O,
) -> Result<ProtocolOutcome> {
    let rounds = configuration.rounds;
    if rounds == 0 {
        return Err(ProtocolError::InvalidParameter(
            "round count must be at least 1".to_string(),
        ));
    }
    if graph.edge_count() == 0 {
        return Err(ProtocolError::EmptyEdgeSet);
    }
    coloring.ensure_covers(graph)?;
    let edge_count = graph.edge_count();

    let first_failure = (0..rounds)
        .into_par_iter()
        .map_init(
            || -> Result<_> {
                let prover =
                    ProverState::with_system_randomness(graph.clone(), coloring.clone(), scheme)?;
                let verifier =
                    Verifier::with_system_randomness(graph.clone(), configuration.clone(), scheme);
                Ok((prover, verifier))
            },
            |parties: &mut Result<_>, round| {
                let outcome = match parties {
                    Ok((prover, verifier)) => single_round(prover, verifier),
                    Err(err) => Err(ProtocolError::InvalidParameter(err.to_string())),
                };
                (round, outcome)
            },
        )
        .find_first(|(_, outcome)| !matches!(outcome, Ok(true)));

    let outcome = match first_failure {
        None => ProtocolOutcome::accept(rounds, edge_count, None),
        Some((_, Err(err))) => return Err(err),
        Some((round, Ok(_))) => ProtocolOutcome::reject(round, edge_count, None),
    };

    for round in 0..outcome.rounds_run {
        observer.on_round(round, outcome.failed_round != Some(round));
    }
    observer.on_finish(outcome.accepted);
    match outcome.failed_round {
        Some(round) => info!(round, rounds, "proof rejected (parallel)"),
        None => info!(rounds, edge_count, "proof accepted (parallel)"),
    }
    Ok(outcome)
}

fn single_round(prover: &mut ProverState, verifier: &mut Verifier) -> Result<bool> {
    let commitment = prover.commit()?;
    verifier.receive_commitment(commitment);
    let edge = verifier.choose_edge()?;
    let reveal = prover.reveal(&edge)?;
    let passed = verifier.check_reveal(&reveal)?;
    debug!(%edge, passed, "parallel round finished");
    Ok(passed)
}
