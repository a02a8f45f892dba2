use zkp_three_coloring::crypto::commitment::CommitmentScheme;
use zkp_three_coloring::crypto::randomness::SeededRandomness;
use zkp_three_coloring::graph::{Coloring, Edge, Graph};
use zkp_three_coloring::protocol::orchestrator::{
    execute_parallel, execute_protocol, ProtocolOrchestrator, ProtocolState,
};
use zkp_three_coloring::protocol::prover::ProverState;
use zkp_three_coloring::protocol::verifier::{Verifier, VerifierConfig};
use zkp_three_coloring::protocol::NoopObserver;
use zkp_three_coloring::utils::random_graph::{generate_three_colorable, random_instance};
use zkp_three_coloring::{HashAlgorithm, ProtocolError};

fn triangle() -> Graph {
    Graph::with_node_count(3, [(0, 1), (1, 2), (0, 2)]).expect("triangle graph")
}

fn parties(
    graph: &Graph,
    coloring: &Coloring,
    rounds: u32,
    seed: u64,
) -> (ProverState<SeededRandomness>, Verifier<SeededRandomness>) {
    let scheme = CommitmentScheme::default();
    let prover = ProverState::new(
        graph.clone(),
        coloring.clone(),
        scheme,
        SeededRandomness::new(seed),
    )
    .expect("prover");
    let verifier = Verifier::new(
        graph.clone(),
        VerifierConfig::new(rounds).expect("rounds"),
        scheme,
        SeededRandomness::new(seed ^ 0x5eed_0f_7e57),
    );
    (prover, verifier)
}

#[test]
fn valid_triangle_coloring_is_always_accepted() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    for seed in 0..50 {
        let (mut prover, mut verifier) = parties(&graph, &coloring, 20, seed);
        let outcome = ProtocolOrchestrator::new(&mut prover, &mut verifier)
            .run()
            .expect("protocol run");
        assert!(outcome.accepted, "valid coloring rejected with seed {seed}");
        assert_eq!(outcome.rounds_run, 20);
        assert!(outcome.failed_round.is_none());
    }
}

#[test]
fn random_valid_instances_are_accepted_with_system_randomness() {
    for nodes in [3u32, 10, 25] {
        let (graph, coloring, _) = random_instance(nodes, None).expect("instance");
        let scheme = CommitmentScheme::new(HashAlgorithm::Sha3);
        let mut prover =
            ProverState::with_system_randomness(graph.clone(), coloring, scheme).expect("prover");
        let config = VerifierConfig::for_confidence(graph.edge_count(), 0.99).expect("config");
        let mut verifier = Verifier::with_system_randomness(graph, config, scheme);
        assert!(execute_protocol(&mut prover, &mut verifier).expect("protocol run"));
    }
}

#[test]
fn orchestrator_walks_through_states_and_stops_on_rejection() {
    let graph = Graph::with_node_count(2, [(0, 1)]).expect("single edge");
    let coloring = Coloring::from_values([(0, 2), (1, 2)]).expect("coloring");
    let (mut prover, mut verifier) = parties(&graph, &coloring, 5, 1);

    let mut seen = Vec::new();
    let mut orchestrator = ProtocolOrchestrator::new(&mut prover, &mut verifier);
    assert_eq!(orchestrator.state(), ProtocolState::Idle);

    let mut observer = |round: u32, passed: bool| seen.push((round, passed));
    let outcome = orchestrator.run_observed(&mut observer).expect("protocol run");

    assert!(!outcome.accepted);
    assert_eq!(outcome.failed_round, Some(0));
    assert_eq!(outcome.rounds_run, 1);
    assert!(outcome.confidence().is_none());
    assert_eq!(orchestrator.state(), ProtocolState::Rejected { round: 0 });
    assert!(orchestrator.state().is_terminal());
    assert!(matches!(
        orchestrator.run(),
        Err(ProtocolError::InvalidState(_))
    ));
    assert_eq!(seen, vec![(0, false)]);
}

#[test]
fn accepted_outcome_reports_heuristic_confidence() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 1), (1, 2), (2, 0)]).expect("coloring");
    let (mut prover, mut verifier) = parties(&graph, &coloring, 3, 9);
    let outcome = ProtocolOrchestrator::new(&mut prover, &mut verifier)
        .run()
        .expect("protocol run");
    let expected = 1.0 - (-1.0f64).exp();
    let confidence = outcome.confidence().expect("accepted run has a confidence");
    assert!((confidence - expected).abs() < 1e-12);
}

#[test]
fn prover_requires_a_color_for_every_node() {
    let graph = triangle();
    let partial = Coloring::from_values([(0, 0), (1, 1)]).expect("coloring");
    let result = ProverState::new(
        graph,
        partial,
        CommitmentScheme::default(),
        SeededRandomness::new(0),
    );
    assert!(matches!(result, Err(ProtocolError::MissingColor(2))));
}

#[test]
fn reveal_before_commit_and_unknown_edges_are_usage_errors() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let (mut prover, _) = parties(&graph, &coloring, 1, 4);

    assert!(matches!(
        prover.reveal(&Edge::new(0, 1)),
        Err(ProtocolError::InvalidState(_))
    ));

    prover.commit().expect("commit");
    assert!(matches!(
        prover.reveal(&Edge::new(0, 3)),
        Err(ProtocolError::InvalidEdge(0, 3))
    ));
    prover.reveal(&Edge::new(1, 0)).expect("edge in either orientation");
    assert!(matches!(
        prover.reveal(&Edge::new(0, 1)),
        Err(ProtocolError::InvalidState(_))
    ));
}

#[test]
fn verifier_enforces_commit_before_challenge() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let (mut prover, mut verifier) = parties(&graph, &coloring, 1, 6);

    assert!(matches!(
        verifier.choose_edge(),
        Err(ProtocolError::InvalidState(_))
    ));

    let commitment = prover.commit().expect("commit");
    verifier.receive_commitment(commitment);
    let reveal_too_early = verifier.check_reveal(&prover_reveal_any(&mut prover));
    assert!(matches!(reveal_too_early, Err(ProtocolError::InvalidState(_))));

    let edge = verifier.choose_edge().expect("challenge");
    assert!(matches!(
        verifier.choose_edge(),
        Err(ProtocolError::InvalidState(_))
    ));
    assert!(graph.contains_edge(&edge));
}

fn prover_reveal_any(prover: &mut ProverState<SeededRandomness>) -> zkp_three_coloring::Reveal {
    prover.reveal(&Edge::new(0, 1)).expect("reveal after commit")
}

#[test]
fn empty_edge_set_cannot_be_challenged() {
    let graph = Graph::with_node_count(3, Vec::new()).expect("edgeless graph");
    let coloring = Coloring::from_values([(0, 0), (1, 0), (2, 0)]).expect("coloring");
    let (mut prover, mut verifier) = parties(&graph, &coloring, 2, 2);
    verifier.receive_commitment(prover.commit().expect("commit"));
    assert!(matches!(verifier.choose_edge(), Err(ProtocolError::EmptyEdgeSet)));

    let run = ProtocolOrchestrator::new(&mut prover, &mut verifier).run();
    assert!(matches!(run, Err(ProtocolError::EmptyEdgeSet)));
}

#[test]
fn verify_rejects_openings_that_do_not_match() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let (mut prover, verifier) = parties(&graph, &coloring, 1, 12);
    let edge = Edge::new(0, 2);

    let commitment = prover.commit().expect("commit");
    let reveal = prover.reveal(&edge).expect("reveal");
    assert!(verifier.verify(&edge, &commitment, &reveal));

    let mut swapped = reveal;
    std::mem::swap(&mut swapped.u, &mut swapped.v);
    assert!(!verifier.verify(&edge, &commitment, &swapped));

    let mut forged_color = reveal;
    forged_color.u.color = forged_color.v.color;
    assert!(!verifier.verify(&edge, &commitment, &forged_color));

    let mut forged_salt = reveal;
    forged_salt.v.salt.0[0] ^= 0xff;
    assert!(!verifier.verify(&edge, &commitment, &forged_salt));

    let mut partial = commitment.clone();
    partial.digests.remove(&1);
    assert!(!verifier.verify(&edge, &partial, &reveal));

    assert!(!verifier.verify(&Edge::new(0, 5), &commitment, &reveal));
}

#[test]
fn rounds_are_unlinkable() {
    let (graph, coloring, _) =
        generate_three_colorable(12, Some(30), &mut rand::rng()).expect("instance");
    let (mut prover, _) = parties(&graph, &coloring, 1, 21);

    let first = prover.commit().expect("first commit");
    let edge = graph.edges()[0];
    let first_reveal = prover.reveal(&edge).expect("first reveal");
    let second = prover.commit().expect("second commit");
    let second_reveal = prover.reveal(&edge).expect("second reveal");

    for node in graph.nodes() {
        assert_ne!(first.digest(node), second.digest(node));
    }
    assert_ne!(first_reveal.u.salt, second_reveal.u.salt);
    assert_ne!(first_reveal.v.salt, second_reveal.v.salt);
}

#[test]
fn new_commit_discards_unopened_round() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let (mut prover, verifier) = parties(&graph, &coloring, 1, 30);
    let edge = Edge::new(1, 2);

    let stale = prover.commit().expect("first commit");
    let fresh = prover.commit().expect("second commit");
    let reveal = prover.reveal(&edge).expect("reveal");

    assert!(verifier.verify(&edge, &fresh, &reveal));
    assert!(!verifier.verify(&edge, &stale, &reveal));
}

#[test]
fn mismatched_hash_backends_reject() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let mut prover = ProverState::new(
        graph.clone(),
        coloring,
        CommitmentScheme::new(HashAlgorithm::Blake3),
        SeededRandomness::new(1),
    )
    .expect("prover");
    let mut verifier = Verifier::new(
        graph,
        VerifierConfig::new(4).expect("rounds"),
        CommitmentScheme::new(HashAlgorithm::Sha3),
        SeededRandomness::new(2),
    );
    assert!(!execute_protocol(&mut prover, &mut verifier).expect("protocol run"));
}

#[test]
fn transcript_replays_and_detects_edits() {
    let graph = triangle();
    let coloring = Coloring::from_values([(0, 2), (1, 0), (2, 1)]).expect("coloring");
    let (mut prover, mut verifier) = parties(&graph, &coloring, 6, 40);
    let outcome = ProtocolOrchestrator::new(&mut prover, &mut verifier)
        .record_transcript(true)
        .run()
        .expect("protocol run");
    let transcript = outcome.transcript.expect("transcript recorded");
    assert_eq!(transcript.rounds.len(), 6);
    assert!(verifier.replay(&transcript));

    let mut edited = transcript.clone();
    edited.rounds[3].reveal.v.color = edited.rounds[3].reveal.u.color;
    assert!(!verifier.replay(&edited));

    assert!(!verifier.replay(&Default::default()));
}

#[test]
fn parallel_mode_accepts_valid_and_reports_first_failure() {
    let graph = triangle();
    let valid = Coloring::from_values([(0, 0), (1, 1), (2, 2)]).expect("coloring");
    let config = VerifierConfig::new(64).expect("rounds");
    let outcome = execute_parallel(
        &graph,
        &valid,
        &config,
        CommitmentScheme::default(),
        &mut NoopObserver,
    )
    .expect("parallel run");
    assert!(outcome.accepted);
    assert_eq!(outcome.rounds_run, 64);

    // Every edge of a monochromatic triangle is caught, so round 0 fails.
    let monochrome = Coloring::from_values([(0, 1), (1, 1), (2, 1)]).expect("coloring");
    let mut seen = Vec::new();
    let mut observer = |round: u32, passed: bool| seen.push((round, passed));
    let outcome = execute_parallel(
        &graph,
        &monochrome,
        &config,
        CommitmentScheme::default(),
        &mut observer,
    )
    .expect("parallel run");
    assert!(!outcome.accepted);
    assert_eq!(outcome.failed_round, Some(0));
    assert_eq!(seen, vec![(0, false)]);
}

#[test]
fn graph_rejects_self_loops_and_unknown_nodes() {
    assert!(matches!(
        Graph::with_node_count(3, [(1, 1)]),
        Err(ProtocolError::InvalidGraph(_))
    ));
    assert!(matches!(
        Graph::with_node_count(3, [(0, 3)]),
        Err(ProtocolError::InvalidGraph(_))
    ));
    let graph = Graph::with_node_count(3, [(0, 1), (1, 0), (2, 1)]).expect("graph");
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.contains_edge(&Edge { u: 1, v: 0 }));
}
