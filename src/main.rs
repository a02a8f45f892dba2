use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use zkp_three_coloring::crypto::hash::HashAlgorithm;
use zkp_three_coloring::protocol::confidence::{confidence, required_rounds, soundness_bound};
use zkp_three_coloring::protocol::orchestrator::{execute_parallel, ProtocolOrchestrator, ProtocolOutcome};
use zkp_three_coloring::protocol::{NoopObserver, ProgressObserver, RoundObserver};
use zkp_three_coloring::protocol::prover::ProverState;
use zkp_three_coloring::protocol::verifier::{Verifier, VerifierConfig};
use zkp_three_coloring::utils::random_graph::{make_invalid_coloring, random_instance};
use zkp_three_coloring::utils::serialization::{
    load_graph_instance, load_transcript, save_graph_instance, save_transcript, GraphInstance,
};
use zkp_three_coloring::{Coloring, Graph, ProtocolConfig};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Interactive zero-knowledge proof of a graph 3-coloring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random 3-colorable graph with its coloring and write it to disk
    Generate {
        #[arg(long, default_value_t = 30)]
        nodes: u32,
        /// Edge count (clamped to [n-1, n(n-1)/2]); random when omitted
        #[arg(long)]
        edges: Option<usize>,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Run the interactive protocol between a local prover and verifier
    Run {
        #[arg(short, long, value_name = "FILE")]
        instance: PathBuf,
        /// TOML protocol configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        confidence: Option<f64>,
        #[arg(long, help = "Commitment hash (blake3 or sha3)")]
        hash: Option<HashAlgorithm>,
        #[arg(long, help = "Spread rounds across worker threads")]
        parallel: bool,
        #[arg(long)]
        no_progress: bool,
        /// Record the exchanged messages to this file
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,
        #[arg(long, help = "Print a JSON summary instead of text")]
        json: bool,
    },
    /// Re-check the openings of a recorded transcript
    Replay {
        #[arg(short, long, value_name = "FILE")]
        instance: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        transcript: PathBuf,
        #[arg(long)]
        hash: Option<HashAlgorithm>,
    },
    /// Show the rounds needed for a confidence target
    Rounds {
        #[arg(long)]
        edges: usize,
        #[arg(long, default_value_t = zkp_three_coloring::config::DEFAULT_TARGET_CONFIDENCE)]
        confidence: f64,
    },
    /// Run repeated trials with valid and deliberately broken colorings
    Trials {
        #[arg(long, default_value_t = 100)]
        trials: u32,
        #[arg(long, default_value_t = 60)]
        nodes: u32,
        #[arg(long, default_value_t = 0.9)]
        confidence: f64,
    },
}

#[derive(Serialize)]
struct RunSummary {
    accepted: bool,
    rounds_run: u32,
    failed_round: Option<u32>,
    nodes: usize,
    edges: usize,
    confidence: Option<f64>,
    elapsed_ms: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            nodes,
            edges,
            output,
        } => run_generate(nodes, edges, output)?,
        Commands::Run {
            instance,
            config,
            rounds,
            confidence,
            hash,
            parallel,
            no_progress,
            transcript,
            json,
        } => {
            let mut settings = match config {
                Some(path) => ProtocolConfig::load(path)?,
                None => ProtocolConfig::default(),
            };
            if rounds.is_some() {
                settings.rounds = rounds;
            }
            if let Some(target) = confidence {
                settings.target_confidence = target;
                if rounds.is_none() {
                    settings.rounds = None;
                }
            }
            if let Some(hash) = hash {
                settings.hash = hash;
            }
            settings.parallel |= parallel;
            settings.show_progress &= !no_progress && !json;
            settings.record_transcript |= transcript.is_some();
            run_protocol(instance, &settings, transcript, json)?
        }
        Commands::Replay {
            instance,
            transcript,
            hash,
        } => run_replay(instance, transcript, hash.unwrap_or_default())?,
        Commands::Rounds { edges, confidence } => run_rounds(edges, confidence)?,
        Commands::Trials {
            trials,
            nodes,
            confidence,
        } => run_trials(trials, nodes, confidence)?,
    }
    Ok(())
}

fn run_generate(nodes: u32, edges: Option<usize>, output: PathBuf) -> CliResult<()> {
    println!("Generating 3-colorable graph...");
    let (graph, coloring, params) = random_instance(nodes, edges)?;
    println!(
        "  n = {}, edges = {} (requested {}), color classes = {:?}",
        params.nodes, params.edges, params.requested_edges, params.group_sizes
    );
    let instance = GraphInstance::with_metadata(graph, coloring, params);
    save_graph_instance(&output, &instance)?;
    println!("Instance saved to {}", output.display());
    Ok(())
}

fn run_protocol(
    instance_path: PathBuf,
    settings: &ProtocolConfig,
    transcript_path: Option<PathBuf>,
    json: bool,
) -> CliResult<()> {
    let instance = load_graph_instance(&instance_path)?;
    let verifier_cfg = settings.verifier_config(instance.graph.edge_count())?;
    if !json {
        println!(
            "Running {} rounds over {} nodes / {} edges",
            verifier_cfg.rounds,
            instance.graph.node_count(),
            instance.graph.edge_count()
        );
    }

    let mut observer: Box<dyn RoundObserver> = if settings.show_progress {
        Box::new(ProgressObserver::new(verifier_cfg.rounds))
    } else {
        Box::new(NoopObserver)
    };

    let start = Instant::now();
    let outcome = if settings.parallel {
        if transcript_path.is_some() {
            return Err("transcripts are not recorded in parallel mode".into());
        }
        execute_parallel(
            &instance.graph,
            &instance.coloring,
            &verifier_cfg,
            settings.scheme(),
            observer.as_mut(),
        )?
    } else {
        let mut prover = ProverState::with_system_randomness(
            instance.graph.clone(),
            instance.coloring.clone(),
            settings.scheme(),
        )?;
        let mut verifier =
            Verifier::with_system_randomness(instance.graph.clone(), verifier_cfg, settings.scheme());
        ProtocolOrchestrator::new(&mut prover, &mut verifier)
            .record_transcript(settings.record_transcript)
            .run_observed(observer.as_mut())?
    };
    let elapsed = start.elapsed();

    if let (Some(path), Some(transcript)) = (transcript_path.as_ref(), outcome.transcript.as_ref()) {
        save_transcript(path, transcript)?;
        if !json {
            println!("Transcript with {} rounds saved to {}", transcript.rounds.len(), path.display());
        }
    }

    if json {
        let summary = RunSummary {
            accepted: outcome.accepted,
            rounds_run: outcome.rounds_run,
            failed_round: outcome.failed_round,
            nodes: instance.graph.node_count(),
            edges: outcome.edge_count,
            confidence: outcome.confidence(),
            elapsed_ms: duration_ms(elapsed),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_outcome(&outcome, elapsed);
    }
    Ok(())
}

fn print_outcome(outcome: &ProtocolOutcome, elapsed: Duration) {
    match outcome.confidence() {
        Some(value) => println!(
            "Proof is accepted with {:.6}% confidence ({:.2} ms).",
            value * 100.0,
            duration_ms(elapsed)
        ),
        None => println!(
            "Proof rejected in round {}, possible cheating or message corruption.",
            outcome.failed_round.map(|round| round + 1).unwrap_or(outcome.rounds_run)
        ),
    }
}

fn run_replay(instance_path: PathBuf, transcript_path: PathBuf, hash: HashAlgorithm) -> CliResult<()> {
    let instance = load_graph_instance(&instance_path)?;
    let transcript = load_transcript(&transcript_path)?;
    let rounds = u32::try_from(transcript.rounds.len())?;
    let verifier = Verifier::with_system_randomness(
        instance.graph,
        VerifierConfig { rounds },
        zkp_three_coloring::CommitmentScheme::new(hash),
    );
    if !verifier.replay(&transcript) {
        return Err(format!("transcript {} failed verification", transcript_path.display()).into());
    }
    println!(
        "Transcript with {} rounds is consistent with {}",
        rounds,
        instance_path.display()
    );
    Ok(())
}

fn run_rounds(edges: usize, target: f64) -> CliResult<()> {
    let rounds = required_rounds(edges, target)?;
    println!("Edges            : {edges}");
    println!("Target confidence: {target}");
    println!("Required rounds  : {rounds}");
    println!("Confidence       : {:.6}%", confidence(rounds, edges) * 100.0);
    println!(
        "Cheating bound   : {:.3e} (exact (1 - 1/E)^R)",
        soundness_bound(rounds, edges)
    );
    Ok(())
}

fn run_trials(trials: u32, nodes: u32, target: f64) -> CliResult<()> {
    if trials == 0 {
        return Err("trials must be greater than zero".into());
    }
    println!("Running {trials} trials for 3-colorable graphs with {nodes} nodes");

    let mut rng = rand::rng();
    let mut valid_passes = 0u32;
    let mut invalid_passes = 0u32;
    for _ in 0..trials {
        let (graph, coloring, _) = random_instance(nodes, None)?;
        if run_trial(&graph, &coloring, target)? {
            valid_passes += 1;
        }

        let (graph, coloring, _) = random_instance(nodes, None)?;
        let broken = make_invalid_coloring(&graph, &coloring, &mut rng);
        if run_trial(&graph, &broken, target)? {
            invalid_passes += 1;
        }
    }

    print_trial_block("VALID COLORING", valid_passes, trials);
    print_trial_block("INVALID COLORING", invalid_passes, trials);
    Ok(())
}

fn run_trial(graph: &Graph, coloring: &Coloring, target: f64) -> CliResult<bool> {
    let scheme = zkp_three_coloring::CommitmentScheme::default();
    let verifier_cfg = VerifierConfig::for_confidence(graph.edge_count(), target)?;
    let mut prover = ProverState::with_system_randomness(graph.clone(), coloring.clone(), scheme)?;
    let mut verifier = Verifier::with_system_randomness(graph.clone(), verifier_cfg, scheme);
    let outcome = ProtocolOrchestrator::new(&mut prover, &mut verifier).run()?;
    Ok(outcome.accepted)
}

fn print_trial_block(label: &str, passes: u32, trials: u32) {
    println!();
    println!("[{label}]");
    println!("Protocol accepted {passes} out of {trials} trials");
    println!("Acceptance rate: {:.2}%", passes as f64 / trials as f64 * 100.0);
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
