use crate::crypto::commitment::CommitmentScheme;
use crate::crypto::hash::HashAlgorithm;
use crate::error::{ProtocolError, Result};
use crate::protocol::verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_TARGET_CONFIDENCE: f64 = 0.999_998;

/// Run-wide settings, loadable from TOML. Missing keys take their defaults.
///
/// ```toml
/// target_confidence = 0.9999
/// hash = "sha3"
/// parallel = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub target_confidence: f64,
    /// Explicit round count, taking precedence over `target_confidence`.
    pub rounds: Option<u32>,
    pub hash: HashAlgorithm,
    pub parallel: bool,
    pub show_progress: bool,
    pub record_transcript: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            target_confidence: DEFAULT_TARGET_CONFIDENCE,
            rounds: None,
            hash: HashAlgorithm::default(),
            parallel: false,
            show_progress: true,
            record_transcript: false,
        }
    }
}

impl ProtocolConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| ProtocolError::Config(err.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn scheme(&self) -> CommitmentScheme {
        CommitmentScheme::new(self.hash)
    }

    pub fn verifier_config(&self, edge_count: usize) -> Result<VerifierConfig> {
        match self.rounds {
            Some(rounds) => VerifierConfig::new(rounds),
            None => VerifierConfig::for_confidence(edge_count, self.target_confidence),
        }
    }

    pub fn resolve_rounds(&self, edge_count: usize) -> Result<u32> {
        Ok(self.verifier_config(edge_count)?.rounds)
    }
}
