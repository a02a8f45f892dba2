//! Error types for the three-coloring protocol.
//!
//! Only contract violations live here. A round that fails verification is a
//! normal protocol outcome and is reported as `false`, never as an error.

use crate::graph::NodeId;
use thiserror::Error;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Usage errors raised by the protocol parties and their collaborators
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Graph violates its structural invariants
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Coloring has no entry for a node of the graph
    #[error("coloring has no entry for node {0}")]
    MissingColor(NodeId),

    /// Color value outside {0, 1, 2}
    #[error("color value {0} is outside {{0, 1, 2}}")]
    InvalidColor(u8),

    /// An edge had to be selected from an empty edge set
    #[error("graph has no edges to challenge")]
    EmptyEdgeSet,

    /// Operation called out of protocol order
    #[error("invalid protocol state: {0}")]
    InvalidState(&'static str),

    /// Edge argument is not part of the graph
    #[error("edge ({0}, {1}) is not part of the graph")]
    InvalidEdge(NodeId, NodeId),

    /// Parameter outside its accepted domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The operating system refused to hand out entropy
    #[error("secure randomness unavailable: {0}")]
    Randomness(String),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
