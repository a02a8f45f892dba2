use crate::graph::{Coloring, Graph};
use crate::protocol::messages::ProtocolTranscript;
use crate::utils::random_graph::InstanceParameters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Graph plus the prover's coloring. The coloring is prover-side material and
/// should not be handed to a verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInstance {
    pub graph: Graph,
    pub coloring: Coloring,
    pub metadata: Option<InstanceParameters>,
}

impl GraphInstance {
    pub fn new(graph: Graph, coloring: Coloring) -> Self {
        GraphInstance {
            graph,
            coloring,
            metadata: None,
        }
    }

    pub fn with_metadata(graph: Graph, coloring: Coloring, metadata: InstanceParameters) -> Self {
        GraphInstance {
            graph,
            coloring,
            metadata: Some(metadata),
        }
    }
}

pub fn save_graph_instance<P: AsRef<Path>>(path: P, instance: &GraphInstance) -> io::Result<()> {
    let bytes = bincode::serialize(instance)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("serialize graph: {err}")))?;
    fs::write(path, bytes)
}

pub fn load_graph_instance<P: AsRef<Path>>(path: P) -> io::Result<GraphInstance> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, format!("deserialize graph: {err}")))
}

pub fn save_transcript<P: AsRef<Path>>(path: P, transcript: &ProtocolTranscript) -> io::Result<()> {
    let bytes = bincode::serialize(transcript).map_err(|err| {
        io::Error::new(io::ErrorKind::Other, format!("serialize transcript: {err}"))
    })?;
    let mut file = fs::File::create(path)?;
    file.write_all(&bytes)
}

pub fn load_transcript<P: AsRef<Path>>(path: P) -> io::Result<ProtocolTranscript> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes).map_err(|err| {
        io::Error::new(io::ErrorKind::InvalidData, format!("deserialize transcript: {err}"))
    })
}
