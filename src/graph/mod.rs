pub mod coloring;
pub mod graph;

pub use coloring::{Color, Coloring};
pub use graph::{Edge, Graph, NodeId};
