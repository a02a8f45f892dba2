pub mod permutation;
pub mod random_graph;
pub mod serialization;

pub use permutation::ColorPermutation;
