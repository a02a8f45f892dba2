pub mod commitment;
pub mod hash;
pub mod randomness;

pub use commitment::{CommitmentScheme, Salt, SALT_LEN};
pub use hash::{Blake3CommitmentHash, CommitmentHash, Digest, HashAlgorithm, Sha3CommitmentHash};
pub use randomness::{RandomSource, SeededRandomness, SystemRandomness};
