//! Salted hash commitments to a single color.
//!
//! `digest = H(domain || color || salt)`. Binding follows from collision
//! resistance of `H`; hiding rests entirely on the salt, since the committed
//! value has only three possible values.

use crate::crypto::hash::{Digest, HashAlgorithm};
use crate::crypto::randomness::RandomSource;
use crate::error::Result;
use crate::graph::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SALT_LEN: usize = 32;

const COMMIT_DOMAIN: &[u8] = b"zkp-three-coloring/commit/v1";

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt(pub [u8; SALT_LEN]);

impl Salt {
    pub fn random(rng: &mut impl RandomSource) -> Result<Self> {
        let mut bytes = [0u8; SALT_LEN];
        rng.secure_bytes(&mut bytes)?;
        Ok(Salt(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({}..)", hex::encode(&self.0[..4]))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentScheme {
    algorithm: HashAlgorithm,
}

impl CommitmentScheme {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        CommitmentScheme { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn commit(&self, color: Color, salt: &Salt) -> Digest {
        self.algorithm
            .hasher()
            .hash_parts(&[COMMIT_DOMAIN, &[color.to_u8()], salt.as_bytes()])
    }

    /// Recomputes the digest of `(color, salt)` and compares it with `digest`.
    pub fn verify(&self, color: Color, salt: &Salt, digest: &Digest) -> bool {
        &self.commit(color, salt) == digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::randomness::SeededRandomness;

    #[test]
    fn opening_with_committed_values_verifies() {
        let mut rng = SeededRandomness::new(7);
        let scheme = CommitmentScheme::default();
        let salt = Salt::random(&mut rng).expect("seeded salt");
        let digest = scheme.commit(Color::Green, &salt);
        assert!(scheme.verify(Color::Green, &salt, &digest));
    }

    #[test]
    fn opening_to_another_color_or_salt_fails() {
        let mut rng = SeededRandomness::new(11);
        let scheme = CommitmentScheme::default();
        let salt = Salt::random(&mut rng).expect("seeded salt");
        let other_salt = Salt::random(&mut rng).expect("seeded salt");
        let digest = scheme.commit(Color::Red, &salt);

        for color in Color::ALL {
            for candidate in [&salt, &other_salt] {
                let expected = color == Color::Red && candidate == &salt;
                assert_eq!(scheme.verify(color, candidate, &digest), expected);
            }
        }
    }

    #[test]
    fn backends_produce_different_digests() {
        let salt = Salt([9u8; SALT_LEN]);
        let blake = CommitmentScheme::new(HashAlgorithm::Blake3).commit(Color::Yellow, &salt);
        let sha3 = CommitmentScheme::new(HashAlgorithm::Sha3).commit(Color::Yellow, &salt);
        assert_ne!(blake, sha3);
        assert!(!CommitmentScheme::new(HashAlgorithm::Sha3).verify(Color::Yellow, &salt, &blake));
    }
}
