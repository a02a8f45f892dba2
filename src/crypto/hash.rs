use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Sha3_512};

pub type Digest = [u8; 32];

pub trait CommitmentHash: Send + Sync {
    fn hash(&self, data: &[u8]) -> Digest;

    /// Hashes the concatenation of `parts`.
    fn hash_parts(&self, parts: &[&[u8]]) -> Digest {
        let mut buf = Vec::with_capacity(parts.iter().map(|part| part.len()).sum());
        for part in parts {
            buf.extend_from_slice(part);
        }
        self.hash(&buf)
    }
}

#[derive(Clone, Copy, Default)]
pub struct Blake3CommitmentHash;

impl CommitmentHash for Blake3CommitmentHash {
    fn hash(&self, data: &[u8]) -> Digest {
        blake3::hash(data).into()
    }

    fn hash_parts(&self, parts: &[&[u8]]) -> Digest {
        let mut hasher = Blake3Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// SHA3-512 truncated to 32 bytes.
#[derive(Clone, Copy, Default)]
pub struct Sha3CommitmentHash;

impl CommitmentHash for Sha3CommitmentHash {
    fn hash(&self, data: &[u8]) -> Digest {
        self.hash_parts(&[data])
    }

    fn hash_parts(&self, parts: &[&[u8]]) -> Digest {
        let mut hasher = Sha3_512::new();
        for part in parts {
            hasher.update(part);
        }
        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result[..32]);
        digest
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Blake3,
    Sha3,
}

impl HashAlgorithm {
    pub fn hasher(self) -> &'static dyn CommitmentHash {
        match self {
            HashAlgorithm::Blake3 => &Blake3CommitmentHash,
            HashAlgorithm::Sha3 => &Sha3CommitmentHash,
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "blake3" => Ok(HashAlgorithm::Blake3),
            "sha3" | "sha3-512" => Ok(HashAlgorithm::Sha3),
            other => Err(format!("unknown hash algorithm '{other}'")),
        }
    }
}
