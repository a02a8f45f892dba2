//! Randomness sources injected into the prover and the verifier.
//!
//! Two capabilities are kept apart: ordinary uniform sampling (color
//! permutations, edge challenges) and secure bytes (commitment salts). Salts
//! are the only thing hiding a color drawn from a three-element space, so
//! production salts always come from the operating system.

use crate::error::{ProtocolError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng, TryRngCore};

pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn uniform_below(&mut self, bound: usize) -> usize;

    /// Fills `buf` with bytes suitable for commitment salts.
    fn secure_bytes(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_below(&mut self, bound: usize) -> usize {
        (**self).uniform_below(bound)
    }

    fn secure_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).secure_bytes(buf)
    }
}

/// Thread-local CSPRNG for sampling, OS entropy for salts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandomness;

impl RandomSource for SystemRandomness {
    fn uniform_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "uniform_below requires a non-zero bound");
        rand::rng().random_range(0..bound)
    }

    fn secure_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| ProtocolError::Randomness(err.to_string()))
    }
}

/// Deterministic source for tests and reproducible demos. Salts drawn from it
/// are predictable to anyone who knows the seed.
#[derive(Debug, Clone)]
pub struct SeededRandomness {
    rng: StdRng,
}

impl SeededRandomness {
    pub fn new(seed: u64) -> Self {
        SeededRandomness {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandomness {
    fn uniform_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "uniform_below requires a non-zero bound");
        self.rng.random_range(0..bound)
    }

    fn secure_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}
