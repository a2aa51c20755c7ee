// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroize;

pub trait EntropySource: Send + Sync {
    fn get_bytes(&self, buf: &mut [u8]) -> Result<()>;
}

struct OsEntropy;

impl EntropySource for OsEntropy {
    fn get_bytes(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::getrandom(buf)
            .map_err(|e| CryptoError::IllegalState(format!("OS entropy unavailable: {}", e)))
    }
}

/// Default random source handed to engines when the caller supplies none.
///
/// A ChaCha20 stream seeded once from the operating system; the seed is wiped
/// right after the generator is keyed.
pub struct SecureRandom {
    csprng: ChaCha20Rng,
}

impl SecureRandom {
    pub fn new() -> Result<Self> {
        Self::from_entropy_source(&OsEntropy)
    }

    pub fn from_entropy_source(source: &dyn EntropySource) -> Result<Self> {
        let mut seed = [0u8; 32];
        source.get_bytes(&mut seed)?;
        let rng = ChaCha20Rng::from_seed(seed);
        seed.zeroize();

        Ok(Self { csprng: rng })
    }

    /// Fills `dest` and runs the continuous output test over it.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.csprng.fill_bytes(dest);

        // continuous test: a long run of one repeated byte means the generator is broken
        if dest.len() >= 16 && dest.iter().all(|b| *b == dest[0]) {
            log::error!("continuous RNG test failed: {} identical bytes", dest.len());
            return Err(CryptoError::IllegalState(
                "Continuous RNG test failed".into(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for SecureRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureRandom")
    }
}

impl RngCore for SecureRandom {
    fn next_u32(&mut self) -> u32 {
        self.csprng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.csprng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.csprng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill(dest).map_err(rand::Error::new)
    }
}

impl CryptoRng for SecureRandom {}
