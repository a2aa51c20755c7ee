// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::params::ParameterSpec;
use crate::spi::KeyGeneratorSpi;
use rand::RngCore;
use zeroize::Zeroize;

const DEFAULT_KEY_BITS: usize = 128;
const MAX_KEY_BITS: usize = 4096;

/// Uniformly random secret keys of a whole number of bytes.
pub struct RawKeyGenerator {
    bits: usize,
}

impl RawKeyGenerator {
    pub fn new() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
        }
    }
}

impl Default for RawKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_bits(bits: usize) -> Result<usize> {
    if bits == 0 || bits % 8 != 0 || bits > MAX_KEY_BITS {
        return Err(CryptoError::InvalidAlgorithmParameter(format!(
            "RAW key size must be a positive multiple of 8 up to {} bits, got {}",
            MAX_KEY_BITS, bits
        )));
    }
    Ok(bits)
}

impl KeyGeneratorSpi for RawKeyGenerator {
    fn init_with_size(&mut self, bits: usize, _random: &mut dyn RngCore) -> Result<()> {
        self.bits = check_bits(bits)?;
        Ok(())
    }

    fn init_with_params(
        &mut self,
        params: &ParameterSpec,
        random: &mut dyn RngCore,
    ) -> Result<()> {
        match params {
            ParameterSpec::KeySize(bits) => self.init_with_size(*bits, random),
            other => Err(CryptoError::InvalidAlgorithmParameter(format!(
                "RAW key generation takes a key size, not {:?}",
                other
            ))),
        }
    }

    fn generate_key(&mut self, random: &mut dyn RngCore) -> Result<Key> {
        let mut material = vec![0u8; self.bits / 8];
        if let Err(e) = random.try_fill_bytes(&mut material) {
            material.zeroize();
            return Err(e.into());
        }
        let key = Key::secret("RAW", &material);
        material.zeroize();
        Ok(key)
    }
}
