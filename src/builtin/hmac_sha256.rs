// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::memory::SecretBytes;
use crate::params::ParameterSpec;
use crate::spi::MacSpi;
use hmac::{Hmac, Mac as _};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TAG_LEN: usize = 32;

/// HMAC-SHA256 over the `hmac`/`sha2` crates.
#[derive(Default)]
pub struct HmacSha256Engine {
    key: Option<SecretBytes>,
    state: Option<HmacSha256>,
}

impl HmacSha256Engine {
    pub fn new() -> Self {
        Self::default()
    }

    fn keyed(key: &[u8]) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(format!("HMAC key rejected: {}", e)))
    }
}

impl MacSpi for HmacSha256Engine {
    fn mac_length(&self) -> usize {
        TAG_LEN
    }

    fn init(&mut self, key: &Key, params: Option<&ParameterSpec>) -> Result<()> {
        if params.is_some() {
            return Err(CryptoError::InvalidAlgorithmParameter(
                "HmacSHA256 takes no parameters".into(),
            ));
        }
        self.state = Some(Self::keyed(key.encoded())?);
        self.key = Some(SecretBytes::from_slice(key.encoded()));
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<()> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| CryptoError::IllegalState("HmacSHA256 not keyed".into()))?;
        state.update(input);
        Ok(())
    }

    fn do_final(&mut self) -> Result<Vec<u8>> {
        let (state, key) = match (self.state.take(), self.key.as_ref()) {
            (Some(state), Some(key)) => (state, key),
            _ => return Err(CryptoError::IllegalState("HmacSHA256 not keyed".into())),
        };
        let tag = state.finalize().into_bytes().to_vec();
        self.state = Some(Self::keyed(key.as_bytes())?);
        Ok(tag)
    }

    fn reset(&mut self) {
        if let Some(key) = self.key.as_ref() {
            self.state = Self::keyed(key.as_bytes()).ok();
        }
    }
}
