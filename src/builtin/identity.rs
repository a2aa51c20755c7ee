// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! `NULL` cipher: output equals input, but with real block buffering and
//! padding so the fronts and adapters above it see a genuine block engine.

use crate::cipher::{CipherMode, PaddingScheme, Pkcs7Padding};
use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::params::{AlgorithmParams, ParameterSpec};
use crate::spi::{CipherSpi, KeySizing, KeyWrapping};
use crate::types::{KeyType, OperationMode};
use rand::RngCore;

pub const BLOCK_SIZE: usize = 8;

pub struct IdentityCipher {
    mode: CipherMode,
    padding: PaddingScheme,
    op: Option<OperationMode>,
    buffer: Vec<u8>,
    iv: Option<Vec<u8>>,
}

impl IdentityCipher {
    /// ECB with PKCS#5 padding unless the transformation says otherwise.
    pub fn new() -> Self {
        Self {
            mode: CipherMode::Ecb,
            padding: PaddingScheme::Pkcs7,
            op: None,
            buffer: Vec::new(),
            iv: None,
        }
    }

    fn is_streaming(&self) -> bool {
        !self.mode.requires_padding()
    }

    fn decrypting(&self) -> bool {
        self.op == Some(OperationMode::Decrypt)
    }

    fn check_data_mode(&self) -> Result<()> {
        match self.op {
            Some(op) if op.is_data_mode() => Ok(()),
            _ => Err(CryptoError::IllegalState(
                "NULL cipher not initialized for data".into(),
            )),
        }
    }

    /// How many buffered bytes can be released without seeing the end of
    /// the message.
    fn releasable(&self) -> usize {
        let len = self.buffer.len();
        if self.is_streaming() {
            return len;
        }
        // the last full block may be padding until do_final proves otherwise
        if self.decrypting() && self.padding == PaddingScheme::Pkcs7 && len > 0 {
            return ((len - 1) / BLOCK_SIZE) * BLOCK_SIZE;
        }
        (len / BLOCK_SIZE) * BLOCK_SIZE
    }
}

impl Default for IdentityCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherSpi for IdentityCipher {
    fn set_mode(&mut self, mode: &str) -> Result<()> {
        let mode = CipherMode::from_name(mode)?;
        if !matches!(mode, CipherMode::None | CipherMode::Ecb | CipherMode::Ctr) {
            return Err(CryptoError::NoSuchAlgorithm(format!(
                "NULL cipher does not support {:?} mode",
                mode
            )));
        }
        self.mode = mode;
        if !mode.requires_padding() {
            self.padding = PaddingScheme::NoPadding;
        }
        Ok(())
    }

    fn set_padding(&mut self, padding: &str) -> Result<()> {
        let scheme = PaddingScheme::from_name(padding)?;
        if self.is_streaming() && scheme != PaddingScheme::NoPadding {
            return Err(CryptoError::NoSuchPadding(format!(
                "{} is not available in CTR mode",
                padding
            )));
        }
        self.padding = scheme;
        Ok(())
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_size(&self, input_len: usize) -> usize {
        let total = self.buffer.len() + input_len;
        if !self.is_streaming() && self.padding == PaddingScheme::Pkcs7 && !self.decrypting() {
            return (total / BLOCK_SIZE + 1) * BLOCK_SIZE;
        }
        total
    }

    fn update_output_size(&self, input_len: usize) -> usize {
        let total = self.buffer.len() + input_len;
        if self.is_streaming() {
            total
        } else {
            (total / BLOCK_SIZE) * BLOCK_SIZE
        }
    }

    fn iv(&self) -> Option<Vec<u8>> {
        self.iv.clone()
    }

    fn parameters(&self) -> Option<AlgorithmParams> {
        self.iv
            .as_ref()
            .map(|iv| AlgorithmParams::new("NULL", ParameterSpec::Iv(iv.clone())))
    }

    fn init(
        &mut self,
        mode: OperationMode,
        key: &Key,
        params: Option<&ParameterSpec>,
        random: &mut dyn RngCore,
    ) -> Result<()> {
        if key.encoded().is_empty() {
            return Err(CryptoError::InvalidKey("empty key".into()));
        }

        let iv = match params {
            None => None,
            Some(ParameterSpec::Iv(iv)) if iv.len() == BLOCK_SIZE => Some(iv.clone()),
            Some(other) => {
                return Err(CryptoError::InvalidAlgorithmParameter(format!(
                    "expected an {}-byte IV, got {:?}",
                    BLOCK_SIZE, other
                )))
            }
        };

        self.iv = match (self.is_streaming(), iv) {
            (_, Some(iv)) => Some(iv),
            (true, None) if mode == OperationMode::Encrypt => {
                let mut iv = vec![0u8; BLOCK_SIZE];
                random.try_fill_bytes(&mut iv)?;
                Some(iv)
            }
            (true, None) if mode == OperationMode::Decrypt => {
                return Err(CryptoError::InvalidAlgorithmParameter(
                    "CTR decryption needs an IV".into(),
                ))
            }
            _ => None,
        };

        self.op = Some(mode);
        self.buffer.clear();
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.check_data_mode()?;
        self.buffer.extend_from_slice(input);
        let n = self.releasable();
        Ok(self.buffer.drain(..n).collect())
    }

    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.check_data_mode()?;
        self.buffer.extend_from_slice(input);
        let data = std::mem::take(&mut self.buffer);

        if self.is_streaming() {
            return Ok(data);
        }
        match (self.padding, self.decrypting()) {
            (PaddingScheme::Pkcs7, false) => Pkcs7Padding::pad(&data, BLOCK_SIZE),
            (PaddingScheme::Pkcs7, true) => Pkcs7Padding::unpad(&data, BLOCK_SIZE),
            (PaddingScheme::NoPadding, _) => {
                if data.len() % BLOCK_SIZE != 0 {
                    return Err(CryptoError::IllegalBlockSize(format!(
                        "{} bytes is not a multiple of {} without padding",
                        data.len(),
                        BLOCK_SIZE
                    )));
                }
                Ok(data)
            }
        }
    }

    fn key_wrapping(&mut self) -> Option<&mut dyn KeyWrapping> {
        Some(self)
    }

    fn key_sizing(&self) -> Option<&dyn KeySizing> {
        Some(self)
    }
}

impl KeyWrapping for IdentityCipher {
    fn wrap(&mut self, key: &Key) -> Result<Vec<u8>> {
        if key.encoded().is_empty() {
            return Err(CryptoError::InvalidKey("nothing to wrap".into()));
        }
        Ok(key.encoded().to_vec())
    }

    fn unwrap(&mut self, wrapped: &[u8], algorithm: &str, key_type: KeyType) -> Result<Key> {
        if wrapped.is_empty() {
            return Err(CryptoError::InvalidKey("empty wrapped key".into()));
        }
        Ok(Key::new(key_type, algorithm, "RAW", wrapped.to_vec()))
    }
}

impl KeySizing for IdentityCipher {
    fn key_size(&self, key: &Key) -> Result<usize> {
        Ok(key.bit_length())
    }
}
