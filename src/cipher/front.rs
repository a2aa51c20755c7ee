// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::params::{AlgorithmParams, ParameterSpec};
use crate::provider::{Provider, ProviderRegistry, REGISTRY};
use crate::random::SecureRandom;
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::CipherSpi;
use crate::types::{KeyType, OperationMode};
use rand::RngCore;
use std::sync::Arc;

/// Lifecycle state of a [`Cipher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherState {
    Uninitialized,
    Encrypt,
    Decrypt,
    Wrap,
    Unwrap,
}

impl From<OperationMode> for CipherState {
    fn from(mode: OperationMode) -> Self {
        match mode {
            OperationMode::Encrypt => CipherState::Encrypt,
            OperationMode::Decrypt => CipherState::Decrypt,
            OperationMode::Wrap => CipherState::Wrap,
            OperationMode::Unwrap => CipherState::Unwrap,
        }
    }
}

/// Stateful front over a resolved cipher engine.
///
/// The front validates call shape and lifecycle state before anything
/// reaches the engine: data operations need `Encrypt`/`Decrypt`, `wrap`
/// needs `Wrap`, `unwrap` needs `Unwrap`. After `do_final` the front stays in
/// its initialized state and can process another message without a new
/// `init`.
///
/// Not safe for concurrent use; independent instances are independent.
pub struct Cipher {
    engine: Box<dyn CipherSpi>,
    provider: Arc<Provider>,
    transformation: String,
    state: CipherState,
}

impl Cipher {
    /// Resolves `transformation` against every provider in `registry`.
    pub fn get_instance(registry: &ProviderRegistry, transformation: &str) -> Result<Self> {
        let implementation =
            Resolver::new(registry).resolve_cipher(transformation, ProviderSelector::Any)?;
        Ok(Self::new(implementation, transformation))
    }

    /// Resolves `transformation` against the installed provider `provider`.
    pub fn get_instance_with_provider(
        registry: &ProviderRegistry,
        transformation: &str,
        provider: &str,
    ) -> Result<Self> {
        let implementation = Resolver::new(registry)
            .resolve_cipher(transformation, ProviderSelector::Named(provider))?;
        Ok(Self::new(implementation, transformation))
    }

    /// Resolves `transformation` against `provider` alone, installed or not.
    pub fn get_instance_from_provider(
        transformation: &str,
        provider: Arc<Provider>,
    ) -> Result<Self> {
        // an Instance selector never consults the registry
        let implementation = Resolver::new(&REGISTRY)
            .resolve_cipher(transformation, ProviderSelector::Instance(provider))?;
        Ok(Self::new(implementation, transformation))
    }

    pub fn new(implementation: Implementation<Box<dyn CipherSpi>>, transformation: &str) -> Self {
        let (engine, provider) = implementation.into_parts();
        Self {
            engine,
            provider,
            transformation: transformation.to_string(),
            state: CipherState::Uninitialized,
        }
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    /// The transformation as it was requested.
    pub fn algorithm(&self) -> &str {
        &self.transformation
    }

    pub fn state(&self) -> CipherState {
        self.state
    }

    /// The mode of the last successful `init`, if any.
    pub fn mode(&self) -> Option<OperationMode> {
        match self.state {
            CipherState::Uninitialized => None,
            CipherState::Encrypt => Some(OperationMode::Encrypt),
            CipherState::Decrypt => Some(OperationMode::Decrypt),
            CipherState::Wrap => Some(OperationMode::Wrap),
            CipherState::Unwrap => Some(OperationMode::Unwrap),
        }
    }

    pub fn block_size(&self) -> usize {
        self.engine.block_size()
    }

    pub fn iv(&self) -> Option<Vec<u8>> {
        self.engine.iv()
    }

    pub fn parameters(&self) -> Option<AlgorithmParams> {
        self.engine.parameters()
    }

    /// Upper bound on the output of the next `update`/`do_final` given
    /// `input_len` more bytes.
    pub fn output_size(&self, input_len: usize) -> Result<usize> {
        self.check_data_state()?;
        Ok(self.engine.output_size(input_len))
    }

    /// Key size in bits as the engine sees it.
    pub fn key_size(&self, key: &Key) -> Result<usize> {
        match self.engine.key_sizing() {
            Some(sizing) => sizing.key_size(key),
            None => Err(CryptoError::UnsupportedOperation(format!(
                "{} cannot report key sizes",
                self.transformation
            ))),
        }
    }

    pub fn init(&mut self, mode: OperationMode, key: &Key) -> Result<()> {
        self.init_with_params(mode, key, None)
    }

    pub fn init_with_params(
        &mut self,
        mode: OperationMode,
        key: &Key,
        params: Option<&ParameterSpec>,
    ) -> Result<()> {
        let mut random = SecureRandom::new()?;
        self.init_with_random(mode, key, params, &mut random)
    }

    pub fn init_with_algorithm_params(
        &mut self,
        mode: OperationMode,
        key: &Key,
        params: &AlgorithmParams,
    ) -> Result<()> {
        self.init_with_params(mode, key, Some(params.spec()))
    }

    /// Initializing is equivalent to building a new instance: anything the
    /// engine buffered before is discarded.
    pub fn init_with_random(
        &mut self,
        mode: OperationMode,
        key: &Key,
        params: Option<&ParameterSpec>,
        random: &mut dyn RngCore,
    ) -> Result<()> {
        log::debug!(
            "{} ({}): init for {}",
            self.transformation,
            self.provider.name(),
            mode
        );
        if let Err(e) = self.engine.init(mode, key, params, random) {
            self.state = CipherState::Uninitialized;
            return Err(e);
        }
        self.state = mode.into();
        Ok(())
    }

    /// Returns `None` when no output is produced, including for empty input.
    pub fn update(&mut self, input: &[u8]) -> Result<Option<Vec<u8>>> {
        self.update_range(input, 0, input.len())
    }

    pub fn update_range(
        &mut self,
        input: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<Option<Vec<u8>>> {
        self.check_data_state()?;
        check_range(input.len(), offset, len)?;
        if len == 0 {
            return Ok(None);
        }

        let output = self.engine.update(&input[offset..offset + len])?;
        Ok(if output.is_empty() { None } else { Some(output) })
    }

    pub fn update_into(
        &mut self,
        input: &[u8],
        offset: usize,
        len: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<usize> {
        self.check_data_state()?;
        check_range(input.len(), offset, len)?;
        check_out_offset(output.len(), out_offset)?;
        if len == 0 {
            return Ok(0);
        }

        self.engine
            .update_into(&input[offset..offset + len], &mut output[out_offset..])
    }

    pub fn do_final(&mut self) -> Result<Vec<u8>> {
        self.do_final_range(&[], 0, 0)
    }

    pub fn do_final_with(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.do_final_range(input, 0, input.len())
    }

    pub fn do_final_range(&mut self, input: &[u8], offset: usize, len: usize) -> Result<Vec<u8>> {
        self.check_data_state()?;
        check_range(input.len(), offset, len)?;
        self.engine.do_final(&input[offset..offset + len])
    }

    pub fn do_final_into(&mut self, output: &mut [u8], out_offset: usize) -> Result<usize> {
        self.do_final_range_into(&[], 0, 0, output, out_offset)
    }

    pub fn do_final_range_into(
        &mut self,
        input: &[u8],
        offset: usize,
        len: usize,
        output: &mut [u8],
        out_offset: usize,
    ) -> Result<usize> {
        self.check_data_state()?;
        check_range(input.len(), offset, len)?;
        check_out_offset(output.len(), out_offset)?;
        self.engine
            .do_final_into(&input[offset..offset + len], &mut output[out_offset..])
    }

    pub fn wrap(&mut self, key: &Key) -> Result<Vec<u8>> {
        if self.state != CipherState::Wrap {
            return Err(CryptoError::IllegalState(
                "cipher is not initialized for wrapping keys".into(),
            ));
        }
        let transformation = &self.transformation;
        match self.engine.key_wrapping() {
            Some(wrapping) => wrapping.wrap(key),
            None => Err(unsupported_wrapping(transformation)),
        }
    }

    /// `key_type` is the raw key-type code: 1 public, 2 private, 3 secret.
    pub fn unwrap(
        &mut self,
        wrapped: &[u8],
        algorithm: Option<&str>,
        key_type: i32,
    ) -> Result<Key> {
        if self.state != CipherState::Unwrap {
            return Err(CryptoError::IllegalState(
                "cipher is not initialized for unwrapping keys".into(),
            ));
        }
        let key_type = KeyType::try_from(key_type)?;
        let algorithm = algorithm.ok_or_else(|| {
            CryptoError::IllegalArgument("wrapped key algorithm must be given".into())
        })?;

        let transformation = &self.transformation;
        match self.engine.key_wrapping() {
            Some(wrapping) => wrapping.unwrap(wrapped, algorithm, key_type),
            None => Err(unsupported_wrapping(transformation)),
        }
    }

    pub fn unwrap_key(&mut self, wrapped: &[u8], algorithm: &str, key_type: KeyType) -> Result<Key> {
        self.unwrap(wrapped, Some(algorithm), key_type.code())
    }

    fn check_data_state(&self) -> Result<()> {
        match self.state {
            CipherState::Encrypt | CipherState::Decrypt => Ok(()),
            CipherState::Uninitialized => Err(CryptoError::IllegalState(
                "cipher not initialized".into(),
            )),
            other => Err(CryptoError::IllegalState(format!(
                "cipher initialized for {:?}, not for encryption or decryption",
                other
            ))),
        }
    }
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("transformation", &self.transformation)
            .field("provider", &self.provider.name())
            .field("state", &self.state)
            .finish()
    }
}

fn check_range(input_len: usize, offset: usize, len: usize) -> Result<()> {
    if offset > input_len || len > input_len - offset {
        return Err(CryptoError::IllegalArgument(format!(
            "bad offset/length: offset {} length {} for {} input bytes",
            offset, len, input_len
        )));
    }
    Ok(())
}

fn check_out_offset(output_len: usize, out_offset: usize) -> Result<()> {
    if out_offset > output_len {
        return Err(CryptoError::IllegalArgument(format!(
            "bad output offset {} for {} output bytes",
            out_offset, output_len
        )));
    }
    Ok(())
}

fn unsupported_wrapping(transformation: &str) -> CryptoError {
    CryptoError::UnsupportedOperation(format!("{} does not wrap keys", transformation))
}
