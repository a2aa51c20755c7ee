// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::memory::SecretBytes;
use crate::params::ParameterSpec;
use crate::provider::{Provider, ProviderRegistry};
use crate::random::SecureRandom;
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{Engine, KeyAgreementSpi};
use crate::types::ServiceType;
use rand::RngCore;
use std::sync::Arc;

/// Key agreement front. Phases and secret generation require `init` first.
pub struct KeyAgreement {
    engine: Box<dyn KeyAgreementSpi>,
    provider: Arc<Provider>,
    algorithm: String,
    initialized: bool,
    // secret generated but not yet handed out, kept across ShortBuffer
    pending: Option<SecretBytes>,
}

impl KeyAgreement {
    pub fn get_instance(registry: &ProviderRegistry, algorithm: &str) -> Result<Self> {
        Self::resolve(registry, algorithm, ProviderSelector::Any)
    }

    pub fn get_instance_with_provider(
        registry: &ProviderRegistry,
        algorithm: &str,
        provider: &str,
    ) -> Result<Self> {
        Self::resolve(registry, algorithm, ProviderSelector::Named(provider))
    }

    fn resolve(
        registry: &ProviderRegistry,
        algorithm: &str,
        selector: ProviderSelector<'_>,
    ) -> Result<Self> {
        let implementation = Resolver::new(registry).resolve_as(
            ServiceType::KeyAgreement,
            algorithm,
            selector,
            Engine::into_key_agreement,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(implementation: Implementation<Box<dyn KeyAgreementSpi>>, algorithm: &str) -> Self {
        let (engine, provider) = implementation.into_parts();
        Self {
            engine,
            provider,
            algorithm: algorithm.to_string(),
            initialized: false,
            pending: None,
        }
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn init(&mut self, key: &Key) -> Result<()> {
        self.init_with_params(key, None)
    }

    pub fn init_with_params(&mut self, key: &Key, params: Option<&ParameterSpec>) -> Result<()> {
        let mut random = SecureRandom::new()?;
        self.init_with_random(key, params, &mut random)
    }

    pub fn init_with_random(
        &mut self,
        key: &Key,
        params: Option<&ParameterSpec>,
        random: &mut dyn RngCore,
    ) -> Result<()> {
        self.initialized = false;
        self.pending = None;
        self.engine.init(key, params, random)?;
        self.initialized = true;
        Ok(())
    }

    /// Feeds the peer's key; intermediate phases may yield a key to forward.
    pub fn do_phase(&mut self, key: &Key, last_phase: bool) -> Result<Option<Key>> {
        self.check_initialized()?;
        self.pending = None;
        self.engine.do_phase(key, last_phase)
    }

    pub fn generate_secret(&mut self) -> Result<Vec<u8>> {
        self.check_initialized()?;
        match self.pending.take() {
            Some(secret) => Ok(secret.as_bytes().to_vec()),
            None => self.engine.generate_secret(),
        }
    }

    /// Writes the shared secret at `out_offset`, returning its length.
    pub fn generate_secret_into(&mut self, output: &mut [u8], out_offset: usize) -> Result<usize> {
        self.check_initialized()?;
        if out_offset > output.len() {
            return Err(CryptoError::IllegalArgument(format!(
                "bad output offset {} for {} output bytes",
                out_offset,
                output.len()
            )));
        }
        let secret = match self.pending.take() {
            Some(secret) => secret,
            None => SecretBytes::new(self.engine.generate_secret()?),
        };
        let available = output.len() - out_offset;
        if available < secret.len() {
            let needed = secret.len();
            self.pending = Some(secret);
            return Err(CryptoError::ShortBuffer { needed, available });
        }
        output[out_offset..out_offset + secret.len()].copy_from_slice(secret.as_bytes());
        Ok(secret.len())
    }

    pub fn generate_secret_key(&mut self, algorithm: &str) -> Result<Key> {
        self.check_initialized()?;
        match self.pending.take() {
            Some(secret) => Ok(Key::secret(algorithm, secret.as_bytes())),
            None => self.engine.generate_secret_key(algorithm),
        }
    }

    fn check_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(CryptoError::IllegalState(
                "key agreement not initialized".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyAgreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyAgreement")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .field("initialized", &self.initialized)
            .finish()
    }
}
