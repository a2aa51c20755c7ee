// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::key::Key;
use crate::params::ParameterSpec;
use crate::provider::{Provider, ProviderRegistry};
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{Engine, MacSpi};
use crate::types::ServiceType;
use std::sync::Arc;

/// Message authentication code front.
///
/// `do_final` resets the engine, so one initialized `Mac` can tag any number
/// of messages under the same key.
pub struct Mac {
    engine: Box<dyn MacSpi>,
    provider: Arc<Provider>,
    algorithm: String,
    initialized: bool,
}

impl Mac {
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
            ServiceType::Mac,
            algorithm,
            selector,
            Engine::into_mac,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(implementation: Implementation<Box<dyn MacSpi>>, algorithm: &str) -> Self {
        let (engine, provider) = implementation.into_parts();
        Self {
            engine,
            provider,
            algorithm: algorithm.to_string(),
            initialized: false,
        }
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Tag length in bytes.
    pub fn mac_length(&self) -> usize {
        self.engine.mac_length()
    }

    pub fn init(&mut self, key: &Key) -> Result<()> {
        self.init_with_params(key, None)
    }

    pub fn init_with_params(&mut self, key: &Key, params: Option<&ParameterSpec>) -> Result<()> {
        log::debug!("{} ({}): init", self.algorithm, self.provider.name());
        self.initialized = false;
        self.engine.init(key, params)?;
        self.initialized = true;
        Ok(())
    }

    pub fn update(&mut self, input: &[u8]) -> Result<()> {
        self.check_initialized()?;
        self.engine.update(input)
    }

    pub fn update_byte(&mut self, input: u8) -> Result<()> {
        self.update(&[input])
    }

    pub fn do_final(&mut self) -> Result<Vec<u8>> {
        self.check_initialized()?;
        self.engine.do_final()
    }

    pub fn do_final_with(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.update(input)?;
        self.engine.do_final()
    }

    /// Writes the tag at `out_offset`, returning its length.
    pub fn do_final_into(&mut self, output: &mut [u8], out_offset: usize) -> Result<usize> {
        self.check_initialized()?;
        if out_offset > output.len() {
            return Err(CryptoError::IllegalArgument(format!(
                "bad output offset {} for {} output bytes",
                out_offset,
                output.len()
            )));
        }
        let needed = self.engine.mac_length();
        let available = output.len() - out_offset;
        if available < needed {
            return Err(CryptoError::ShortBuffer { needed, available });
        }

        let tag = self.engine.do_final()?;
        output[out_offset..out_offset + tag.len()].copy_from_slice(&tag);
        Ok(tag.len())
    }

    /// Discards buffered input; the key stays in place.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    fn check_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(CryptoError::IllegalState("MAC not initialized".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mac")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .field("initialized", &self.initialized)
            .finish()
    }
}
