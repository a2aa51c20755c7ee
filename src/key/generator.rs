// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::Result;
use crate::key::Key;
use crate::params::ParameterSpec;
use crate::provider::{Provider, ProviderRegistry};
use crate::random::SecureRandom;
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{Engine, KeyGeneratorSpi};
use crate::types::ServiceType;
use rand::RngCore;
use std::sync::Arc;

/// Secret key generator front.
///
/// An engine that was never initialized generates with its own defaults.
pub struct KeyGenerator {
    engine: Box<dyn KeyGeneratorSpi>,
    provider: Arc<Provider>,
    algorithm: String,
}

impl KeyGenerator {
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
            ServiceType::KeyGenerator,
            algorithm,
            selector,
            Engine::into_key_generator,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(implementation: Implementation<Box<dyn KeyGeneratorSpi>>, algorithm: &str) -> Self {
        let (engine, provider) = implementation.into_parts();
        Self {
            engine,
            provider,
            algorithm: algorithm.to_string(),
        }
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Key size in bits, with the default random source.
    pub fn init(&mut self, bits: usize) -> Result<()> {
        let mut random = SecureRandom::new()?;
        self.init_with_size(bits, &mut random)
    }

    pub fn init_with_size(&mut self, bits: usize, random: &mut dyn RngCore) -> Result<()> {
        self.engine.init_with_size(bits, random)
    }

    pub fn init_with_params(
        &mut self,
        params: &ParameterSpec,
        random: &mut dyn RngCore,
    ) -> Result<()> {
        self.engine.init_with_params(params, random)
    }

    pub fn generate_key(&mut self) -> Result<Key> {
        let mut random = SecureRandom::new()?;
        self.generate_key_with_random(&mut random)
    }

    pub fn generate_key_with_random(&mut self, random: &mut dyn RngCore) -> Result<Key> {
        let key = self.engine.generate_key(random)?;
        log::debug!(
            "{} ({}): generated {}-bit key",
            self.algorithm,
            self.provider.name(),
            key.bit_length()
        );
        Ok(key)
    }
}

impl std::fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .finish()
    }
}
