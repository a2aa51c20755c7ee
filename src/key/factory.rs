// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::Result;
use crate::key::{Key, KeySpec};
use crate::provider::{Provider, ProviderRegistry};
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{Engine, SecretKeyFactorySpi};
use crate::types::ServiceType;
use std::sync::Arc;

/// Converts between key specs and opaque keys. Stateless from the caller's
/// point of view.
pub struct SecretKeyFactory {
    engine: Box<dyn SecretKeyFactorySpi>,
    provider: Arc<Provider>,
    algorithm: String,
}

impl SecretKeyFactory {
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
            ServiceType::SecretKeyFactory,
            algorithm,
            selector,
            Engine::into_secret_key_factory,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(
        implementation: Implementation<Box<dyn SecretKeyFactorySpi>>,
        algorithm: &str,
    ) -> Self {
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

    pub fn generate_secret(&mut self, spec: &KeySpec) -> Result<Key> {
        self.engine.generate_secret(spec)
    }

    pub fn key_spec(&mut self, key: &Key) -> Result<KeySpec> {
        self.engine.key_spec(key)
    }

    /// Re-expresses a key from another provider in this factory's form.
    pub fn translate_key(&mut self, key: &Key) -> Result<Key> {
        self.engine.translate_key(key)
    }
}

impl std::fmt::Debug for SecretKeyFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKeyFactory")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .finish()
    }
}
