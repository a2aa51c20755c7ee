// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::params::{AlgorithmParams, ParameterSpec};
use crate::provider::{Provider, ProviderRegistry};
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{AlgorithmParametersSpi, Engine};
use crate::types::ServiceType;
use std::sync::Arc;

/// Parameter encoder/decoder front. Initialized exactly once, either from a
/// spec or from an encoding.
pub struct AlgorithmParameters {
    engine: Box<dyn AlgorithmParametersSpi>,
    provider: Arc<Provider>,
    algorithm: String,
    initialized: bool,
}

impl AlgorithmParameters {
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
            ServiceType::AlgorithmParameters,
            algorithm,
            selector,
            Engine::into_algorithm_parameters,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(
        implementation: Implementation<Box<dyn AlgorithmParametersSpi>>,
        algorithm: &str,
    ) -> Self {
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

    pub fn init(&mut self, spec: &ParameterSpec) -> Result<()> {
        self.check_fresh()?;
        self.engine.init(spec)?;
        self.initialized = true;
        Ok(())
    }

    pub fn init_encoded(&mut self, encoded: &[u8]) -> Result<()> {
        self.check_fresh()?;
        self.engine.init_encoded(encoded)?;
        self.initialized = true;
        Ok(())
    }

    pub fn encoded(&self) -> Result<Vec<u8>> {
        self.check_initialized()?;
        self.engine.encoded()
    }

    pub fn parameter_spec(&self) -> Result<ParameterSpec> {
        self.check_initialized()?;
        self.engine.parameter_spec()
    }

    /// Snapshot suitable for `Cipher::init_with_algorithm_params`.
    pub fn to_params(&self) -> Result<AlgorithmParams> {
        Ok(AlgorithmParams::new(&self.algorithm, self.parameter_spec()?))
    }

    fn check_fresh(&self) -> Result<()> {
        if self.initialized {
            return Err(CryptoError::IllegalState(
                "algorithm parameters already initialized".into(),
            ));
        }
        Ok(())
    }

    fn check_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(CryptoError::IllegalState(
                "algorithm parameters not initialized".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AlgorithmParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmParameters")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .field("initialized", &self.initialized)
            .finish()
    }
}
