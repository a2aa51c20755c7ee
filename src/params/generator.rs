// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::Result;
use crate::params::{AlgorithmParams, ParameterSpec};
use crate::provider::{Provider, ProviderRegistry};
use crate::random::SecureRandom;
use crate::resolver::{Implementation, ProviderSelector, Resolver};
use crate::spi::{AlgorithmParameterGeneratorSpi, Engine};
use crate::types::ServiceType;
use rand::RngCore;
use std::sync::Arc;

pub struct AlgorithmParameterGenerator {
    engine: Box<dyn AlgorithmParameterGeneratorSpi>,
    provider: Arc<Provider>,
    algorithm: String,
}

impl AlgorithmParameterGenerator {
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
            ServiceType::AlgorithmParameterGenerator,
            algorithm,
            selector,
            Engine::into_algorithm_parameter_generator,
        )?;
        Ok(Self::new(implementation, algorithm))
    }

    pub fn new(
        implementation: Implementation<Box<dyn AlgorithmParameterGeneratorSpi>>,
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

    pub fn init(&mut self, size: usize, random: &mut dyn RngCore) -> Result<()> {
        self.engine.init(size, random)
    }

    pub fn init_with_spec(&mut self, spec: &ParameterSpec, random: &mut dyn RngCore) -> Result<()> {
        self.engine.init_with_spec(spec, random)
    }

    pub fn generate_parameters(&mut self) -> Result<AlgorithmParams> {
        let mut random = SecureRandom::new()?;
        self.engine.generate_parameters(&mut random)
    }

    pub fn generate_parameters_with_random(
        &mut self,
        random: &mut dyn RngCore,
    ) -> Result<AlgorithmParams> {
        self.engine.generate_parameters(random)
    }
}

impl std::fmt::Debug for AlgorithmParameterGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmParameterGenerator")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .finish()
    }
}
