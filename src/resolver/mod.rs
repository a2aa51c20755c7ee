// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Transformation parsing and provider lookup.
//!
//! A lookup against one provider tries the upper-cased name before the name
//! as given, unwinding `Alg.Alias` entries before each terminal lookup. A
//! cipher transformation is first looked up whole in every candidate
//! provider; only when that fails everywhere is it split into
//! `algorithm/mode/padding` and the bare algorithm looked up, with mode and
//! padding then applied to the new engine.

mod transformation;

pub use transformation::Transformation;

use crate::config::ResolverConfig;
use crate::error::{CryptoError, Result};
use crate::provider::{Provider, ProviderRegistry};
use crate::spi::{CipherSpi, Engine};
use crate::types::ServiceType;
use std::sync::Arc;

/// Which providers a lookup may consult.
#[derive(Debug, Clone)]
pub enum ProviderSelector<'a> {
    /// Every installed provider, in installation order.
    Any,
    /// The installed provider with this name.
    Named(&'a str),
    /// A specific provider, installed or not.
    Instance(Arc<Provider>),
}

impl<'a> From<&'a str> for ProviderSelector<'a> {
    fn from(name: &'a str) -> Self {
        ProviderSelector::Named(name)
    }
}

impl From<Arc<Provider>> for ProviderSelector<'_> {
    fn from(provider: Arc<Provider>) -> Self {
        ProviderSelector::Instance(provider)
    }
}

/// A live engine together with the provider that supplied it.
pub struct Implementation<E> {
    engine: E,
    provider: Arc<Provider>,
}

impl<E> Implementation<E> {
    pub fn new(engine: E, provider: Arc<Provider>) -> Self {
        Self { engine, provider }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    pub fn into_parts(self) -> (E, Arc<Provider>) {
        (self.engine, self.provider)
    }
}

impl<E> std::fmt::Debug for Implementation<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Implementation")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

/// Where a name landed inside one provider.
struct Hit {
    canonical: String,
    class_name: String,
}

pub struct Resolver<'r> {
    registry: &'r ProviderRegistry,
    config: ResolverConfig,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r ProviderRegistry) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: &'r ProviderRegistry, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a non-composed algorithm name for any service type.
    pub fn resolve_service(
        &self,
        service: ServiceType,
        algorithm: &str,
        selector: ProviderSelector<'_>,
    ) -> Result<Implementation<Engine>> {
        let providers = self.candidates(selector)?;
        if algorithm.is_empty() {
            return Err(CryptoError::NoSuchAlgorithm(format!(
                "empty {} algorithm name",
                service
            )));
        }

        for provider in &providers {
            if let Some(engine) = self.lookup(provider, service, algorithm)? {
                return Ok(Implementation::new(engine, provider.clone()));
            }
        }

        Err(not_found(service, algorithm, &providers))
    }

    /// [`resolve_service`](Self::resolve_service), narrowed to one engine
    /// contract by `extract`.
    pub fn resolve_as<E>(
        &self,
        service: ServiceType,
        algorithm: &str,
        selector: ProviderSelector<'_>,
        extract: fn(Engine) -> Option<E>,
    ) -> Result<Implementation<E>> {
        let (engine, provider) = self
            .resolve_service(service, algorithm, selector)?
            .into_parts();
        match extract(engine) {
            Some(engine) => Ok(Implementation::new(engine, provider)),
            None => Err(CryptoError::instantiation(
                provider.name(),
                algorithm,
                "<engine of another service>",
            )),
        }
    }

    /// Resolves a cipher transformation such as `"AES/CBC/PKCS5Padding"`.
    pub fn resolve_cipher(
        &self,
        transformation: &str,
        selector: ProviderSelector<'_>,
    ) -> Result<Implementation<Box<dyn CipherSpi>>> {
        let providers = self.candidates(selector)?;
        if transformation.is_empty() {
            return Err(CryptoError::NoSuchAlgorithm("empty transformation".into()));
        }

        // whole-string entries, e.g. a provider registering "DES/ECB/NoPadding"
        for provider in &providers {
            if let Some(engine) = self.lookup(provider, ServiceType::Cipher, transformation)? {
                log::debug!(
                    "{}: composed entry for {}",
                    provider.name(),
                    transformation
                );
                return into_cipher(engine, provider, transformation);
            }
        }

        if !transformation.contains('/') {
            return Err(not_found(ServiceType::Cipher, transformation, &providers));
        }

        let parsed = Transformation::parse(transformation)?;
        for provider in &providers {
            let engine = match self.lookup(provider, ServiceType::Cipher, parsed.algorithm())? {
                Some(engine) => engine,
                None => continue,
            };
            let mut implementation = into_cipher(engine, provider, parsed.algorithm())?;
            if let Some(mode) = parsed.mode() {
                log::debug!("{}: {} set mode {}", provider.name(), parsed.algorithm(), mode);
                implementation.engine_mut().set_mode(mode)?;
            }
            if let Some(padding) = parsed.padding() {
                log::debug!(
                    "{}: {} set padding {}",
                    provider.name(),
                    parsed.algorithm(),
                    padding
                );
                implementation.engine_mut().set_padding(padding)?;
            }
            return Ok(implementation);
        }

        Err(not_found(ServiceType::Cipher, transformation, &providers))
    }

    fn candidates(&self, selector: ProviderSelector<'_>) -> Result<Vec<Arc<Provider>>> {
        match selector {
            ProviderSelector::Any => self.registry.providers(),
            ProviderSelector::Named(name) => {
                if name.is_empty() {
                    return Err(CryptoError::IllegalArgument("missing provider".into()));
                }
                match self.registry.by_name(name)? {
                    Some(provider) => Ok(vec![provider]),
                    None => Err(CryptoError::NoSuchProvider(format!(
                        "provider {} not found",
                        name
                    ))),
                }
            }
            ProviderSelector::Instance(provider) => Ok(vec![provider]),
        }
    }

    /// Finds and instantiates `name` inside a single provider.
    fn lookup(
        &self,
        provider: &Arc<Provider>,
        service: ServiceType,
        name: &str,
    ) -> Result<Option<Engine>> {
        match self.find(provider, service, name)? {
            Some(hit) => {
                log::debug!(
                    "{}: {}.{} resolved to {} ({})",
                    provider.name(),
                    service,
                    name,
                    hit.canonical,
                    hit.class_name
                );
                provider
                    .instantiate(service, name, &hit.class_name)
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn find(&self, provider: &Provider, service: ServiceType, name: &str) -> Result<Option<Hit>> {
        let upper = name.to_uppercase();
        let mut attempts = vec![upper.as_str()];
        if upper != name {
            attempts.push(name);
        }

        for candidate in attempts {
            let canonical = self.unwind_alias(provider, service, candidate)?;
            if let Some(class_name) = provider.class_name(service, &canonical) {
                return Ok(Some(Hit {
                    class_name: class_name.to_string(),
                    canonical,
                }));
            }
        }
        Ok(None)
    }

    /// Follows alias entries until a non-alias name is reached.
    fn unwind_alias(&self, provider: &Provider, service: ServiceType, name: &str) -> Result<String> {
        let mut current = name.to_string();
        let mut hops = 0;
        while let Some(target) = provider.alias_target(service, &current) {
            if hops == self.config.max_alias_hops {
                log::warn!(
                    "{}: alias chain for {}.{} exceeds {} hops",
                    provider.name(),
                    service,
                    name,
                    self.config.max_alias_hops
                );
                return Err(CryptoError::IllegalState(format!(
                    "alias chain for {}.{} in provider {} exceeds {} hops",
                    service,
                    name,
                    provider.name(),
                    self.config.max_alias_hops
                )));
            }
            current = target.to_string();
            hops += 1;
        }
        Ok(current)
    }
}

fn into_cipher(
    engine: Engine,
    provider: &Arc<Provider>,
    algorithm: &str,
) -> Result<Implementation<Box<dyn CipherSpi>>> {
    engine
        .into_cipher()
        .map(|engine| Implementation::new(engine, provider.clone()))
        .ok_or_else(|| CryptoError::instantiation(provider.name(), algorithm, "<non-cipher engine>"))
}

fn not_found(service: ServiceType, algorithm: &str, providers: &[Arc<Provider>]) -> CryptoError {
    match providers {
        [only] => CryptoError::NoSuchAlgorithm(format!(
            "{} {} not found in provider {}",
            service,
            algorithm,
            only.name()
        )),
        _ => CryptoError::NoSuchAlgorithm(format!("{} {} not found", service, algorithm)),
    }
}
