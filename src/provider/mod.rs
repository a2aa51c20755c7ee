// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod factory;
pub mod registry;

use crate::error::{CryptoError, Result};
use crate::spi::Engine;
use crate::types::ServiceType;
use std::collections::HashMap;

pub use factory::{Constructor, EngineFactory};
pub use registry::{ProviderRegistry, REGISTRY};

/// Prefix of alias entries in the property-table form.
pub const ALIAS_PREFIX: &str = "Alg.Alias.";

/// `(service type, algorithm name)` as stored by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub service: ServiceType,
    pub algorithm: String,
}

impl ServiceKey {
    pub fn new(service: ServiceType, algorithm: &str) -> Self {
        Self {
            service,
            algorithm: algorithm.to_string(),
        }
    }
}

impl std::fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.service, self.algorithm)
    }
}

/// A named bundle of algorithm registrations.
///
/// Immutable once built; the registry shares it behind an `Arc`.
#[derive(Debug)]
pub struct Provider {
    name: String,
    version: String,
    info: String,
    entries: HashMap<ServiceKey, String>,
    aliases: HashMap<ServiceKey, String>,
    factory: EngineFactory,
}

impl Provider {
    pub fn builder(name: &str) -> ProviderBuilder {
        ProviderBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// Implementation identifier registered under exactly this name.
    pub fn class_name(&self, service: ServiceType, algorithm: &str) -> Option<&str> {
        self.entries
            .get(&ServiceKey::new(service, algorithm))
            .map(String::as_str)
    }

    /// Target of a single alias hop, if `alias` is an alias.
    pub fn alias_target(&self, service: ServiceType, alias: &str) -> Option<&str> {
        self.aliases
            .get(&ServiceKey::new(service, alias))
            .map(String::as_str)
    }

    pub fn services(&self) -> impl Iterator<Item = (&ServiceKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&ServiceKey, &str)> {
        self.aliases.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Looks up a property-table style key such as `"Cipher.AES"` or
    /// `"Alg.Alias.Cipher.Rijndael"`.
    pub fn property(&self, key: &str) -> Option<&str> {
        let (table, rest) = match key.strip_prefix(ALIAS_PREFIX) {
            Some(rest) => (&self.aliases, rest),
            None => (&self.entries, key),
        };
        let (service, algorithm) = rest.split_once('.')?;
        let service = ServiceType::from_name(service)?;
        table
            .get(&ServiceKey::new(service, algorithm))
            .map(String::as_str)
    }

    /// Builds the engine registered as `class_name`.
    ///
    /// Every failure, including an engine of the wrong service type, is a
    /// single `IllegalState` naming provider, algorithm and class.
    pub(crate) fn instantiate(
        &self,
        service: ServiceType,
        algorithm: &str,
        class_name: &str,
    ) -> Result<Engine> {
        let engine = self.factory.instantiate(class_name).map_err(|e| {
            log::debug!("{}: instantiating {} failed: {}", self.name, class_name, e);
            CryptoError::instantiation(&self.name, algorithm, class_name)
        })?;
        if engine.service_type() != service {
            log::debug!(
                "{}: {} built a {} engine, {} expected",
                self.name,
                class_name,
                engine.service_type(),
                service
            );
            return Err(CryptoError::instantiation(&self.name, algorithm, class_name));
        }
        Ok(engine)
    }
}

/// Registration API used while a provider is assembled.
pub struct ProviderBuilder {
    name: String,
    version: String,
    info: String,
    entries: HashMap<ServiceKey, String>,
    aliases: HashMap<ServiceKey, String>,
    factory: EngineFactory,
}

impl ProviderBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "1.0".to_string(),
            info: String::new(),
            entries: HashMap::new(),
            aliases: HashMap::new(),
            factory: EngineFactory::new(),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    /// Maps `algorithm` to the implementation identifier `class_name`.
    pub fn add_algorithm(mut self, service: ServiceType, algorithm: &str, class_name: &str) -> Self {
        self.entries
            .insert(ServiceKey::new(service, algorithm), class_name.to_string());
        self
    }

    /// Redirects `alias` to `canonical` for lookups of `service`.
    pub fn add_alias(mut self, service: ServiceType, alias: &str, canonical: &str) -> Self {
        self.aliases
            .insert(ServiceKey::new(service, alias), canonical.to_string());
        self
    }

    /// Supplies the constructor behind an implementation identifier.
    pub fn add_constructor<F>(mut self, class_name: &str, constructor: F) -> Self
    where
        F: Fn() -> Result<Engine> + Send + Sync + 'static,
    {
        self.factory.register(class_name, constructor);
        self
    }

    /// `add_algorithm` and `add_constructor` in one step.
    pub fn register<F>(
        self,
        service: ServiceType,
        algorithm: &str,
        class_name: &str,
        constructor: F,
    ) -> Self
    where
        F: Fn() -> Result<Engine> + Send + Sync + 'static,
    {
        self.add_algorithm(service, algorithm, class_name)
            .add_constructor(class_name, constructor)
    }

    pub fn build(self) -> Provider {
        for (key, class_name) in &self.entries {
            if !self.factory.contains(class_name) {
                log::warn!(
                    "provider {}: {} maps to {} which has no constructor",
                    self.name,
                    key,
                    class_name
                );
            }
        }
        Provider {
            name: self.name,
            version: self.version,
            info: self.info,
            entries: self.entries,
            aliases: self.aliases,
            factory: self.factory,
        }
    }
}
