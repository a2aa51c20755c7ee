// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::provider::ProviderBuilder;
use crate::types::ServiceType;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Longest alias chain followed before resolution gives up.
pub const DEFAULT_MAX_ALIAS_HOPS: usize = 16;

/// Staging buffer size of the stream adapters.
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 2048;

/// Tunables of the resolution layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub max_alias_hops: usize,
    pub stream_buffer_size: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_alias_hops: DEFAULT_MAX_ALIAS_HOPS,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.max_alias_hops == 0 {
            return Err(CryptoError::Config(
                "max_alias_hops must be at least 1".into(),
            ));
        }
        if self.stream_buffer_size == 0 {
            return Err(CryptoError::Config(
                "stream_buffer_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlgorithmEntry {
    pub service: ServiceType,
    pub name: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasEntry {
    pub service: ServiceType,
    pub alias: String,
    pub target: String,
}

/// Registration tables of one provider, in TOML.
///
/// ```toml
/// name = "SC"
/// version = "1.0"
///
/// [[algorithms]]
/// service = "Cipher"
/// name = "AES"
/// class = "sc.AesEngine"
///
/// [[aliases]]
/// service = "Cipher"
/// alias = "Rijndael"
/// target = "AES"
/// ```
///
/// Constructors cannot be described in data; they are attached to the
/// builder in code, keyed by the same `class` identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderManifest {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub algorithms: Vec<AlgorithmEntry>,
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ProviderManifest {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        if manifest.name.is_empty() {
            return Err(CryptoError::Config("provider name is empty".into()));
        }
        Ok(manifest)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fresh builder carrying this manifest's name and tables.
    pub fn builder(&self) -> ProviderBuilder {
        self.apply(
            ProviderBuilder::new(&self.name)
                .version(&self.version)
                .info(&self.info),
        )
    }

    /// Adds this manifest's tables to an existing builder.
    pub fn apply(&self, builder: ProviderBuilder) -> ProviderBuilder {
        let builder = self.algorithms.iter().fold(builder, |b, entry| {
            b.add_algorithm(entry.service, &entry.name, &entry.class)
        });
        self.aliases.iter().fold(builder, |b, entry| {
            b.add_alias(entry.service, &entry.alias, &entry.target)
        })
    }
}
