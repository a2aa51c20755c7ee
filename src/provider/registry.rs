// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::provider::Provider;
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};

/// Ordered table of installed providers.
///
/// Installation order is search priority. Providers are never removed or
/// reordered. Registration is expected to finish before resolution starts;
/// the lock only keeps concurrent readers consistent.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<Arc<Provider>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the bundled provider.
    #[cfg(feature = "builtin")]
    pub fn with_builtin() -> Self {
        Self {
            providers: RwLock::new(vec![Arc::new(crate::builtin::provider())]),
        }
    }

    /// Appends `provider` and returns its 1-based position, or `None` when a
    /// provider with the same name is already installed.
    pub fn install(&self, provider: Provider) -> Result<Option<usize>> {
        self.install_shared(Arc::new(provider))
    }

    pub fn install_shared(&self, provider: Arc<Provider>) -> Result<Option<usize>> {
        let mut providers = self
            .providers
            .write()
            .map_err(|_| CryptoError::IllegalState("Registry Lock".into()))?;

        if providers.iter().any(|p| p.name() == provider.name()) {
            log::debug!("provider {} already installed", provider.name());
            return Ok(None);
        }

        log::info!(
            "installing provider {} {} at position {}",
            provider.name(),
            provider.version(),
            providers.len() + 1
        );
        providers.push(provider);
        Ok(Some(providers.len()))
    }

    /// Snapshot of the providers in search order.
    pub fn providers(&self) -> Result<Vec<Arc<Provider>>> {
        let providers = self
            .providers
            .read()
            .map_err(|_| CryptoError::IllegalState("Registry Lock".into()))?;
        Ok(providers.clone())
    }

    pub fn by_name(&self, name: &str) -> Result<Option<Arc<Provider>>> {
        let providers = self
            .providers
            .read()
            .map_err(|_| CryptoError::IllegalState("Registry Lock".into()))?;
        Ok(providers.iter().find(|p| p.name() == name).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let providers = self
            .providers
            .read()
            .map_err(|_| CryptoError::IllegalState("Registry Lock".into()))?;
        Ok(providers.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

lazy_static! {
    /// Process-wide registry for callers that want ambient provider state.
    pub static ref REGISTRY: ProviderRegistry = ProviderRegistry::new();
}
