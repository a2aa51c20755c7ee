// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use crate::spi::Engine;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a fresh engine each time it is called.
pub type Constructor = Arc<dyn Fn() -> Result<Engine> + Send + Sync>;

/// Table from implementation identifier ("class name") to constructor.
///
/// Populated while a provider is being built; lookups of identifiers that
/// were never registered fail with `IllegalState`.
#[derive(Clone, Default)]
pub struct EngineFactory {
    constructors: HashMap<String, Constructor>,
}

impl EngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, class_name: &str, constructor: F)
    where
        F: Fn() -> Result<Engine> + Send + Sync + 'static,
    {
        self.constructors
            .insert(class_name.to_string(), Arc::new(constructor));
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn instantiate(&self, class_name: &str) -> Result<Engine> {
        let constructor = self.constructors.get(class_name).ok_or_else(|| {
            CryptoError::IllegalState(format!("class {} not found", class_name))
        })?;
        constructor().map_err(|e| match e {
            CryptoError::IllegalState(msg) => CryptoError::IllegalState(msg),
            other => CryptoError::IllegalState(format!(
                "class {} could not be instantiated: {}",
                class_name, other
            )),
        })
    }
}

impl std::fmt::Debug for EngineFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.class_names().collect();
        names.sort_unstable();
        f.debug_struct("EngineFactory")
            .field("constructors", &names)
            .finish()
    }
}
