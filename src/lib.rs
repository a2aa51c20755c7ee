// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Ciphersvc Crypto Service Layer
//!
//! Provider-based resolution of cryptographic services. Providers register
//! algorithm names, aliases and engine constructors; a [`Resolver`] turns a
//! request such as `"AES/CBC/PKCS5Padding"` into a live engine, and stateful
//! fronts ([`Cipher`], [`Mac`], [`KeyGenerator`], ...) guard the engine's
//! lifecycle. [`CipherReader`] and [`CipherWriter`] drive a [`Cipher`] from
//! byte streams.
//!
//! No algorithm is implemented here beyond the small `Builtin` provider
//! (feature `builtin`).
//!
//! ```no_run
//! use ciphersvc::{Cipher, Key, OperationMode, ProviderRegistry};
//!
//! # fn main() -> ciphersvc::Result<()> {
//! let registry = ProviderRegistry::with_builtin();
//! let mut cipher = Cipher::get_instance(&registry, "NULL/ECB/PKCS5Padding")?;
//! cipher.init(OperationMode::Encrypt, &Key::secret("NULL", &[0u8; 16]))?;
//! let sealed = cipher.do_final_with(b"hello")?;
//! assert_eq!(sealed.len(), 8);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "builtin")]
pub mod builtin;
pub mod cipher;
pub mod config;
pub mod error;
pub mod key;
pub mod mac;
pub mod memory;
pub mod params;
pub mod provider;
pub mod random;
pub mod resolver;
pub mod spi;
pub mod types;

pub use cipher::{Cipher, CipherReader, CipherState, CipherWriter};
pub use config::{ProviderManifest, ResolverConfig};
pub use error::{CryptoError, Result};
pub use key::{Key, KeyAgreement, KeyGenerator, KeySpec, SecretKeyFactory};
pub use mac::Mac;
pub use memory::SecretBytes;
pub use params::{AlgorithmParameterGenerator, AlgorithmParameters, AlgorithmParams, ParameterSpec};
pub use provider::{Provider, ProviderBuilder, ProviderRegistry, REGISTRY};
pub use random::SecureRandom;
pub use resolver::{Implementation, ProviderSelector, Resolver, Transformation};
pub use spi::Engine;
pub use types::{KeyType, OperationMode, ServiceType};

/// Prepares the process-wide [`REGISTRY`].
///
/// With the `builtin` feature the bundled provider is installed; calling
/// this more than once is harmless.
///
/// # Errors
/// Returns `CryptoError::IllegalState` if the registry lock is poisoned
pub fn init() -> Result<()> {
    #[cfg(feature = "builtin")]
    {
        REGISTRY.install(builtin::provider())?;
    }
    log::debug!("ciphersvc initialized with {} provider(s)", REGISTRY.len()?);
    Ok(())
}
