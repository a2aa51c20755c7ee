// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod agreement;
pub mod factory;
pub mod generator;

use crate::memory::SecretBytes;
use crate::types::KeyType;

pub use agreement::KeyAgreement;
pub use factory::SecretKeyFactory;
pub use generator::KeyGenerator;

/// Opaque key handed to engines.
///
/// The encoded bytes are held in [`SecretBytes`] and wiped on drop. Engines
/// decide what the encoding means; this layer only carries it.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    algorithm: String,
    format: String,
    kind: KeyType,
    encoded: SecretBytes,
}

impl Key {
    pub fn new(kind: KeyType, algorithm: &str, format: &str, encoded: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            format: format.to_string(),
            kind,
            encoded: SecretBytes::new(encoded),
        }
    }

    /// Secret key in `RAW` format.
    pub fn secret(algorithm: &str, encoded: &[u8]) -> Self {
        Self::new(KeyType::Secret, algorithm, "RAW", encoded.to_vec())
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn kind(&self) -> KeyType {
        self.kind
    }

    pub fn encoded(&self) -> &[u8] {
        self.encoded.as_bytes()
    }

    /// Key length in bits.
    pub fn bit_length(&self) -> usize {
        self.encoded.len() * 8
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("algorithm", &self.algorithm)
            .field("format", &self.format)
            .field("kind", &self.kind)
            .field("encoded", &self.encoded)
            .finish()
    }
}

/// Transparent key material accepted by a [`SecretKeyFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// Raw secret key bytes for the named algorithm.
    Secret { algorithm: String, key: SecretBytes },
    /// Password-based material; the factory derives the key.
    Password {
        password: SecretBytes,
        salt: Vec<u8>,
        iterations: u32,
        key_length: usize,
    },
}

impl KeySpec {
    pub fn secret(algorithm: &str, key: &[u8]) -> Self {
        KeySpec::Secret {
            algorithm: algorithm.to_string(),
            key: SecretBytes::from_slice(key),
        }
    }
}
