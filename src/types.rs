// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use serde::{Deserialize, Serialize};

/// Kinds of service a provider can register implementations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Cipher,
    Mac,
    KeyGenerator,
    KeyAgreement,
    SecretKeyFactory,
    AlgorithmParameters,
    AlgorithmParameterGenerator,
}

impl ServiceType {
    pub const ALL: [ServiceType; 7] = [
        ServiceType::Cipher,
        ServiceType::Mac,
        ServiceType::KeyGenerator,
        ServiceType::KeyAgreement,
        ServiceType::SecretKeyFactory,
        ServiceType::AlgorithmParameters,
        ServiceType::AlgorithmParameterGenerator,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cipher => "Cipher",
            Self::Mac => "Mac",
            Self::KeyGenerator => "KeyGenerator",
            Self::KeyAgreement => "KeyAgreement",
            Self::SecretKeyFactory => "SecretKeyFactory",
            Self::AlgorithmParameters => "AlgorithmParameters",
            Self::AlgorithmParameterGenerator => "AlgorithmParameterGenerator",
        }
    }

    /// Parses the property-table prefix form (`"Cipher"`, `"Mac"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation a cipher front is initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationMode {
    Encrypt,
    Decrypt,
    Wrap,
    Unwrap,
}

impl OperationMode {
    pub const fn code(&self) -> i32 {
        match self {
            Self::Encrypt => 1,
            Self::Decrypt => 2,
            Self::Wrap => 3,
            Self::Unwrap => 4,
        }
    }

    /// Encrypt and Decrypt are the modes that stream data through update/do_final.
    pub const fn is_data_mode(&self) -> bool {
        matches!(self, Self::Encrypt | Self::Decrypt)
    }
}

impl TryFrom<i32> for OperationMode {
    type Error = CryptoError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::Encrypt),
            2 => Ok(Self::Decrypt),
            3 => Ok(Self::Wrap),
            4 => Ok(Self::Unwrap),
            other => Err(CryptoError::IllegalArgument(format!(
                "invalid operation mode: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Encrypt => "ENCRYPT",
            Self::Decrypt => "DECRYPT",
            Self::Wrap => "WRAP",
            Self::Unwrap => "UNWRAP",
        };
        write!(f, "{name}")
    }
}

/// Kind of key an unwrap operation must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    Public,
    Private,
    Secret,
}

impl KeyType {
    pub const fn code(&self) -> i32 {
        match self {
            Self::Public => 1,
            Self::Private => 2,
            Self::Secret => 3,
        }
    }
}

impl TryFrom<i32> for KeyType {
    type Error = CryptoError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::Public),
            2 => Ok(Self::Private),
            3 => Ok(Self::Secret),
            other => Err(CryptoError::IllegalArgument(format!(
                "invalid key type: {}",
                other
            ))),
        }
    }
}
