// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("No such algorithm: {0}")]
    NoSuchAlgorithm(String),

    #[error("No such provider: {0}")]
    NoSuchProvider(String),

    #[error("No such padding: {0}")]
    NoSuchPadding(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid algorithm parameter: {0}")]
    InvalidAlgorithmParameter(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Illegal block size: {0}")]
    IllegalBlockSize(String),

    #[error("Bad padding: {0}")]
    BadPadding(String),

    #[error("Output buffer too short: need {needed} bytes, {available} available")]
    ShortBuffer { needed: usize, available: usize },

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO Error: {0}")]
    Io(String),
}

impl CryptoError {
    /// Error for an engine that could not be produced from its registration.
    pub(crate) fn instantiation(provider: &str, algorithm: &str, class_name: &str) -> Self {
        CryptoError::IllegalState(format!(
            "algorithm {} in provider {} but no class \"{}\" found",
            algorithm, provider, class_name
        ))
    }
}

impl From<std::io::Error> for CryptoError {
    fn from(error: std::io::Error) -> Self {
        CryptoError::Io(error.to_string())
    }
}

impl From<toml::de::Error> for CryptoError {
    fn from(error: toml::de::Error) -> Self {
        CryptoError::Config(error.to_string())
    }
}

impl From<rand::Error> for CryptoError {
    fn from(error: rand::Error) -> Self {
        CryptoError::IllegalState(format!("random source failed: {}", error))
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
