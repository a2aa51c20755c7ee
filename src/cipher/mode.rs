// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Mode and padding names as they appear in transformations, for engines
//! that want the common spellings parsed for them.

use crate::error::{CryptoError, Result};

/// Chaining mode named in a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// No chaining; equivalent to ECB for block engines.
    None,
    Ecb,
    Cbc,
    Ctr,
    Gcm,
}

impl CipherMode {
    /// Case-insensitive; unknown names are `NoSuchAlgorithm`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "ECB" => Ok(Self::Ecb),
            "CBC" => Ok(Self::Cbc),
            "CTR" => Ok(Self::Ctr),
            "GCM" => Ok(Self::Gcm),
            _ => Err(CryptoError::NoSuchAlgorithm(format!(
                "unsupported mode: {}",
                name
            ))),
        }
    }

    /// Block-oriented modes buffer to whole blocks and take a padding scheme;
    /// stream modes such as CTR never pad.
    pub fn requires_padding(&self) -> bool {
        matches!(self, Self::None | Self::Ecb | Self::Cbc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingScheme {
    NoPadding,
    /// PKCS#5 and PKCS#7 share one implementation.
    Pkcs7,
}

impl PaddingScheme {
    /// Case-insensitive; unknown names are `NoSuchPadding`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "NOPADDING" => Ok(Self::NoPadding),
            "PKCS5PADDING" | "PKCS7PADDING" => Ok(Self::Pkcs7),
            _ => Err(CryptoError::NoSuchPadding(format!(
                "unsupported padding: {}",
                name
            ))),
        }
    }
}
