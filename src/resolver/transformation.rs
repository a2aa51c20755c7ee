// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use std::str::FromStr;

/// `algorithm[/mode[/padding]]`.
///
/// An empty segment means "not specified", so `"DES//NoPadding"` carries a
/// padding but leaves the mode to the engine's default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transformation {
    algorithm: String,
    mode: Option<String>,
    padding: Option<String>,
}

impl Transformation {
    pub fn new(algorithm: &str, mode: Option<&str>, padding: Option<&str>) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            mode: mode.filter(|m| !m.is_empty()).map(str::to_string),
            padding: padding.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }

    pub fn parse(transformation: &str) -> Result<Self> {
        let mut segments: Vec<&str> = transformation.split('/').collect();
        // trailing empty segments are unspecified, not extra
        while segments.len() > 3 && segments.last() == Some(&"") {
            segments.pop();
        }
        if segments.len() > 3 {
            return Err(CryptoError::NoSuchAlgorithm(format!(
                "invalid transformation format: {}",
                transformation
            )));
        }

        let algorithm = segments[0];
        if algorithm.is_empty() {
            return Err(CryptoError::NoSuchAlgorithm(format!(
                "invalid transformation format: {}",
                transformation
            )));
        }

        Ok(Self::new(
            algorithm,
            segments.get(1).copied(),
            segments.get(2).copied(),
        ))
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn padding(&self) -> Option<&str> {
        self.padding.as_deref()
    }
}

impl FromStr for Transformation {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.mode, &self.padding) {
            (None, None) => write!(f, "{}", self.algorithm),
            (Some(mode), None) => write!(f, "{}/{}", self.algorithm, mode),
            (mode, Some(padding)) => write!(
                f,
                "{}/{}/{}",
                self.algorithm,
                mode.as_deref().unwrap_or(""),
                padding
            ),
        }
    }
}
