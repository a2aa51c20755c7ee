// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod generator;
pub mod parameters;

pub use generator::AlgorithmParameterGenerator;
pub use parameters::AlgorithmParameters;

/// Transparent parameter material passed to engine `init` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSpec {
    /// Initialisation vector for feedback modes.
    Iv(Vec<u8>),
    /// Salt and iteration count for password-based schemes.
    Pbe { salt: Vec<u8>, iterations: u32 },
    /// Requested key or parameter size in bits.
    KeySize(usize),
    /// Engine-specific encoding the layer does not interpret.
    Encoded(Vec<u8>),
}

impl ParameterSpec {
    pub fn iv(&self) -> Option<&[u8]> {
        match self {
            ParameterSpec::Iv(iv) => Some(iv),
            _ => None,
        }
    }
}

/// Parameters an initialized engine reports back, tagged with the algorithm
/// they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmParams {
    algorithm: String,
    spec: ParameterSpec,
}

impl AlgorithmParams {
    pub fn new(algorithm: &str, spec: ParameterSpec) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            spec,
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn into_spec(self) -> ParameterSpec {
        self.spec
    }
}
