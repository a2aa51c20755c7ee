// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Engine contracts.
//!
//! Concrete algorithms live outside this crate; they plug in by implementing
//! one of the traits below and registering a constructor with a
//! [`Provider`](crate::provider::Provider). Optional capabilities (key
//! wrapping, key sizing) are reported through `Option` accessors instead of
//! default methods that fail.

use crate::error::{CryptoError, Result};
use crate::key::{Key, KeySpec};
use crate::params::{AlgorithmParams, ParameterSpec};
use crate::types::{KeyType, OperationMode, ServiceType};
use rand::RngCore;

/// Contract every cipher engine satisfies.
pub trait CipherSpi: Send {
    /// Select a feedback mode by name. Unknown modes are `NoSuchAlgorithm`.
    fn set_mode(&mut self, mode: &str) -> Result<()>;

    /// Select a padding scheme by name. Unknown paddings are `NoSuchPadding`.
    fn set_padding(&mut self, padding: &str) -> Result<()>;

    /// Block size in bytes, `0` for stream ciphers.
    fn block_size(&self) -> usize;

    /// Upper bound on the output of a `do_final` fed `input_len` more bytes,
    /// counting anything already buffered.
    fn output_size(&self, input_len: usize) -> usize;

    /// Upper bound on the output of an `update` fed `input_len` bytes.
    fn update_output_size(&self, input_len: usize) -> usize {
        self.output_size(input_len)
    }

    fn iv(&self) -> Option<Vec<u8>>;

    fn parameters(&self) -> Option<AlgorithmParams>;

    fn init(
        &mut self,
        mode: OperationMode,
        key: &Key,
        params: Option<&ParameterSpec>,
        random: &mut dyn RngCore,
    ) -> Result<()>;

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Writes the update output to `output`, returning the byte count.
    fn update_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        ensure_capacity(self.update_output_size(input.len()), output.len())?;
        let produced = self.update(input)?;
        copy_out(&produced, output)
    }

    /// Processes the remaining input and resets the engine to its
    /// post-`init` state.
    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    fn do_final_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        ensure_capacity(self.output_size(input.len()), output.len())?;
        let produced = self.do_final(input)?;
        copy_out(&produced, output)
    }

    fn key_wrapping(&mut self) -> Option<&mut dyn KeyWrapping> {
        None
    }

    fn key_sizing(&self) -> Option<&dyn KeySizing> {
        None
    }
}

/// Optional cipher capability: wrapping keys for transport.
pub trait KeyWrapping: Send {
    fn wrap(&mut self, key: &Key) -> Result<Vec<u8>>;

    fn unwrap(&mut self, wrapped: &[u8], algorithm: &str, key_type: KeyType) -> Result<Key>;
}

/// Optional cipher capability: reporting the effective size of a key.
pub trait KeySizing {
    /// Key size in bits as the engine sees it.
    fn key_size(&self, key: &Key) -> Result<usize>;
}

pub trait MacSpi: Send {
    fn mac_length(&self) -> usize;

    fn init(&mut self, key: &Key, params: Option<&ParameterSpec>) -> Result<()>;

    fn update(&mut self, input: &[u8]) -> Result<()>;

    /// Returns the tag and resets for another message under the same key.
    fn do_final(&mut self) -> Result<Vec<u8>>;

    fn reset(&mut self);
}

pub trait KeyGeneratorSpi: Send {
    fn init_with_size(&mut self, bits: usize, random: &mut dyn RngCore) -> Result<()>;

    fn init_with_params(&mut self, params: &ParameterSpec, random: &mut dyn RngCore)
        -> Result<()>;

    fn generate_key(&mut self, random: &mut dyn RngCore) -> Result<Key>;
}

pub trait KeyAgreementSpi: Send {
    fn init(
        &mut self,
        key: &Key,
        params: Option<&ParameterSpec>,
        random: &mut dyn RngCore,
    ) -> Result<()>;

    fn do_phase(&mut self, key: &Key, last_phase: bool) -> Result<Option<Key>>;

    fn generate_secret(&mut self) -> Result<Vec<u8>>;

    fn generate_secret_key(&mut self, algorithm: &str) -> Result<Key> {
        let secret = self.generate_secret()?;
        Ok(Key::secret(algorithm, &secret))
    }
}

pub trait SecretKeyFactorySpi: Send {
    fn generate_secret(&mut self, spec: &KeySpec) -> Result<Key>;

    fn key_spec(&mut self, key: &Key) -> Result<KeySpec>;

    fn translate_key(&mut self, key: &Key) -> Result<Key>;
}

pub trait AlgorithmParametersSpi: Send {
    fn init(&mut self, spec: &ParameterSpec) -> Result<()>;

    fn init_encoded(&mut self, encoded: &[u8]) -> Result<()>;

    fn encoded(&self) -> Result<Vec<u8>>;

    fn parameter_spec(&self) -> Result<ParameterSpec>;
}

pub trait AlgorithmParameterGeneratorSpi: Send {
    fn init(&mut self, size: usize, random: &mut dyn RngCore) -> Result<()>;

    fn init_with_spec(&mut self, spec: &ParameterSpec, random: &mut dyn RngCore) -> Result<()>;

    fn generate_parameters(&mut self, random: &mut dyn RngCore) -> Result<AlgorithmParams>;
}

/// A freshly constructed engine of one of the service types.
pub enum Engine {
    Cipher(Box<dyn CipherSpi>),
    Mac(Box<dyn MacSpi>),
    KeyGenerator(Box<dyn KeyGeneratorSpi>),
    KeyAgreement(Box<dyn KeyAgreementSpi>),
    SecretKeyFactory(Box<dyn SecretKeyFactorySpi>),
    AlgorithmParameters(Box<dyn AlgorithmParametersSpi>),
    AlgorithmParameterGenerator(Box<dyn AlgorithmParameterGeneratorSpi>),
}

macro_rules! engine_accessor {
    ($($variant:ident => $method:ident : $spi:ident),* $(,)?) => {
        impl Engine {
            pub fn service_type(&self) -> ServiceType {
                match self {
                    $(Engine::$variant(_) => ServiceType::$variant,)*
                }
            }

            $(
                pub fn $method(self) -> Option<Box<dyn $spi>> {
                    match self {
                        Engine::$variant(engine) => Some(engine),
                        _ => None,
                    }
                }
            )*
        }
    };
}

engine_accessor! {
    Cipher => into_cipher: CipherSpi,
    Mac => into_mac: MacSpi,
    KeyGenerator => into_key_generator: KeyGeneratorSpi,
    KeyAgreement => into_key_agreement: KeyAgreementSpi,
    SecretKeyFactory => into_secret_key_factory: SecretKeyFactorySpi,
    AlgorithmParameters => into_algorithm_parameters: AlgorithmParametersSpi,
    AlgorithmParameterGenerator => into_algorithm_parameter_generator: AlgorithmParameterGeneratorSpi,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Engine::{}", self.service_type())
    }
}

fn ensure_capacity(needed: usize, available: usize) -> Result<()> {
    if available < needed {
        return Err(CryptoError::ShortBuffer { needed, available });
    }
    Ok(())
}

fn copy_out(produced: &[u8], output: &mut [u8]) -> Result<usize> {
    ensure_capacity(produced.len(), output.len())?;
    output[..produced.len()].copy_from_slice(produced);
    Ok(produced.len())
}
