// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Test engines shared by the unit and integration suites.

#![allow(dead_code)]

use ciphersvc::params::AlgorithmParams;
use ciphersvc::spi::{CipherSpi, KeyWrapping};
use ciphersvc::{CryptoError, Engine, Key, KeyType, OperationMode, ParameterSpec, Provider, Result};
use rand::RngCore;
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn count(log: &CallLog, call: &str) -> usize {
    log.lock().unwrap().iter().filter(|c| c.ends_with(call)).count()
}

pub fn secret_key() -> Key {
    Key::secret("TEST", &[0x42u8; 16])
}

/// Pass-through cipher that records every engine call as `tag:call`.
///
/// Mode `HOLD` makes `update` buffer everything until `do_final`; mode or
/// padding `BOGUS` is rejected.
pub struct RecordingCipher {
    tag: String,
    log: CallLog,
    hold: bool,
    held: Vec<u8>,
}

impl RecordingCipher {
    pub fn new(tag: &str, log: &CallLog) -> Self {
        Self {
            tag: tag.to_string(),
            log: log.clone(),
            hold: false,
            held: Vec::new(),
        }
    }

    fn record(&self, call: String) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.tag, call));
    }
}

impl CipherSpi for RecordingCipher {
    fn set_mode(&mut self, mode: &str) -> Result<()> {
        if mode == "BOGUS" {
            return Err(CryptoError::NoSuchAlgorithm(mode.to_string()));
        }
        self.hold = mode == "HOLD";
        self.record(format!("mode:{}", mode));
        Ok(())
    }

    fn set_padding(&mut self, padding: &str) -> Result<()> {
        if padding == "BOGUS" {
            return Err(CryptoError::NoSuchPadding(padding.to_string()));
        }
        self.record(format!("padding:{}", padding));
        Ok(())
    }

    fn block_size(&self) -> usize {
        0
    }

    fn output_size(&self, input_len: usize) -> usize {
        self.held.len() + input_len
    }

    fn iv(&self) -> Option<Vec<u8>> {
        None
    }

    fn parameters(&self) -> Option<AlgorithmParams> {
        None
    }

    fn init(
        &mut self,
        mode: OperationMode,
        key: &Key,
        _params: Option<&ParameterSpec>,
        _random: &mut dyn RngCore,
    ) -> Result<()> {
        self.record(format!("init:{}", mode));
        if key.encoded().is_empty() {
            return Err(CryptoError::InvalidKey("empty".into()));
        }
        self.held.clear();
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.record("update".into());
        if self.hold {
            self.held.extend_from_slice(input);
            return Ok(Vec::new());
        }
        Ok(input.to_vec())
    }

    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.record("do_final".into());
        let mut out = std::mem::take(&mut self.held);
        out.extend_from_slice(input);
        Ok(out)
    }

    fn key_wrapping(&mut self) -> Option<&mut dyn KeyWrapping> {
        Some(self)
    }
}

impl KeyWrapping for RecordingCipher {
    fn wrap(&mut self, key: &Key) -> Result<Vec<u8>> {
        self.record("wrap".into());
        Ok(key.encoded().to_vec())
    }

    fn unwrap(&mut self, wrapped: &[u8], algorithm: &str, key_type: KeyType) -> Result<Key> {
        self.record("unwrap".into());
        Ok(Key::new(key_type, algorithm, "RAW", wrapped.to_vec()))
    }
}

/// Provider registering each of `algorithms` as a recording cipher.
pub fn recording_provider(name: &str, algorithms: &[&str], log: &CallLog) -> Provider {
    let tag = name.to_lowercase();
    algorithms.iter().fold(Provider::builder(name), |builder, algorithm| {
        let log = log.clone();
        let tag = tag.clone();
        let class = format!("{}.{}", tag, algorithm);
        builder.register(
            ciphersvc::ServiceType::Cipher,
            algorithm,
            &class,
            move || Ok(Engine::Cipher(Box::new(RecordingCipher::new(&tag, &log)))),
        )
    })
    .build()
}

/// Stream cipher XOR-ing input with the cycled key bytes.
pub struct XorCipher {
    key: Vec<u8>,
    position: usize,
}

impl XorCipher {
    pub fn new() -> Self {
        Self {
            key: Vec::new(),
            position: 0,
        }
    }

    fn apply(&mut self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .map(|b| {
                let k = self.key[self.position % self.key.len()];
                self.position += 1;
                b ^ k
            })
            .collect()
    }
}

impl CipherSpi for XorCipher {
    fn set_mode(&mut self, mode: &str) -> Result<()> {
        match mode.to_uppercase().as_str() {
            "NONE" | "ECB" => Ok(()),
            _ => Err(CryptoError::NoSuchAlgorithm(format!("XOR has no {} mode", mode))),
        }
    }

    fn set_padding(&mut self, padding: &str) -> Result<()> {
        if padding.eq_ignore_ascii_case("NoPadding") {
            return Ok(());
        }
        Err(CryptoError::NoSuchPadding(padding.to_string()))
    }

    fn block_size(&self) -> usize {
        0
    }

    fn output_size(&self, input_len: usize) -> usize {
        input_len
    }

    fn iv(&self) -> Option<Vec<u8>> {
        None
    }

    fn parameters(&self) -> Option<AlgorithmParams> {
        None
    }

    fn init(
        &mut self,
        _mode: OperationMode,
        key: &Key,
        _params: Option<&ParameterSpec>,
        _random: &mut dyn RngCore,
    ) -> Result<()> {
        if key.encoded().is_empty() {
            return Err(CryptoError::InvalidKey("XOR needs key bytes".into()));
        }
        self.key = key.encoded().to_vec();
        self.position = 0;
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.apply(input))
    }

    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let out = self.apply(input);
        self.position = 0;
        Ok(out)
    }
}
