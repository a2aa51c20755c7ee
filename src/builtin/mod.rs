// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! The bundled `Builtin` provider.
//!
//! | Service        | Name         | Aliases       |
//! |----------------|--------------|---------------|
//! | `Cipher`       | `NULL`       | `IDENTITY`    |
//! | `Mac`          | `HMACSHA256` | `HMAC-SHA256` |
//! | `KeyGenerator` | `RAW`        |               |
//!
//! Names are registered upper-cased, so any spelling resolves.

pub mod hmac_sha256;
pub mod identity;
pub mod keygen;

pub use hmac_sha256::HmacSha256Engine;
pub use identity::IdentityCipher;
pub use keygen::RawKeyGenerator;

use crate::provider::Provider;
use crate::spi::Engine;
use crate::types::ServiceType;

pub const PROVIDER_NAME: &str = "Builtin";

pub fn provider() -> Provider {
    Provider::builder(PROVIDER_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .info("identity cipher, HMAC-SHA256 and raw key generation")
        .register(
            ServiceType::Cipher,
            "NULL",
            "ciphersvc.builtin.IdentityCipher",
            || Ok(Engine::Cipher(Box::new(IdentityCipher::new()))),
        )
        .add_alias(ServiceType::Cipher, "IDENTITY", "NULL")
        .register(
            ServiceType::Mac,
            "HMACSHA256",
            "ciphersvc.builtin.HmacSha256",
            || Ok(Engine::Mac(Box::new(HmacSha256Engine::new()))),
        )
        .add_alias(ServiceType::Mac, "HMAC-SHA256", "HMACSHA256")
        .register(
            ServiceType::KeyGenerator,
            "RAW",
            "ciphersvc.builtin.RawKeyGenerator",
            || Ok(Engine::KeyGenerator(Box::new(RawKeyGenerator::new()))),
        )
        .build()
}
