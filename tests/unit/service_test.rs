// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ciphersvc::spi::SecretKeyFactorySpi;
use ciphersvc::{
    CryptoError, Engine, Key, KeySpec, KeyType, Provider, ProviderRegistry, SecretKeyFactory,
    ServiceType,
};

/// Accepts raw specs only and normalizes algorithm names to upper case.
struct RawFactory;

impl SecretKeyFactorySpi for RawFactory {
    fn generate_secret(&mut self, spec: &KeySpec) -> ciphersvc::Result<Key> {
        match spec {
            KeySpec::Secret { algorithm, key } => {
                Ok(Key::secret(&algorithm.to_uppercase(), key.as_bytes()))
            }
            KeySpec::Password { .. } => Err(CryptoError::InvalidKey(
                "password specs need a KDF".into(),
            )),
        }
    }

    fn key_spec(&mut self, key: &Key) -> ciphersvc::Result<KeySpec> {
        Ok(KeySpec::secret(key.algorithm(), key.encoded()))
    }

    fn translate_key(&mut self, key: &Key) -> ciphersvc::Result<Key> {
        if key.kind() != KeyType::Secret {
            return Err(CryptoError::InvalidKey("secret keys only".into()));
        }
        Ok(Key::secret(&key.algorithm().to_uppercase(), key.encoded()))
    }
}

#[test]
fn test_secret_key_factory_front() {
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Raw")
                .register(ServiceType::SecretKeyFactory, "RAW", "raw.Factory", || {
                    Ok(Engine::SecretKeyFactory(Box::new(RawFactory)))
                })
                .build(),
        )
        .unwrap();

    let mut factory = SecretKeyFactory::get_instance_with_provider(&registry, "raw", "Raw").unwrap();
    assert_eq!(factory.algorithm(), "raw");

    let key = factory.generate_secret(&KeySpec::secret("aes", &[1, 2, 3])).unwrap();
    assert_eq!(key.algorithm(), "AES");
    assert_eq!(factory.key_spec(&key).unwrap(), KeySpec::secret("AES", &[1, 2, 3]));

    let private = Key::new(KeyType::Private, "rsa", "PKCS#8", vec![1]);
    assert!(matches!(
        factory.translate_key(&private),
        Err(CryptoError::InvalidKey(_))
    ));
}

#[test]
fn test_front_of_wrong_service_type_not_found() {
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Raw")
                .register(ServiceType::SecretKeyFactory, "RAW", "raw.Factory", || {
                    Ok(Engine::SecretKeyFactory(Box::new(RawFactory)))
                })
                .build(),
        )
        .unwrap();

    assert!(matches!(
        ciphersvc::KeyGenerator::get_instance(&registry, "RAW"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
}

#[test]
fn test_engine_of_wrong_type_is_illegal_state() {
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Confused")
                .register(ServiceType::Mac, "RAW", "confused.Factory", || {
                    Ok(Engine::SecretKeyFactory(Box::new(RawFactory)))
                })
                .build(),
        )
        .unwrap();

    assert!(matches!(
        ciphersvc::Mac::get_instance(&registry, "RAW"),
        Err(CryptoError::IllegalState(_))
    ));
}

#[cfg(feature = "builtin")]
mod builtin {
    use ciphersvc::{KeyGenerator, Mac, ParameterSpec, ProviderRegistry, SecureRandom};

    #[test]
    fn test_hmac_sha256_rfc4231_case_1() {
        let registry = ProviderRegistry::with_builtin();
        let mut mac = Mac::get_instance(&registry, "HmacSHA256").unwrap();
        assert_eq!(mac.mac_length(), 32);
        mac.init(&ciphersvc::Key::secret("HmacSHA256", &[0x0b; 20]))
            .unwrap();
        mac.update(b"Hi There").unwrap();
        assert_eq!(
            hex::encode(mac.do_final().unwrap()),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    #[test]
    fn test_raw_key_generator() {
        let registry = ProviderRegistry::with_builtin();
        let mut generator = KeyGenerator::get_instance(&registry, "raw").unwrap();
        assert_eq!(generator.provider().name(), "Builtin");

        let mut random = SecureRandom::new().unwrap();
        generator
            .init_with_params(&ParameterSpec::KeySize(192), &mut random)
            .unwrap();
        let key = generator.generate_key().unwrap();
        assert_eq!(key.bit_length(), 192);
        assert_eq!(key.format(), "RAW");
    }
}
