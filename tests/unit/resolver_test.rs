// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::common::{call_log, calls, recording_provider};
use ciphersvc::{
    Cipher, CryptoError, Engine, Provider, ProviderRegistry, ProviderSelector, Resolver,
    ServiceType, Transformation,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[cfg(feature = "builtin")]
#[test]
fn test_every_builtin_entry_resolves_in_both_casings() {
    let registry = ProviderRegistry::with_builtin();
    let resolver = Resolver::new(&registry);
    let provider = registry.by_name("Builtin").unwrap().unwrap();

    let names: Vec<(ServiceType, String)> = provider
        .services()
        .map(|(key, _)| (key.service, key.algorithm.clone()))
        .chain(
            provider
                .aliases()
                .map(|(key, _)| (key.service, key.algorithm.clone())),
        )
        .collect();
    assert!(!names.is_empty());

    for (service, name) in names {
        for spelling in [name.clone(), name.to_uppercase(), name.to_lowercase()] {
            let implementation = resolver
                .resolve_service(service, &spelling, ProviderSelector::Any)
                .unwrap_or_else(|e| panic!("{}.{}: {}", service, spelling, e));
            assert_eq!(implementation.provider().name(), "Builtin");
            assert_eq!(implementation.engine().service_type(), service);
        }
    }
}

#[test]
fn test_mixed_case_registration_found_by_exact_name() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("Mixed", &["Blowfish"], &log))
        .unwrap();

    assert!(Cipher::get_instance(&registry, "Blowfish").is_ok());
    assert!(matches!(
        Cipher::get_instance(&registry, "blowfish"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
}

#[test]
fn test_transitive_aliases() {
    let log = call_log();
    let provider = Provider::builder("Chain")
        .add_alias(ServiceType::Cipher, "ONE", "TWO")
        .add_alias(ServiceType::Cipher, "TWO", "THREE")
        .add_alias(ServiceType::Cipher, "THREE", "AES")
        .build();
    let registry = ProviderRegistry::new();
    registry.install(provider).unwrap();
    registry
        .install(recording_provider("Rec", &["AES"], &log))
        .unwrap();

    // aliases are per provider; the chain above ends in a provider without AES
    assert!(Cipher::get_instance(&registry, "one").is_err());

    let provider = Arc::new(
        Provider::builder("Both")
            .add_alias(ServiceType::Cipher, "ONE", "TWO")
            .add_alias(ServiceType::Cipher, "TWO", "AES")
            .register(ServiceType::Cipher, "AES", "both.Aes", || {
                Ok(Engine::Cipher(Box::new(crate::common::XorCipher::new())))
            })
            .build(),
    );
    let cipher = Cipher::get_instance_from_provider("one/ECB/NoPadding", provider).unwrap();
    assert_eq!(cipher.provider().name(), "Both");
}

#[test]
fn test_alias_chain_reaches_same_constructor_as_target() {
    let aes_built = Arc::new(AtomicUsize::new(0));
    let des_built = Arc::new(AtomicUsize::new(0));
    let (aes_counter, des_counter) = (aes_built.clone(), des_built.clone());
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Chain")
                .add_alias(ServiceType::Cipher, "ONE", "TWO")
                .add_alias(ServiceType::Cipher, "TWO", "THREE")
                .add_alias(ServiceType::Cipher, "THREE", "AES")
                .register(ServiceType::Cipher, "AES", "chain.Aes", move || {
                    aes_counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Engine::Cipher(Box::new(crate::common::XorCipher::new())))
                })
                .register(ServiceType::Cipher, "DES", "chain.Des", move || {
                    des_counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Engine::Cipher(Box::new(crate::common::XorCipher::new())))
                })
                .build(),
        )
        .unwrap();

    let resolver = Resolver::new(&registry);
    let via_alias = resolver
        .resolve_cipher("one", ProviderSelector::Named("Chain"))
        .unwrap();
    assert_eq!(aes_built.load(Ordering::SeqCst), 1);
    let direct = resolver
        .resolve_cipher("AES", ProviderSelector::Named("Chain"))
        .unwrap();
    assert_eq!(aes_built.load(Ordering::SeqCst), 2);
    assert_eq!(des_built.load(Ordering::SeqCst), 0);
    assert!(Arc::ptr_eq(via_alias.provider(), direct.provider()));

    // a chain entry resolves the same way from the middle
    resolver
        .resolve_cipher("THREE", ProviderSelector::Named("Chain"))
        .unwrap();
    assert_eq!(aes_built.load(Ordering::SeqCst), 3);
    assert_eq!(des_built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fallback_applies_mode_then_padding() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["AES"], &log))
        .unwrap();

    let cipher = Cipher::get_instance(&registry, "AES/CBC/PKCS5Padding").unwrap();
    assert_eq!(cipher.provider().name(), "P1");
    assert_eq!(cipher.algorithm(), "AES/CBC/PKCS5Padding");
    assert_eq!(calls(&log), vec!["p1:mode:CBC", "p1:padding:PKCS5Padding"]);
}

#[test]
fn test_composed_entry_beats_earlier_bare_entry() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["AES"], &log))
        .unwrap();
    registry
        .install(recording_provider("P2", &["AES/CBC/PKCS5PADDING"], &log))
        .unwrap();

    let cipher = Cipher::get_instance(&registry, "AES/CBC/PKCS5Padding").unwrap();
    assert_eq!(cipher.provider().name(), "P2");
    assert!(calls(&log).is_empty());
}

#[test]
fn test_elided_mode_skips_set_mode() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["DES"], &log))
        .unwrap();

    Cipher::get_instance(&registry, "DES//NoPadding").unwrap();
    assert_eq!(calls(&log), vec!["p1:padding:NoPadding"]);

    Cipher::get_instance(&registry, "DES/ECB").unwrap();
    assert_eq!(calls(&log).last().unwrap(), "p1:mode:ECB");
}

#[test]
fn test_rejected_mode_is_not_retried_elsewhere() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["AES"], &log))
        .unwrap();
    registry
        .install(recording_provider("P2", &["AES"], &log))
        .unwrap();

    assert!(matches!(
        Cipher::get_instance(&registry, "AES/BOGUS/NoPadding"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
    assert!(matches!(
        Cipher::get_instance(&registry, "AES/CBC/BOGUS"),
        Err(CryptoError::NoSuchPadding(_))
    ));
    assert!(calls(&log).iter().all(|c| c.starts_with("p1:")));
}

#[test]
fn test_unknown_provider_fails_before_any_lookup() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = built.clone();
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Counted")
                .register(ServiceType::Cipher, "AES", "counted.Aes", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Engine::Cipher(Box::new(crate::common::XorCipher::new())))
                })
                .build(),
        )
        .unwrap();

    assert!(matches!(
        Cipher::get_instance_with_provider(&registry, "AES", "Missing"),
        Err(CryptoError::NoSuchProvider(_))
    ));
    assert!(matches!(
        Cipher::get_instance_with_provider(&registry, "", "Missing"),
        Err(CryptoError::NoSuchProvider(_))
    ));
    assert_eq!(built.load(Ordering::SeqCst), 0);

    Cipher::get_instance_with_provider(&registry, "aes", "Counted").unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn test_missing_constructor_is_single_illegal_state() {
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Broken")
                .add_algorithm(ServiceType::Cipher, "AES", "broken.NoSuchClass")
                .build(),
        )
        .unwrap();

    match Cipher::get_instance(&registry, "AES") {
        Err(CryptoError::IllegalState(message)) => {
            assert!(message.contains("Broken"));
            assert!(message.contains("AES"));
            assert!(message.contains("broken.NoSuchClass"));
        }
        other => panic!("expected IllegalState, got {:?}", other),
    }
}

#[test]
fn test_failing_constructor_is_illegal_state() {
    let registry = ProviderRegistry::new();
    registry
        .install(
            Provider::builder("Faulty")
                .register(ServiceType::Cipher, "AES", "faulty.Aes", || {
                    Err(CryptoError::InvalidKey("constructor blew up".into()))
                })
                .build(),
        )
        .unwrap();

    assert!(matches!(
        Cipher::get_instance(&registry, "AES/ECB/NoPadding"),
        Err(CryptoError::IllegalState(_))
    ));
}

#[test]
fn test_transformation_shapes() {
    let parsed = Transformation::parse("DES//NoPadding").unwrap();
    assert_eq!(parsed.algorithm(), "DES");
    assert_eq!(parsed.mode(), None);
    assert_eq!(parsed.padding(), Some("NoPadding"));
    assert_eq!(parsed.to_string(), "DES//NoPadding");

    let parsed: Transformation = "AES/GCM".parse().unwrap();
    assert_eq!(parsed.mode(), Some("GCM"));
    assert_eq!(parsed.padding(), None);

    assert!(matches!(
        Transformation::parse("A/B/C/D"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
    assert!(matches!(
        Transformation::parse("/CBC/NoPadding"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
}

#[test]
fn test_four_segments_rejected_by_resolution() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["AES"], &log))
        .unwrap();

    assert!(matches!(
        Cipher::get_instance(&registry, "AES/CBC/PKCS5Padding/EXTRA"),
        Err(CryptoError::NoSuchAlgorithm(_))
    ));
    assert!(calls(&log).is_empty());
}

#[test]
fn test_trailing_empty_segments_resolve() {
    let log = call_log();
    let registry = ProviderRegistry::new();
    registry
        .install(recording_provider("P1", &["AES"], &log))
        .unwrap();

    let cipher = Cipher::get_instance(&registry, "AES/CBC//").unwrap();
    assert_eq!(cipher.provider().name(), "P1");
    assert_eq!(calls(&log), vec!["p1:mode:CBC"]);
}
