//! Interoperability with key and signature material produced by OpenSSL

use eccrypt::prelude::*;
use eccrypt_tests::vectors::{
    OpensslKey, MESSAGE, PRIME256V1, PRIME256V1_COMPRESSED_PUBLIC_PEM, SECP256K1,
    SECP256K1_COMPRESSED,
};
use eccrypt_tests::{int, rng};
use std::sync::Arc;

fn check_key(vector: &OpensslKey) {
    let private_key = PrivateKey::from_pem(vector.private_pem).unwrap();
    assert_eq!(private_key.curve().name(), vector.curve);
    assert_eq!(private_key.secret(), &int(vector.secret_hex));
    assert_eq!(private_key.to_string(), vector.secret_hex);

    // byte-exact re-emission
    assert_eq!(private_key.to_pem(), vector.private_block);

    let public_key = PublicKey::from_pem(vector.public_pem).unwrap();
    assert_eq!(public_key, private_key.public_key());
    assert_eq!(public_key.to_pem(), vector.public_pem);
}

fn check_signature(vector: &OpensslKey) {
    let public_key = PublicKey::from_pem(vector.public_pem).unwrap();
    let der = hex::decode(vector.signature_der_hex).unwrap();
    let signature = Signature::from_der(&der, false).unwrap();

    assert!(verify(MESSAGE, &signature, &public_key));
    assert!(!verify(b"This is the wrong message", &signature, &public_key));
    assert_eq!(signature.to_der(false).unwrap(), der);
}

#[test]
fn test_openssl_secp256k1_key() {
    check_key(&SECP256K1);
}

#[test]
fn test_openssl_prime256v1_key() {
    check_key(&PRIME256V1);
}

#[test]
fn test_openssl_secp256k1_signature() {
    check_signature(&SECP256K1);
}

#[test]
fn test_openssl_prime256v1_signature() {
    check_signature(&PRIME256V1);
}

#[test]
fn test_own_signature_on_openssl_key() {
    for vector in [&SECP256K1, &PRIME256V1] {
        let private_key = PrivateKey::from_pem(vector.private_pem).unwrap();
        let signature = Ecdsa::<sha2::Sha256>::sign_with_rng(MESSAGE, &private_key, &mut rng(1))
            .unwrap();
        let public_key = PublicKey::from_pem(vector.public_pem).unwrap();
        assert!(verify(MESSAGE, &signature, &public_key));

        // the DER form must survive a round trip through text
        let text = signature.to_base64(false).unwrap();
        let decoded = Signature::from_base64(&text, false).unwrap();
        assert!(verify(MESSAGE, &decoded, &public_key));
    }
}

#[test]
fn test_openssl_compressed_spki() {
    let compressed = PublicKey::from_pem(PRIME256V1_COMPRESSED_PUBLIC_PEM).unwrap();
    let uncompressed = PublicKey::from_pem(PRIME256V1.public_pem).unwrap();
    assert_eq!(compressed, uncompressed);
    assert_eq!(compressed.to_pem(), PRIME256V1.public_pem);
}

#[test]
fn test_secp256k1_compressed_vectors() {
    let curve = Arc::new(Curve::secp256k1());
    for (compressed, pem) in SECP256K1_COMPRESSED {
        let from_hex = PublicKey::from_compressed(compressed, Arc::clone(&curve)).unwrap();
        assert_eq!(from_hex.to_pem(), pem);

        let from_pem = PublicKey::from_pem(pem).unwrap();
        assert_eq!(from_pem.to_compressed(), compressed);
        assert_eq!(from_pem, from_hex);
    }
}

#[test]
fn test_builtin_curves_resolve_by_name() {
    let registry = CurveRegistry::shared();
    assert_eq!(
        registry.get_by_name("P-256").unwrap().oid().to_string(),
        "1.2.840.10045.3.1.7"
    );
    assert_eq!(
        registry.get_by_name("secp256k1").unwrap().oid().to_string(),
        "1.3.132.0.10"
    );
}
