//! Curves defined at runtime and resolved through a registry

use eccrypt::prelude::*;
use eccrypt_tests::vectors::{BRAINPOOL_P256T1, FRP256V1};
use eccrypt_tests::{custom_curve, rng, seeded_key};
use std::sync::Arc;

fn registry_with_frp() -> (CurveRegistry, Arc<Curve>) {
    let registry = CurveRegistry::with_builtins();
    let frp = registry.register(custom_curve(&FRP256V1)).unwrap();
    (registry, frp)
}

#[test]
fn test_sign_verify_on_registered_curve() {
    let (_, frp) = registry_with_frp();
    let private_key = seeded_key(frp, 1);
    let public_key = private_key.public_key();

    let signature =
        Ecdsa::<sha2::Sha256>::sign_with_rng(b"custom curve", &private_key, &mut rng(2)).unwrap();
    assert!(verify(b"custom curve", &signature, &public_key));
    assert!(!verify(b"another message", &signature, &public_key));
}

#[test]
fn test_der_and_pem_through_local_registry() {
    let (registry, frp) = registry_with_frp();
    let private_key = seeded_key(frp, 3);

    let decoded = PrivateKey::from_pem_with(&private_key.to_pem(), &registry).unwrap();
    assert_eq!(decoded, private_key);
    assert_eq!(decoded.curve().name(), "frp256v1");

    let public_key = private_key.public_key();
    let decoded = PublicKey::from_der_with(&public_key.to_der(), &registry).unwrap();
    assert_eq!(decoded, public_key);

    let compressed = public_key.to_compressed();
    assert_eq!(
        PublicKey::from_compressed(&compressed, Arc::clone(public_key.curve())).unwrap(),
        public_key
    );
}

#[test]
fn test_curve_unknown_to_shared_registry() {
    let (_, frp) = registry_with_frp();
    let der = seeded_key(frp, 4).to_der();

    // the local registration does not leak into the shared one
    match PrivateKey::from_der(&der) {
        Err(Error::UnknownCurve { oid, .. }) => assert_eq!(oid, FRP256V1.oid.to_vec()),
        other => panic!("expected UnknownCurve, got {other:?}"),
    }
}

#[test]
fn test_unregistered_brainpool_key_is_rejected() {
    let brainpool = Arc::new(custom_curve(&BRAINPOOL_P256T1));
    let public_key = seeded_key(Arc::clone(&brainpool), 5).public_key();

    let err = PublicKey::from_pem_with(&public_key.to_pem(), &CurveRegistry::with_builtins())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("1.3.36.3.3.2.8.1.1.8"));
    assert!(message.contains("secp256k1"));
    assert!(message.contains("prime256v1"));

    // registering it makes the same PEM readable
    let registry = CurveRegistry::with_builtins();
    registry.register(custom_curve(&BRAINPOOL_P256T1)).unwrap();
    assert_eq!(
        PublicKey::from_pem_with(&public_key.to_pem(), &registry).unwrap(),
        public_key
    );
}

#[test]
fn test_duplicate_oid_is_rejected() {
    let (registry, _) = registry_with_frp();
    let before = registry.len();
    let err = registry.register(custom_curve(&FRP256V1)).unwrap_err();
    assert!(matches!(err, Error::DuplicateCurve { .. }));
    assert_eq!(registry.len(), before);
}

#[test]
fn test_invalid_generator_is_rejected() {
    let mut params = FRP256V1;
    params.gy = "01";
    let result = Curve::new(
        params.name,
        eccrypt_tests::int(params.a),
        eccrypt_tests::int(params.b),
        eccrypt_tests::int(params.p),
        eccrypt_tests::int(params.n),
        eccrypt_tests::int(params.gx),
        eccrypt_tests::int(params.gy),
        Oid::new(params.oid).unwrap(),
    );
    assert!(matches!(result, Err(Error::InvalidPoint { .. })));
}
