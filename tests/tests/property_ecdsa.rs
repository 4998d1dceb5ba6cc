//! Property-based tests for ECDSA and the key encodings

use eccrypt::algorithms::oid::{oid_from_hex, oid_to_hex};
use eccrypt::prelude::*;
use eccrypt_tests::{rng, seeded_key};
use proptest::prelude::*;
use std::sync::Arc;

fn builtin(which: bool) -> Arc<Curve> {
    Arc::new(if which {
        Curve::secp256k1()
    } else {
        Curve::prime256v1()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_verify_roundtrip(
        message in prop::collection::vec(any::<u8>(), 0..256),
        seed in any::<u64>(),
        which in any::<bool>(),
    ) {
        let private_key = seeded_key(builtin(which), seed);
        let public_key = private_key.public_key();
        let signature =
            Ecdsa::<sha2::Sha256>::sign_with_rng(&message, &private_key, &mut rng(seed ^ 1))
                .unwrap();
        prop_assert!(verify(&message, &signature, &public_key));

        let mut altered = message.clone();
        altered.push(0);
        prop_assert!(!verify(&altered, &signature, &public_key));
    }

    #[test]
    fn signature_der_with_recovery_roundtrip(seed in any::<u64>()) {
        let private_key = seeded_key(builtin(true), seed);
        let signature =
            Ecdsa::<sha2::Sha256>::sign_with_rng(b"recover", &private_key, &mut rng(seed))
                .unwrap();

        let der = signature.to_der(true).unwrap();
        let decoded = Signature::from_der(&der, true).unwrap();
        prop_assert_eq!(&decoded, &signature);
        prop_assert!(decoded.recovery_id().unwrap() <= 3);
    }

    #[test]
    fn private_key_der_roundtrip(seed in any::<u64>(), which in any::<bool>()) {
        let private_key = seeded_key(builtin(which), seed);
        let decoded = PrivateKey::from_der(&private_key.to_der()).unwrap();
        prop_assert_eq!(&decoded, &private_key);
        prop_assert_eq!(decoded.to_pem(), private_key.to_pem());
    }

    #[test]
    fn oid_hex_roundtrip(
        first in 0u64..3,
        second in 0u64..40,
        rest in prop::collection::vec(any::<u64>(), 0..8),
    ) {
        let mut components = vec![first, second];
        components.extend(rest);
        let oid = Oid::new(components).unwrap();
        let decoded = oid_from_hex(&oid_to_hex(&oid)).unwrap();
        prop_assert_eq!(decoded, oid);
    }
}

#[test]
fn compressed_roundtrip_1000_keys() {
    let curve = builtin(true);
    let mut rng = rng(1000);
    for _ in 0..1000 {
        let public_key = PrivateKey::generate_with_rng(Arc::clone(&curve), &mut rng).public_key();
        let compressed = public_key.to_compressed();
        assert_eq!(compressed.len(), 66);
        let decoded = PublicKey::from_compressed(&compressed, Arc::clone(&curve)).unwrap();
        assert_eq!(decoded, public_key);
    }
}
