//! Shared fixtures for the eccrypt integration tests
pub mod vectors;

use std::sync::Arc;

use eccrypt::algorithms::{Curve, Oid};
use eccrypt::sign::PrivateKey;
use num_bigint::BigInt;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Parse a hex constant from a fixture
pub fn int(hex_str: &str) -> BigInt {
    BigInt::parse_bytes(hex_str.as_bytes(), 16).expect("fixture is valid hex")
}

/// Deterministic RNG for reproducible keys and nonces
pub fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Key on `curve` drawn from a seeded RNG
pub fn seeded_key(curve: Arc<Curve>, seed: u64) -> PrivateKey {
    PrivateKey::generate_with_rng(curve, &mut rng(seed))
}

/// Build a curve from one of the hex parameter sets in [`vectors`]
pub fn custom_curve(params: &vectors::CurveHex) -> Curve {
    Curve::new(
        params.name,
        int(params.a),
        int(params.b),
        int(params.p),
        int(params.n),
        int(params.gx),
        int(params.gy),
        Oid::new(params.oid).expect("fixture OID is valid"),
    )
    .expect("fixture curve is valid")
}
