//! ECDSA over any registered short-Weierstrass curve
//!
//! The message digest is read as an unsigned big-endian integer in full,
//! without truncation to the bit length of n. Nonces come from a CSPRNG;
//! there is no deterministic (RFC 6979) mode.

use core::marker::PhantomData;

use digest::Digest;
use eccrypt_algorithms::ec::{mod_inverse, random_scalar};
use eccrypt_algorithms::encoding::int_from_bytes;
use eccrypt_api::error::{Error, Result};
use eccrypt_api::SignatureScheme;
use eccrypt_params::ecdsa::ECDSA_SIGN_MAX_ATTEMPTS;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use tracing::{debug, trace, warn};

use crate::keys::{PrivateKey, PublicKey};
use crate::signature::Signature;

/// ECDSA signature scheme, generic over the message digest
///
/// Implements the signing and verification equations of FIPS 186-4,
/// Section 6.
pub struct Ecdsa<D: Digest = Sha256>(PhantomData<D>);

impl<D: Digest> Ecdsa<D> {
    /// Sign a message, drawing nonces from `rng`
    ///
    /// Algorithm:
    /// 1. h = HASH(M) as an integer
    /// 2. Pick k uniformly from [1, n-1]
    /// 3. (x₁, y₁) = k·G, r = x₁ mod n
    /// 4. s = k⁻¹(h + r·d) mod n
    /// 5. If r = 0 or s = 0, go back to step 2
    ///
    /// The recovery id records the parity of y₁, plus 2 when y₁ ≥ n.
    pub fn sign_with_rng<R: RngCore + CryptoRng + ?Sized>(
        message: &[u8],
        private_key: &PrivateKey,
        rng: &mut R,
    ) -> Result<Signature> {
        let curve = private_key.curve();
        let n = curve.n();
        let h = hash_to_int::<D>(message);

        for attempt in 1..=ECDSA_SIGN_MAX_ATTEMPTS {
            let k = random_scalar(rng, n);
            let big_r = curve.multiply_generator(&k);
            let r = big_r.x().mod_floor(n);
            if r.is_zero() {
                trace!(attempt, "degenerate nonce: r = 0");
                continue;
            }

            let s = ((&h + &r * private_key.secret()) * mod_inverse(&k, n)).mod_floor(n);
            if s.is_zero() {
                trace!(attempt, "degenerate nonce: s = 0");
                continue;
            }

            let mut recovery_id = u8::from(big_r.y().is_odd());
            if big_r.y() >= n {
                recovery_id += 2;
            }
            return Signature::new(r, s).with_recovery_id(recovery_id);
        }

        warn!(
            attempts = ECDSA_SIGN_MAX_ATTEMPTS,
            curve = curve.name(),
            "no usable nonce, giving up"
        );
        Err(Error::FatalRandomness {
            attempts: ECDSA_SIGN_MAX_ATTEMPTS,
        })
    }

    /// Check a signature
    ///
    /// Algorithm:
    /// 1. Reject if r or s is outside [1, n-1]
    /// 2. h = HASH(M) as an integer, w = s⁻¹ mod n
    /// 3. (x₁, y₁) = (h·w)·G + (r·w)·Q
    /// 4. Accept iff the sum is finite and x₁ mod n = r
    pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
        let curve = public_key.curve();
        let n = curve.n();
        let (r, s) = (signature.r(), signature.s());
        if !curve.is_scalar(r) || !curve.is_scalar(s) {
            debug!(curve = curve.name(), "signature component out of range");
            return false;
        }

        let h = hash_to_int::<D>(message);
        let w = mod_inverse(s, n);
        let u1 = curve.multiply_generator(&(&h * &w).mod_floor(n));
        let u2 = curve.multiply(public_key.point(), &(r * &w).mod_floor(n));
        let v = curve.add(&u1, &u2);
        if v.is_identity() {
            debug!(curve = curve.name(), "verification reached the point at infinity");
            return false;
        }
        &v.x().mod_floor(n) == r
    }
}

impl<D: Digest> SignatureScheme for Ecdsa<D> {
    type PrivateKey = PrivateKey;
    type PublicKey = PublicKey;
    type SignatureData = Signature;

    fn name() -> &'static str {
        "ECDSA"
    }

    fn sign(message: &[u8], private_key: &PrivateKey) -> Result<Signature> {
        Self::sign_with_rng(message, private_key, &mut rand::thread_rng())
    }

    fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
        Self::verify_signature(message, signature, public_key)
    }
}

/// Sign with SHA-256 and the thread-local CSPRNG
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Result<Signature> {
    <Ecdsa as SignatureScheme>::sign(message, private_key)
}

/// Verify a SHA-256 signature
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    Ecdsa::<Sha256>::verify_signature(message, signature, public_key)
}

fn hash_to_int<D: Digest>(message: &[u8]) -> BigInt {
    int_from_bytes(&D::digest(message))
}
