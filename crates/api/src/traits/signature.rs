//! Digital signature traits for eccrypt
//!
//! This module defines the trait that signature schemes implement. Key
//! generation is not part of it: ECDSA keys are bound to a curve chosen by
//! the caller, so they are generated through the key types themselves.

use crate::Result;

/// Core trait for digital signature schemes
///
/// # Failure semantics
///
/// `sign` reports failures (unusable key, exhausted nonce retries) as
/// errors. `verify` is total: malformed, out-of-range or forged signatures
/// yield `false` and never an error or a panic.
pub trait SignatureScheme {
    /// Private key type for this scheme
    type PrivateKey;

    /// Public key type for this scheme
    type PublicKey: Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Returns the name of this signature scheme
    fn name() -> &'static str;

    /// Sign a message with the given private key
    fn sign(message: &[u8], private_key: &Self::PrivateKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> bool;
}
