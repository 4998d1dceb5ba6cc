//! # eccrypt
//!
//! ECDSA over registrable short-Weierstrass curves, with key and signature
//! encodings that interoperate with OpenSSL.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! eccrypt = "0.3"
//! ```
//!
//! ```no_run
//! use eccrypt::prelude::*;
//!
//! # fn main() -> eccrypt::api::Result<()> {
//! let private_key = PrivateKey::generate(std::sync::Arc::new(Curve::secp256k1()));
//! let signature = sign(b"message", &private_key)?;
//! assert!(verify(b"message", &signature, &private_key.public_key()));
//! println!("{}", private_key.public_key().to_pem());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `sign` (default): keys, signatures and the ECDSA scheme
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`eccrypt-api`]: error type and trait seams
//! - [`eccrypt-params`]: curve constants and encoding tags
//! - [`eccrypt-algorithms`]: curves, the registry, point arithmetic, DER/OID/PEM
//! - [`eccrypt-sign`]: ECDSA, keys and signatures

// Core re-exports (always available)
pub use eccrypt_algorithms as algorithms;
pub use eccrypt_api as api;
pub use eccrypt_params as params;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use eccrypt_sign as sign;

// Collaborator crates that appear in public signatures
pub use num_bigint;
pub use rand;
pub use sha2;

/// Common imports for eccrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{DerSerialize, Serialize, SerializeSecret, SignatureScheme};

    // Curves and encodings
    pub use crate::algorithms::{Curve, CurveRegistry, Oid, Point, PointFormat};

    #[cfg(feature = "sign")]
    pub use crate::sign::{sign, verify, Ecdsa, PrivateKey, PublicKey, Signature};
}
