//! Elliptic-curve primitives and encodings for eccrypt
//!
//! This crate holds the parts of the library that know nothing about keys or
//! signatures:
//!
//! - [`ec`]: curve parameters, the curve registry, and Jacobian point
//!   arithmetic over arbitrary-precision integers
//! - [`encoding`]: the DER codec with its OID sub-codec, the PEM envelope,
//!   and integer/byte conversions
//!
//! # Security
//!
//! Arithmetic is variable-time. Do not use it where an attacker can measure
//! timing of operations on secret scalars.

#![forbid(unsafe_code)]

// Error module and re-exports
pub use eccrypt_api::error::{validate, Error, Result};

// Elliptic curve primitives
pub mod ec;
pub use ec::{Curve, CurveRegistry, Point, PointFormat};

// DER, OID, PEM and integer helpers
pub mod encoding;
pub use encoding::{der, oid, pem, Oid};
