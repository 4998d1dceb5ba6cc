//! ECDSA signing and key serialization
//!
//! Keys and signatures travel in the formats OpenSSL reads and writes:
//! SEC 1 `EC PRIVATE KEY`, SubjectPublicKeyInfo `PUBLIC KEY`, and the
//! `SEQUENCE { r, s }` signature encoding.

#![forbid(unsafe_code)]

pub mod ecdsa;
pub mod keys;
pub mod signature;

pub use ecdsa::{sign, verify, Ecdsa};
pub use keys::{PrivateKey, PublicKey};
pub use signature::Signature;
