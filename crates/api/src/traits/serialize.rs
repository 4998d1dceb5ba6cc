// File: crates/api/src/traits/serialize.rs

//! Traits for byte serialization of keys and signatures.

use crate::Result;
use zeroize::Zeroizing;

/// A trait for public types that can be serialized to and from raw bytes.
pub trait Serialize: Sized {
    /// Creates an object from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
    /// Converts the object to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;
}

/// A trait for secret types whose byte form must not outlive its use.
///
/// Decoding is left to the implementor since secrets are usually only
/// meaningful relative to some context, such as a curve.
pub trait SerializeSecret {
    /// Converts the object to a byte vector that is zeroized on drop.
    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>>;
}

/// A trait for types with a DER structure and a PEM label.
///
/// The label is the text that appears in `-----BEGIN <label>-----`.
pub trait DerSerialize: Sized {
    /// PEM label used when the DER is wrapped as text
    const PEM_LABEL: &'static str;

    /// Encode as DER bytes.
    fn to_der(&self) -> Vec<u8>;

    /// Decode from DER bytes, validating the structure and its contents.
    fn from_der(der: &[u8]) -> Result<Self>;
}
