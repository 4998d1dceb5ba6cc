//! Conversions between big integers and fixed-width byte/hex strings

use eccrypt_api::error::{Error, Result};
use num_bigint::{BigInt, Sign};
use num_traits::Signed;

/// Unsigned big-endian bytes to an integer
pub fn int_from_bytes(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

/// Big-endian magnitude, left-padded with zeros to at least `width` bytes
///
/// Values that need more than `width` bytes come out longer, never
/// truncated.
pub fn int_to_padded_bytes(n: &BigInt, width: usize) -> Vec<u8> {
    let (_, magnitude) = n.to_bytes_be();
    // zero's magnitude is a single 0x00
    let magnitude: &[u8] = if magnitude == [0] { &[] } else { &magnitude };
    let mut out = vec![0u8; width.saturating_sub(magnitude.len())];
    out.extend_from_slice(magnitude);
    out
}

/// Parse an unsigned hexadecimal integer
pub fn int_from_hex(hex_str: &str) -> Result<BigInt> {
    BigInt::parse_bytes(hex_str.as_bytes(), 16)
        .filter(|n| !n.is_negative())
        .ok_or_else(|| Error::encoding("int_from_hex", format!("invalid hex integer {hex_str:?}")))
}
