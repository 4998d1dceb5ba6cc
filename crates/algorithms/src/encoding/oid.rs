//! Object identifiers and their base-128 content encoding

use core::fmt;
use core::str::FromStr;

use eccrypt_api::error::{format_oid, validate, Error, Result};
use eccrypt_params::encoding::EC_PUBLIC_KEY_OID;

/// An ASN.1 object identifier
///
/// Equality and hashing cover the full arc sequence, which is what the curve
/// registry keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid(pub(crate) Vec<u64>);

impl Oid {
    /// Build an OID from its arcs
    ///
    /// Requires at least two arcs, a first arc of 0, 1 or 2, and a second arc
    /// below 40 unless the first is 2.
    pub fn new(components: impl Into<Vec<u64>>) -> Result<Self> {
        let components = components.into();
        validate::parameter(components.len() >= 2, "Oid::new", "at least two arcs required")?;
        validate::parameter(components[0] <= 2, "Oid::new", "first arc must be 0, 1 or 2")?;
        validate::parameter(
            components[0] == 2 || components[1] < 40,
            "Oid::new",
            "second arc must be below 40",
        )?;
        validate::parameter(
            components[1].checked_add(40 * components[0]).is_some(),
            "Oid::new",
            "second arc too large",
        )?;
        Ok(Oid(components))
    }

    /// `id-ecPublicKey`, 1.2.840.10045.2.1
    pub fn ec_public_key() -> Self {
        Oid(EC_PUBLIC_KEY_OID.to_vec())
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// DER content octets (without tag and length)
    pub fn to_der_content(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        // Oid::new guarantees the sum does not overflow
        push_base128(&mut out, 40 * self.0[0] + self.0[1]);
        for &arc in &self.0[2..] {
            push_base128(&mut out, arc);
        }
        out
    }

    /// Decode DER content octets
    pub fn from_der_content(content: &[u8]) -> Result<Self> {
        const CTX: &str = "Oid::from_der_content";
        validate::format(!content.is_empty(), CTX, "empty object identifier")?;

        let mut subids = Vec::new();
        let mut value: u64 = 0;
        let mut in_progress = false;
        for &byte in content {
            validate::format(
                in_progress || byte != 0x80,
                CTX,
                "sub-identifier has a leading 0x80 byte",
            )?;
            validate::format(value >> 57 == 0, CTX, "sub-identifier overflows 64 bits")?;
            value = (value << 7) | u64::from(byte & 0x7f);
            if byte & 0x80 == 0 {
                subids.push(value);
                value = 0;
                in_progress = false;
            } else {
                in_progress = true;
            }
        }
        validate::format(!in_progress, CTX, "truncated sub-identifier")?;

        let first = subids[0];
        let mut arcs = Vec::with_capacity(subids.len() + 1);
        match first {
            0..=39 => arcs.extend([0, first]),
            40..=79 => arcs.extend([1, first - 40]),
            _ => arcs.extend([2, first - 80]),
        }
        arcs.extend_from_slice(&subids[1..]);
        Ok(Oid(arcs))
    }
}

fn push_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut digits = [0u8; 10];
    let mut i = digits.len();
    loop {
        i -= 1;
        digits[i] = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    let last = digits.len() - 1;
    for (j, digit) in digits.iter().enumerate().skip(i) {
        out.push(if j == last { *digit } else { digit | 0x80 });
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_oid(&self.0))
    }
}

impl FromStr for Oid {
    type Err = Error;

    /// Parse the dotted form, `1.2.840.10045.3.1.7`
    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|_| Error::encoding("Oid::from_str", format!("invalid arc {arc:?}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Oid::new(arcs)
    }
}

/// Decode an OID from the hex of its DER content octets
pub fn oid_from_hex(hex_str: &str) -> Result<Oid> {
    let content = hex::decode(hex_str)
        .map_err(|e| Error::encoding("oid_from_hex", e.to_string()))?;
    Oid::from_der_content(&content)
}

/// Hex of an OID's DER content octets
pub fn oid_to_hex(oid: &Oid) -> String {
    hex::encode(oid.to_der_content())
}
