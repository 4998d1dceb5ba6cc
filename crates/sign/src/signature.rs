//! ECDSA signature value and its DER/Base64 forms

use base64::{engine::general_purpose::STANDARD, Engine as _};
use eccrypt_algorithms::der::{self, encode_integer, encode_sequence};
use eccrypt_api::error::{validate, Error, Result};
use eccrypt_api::{ResultExt, Serialize};
use eccrypt_params::ecdsa::{MAX_RECOVERY_ID, RECOVERY_ID_OFFSET};
use num_bigint::BigInt;
use tracing::debug;

/// ECDSA signature components (r, s)
///
/// The recovery id, when present, is 0..=3: bit 0 is the parity of R.y and
/// bit 1 is set when R.y ≥ n.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigInt,
    s: BigInt,
    recovery_id: Option<u8>,
}

impl Signature {
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Signature {
            r,
            s,
            recovery_id: None,
        }
    }

    /// Attach a recovery id; ids above 3 are rejected
    pub fn with_recovery_id(mut self, recovery_id: u8) -> Result<Self> {
        validate::parameter(
            recovery_id <= MAX_RECOVERY_ID,
            "Signature::with_recovery_id",
            "recovery id must be 0..=3",
        )?;
        self.recovery_id = Some(recovery_id);
        Ok(self)
    }

    pub fn r(&self) -> &BigInt {
        &self.r
    }

    pub fn s(&self) -> &BigInt {
        &self.s
    }

    pub fn recovery_id(&self) -> Option<u8> {
        self.recovery_id
    }

    /// Serialize to DER format
    ///
    /// DER encoding: SEQUENCE { INTEGER r, INTEGER s }. With `with_recovery`
    /// the byte `27 + recovery_id` is prepended, which requires the
    /// signature to carry a recovery id.
    pub fn to_der(&self, with_recovery: bool) -> Result<Vec<u8>> {
        let body = self.der_body();
        if !with_recovery {
            return Ok(body);
        }
        let recovery_id = self.recovery_id.ok_or_else(|| {
            Error::param("Signature::to_der", "signature has no recovery id")
        })?;
        let mut out = Vec::with_capacity(body.len() + 1);
        out.push(RECOVERY_ID_OFFSET + recovery_id);
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Parse signature from DER format
    ///
    /// With `with_recovery` the first byte must be a recovery byte in
    /// `27..=30`; it is stripped before DER parsing.
    pub fn from_der(bytes: &[u8], with_recovery: bool) -> Result<Self> {
        const CTX: &str = "Signature::from_der";
        let (recovery_id, body) = if with_recovery {
            let (&first, rest) = bytes
                .split_first()
                .ok_or_else(|| Error::format(CTX, "empty signature"))?;
            let id = first.wrapping_sub(RECOVERY_ID_OFFSET);
            if first < RECOVERY_ID_OFFSET || id > MAX_RECOVERY_ID {
                debug!(byte = first, "bad recovery byte");
                return Err(Error::format(
                    CTX,
                    format!("recovery byte {first} outside 27..=30"),
                ));
            }
            (Some(id), rest)
        } else {
            (None, bytes)
        };

        let node = der::parse_single(body).with_context(CTX)?;
        let fields = node.as_sequence().with_context(CTX)?;
        validate::format(fields.len() == 2, CTX, "expected SEQUENCE of two INTEGERs")?;
        let r = fields[0].as_integer().with_context(CTX)?;
        let s = fields[1].as_integer().with_context(CTX)?;

        Ok(Signature {
            r: r.clone(),
            s: s.clone(),
            recovery_id,
        })
    }

    fn der_body(&self) -> Vec<u8> {
        encode_sequence(&[encode_integer(&self.r), encode_integer(&self.s)])
    }

    /// Base64 of the DER form
    pub fn to_base64(&self, with_recovery: bool) -> Result<String> {
        Ok(STANDARD.encode(self.to_der(with_recovery)?))
    }

    pub fn from_base64(text: &str, with_recovery: bool) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| Error::encoding("Signature::from_base64", format!("invalid Base64: {e}")))?;
        Self::from_der(&bytes, with_recovery)
    }
}

/// Plain DER, without a recovery byte
impl Serialize for Signature {
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_der(bytes, false)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.der_body()
    }
}
