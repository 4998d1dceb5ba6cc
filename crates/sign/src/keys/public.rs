//! ECDSA public keys and their encodings

use std::sync::Arc;

use eccrypt_algorithms::der::{self, encode_bit_string, encode_oid, encode_sequence};
use eccrypt_algorithms::encoding::{int_from_bytes, int_to_padded_bytes};
use eccrypt_algorithms::{pem, Curve, CurveRegistry, Oid, Point, PointFormat};
use eccrypt_api::error::{validate, Error, Result};
use eccrypt_api::{DerSerialize, ResultExt};
use eccrypt_params::encoding::{
    EC_PUBLIC_KEY_OID, PEM_LABEL_PUBLIC_KEY, POINT_COMPRESSED_EVEN, POINT_COMPRESSED_ODD,
    POINT_UNCOMPRESSED,
};
use num_integer::Integer;
use tracing::debug;

/// A point on a named curve
///
/// Keys built from external input are always validated: the point is
/// finite, on the curve, and in the prime-order subgroup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    curve: Arc<Curve>,
    point: Point,
}

impl PublicKey {
    /// Wrap a point after full validation
    pub fn from_point(curve: Arc<Curve>, point: Point) -> Result<Self> {
        curve
            .validate_public_point(&point)
            .with_context("PublicKey::from_point")?;
        Ok(PublicKey { curve, point })
    }

    /// Wrap a point derived from a valid secret
    pub(crate) fn derived(curve: Arc<Curve>, point: Point) -> Self {
        PublicKey { curve, point }
    }

    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    /// SEC 1 point encoding
    pub fn to_sec1_bytes(&self, format: PointFormat) -> Vec<u8> {
        encode_point(&self.curve, &self.point, format)
    }

    /// Raw `X ∥ Y`, each coordinate `curve.length()` bytes; `encoded`
    /// prefixes the uncompressed marker 0x04
    pub fn to_bytes(&self, encoded: bool) -> Vec<u8> {
        let sec1 = self.to_sec1_bytes(PointFormat::Uncompressed);
        if encoded {
            sec1
        } else {
            sec1[1..].to_vec()
        }
    }

    /// Parse raw `X ∥ Y`, with or without the 0x04 marker
    ///
    /// `validate` may only be turned off for points that come from a
    /// trusted source; the curve equation is still checked.
    pub fn from_bytes(bytes: &[u8], curve: Arc<Curve>, validate: bool) -> Result<Self> {
        const CTX: &str = "PublicKey::from_bytes";
        let width = curve.length();
        let raw = match bytes.len() {
            n if n == 2 * width => bytes,
            n if n == 2 * width + 1 && bytes[0] == POINT_UNCOMPRESSED => &bytes[1..],
            n => {
                return Err(Error::InvalidLength {
                    context: CTX,
                    expected: 2 * width,
                    actual: n,
                })
            }
        };
        let point = Point::new(int_from_bytes(&raw[..width]), int_from_bytes(&raw[width..]));
        if validate {
            return Self::from_point(curve, point).with_context(CTX);
        }
        validate::point(curve.contains(&point), CTX, "point is not on the curve")?;
        Ok(Self::derived(curve, point))
    }

    /// Hex of [`to_bytes`](Self::to_bytes)
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self, encoded: bool) -> String {
        hex::encode(self.to_bytes(encoded))
    }

    pub fn from_string(hex_str: &str, curve: Arc<Curve>, validate: bool) -> Result<Self> {
        let bytes = hex::decode(hex_str.trim())
            .map_err(|e| Error::encoding("PublicKey::from_string", e.to_string()))?;
        Self::from_bytes(&bytes, curve, validate)
    }

    /// Hex of the compressed form, `02`/`03` ∥ X
    pub fn to_compressed(&self) -> String {
        hex::encode(self.to_sec1_bytes(PointFormat::Compressed))
    }

    /// Decompress a `02`/`03` ∥ X hex string, recovering Y from the curve
    pub fn from_compressed(hex_str: &str, curve: Arc<Curve>) -> Result<Self> {
        const CTX: &str = "PublicKey::from_compressed";
        let bytes = hex::decode(hex_str.trim()).map_err(|e| Error::encoding(CTX, e.to_string()))?;
        validate::length(CTX, bytes.len(), curve.length() + 1)?;
        let point = decode_point(&curve, &bytes).with_context(CTX)?;
        Self::from_point(curve, point).with_context(CTX)
    }

    /// SubjectPublicKeyInfo DER:
    /// SEQUENCE { SEQUENCE { OID ecPublicKey, OID curve }, BIT STRING point }
    pub fn to_der(&self) -> Vec<u8> {
        encode_sequence(&[
            encode_sequence(&[
                encode_oid(&Oid::ec_public_key()),
                encode_oid(self.curve.oid()),
            ]),
            encode_bit_string(&self.to_sec1_bytes(PointFormat::Uncompressed)),
        ])
    }

    /// Decode DER, resolving the curve through the shared registry
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Self::from_der_with(bytes, CurveRegistry::shared())
    }

    /// Decode DER, resolving the curve through `registry`
    ///
    /// The BIT STRING may hold an uncompressed or a compressed point.
    pub fn from_der_with(bytes: &[u8], registry: &CurveRegistry) -> Result<Self> {
        const CTX: &str = "PublicKey::from_der";
        let node = der::parse_single(bytes).with_context(CTX)?;
        let fields = node.as_sequence().with_context(CTX)?;
        validate::format(fields.len() == 2, CTX, "expected algorithm and key fields")?;

        let algorithm = fields[0].as_sequence().with_context(CTX)?;
        validate::format(algorithm.len() == 2, CTX, "expected two algorithm OIDs")?;
        let key_type = algorithm[0].as_oid().with_context(CTX)?;
        if key_type.components() != EC_PUBLIC_KEY_OID {
            return Err(Error::format(
                CTX,
                format!("algorithm {key_type} is not id-ecPublicKey"),
            ));
        }
        let curve_oid = algorithm[1].as_oid().with_context(CTX)?;
        let curve = registry.lookup(curve_oid)?;

        let encoded = fields[1].as_bit_string().with_context(CTX)?;
        let point = decode_point(&curve, encoded).with_context(CTX)?;
        Self::from_point(curve, point).map_err(|e| {
            debug!(error = %e, "rejected public key");
            e.with_context(CTX)
        })
    }

    pub fn to_pem(&self) -> String {
        pem::encode(PEM_LABEL_PUBLIC_KEY, &self.to_der())
    }

    pub fn from_pem(text: &str) -> Result<Self> {
        Self::from_pem_with(text, CurveRegistry::shared())
    }

    pub fn from_pem_with(text: &str, registry: &CurveRegistry) -> Result<Self> {
        Self::from_der_with(&pem::decode(text, PEM_LABEL_PUBLIC_KEY)?, registry)
    }
}

impl DerSerialize for PublicKey {
    const PEM_LABEL: &'static str = PEM_LABEL_PUBLIC_KEY;

    fn to_der(&self) -> Vec<u8> {
        PublicKey::to_der(self)
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        PublicKey::from_der(der)
    }
}

/// SEC 1 encoding of a finite point
pub(crate) fn encode_point(curve: &Curve, point: &Point, format: PointFormat) -> Vec<u8> {
    let width = curve.length();
    let x = int_to_padded_bytes(point.x(), width);
    let mut out = Vec::with_capacity(1 + 2 * width);
    match format {
        PointFormat::Uncompressed => {
            out.push(POINT_UNCOMPRESSED);
            out.extend_from_slice(&x);
            out.extend_from_slice(&int_to_padded_bytes(point.y(), width));
        }
        PointFormat::Compressed => {
            out.push(if point.y().is_even() {
                POINT_COMPRESSED_EVEN
            } else {
                POINT_COMPRESSED_ODD
            });
            out.extend_from_slice(&x);
        }
    }
    out
}

/// Decode a SEC 1 point: `04 ∥ X ∥ Y` or `02`/`03` ∥ X
pub(crate) fn decode_point(curve: &Curve, bytes: &[u8]) -> Result<Point> {
    const CTX: &str = "decode_point";
    let width = curve.length();
    let (&tag, body) = bytes
        .split_first()
        .ok_or_else(|| Error::invalid_point(CTX, "empty point encoding"))?;
    match tag {
        POINT_UNCOMPRESSED => {
            validate::length(CTX, body.len(), 2 * width)?;
            Ok(Point::new(
                int_from_bytes(&body[..width]),
                int_from_bytes(&body[width..]),
            ))
        }
        POINT_COMPRESSED_EVEN | POINT_COMPRESSED_ODD => {
            validate::length(CTX, body.len(), width)?;
            let x = int_from_bytes(body);
            let y = curve.y(&x, tag == POINT_COMPRESSED_EVEN)?;
            Ok(Point::new(x, y))
        }
        other => Err(Error::invalid_point(
            CTX,
            format!("unknown point encoding 0x{other:02x}"),
        )),
    }
}
