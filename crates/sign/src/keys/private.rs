//! ECDSA private keys and their encodings

use core::fmt;
use std::sync::Arc;

use eccrypt_algorithms::der::{
    self, encode_bit_string, encode_constructed, encode_integer, encode_octet_string, encode_oid,
    encode_primitive, Node,
};
use eccrypt_algorithms::ec::random_scalar;
use eccrypt_algorithms::encoding::{int_from_bytes, int_to_padded_bytes};
use eccrypt_algorithms::{pem, Curve, CurveRegistry, PointFormat};
use eccrypt_api::error::{validate, Error, Result};
use eccrypt_api::{DerSerialize, ResultExt, SerializeSecret};
use eccrypt_params::encoding::{der_tags, EC_PRIVATE_KEY_VERSION, PEM_LABEL_EC_PRIVATE_KEY};
use num_bigint::BigInt;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use super::public::{decode_point, encode_point, PublicKey};

/// A secret scalar on a named curve, 1 ≤ secret < n
///
/// The scalar lives in a `BigInt`, which cannot be wiped on drop; byte
/// forms handed out by this type are `Zeroizing`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    curve: Arc<Curve>,
    secret: BigInt,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve.name())
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl PrivateKey {
    /// Generate a key from the thread-local CSPRNG
    pub fn generate(curve: Arc<Curve>) -> Self {
        Self::generate_with_rng(curve, &mut rand::thread_rng())
    }

    /// Generate a key with d drawn uniformly from [1, n-1]
    pub fn generate_with_rng<R: RngCore + CryptoRng>(curve: Arc<Curve>, rng: &mut R) -> Self {
        let secret = random_scalar(rng, curve.n());
        PrivateKey { curve, secret }
    }

    pub fn new(curve: Arc<Curve>, secret: BigInt) -> Result<Self> {
        validate::parameter(
            curve.is_scalar(&secret),
            "PrivateKey::new",
            "secret must lie in [1, n-1]",
        )?;
        Ok(PrivateKey { curve, secret })
    }

    /// Q = d·G
    pub fn public_key(&self) -> PublicKey {
        PublicKey::derived(
            Arc::clone(&self.curve),
            self.curve.multiply_generator(&self.secret),
        )
    }

    pub fn secret(&self) -> &BigInt {
        &self.secret
    }

    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    /// Big-endian secret, `curve.length()` bytes
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(int_to_padded_bytes(&self.secret, self.curve.length()))
    }

    pub fn from_bytes(bytes: &[u8], curve: Arc<Curve>) -> Result<Self> {
        validate::length("PrivateKey::from_bytes", bytes.len(), curve.length())?;
        Self::new(curve, int_from_bytes(bytes))
    }

    /// Fixed-width lowercase hex of the secret
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> String {
        hex::encode(self.to_bytes().as_slice())
    }

    pub fn from_string(hex_str: &str, curve: Arc<Curve>) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(hex_str.trim())
                .map_err(|e| Error::encoding("PrivateKey::from_string", e.to_string()))?,
        );
        Self::from_bytes(&bytes, curve)
    }

    /// SEC 1 `ECPrivateKey` DER:
    /// SEQUENCE { INTEGER 1, OCTET STRING d, [0] { OID curve }, [1] { BIT STRING Q } }
    pub fn to_der(&self) -> Vec<u8> {
        let public = encode_point(
            &self.curve,
            self.public_key().point(),
            PointFormat::Uncompressed,
        );

        let mut content = Zeroizing::new(encode_integer(&BigInt::from(EC_PRIVATE_KEY_VERSION)));
        content.extend_from_slice(&Zeroizing::new(encode_octet_string(&self.to_bytes())));
        content.extend_from_slice(&encode_constructed(
            der_tags::CONTEXT_SPECIFIC,
            &[encode_oid(self.curve.oid())],
        ));
        content.extend_from_slice(&encode_constructed(
            der_tags::CONTEXT_SPECIFIC | 1,
            &[encode_bit_string(&public)],
        ));
        encode_primitive(der_tags::SEQUENCE, &content)
    }

    /// Decode DER, resolving the curve through the shared registry
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Self::from_der_with(bytes, CurveRegistry::shared())
    }

    /// Decode DER, resolving the curve through `registry`
    ///
    /// The `[1]` public key is optional. When present it must equal d·G,
    /// otherwise the pair is rejected with `KeyMismatch`.
    pub fn from_der_with(bytes: &[u8], registry: &CurveRegistry) -> Result<Self> {
        const CTX: &str = "PrivateKey::from_der";
        let node = der::parse_single(bytes).with_context(CTX)?;
        let fields = node.as_sequence().with_context(CTX)?;
        validate::format(fields.len() >= 3, CTX, "too few ECPrivateKey fields")?;

        let version = fields[0].as_integer().with_context(CTX)?;
        if *version != BigInt::from(EC_PRIVATE_KEY_VERSION) {
            return Err(Error::format(CTX, format!("unsupported version {version}")));
        }
        let secret = int_from_bytes(fields[1].as_octet_string().with_context(CTX)?);

        let mut curve_oid = None;
        let mut embedded = None;
        for field in &fields[2..] {
            match field {
                Node::ContextSpecific { number: 0, children } if curve_oid.is_none() => {
                    let oid = children
                        .first()
                        .ok_or_else(|| Error::format(CTX, "empty [0] parameters"))?
                        .as_oid()
                        .with_context(CTX)?;
                    curve_oid = Some(oid);
                }
                Node::ContextSpecific { number: 1, children } if embedded.is_none() => {
                    let point = children
                        .first()
                        .ok_or_else(|| Error::format(CTX, "empty [1] public key"))?
                        .as_bit_string()
                        .with_context(CTX)?;
                    embedded = Some(point);
                }
                other => {
                    return Err(Error::format(
                        CTX,
                        format!("unexpected {} field", other.kind()),
                    ))
                }
            }
        }

        let curve_oid = curve_oid.ok_or_else(|| Error::format(CTX, "missing curve parameters"))?;
        let curve = registry.lookup(curve_oid)?;
        let key = Self::new(curve, secret).with_context(CTX)?;

        if let Some(encoded) = embedded {
            let point = decode_point(&key.curve, encoded).with_context(CTX)?;
            if &point != key.public_key().point() {
                debug!(curve = key.curve.name(), "embedded public key does not match secret");
                return Err(Error::KeyMismatch);
            }
        }
        Ok(key)
    }

    pub fn to_pem(&self) -> String {
        pem::encode(PEM_LABEL_EC_PRIVATE_KEY, &Zeroizing::new(self.to_der()))
    }

    /// Decode the `EC PRIVATE KEY` block; other blocks are skipped
    pub fn from_pem(text: &str) -> Result<Self> {
        Self::from_pem_with(text, CurveRegistry::shared())
    }

    pub fn from_pem_with(text: &str, registry: &CurveRegistry) -> Result<Self> {
        let der = Zeroizing::new(pem::decode(text, PEM_LABEL_EC_PRIVATE_KEY)?);
        Self::from_der_with(&der, registry)
    }
}

impl SerializeSecret for PrivateKey {
    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        self.to_bytes()
    }
}

impl DerSerialize for PrivateKey {
    const PEM_LABEL: &'static str = PEM_LABEL_EC_PRIVATE_KEY;

    fn to_der(&self) -> Vec<u8> {
        PrivateKey::to_der(self)
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        PrivateKey::from_der(der)
    }
}
