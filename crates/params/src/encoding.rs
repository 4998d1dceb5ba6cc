//! Constants for the DER, PEM and point encodings

/// ASN.1 universal tags understood by the DER codec
pub mod der_tags {
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const UTC_TIME: u8 = 0x17;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;

    /// Constructed, context-specific class bits
    pub const CONTEXT_SPECIFIC: u8 = 0xa0;
    /// Tags `0xa0..=0xbf` are context-specific constructed
    pub const CONTEXT_SPECIFIC_MASK: u8 = 0xe0;
    /// Constructed bit
    pub const CONSTRUCTED: u8 = 0x20;
}

/// Object identifier of `id-ecPublicKey` (RFC 5480)
pub const EC_PUBLIC_KEY_OID: &[u64] = &[1, 2, 840, 10045, 2, 1];

/// Version number of the SEC 1 `ECPrivateKey` structure
pub const EC_PRIVATE_KEY_VERSION: u8 = 1;

/// PEM label of a SEC 1 private key
pub const PEM_LABEL_EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";

/// PEM label of a SubjectPublicKeyInfo public key
pub const PEM_LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";

/// Base64 characters per PEM body line
pub const PEM_LINE_WIDTH: usize = 64;

/// Leading byte of an uncompressed SEC 1 point
pub const POINT_UNCOMPRESSED: u8 = 0x04;
/// Leading byte of a compressed point with even y
pub const POINT_COMPRESSED_EVEN: u8 = 0x02;
/// Leading byte of a compressed point with odd y
pub const POINT_COMPRESSED_ODD: u8 = 0x03;
