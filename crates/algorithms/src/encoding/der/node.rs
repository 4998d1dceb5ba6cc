//! Parse tree produced by the DER decoder

use core::fmt;

use eccrypt_api::error::{Error, Result};
use eccrypt_params::encoding::der_tags;
use num_bigint::BigInt;

use super::{encode_constructed, encode_integer, encode_primitive};
use crate::encoding::oid::Oid;

/// One decoded TLV value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Integer(BigInt),
    BitString { unused_bits: u8, data: Vec<u8> },
    OctetString(Vec<u8>),
    Null,
    ObjectIdentifier(Oid),
    PrintableString(String),
    UtcTime(UtcTime),
    Sequence(Vec<Node>),
    Set(Vec<Node>),
    /// Constructed context-specific tag `[number]`
    ContextSpecific { number: u8, children: Vec<Node> },
    /// Any other constructed tag (application or private class)
    Constructed { tag: u8, children: Vec<Node> },
    /// Primitive value with a tag this codec does not interpret
    Raw { tag: u8, content: Vec<u8> },
}

impl Node {
    /// Tag byte this node encodes with
    pub fn tag(&self) -> u8 {
        match self {
            Node::Integer(_) => der_tags::INTEGER,
            Node::BitString { .. } => der_tags::BIT_STRING,
            Node::OctetString(_) => der_tags::OCTET_STRING,
            Node::Null => der_tags::NULL,
            Node::ObjectIdentifier(_) => der_tags::OBJECT_IDENTIFIER,
            Node::PrintableString(_) => der_tags::PRINTABLE_STRING,
            Node::UtcTime(_) => der_tags::UTC_TIME,
            Node::Sequence(_) => der_tags::SEQUENCE,
            Node::Set(_) => der_tags::SET,
            Node::ContextSpecific { number, .. } => der_tags::CONTEXT_SPECIFIC | number,
            Node::Constructed { tag, .. } | Node::Raw { tag, .. } => *tag,
        }
    }

    /// Short human-readable kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Integer(_) => "INTEGER",
            Node::BitString { .. } => "BIT STRING",
            Node::OctetString(_) => "OCTET STRING",
            Node::Null => "NULL",
            Node::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            Node::PrintableString(_) => "PrintableString",
            Node::UtcTime(_) => "UTCTime",
            Node::Sequence(_) => "SEQUENCE",
            Node::Set(_) => "SET",
            Node::ContextSpecific { .. } => "context-specific",
            Node::Constructed { .. } => "constructed",
            Node::Raw { .. } => "unknown primitive",
        }
    }

    /// Encode this node and its children
    pub fn to_der(&self) -> Vec<u8> {
        match self {
            Node::Integer(n) => encode_integer(n),
            Node::BitString { unused_bits, data } => {
                let mut content = Vec::with_capacity(data.len() + 1);
                content.push(*unused_bits);
                content.extend_from_slice(data);
                encode_primitive(der_tags::BIT_STRING, &content)
            }
            Node::OctetString(bytes) => encode_primitive(der_tags::OCTET_STRING, bytes),
            Node::Null => encode_primitive(der_tags::NULL, &[]),
            Node::ObjectIdentifier(oid) => {
                encode_primitive(der_tags::OBJECT_IDENTIFIER, &oid.to_der_content())
            }
            Node::PrintableString(text) => {
                encode_primitive(der_tags::PRINTABLE_STRING, text.as_bytes())
            }
            Node::UtcTime(time) => {
                encode_primitive(der_tags::UTC_TIME, time.to_der_content().as_bytes())
            }
            Node::Sequence(children)
            | Node::Set(children)
            | Node::ContextSpecific { children, .. }
            | Node::Constructed { children, .. } => {
                let encoded: Vec<Vec<u8>> = children.iter().map(Node::to_der).collect();
                encode_constructed(self.tag(), &encoded)
            }
            Node::Raw { tag, content } => encode_primitive(*tag, content),
        }
    }

    fn mismatch(&self, context: &'static str, expected: &str) -> Error {
        Error::format(context, format!("expected {expected}, found {}", self.kind()))
    }

    pub fn as_integer(&self) -> Result<&BigInt> {
        match self {
            Node::Integer(n) => Ok(n),
            other => Err(other.mismatch("Node::as_integer", "INTEGER")),
        }
    }

    /// Content of an octet-aligned BIT STRING (zero unused bits)
    pub fn as_bit_string(&self) -> Result<&[u8]> {
        match self {
            Node::BitString {
                unused_bits: 0,
                data,
            } => Ok(data),
            Node::BitString { .. } => Err(Error::format(
                "Node::as_bit_string",
                "BIT STRING is not octet aligned",
            )),
            other => Err(other.mismatch("Node::as_bit_string", "BIT STRING")),
        }
    }

    pub fn as_octet_string(&self) -> Result<&[u8]> {
        match self {
            Node::OctetString(bytes) => Ok(bytes),
            other => Err(other.mismatch("Node::as_octet_string", "OCTET STRING")),
        }
    }

    pub fn as_oid(&self) -> Result<&Oid> {
        match self {
            Node::ObjectIdentifier(oid) => Ok(oid),
            other => Err(other.mismatch("Node::as_oid", "OBJECT IDENTIFIER")),
        }
    }

    pub fn as_printable_string(&self) -> Result<&str> {
        match self {
            Node::PrintableString(text) => Ok(text),
            other => Err(other.mismatch("Node::as_printable_string", "PrintableString")),
        }
    }

    pub fn as_utc_time(&self) -> Result<&UtcTime> {
        match self {
            Node::UtcTime(time) => Ok(time),
            other => Err(other.mismatch("Node::as_utc_time", "UTCTime")),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Node]> {
        match self {
            Node::Sequence(children) => Ok(children),
            other => Err(other.mismatch("Node::as_sequence", "SEQUENCE")),
        }
    }

    pub fn as_set(&self) -> Result<&[Node]> {
        match self {
            Node::Set(children) => Ok(children),
            other => Err(other.mismatch("Node::as_set", "SET")),
        }
    }

    /// Children of the context-specific tag `[number]`
    pub fn as_context_specific(&self, number: u8) -> Result<&[Node]> {
        match self {
            Node::ContextSpecific {
                number: n,
                children,
            } if *n == number => Ok(children),
            other => Err(Error::format(
                "Node::as_context_specific",
                format!("expected [{number}], found {}", other.kind()),
            )),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

/// A UTCTime instant, second precision, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl UtcTime {
    /// Build an instant; UTCTime can only express years 1950 through 2049
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let valid = (1950..=2049).contains(&year)
            && (1..=12).contains(&month)
            && (1..=days_in_month(year, month)).contains(&day)
            && hour < 24
            && minute < 60
            && second < 60;
        if !valid {
            return Err(Error::format("UtcTime::new", "field out of range"));
        }
        Ok(UtcTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Parse DER content `YYMMDDhhmmssZ`; two-digit years of 50 and above
    /// belong to the 1900s
    pub fn from_der_content(content: &[u8]) -> Result<Self> {
        const CTX: &str = "UtcTime::from_der_content";
        if content.len() != 13 || content[12] != b'Z' {
            return Err(Error::format(CTX, "expected YYMMDDhhmmssZ"));
        }
        let mut fields = [0u8; 6];
        for (i, pair) in content[..12].chunks(2).enumerate() {
            if !pair.iter().all(u8::is_ascii_digit) {
                return Err(Error::format(CTX, "non-digit in UTCTime"));
            }
            fields[i] = (pair[0] - b'0') * 10 + (pair[1] - b'0');
        }
        let yy = u16::from(fields[0]);
        let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
        UtcTime::new(year, fields[1], fields[2], fields[3], fields[4], fields[5])
            .map_err(|e| e.with_context(CTX))
    }

    pub fn to_der_content(&self) -> String {
        format!(
            "{:02}{:02}{:02}{:02}{:02}{:02}Z",
            self.year % 100,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }

    pub fn year(&self) -> u16 {
        self.year
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 31,
    }
}

impl fmt::Display for UtcTime {
    /// ISO-8601, `2024-03-01T12:00:00Z`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
