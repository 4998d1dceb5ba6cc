//! DER tag/length/value encoding and recursive decoding
//!
//! Only the subset of ASN.1 that keys and signatures use is interpreted;
//! anything else survives parsing as [`Node::Raw`] or [`Node::Constructed`].
//! Encoders build the content first and prepend tag and length, so nothing
//! is ever shifted in place.

mod node;

pub use node::{Node, UtcTime};

use eccrypt_api::error::{validate, Error, Result};
use eccrypt_params::encoding::der_tags;
use num_bigint::BigInt;
use tracing::trace;

use crate::encoding::oid::Oid;

/// Deepest nesting of constructed values the parser will follow
pub const MAX_DEPTH: usize = 32;

/// Length octets: short form below 128, otherwise minimal long form
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let mut out = Vec::with_capacity(1 + bytes.len() - skip);
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

/// Tag ∥ length ∥ content
pub fn encode_primitive(tag: u8, content: &[u8]) -> Vec<u8> {
    let len = encode_length(content.len());
    let mut out = Vec::with_capacity(1 + len.len() + content.len());
    out.push(tag);
    out.extend_from_slice(&len);
    out.extend_from_slice(content);
    out
}

/// Minimal two's-complement INTEGER
///
/// Non-negative values whose top bit would be set get a leading 0x00.
pub fn encode_integer(n: &BigInt) -> Vec<u8> {
    encode_primitive(der_tags::INTEGER, &n.to_signed_bytes_be())
}

pub fn encode_oid(oid: &Oid) -> Vec<u8> {
    encode_primitive(der_tags::OBJECT_IDENTIFIER, &oid.to_der_content())
}

/// Octet-aligned BIT STRING
pub fn encode_bit_string(data: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(data.len() + 1);
    content.push(0);
    content.extend_from_slice(data);
    encode_primitive(der_tags::BIT_STRING, &content)
}

pub fn encode_octet_string(data: &[u8]) -> Vec<u8> {
    encode_primitive(der_tags::OCTET_STRING, data)
}

/// Wrap already-encoded children under a constructed tag
pub fn encode_constructed(tag: u8, children: &[Vec<u8>]) -> Vec<u8> {
    encode_primitive(tag, &children.concat())
}

pub fn encode_sequence(children: &[Vec<u8>]) -> Vec<u8> {
    encode_constructed(der_tags::SEQUENCE, children)
}

/// Wrap children under the context-specific constructed tag `[number]`
pub fn encode_context_specific(number: u8, children: &[Vec<u8>]) -> Result<Vec<u8>> {
    validate::parameter(
        number <= 0x1e,
        "der::encode_context_specific",
        "tag number must fit the low-tag-number form",
    )?;
    Ok(encode_constructed(der_tags::CONTEXT_SPECIFIC | number, children))
}

/// Parse every sibling value in `data`
pub fn parse(data: &[u8]) -> Result<Vec<Node>> {
    parse_at_depth(data, 0)
}

/// Parse exactly one value; trailing bytes are an error
pub fn parse_single(data: &[u8]) -> Result<Node> {
    validate::format(!data.is_empty(), "der::parse_single", "empty input")?;
    let (node, consumed) = parse_one(data, 0)?;
    if consumed != data.len() {
        return Err(Error::format(
            "der::parse_single",
            format!("{} trailing bytes after value", data.len() - consumed),
        ));
    }
    Ok(node)
}

fn parse_at_depth(mut data: &[u8], depth: usize) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    while !data.is_empty() {
        let (node, consumed) = parse_one(data, depth)?;
        nodes.push(node);
        data = &data[consumed..];
    }
    Ok(nodes)
}

/// Read the length octets at the start of `data`; returns (length, octets read)
fn read_length(data: &[u8]) -> Result<(usize, usize)> {
    const CTX: &str = "der::read_length";
    let first = *data
        .first()
        .ok_or_else(|| Error::format(CTX, "missing length"))?;
    if first < 0x80 {
        return Ok((usize::from(first), 1));
    }
    validate::format(first != 0x80, CTX, "indefinite length is not DER")?;

    let count = usize::from(first & 0x7f);
    validate::format(
        count <= core::mem::size_of::<usize>(),
        CTX,
        "length does not fit in usize",
    )?;
    validate::format(data.len() > count, CTX, "truncated length")?;
    let len = data[1..=count]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
    Ok((len, 1 + count))
}

fn parse_one(data: &[u8], depth: usize) -> Result<(Node, usize)> {
    const CTX: &str = "der::parse";
    validate::format(depth < MAX_DEPTH, CTX, "nesting too deep")?;

    let tag = data[0];
    validate::format(tag & 0x1f != 0x1f, CTX, "high tag numbers are not supported")?;

    let (len, len_octets) = read_length(&data[1..])?;
    let start = 1 + len_octets;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            Error::format(
                CTX,
                format!(
                    "truncated content: declared {len} bytes, {} available",
                    data.len() - start
                ),
            )
        })?;
    let content = &data[start..end];
    trace!(tag, len, depth, "der value");

    let node = if tag & der_tags::CONSTRUCTED != 0 {
        let children = parse_at_depth(content, depth + 1)?;
        match tag {
            der_tags::SEQUENCE => Node::Sequence(children),
            der_tags::SET => Node::Set(children),
            t if t & der_tags::CONTEXT_SPECIFIC_MASK == der_tags::CONTEXT_SPECIFIC => {
                Node::ContextSpecific {
                    number: t & 0x1f,
                    children,
                }
            }
            t => Node::Constructed { tag: t, children },
        }
    } else {
        decode_primitive(tag, content)?
    };
    Ok((node, end))
}

fn decode_primitive(tag: u8, content: &[u8]) -> Result<Node> {
    const CTX: &str = "der::parse";
    let node = match tag {
        der_tags::INTEGER => {
            validate::format(!content.is_empty(), CTX, "empty INTEGER")?;
            Node::Integer(BigInt::from_signed_bytes_be(content))
        }
        der_tags::BIT_STRING => {
            let (&unused_bits, data) = content
                .split_first()
                .ok_or_else(|| Error::format(CTX, "empty BIT STRING"))?;
            validate::format(unused_bits < 8, CTX, "BIT STRING unused bits above 7")?;
            validate::format(
                unused_bits == 0 || !data.is_empty(),
                CTX,
                "unused bits in an empty BIT STRING",
            )?;
            Node::BitString {
                unused_bits,
                data: data.to_vec(),
            }
        }
        der_tags::OCTET_STRING => Node::OctetString(content.to_vec()),
        der_tags::NULL => {
            validate::format(content.is_empty(), CTX, "NULL with content")?;
            Node::Null
        }
        der_tags::OBJECT_IDENTIFIER => Node::ObjectIdentifier(Oid::from_der_content(content)?),
        der_tags::PRINTABLE_STRING => {
            validate::format(
                content.iter().copied().all(is_printable),
                CTX,
                "invalid PrintableString character",
            )?;
            // all bytes are ASCII at this point
            Node::PrintableString(content.iter().map(|&b| char::from(b)).collect())
        }
        der_tags::UTC_TIME => Node::UtcTime(UtcTime::from_der_content(content)?),
        _ => Node::Raw {
            tag,
            content: content.to_vec(),
        },
    };
    Ok(node)
}

fn is_printable(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b" '()+,-./:=?".contains(&b)
}
