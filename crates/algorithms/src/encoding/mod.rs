//! Binary and text encodings shared by keys and signatures

pub mod bytes;
pub mod der;
pub mod oid;
pub mod pem;

pub use bytes::{int_from_bytes, int_from_hex, int_to_padded_bytes};
pub use der::{parse, parse_single, Node, UtcTime};
pub use oid::{oid_from_hex, oid_to_hex, Oid};
