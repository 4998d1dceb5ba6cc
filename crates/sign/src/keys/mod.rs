//! ECDSA key pairs and their DER, PEM, raw and compressed forms

pub mod private;
pub mod public;

pub use private::PrivateKey;
pub use public::PublicKey;
