//! Public traits implemented by the eccrypt scheme and key types

pub mod serialize;
pub mod signature;

pub use serialize::{DerSerialize, Serialize, SerializeSecret};
pub use signature::SignatureScheme;
