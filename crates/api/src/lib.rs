//! Public API traits and types for the eccrypt library
//!
//! This crate provides the public API surface for the eccrypt ecosystem:
//! the error taxonomy shared by every crate, validation helpers and the
//! trait seams implemented by the key, signature and scheme types.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

// Re-export all traits from the traits module
pub use traits::{DerSerialize, Serialize, SerializeSecret, SignatureScheme};

// Re-export trait modules for direct access
pub use traits::{serialize, signature};
