//! Error handling for the eccrypt ecosystem

pub mod traits;
pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{format_oid, Error, Result};

// Re-export error traits
pub use traits::ResultExt;
