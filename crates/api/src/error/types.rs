//! Error type definitions for curve, codec and signature operations

use thiserror::Error as ThisError;

/// Primary error type for the eccrypt ecosystem
///
/// Each variant carries the name of the operation that failed in `context`
/// so that a caller at the boundary can print a useful diagnostic without
/// having to match on the variant.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed DER: bad tag, indefinite length, truncated content,
    /// trailing bytes after a value that was expected to stand alone
    #[error("Malformed DER in {context}: {message}")]
    Format {
        context: &'static str,
        message: String,
    },

    /// The OID does not name any registered curve
    #[error(
        "Unknown curve with oid {}; the following are registered: [{}]",
        format_oid(.oid),
        join_names(.known)
    )]
    UnknownCurve {
        oid: Vec<u64>,
        known: Vec<String>,
    },

    /// A curve with the same OID has already been registered
    #[error("Curve {name} cannot be registered: oid {} is already taken", format_oid(.oid))]
    DuplicateCurve {
        oid: Vec<u64>,
        name: String,
    },

    /// Point is off the curve, at infinity where that is not allowed,
    /// or outside the prime-order subgroup
    #[error("Invalid point in {context}: {message}")]
    InvalidPoint {
        context: &'static str,
        message: String,
    },

    /// The public point embedded in a private key does not match the secret
    #[error("The public key described inside the private key doesn't match the actual public key of the pair")]
    KeyMismatch,

    /// Malformed text envelope (PEM framing, Base64, hex)
    #[error("Encoding error in {context}: {message}")]
    Encoding {
        context: &'static str,
        message: String,
    },

    /// The signing loop kept drawing degenerate nonces
    #[error("Random generation error: no usable nonce after {attempts} attempts")]
    FatalRandomness {
        attempts: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for eccrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create a `Format` error
    pub fn format(context: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `Encoding` error
    pub fn encoding(context: &'static str, message: impl Into<String>) -> Self {
        Self::Encoding {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `InvalidPoint` error
    pub fn invalid_point(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPoint {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `InvalidParameter` error
    pub fn param(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Format { message, .. } => Self::Format { context, message },
            Self::InvalidPoint { message, .. } => Self::InvalidPoint { context, message },
            Self::Encoding { message, .. } => Self::Encoding { context, message },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            other => other,
        }
    }
}

fn join_names(names: &[String]) -> String {
    names.join(", ")
}

/// Render an OID the usual dotted way, `1.3.132.0.10`
pub fn format_oid(oid: &[u64]) -> String {
    oid.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
