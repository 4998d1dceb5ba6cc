//! Constants for ECDSA signing and signature encoding

/// Upper bound on nonce draws before signing gives up
///
/// A draw is rejected when it yields r = 0 or s = 0, which happens with
/// negligible probability for honest randomness.
pub const ECDSA_SIGN_MAX_ATTEMPTS: usize = 1024;

/// Offset added to the recovery id when it is prefixed to a DER signature
pub const RECOVERY_ID_OFFSET: u8 = 27;

/// Largest valid recovery id
pub const MAX_RECOVERY_ID: u8 = 3;
