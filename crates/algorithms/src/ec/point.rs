//! Affine and Jacobian point representations

use core::fmt;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Format of a serialized elliptic-curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// Uncompressed: 0x04 ∥ x ∥ y
    Uncompressed,
    /// Compressed: 0x02/0x03 ∥ x
    Compressed,
}

/// Affine coordinates (x, y) or the identity
///
/// The identity is carried as an explicit flag rather than a coordinate
/// sentinel, so `(0, 0)` and the point at infinity never compare equal.
#[derive(Clone)]
pub struct Point {
    pub(crate) is_identity: bool,
    pub(crate) x: BigInt,
    pub(crate) y: BigInt,
}

/// Jacobian coordinates (X:Y:Z) where x = X/Z² and y = Y/Z³
///
/// Z = 0 marks the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JacobianPoint {
    pub(crate) x: BigInt,
    pub(crate) y: BigInt,
    pub(crate) z: BigInt,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity || other.is_identity {
            return self.is_identity == other.is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity {
            return f.write_str("Point(identity)");
        }
        f.debug_struct("Point")
            .field("x", &format_args!("{:x}", self.x))
            .field("y", &format_args!("{:x}", self.y))
            .finish()
    }
}

impl Point {
    /// Create an affine point from its coordinates
    ///
    /// No curve membership check happens here; see `Curve::contains`.
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Point {
            is_identity: false,
            x,
            y,
        }
    }

    /// The identity (point at infinity)
    pub fn identity() -> Self {
        Point {
            is_identity: true,
            x: BigInt::zero(),
            y: BigInt::zero(),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        self.is_identity
    }

    /// Affine x-coordinate (zero for the identity)
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// Affine y-coordinate (zero for the identity)
    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

impl JacobianPoint {
    pub fn new(x: BigInt, y: BigInt, z: BigInt) -> Self {
        JacobianPoint { x, y, z }
    }

    /// The identity, (0:1:0)
    pub fn identity() -> Self {
        JacobianPoint {
            x: BigInt::zero(),
            y: BigInt::one(),
            z: BigInt::zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    pub fn z(&self) -> &BigInt {
        &self.z
    }
}
