//! Elliptic curve primitives
//!
//! Generic short-Weierstrass arithmetic over big integers: curve parameter
//! sets, an OID-keyed registry, and Jacobian point formulas. Any curve with
//! an odd prime field can be registered at runtime.
//!
//! The arithmetic branches on secret-derived values and is not constant
//! time.

pub mod curve;
pub mod math;
pub mod point;
pub mod registry;

pub use curve::Curve;
pub use math::{is_probable_prime, mod_inverse, random_scalar, sqrt_mod};
pub use point::{JacobianPoint, Point, PointFormat};
pub use registry::CurveRegistry;
