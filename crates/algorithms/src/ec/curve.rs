//! Short-Weierstrass curve definitions

use eccrypt_api::error::{validate, Error, Result};
use eccrypt_params::curves::{CurveParams, PRIME256V1, SECP256K1};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::math;
use super::point::Point;
use crate::encoding::{int_from_bytes, Oid};

/// Domain parameters of y² = x³ + a·x + b over GF(p)
///
/// `n` is the prime order of the generator `g`. A curve is immutable once
/// built; registries hand it out behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    name: String,
    nist_name: Option<String>,
    a: BigInt,
    b: BigInt,
    p: BigInt,
    n: BigInt,
    g: Point,
    oid: Oid,
}

impl Curve {
    /// Define a custom curve
    ///
    /// Fails with `InvalidParameter` when `p` or `n` is not prime or when
    /// `n·G` is not the identity, and with `InvalidPoint` when the generator
    /// is not on the curve.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        a: BigInt,
        b: BigInt,
        p: BigInt,
        n: BigInt,
        gx: BigInt,
        gy: BigInt,
        oid: Oid,
    ) -> Result<Self> {
        const CTX: &str = "Curve::new";
        validate::parameter(
            p > BigInt::from(3u8) && math::is_probable_prime(&p),
            CTX,
            "p must be an odd prime",
        )?;
        validate::parameter(math::is_probable_prime(&n), CTX, "order must be prime")?;
        validate::parameter(
            !a.is_negative() && a < p && !b.is_negative() && b < p,
            CTX,
            "coefficients must lie in [0, p)",
        )?;

        let curve = Curve {
            name: name.into(),
            nist_name: None,
            a,
            b,
            p,
            n,
            g: Point::new(gx, gy),
            oid,
        };
        validate::point(curve.contains(&curve.g), CTX, "generator is not on the curve")?;
        validate::parameter(
            curve.multiply_unreduced(&curve.g, &curve.n).is_identity(),
            CTX,
            "n is not the order of the generator",
        )?;
        Ok(curve)
    }

    /// Attach the alternate NIST name, e.g. `P-256`
    pub fn with_nist_name(mut self, nist_name: impl Into<String>) -> Self {
        self.nist_name = Some(nist_name.into());
        self
    }

    /// Build a curve from a trusted constant parameter set
    pub fn from_params(params: &CurveParams) -> Self {
        Curve {
            name: params.name.to_string(),
            nist_name: params.nist_name.map(str::to_string),
            a: int_from_bytes(params.a),
            b: int_from_bytes(params.b),
            p: int_from_bytes(params.p),
            n: int_from_bytes(params.n),
            g: Point::new(int_from_bytes(params.g_x), int_from_bytes(params.g_y)),
            oid: Oid(params.oid.to_vec()),
        }
    }

    /// SEC 2 secp256k1
    pub fn secp256k1() -> Self {
        Self::from_params(&SECP256K1)
    }

    /// NIST P-256, also known as prime256v1
    pub fn prime256v1() -> Self {
        Self::from_params(&PRIME256V1)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nist_name(&self) -> Option<&str> {
        self.nist_name.as_deref()
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Field prime
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// Order of the generator
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    pub fn generator(&self) -> &Point {
        &self.g
    }

    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Is `point` a finite point satisfying the curve equation?
    pub fn contains(&self, point: &Point) -> bool {
        if point.is_identity() {
            return false;
        }
        let (x, y) = (point.x(), point.y());
        if x.is_negative() || x >= &self.p || y.is_negative() || y >= &self.p {
            return false;
        }
        (y * y - self.rhs(x)).mod_floor(&self.p).is_zero()
    }

    /// Byte width of secrets and coordinates: ⌈bits(n)/8⌉
    pub fn length(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// Solve for the y-coordinate at `x` with the requested parity
    ///
    /// Fails with `InvalidPoint` when `x` is out of range or x³ + ax + b is
    /// not a square.
    pub fn y(&self, x: &BigInt, is_even: bool) -> Result<BigInt> {
        const CTX: &str = "Curve::y";
        validate::point(
            !x.is_negative() && x < &self.p,
            CTX,
            "x-coordinate outside the field",
        )?;
        let root = math::sqrt_mod(&self.rhs(x), &self.p)
            .ok_or_else(|| Error::invalid_point(CTX, "no point on the curve with this x"))?;
        if root.is_zero() || root.is_even() == is_even {
            Ok(root)
        } else {
            Ok(&self.p - root)
        }
    }

    /// Scalar multiplication `k·point`
    pub fn multiply(&self, point: &Point, k: &BigInt) -> Point {
        math::multiply(point, k, &self.n, &self.a, &self.p)
    }

    /// `k·G`
    pub fn multiply_generator(&self, k: &BigInt) -> Point {
        self.multiply(&self.g, k)
    }

    pub fn add(&self, p: &Point, q: &Point) -> Point {
        math::add(p, q, &self.a, &self.p)
    }

    /// Is `k` a valid secret or signature component, 1 ≤ k < n?
    pub fn is_scalar(&self, k: &BigInt) -> bool {
        k.is_positive() && k < &self.n
    }

    /// Full public point validation: on the curve, finite, and of order `n`
    pub fn validate_public_point(&self, point: &Point) -> Result<()> {
        const CTX: &str = "Curve::validate_public_point";
        validate::point(!point.is_identity(), CTX, "point at infinity")?;
        validate::point(self.contains(point), CTX, "point is not on the curve")?;
        validate::point(
            self.multiply_unreduced(point, &self.n).is_identity(),
            CTX,
            "point is not in the prime-order subgroup",
        )
    }

    /// `k·point` without first reducing `k` modulo `n`
    fn multiply_unreduced(&self, point: &Point, k: &BigInt) -> Point {
        // reducing by n + 1 leaves n itself intact
        math::multiply(point, k, &(&self.n + 1u8), &self.a, &self.p)
    }

    /// x³ + a·x + b mod p
    fn rhs(&self, x: &BigInt) -> BigInt {
        (x * x * x + &self.a * x + &self.b).mod_floor(&self.p)
    }
}
