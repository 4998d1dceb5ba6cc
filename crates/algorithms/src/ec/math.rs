//! Modular arithmetic and Jacobian point formulas over GF(p)
//!
//! Everything here is variable-time. Intermediate values are reduced with
//! `mod_floor` so they stay in `[0, p)` even when a subtraction goes
//! negative.

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use super::point::{JacobianPoint, Point};

/// Modular inverse by the extended Euclidean algorithm
///
/// Returns 0 when `a ≡ 0 (mod n)`. The result lies in `[0, n)`.
pub fn mod_inverse(a: &BigInt, n: &BigInt) -> BigInt {
    let a = a.mod_floor(n);
    if a.is_zero() {
        return BigInt::zero();
    }

    let (mut lm, mut hm) = (BigInt::one(), BigInt::zero());
    let (mut low, mut high) = (a, n.clone());
    while low > BigInt::one() {
        let r = &high / &low;
        let nm = &hm - &lm * &r;
        let new = &high - &low * &r;
        hm = core::mem::replace(&mut lm, nm);
        high = core::mem::replace(&mut low, new);
    }
    lm.mod_floor(n)
}

/// Square root of `a` modulo an odd prime `p`
///
/// Uses the `(p+1)/4` exponent when `p ≡ 3 (mod 4)` and Tonelli-Shanks
/// otherwise. Returns `None` when `a` is a quadratic non-residue, or when
/// `p` turns out not to be prime and no non-residue below `p` exists.
pub fn sqrt_mod(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let a = a.mod_floor(p);
    if a.is_zero() {
        return Some(a);
    }
    let one = BigInt::one();
    let two = BigInt::from(2u8);
    let p_minus_one = p - &one;

    // Euler's criterion
    if a.modpow(&(&p_minus_one / &two), p) != one {
        return None;
    }

    if p.mod_floor(&BigInt::from(4u8)) == BigInt::from(3u8) {
        let root = a.modpow(&((p + &one) / BigInt::from(4u8)), p);
        return (&root * &root).mod_floor(p).eq(&a).then_some(root);
    }

    // p - 1 = q · 2^s with q odd
    let mut q = p_minus_one.clone();
    let mut s = 0u32;
    while q.is_even() {
        q >>= 1;
        s += 1;
    }

    let mut z = two.clone();
    while z.modpow(&(&p_minus_one / &two), p) != p_minus_one {
        z += 1u8;
        if &z >= p {
            return None;
        }
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) / &two), p);

    while t != one {
        // least i with t^(2^i) = 1
        let mut i = 0u32;
        let mut t2i = t.clone();
        while t2i != one {
            t2i = (&t2i * &t2i).mod_floor(p);
            i += 1;
            if i == m {
                return None;
            }
        }
        let b = c.modpow(&(BigInt::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b).mod_floor(p);
        t = (&t * &c).mod_floor(p);
        r = (&r * &b).mod_floor(p);
    }
    Some(r)
}

// Miller-Rabin witnesses; deterministic below 3.3e24
const WITNESSES: [u8; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Miller-Rabin primality test
///
/// Small values are settled by trial division against the witness list.
/// Larger values are tested against every witness as a base, which is exact
/// below 3.3·10²⁴ and leaves a composite a chance of at most 4⁻²⁰ above it.
pub fn is_probable_prime(n: &BigInt) -> bool {
    if n < &BigInt::from(2u8) {
        return false;
    }
    for &w in WITNESSES.iter() {
        let w = BigInt::from(w);
        if n == &w {
            return true;
        }
        if n.is_multiple_of(&w) {
            return false;
        }
    }

    // n - 1 = d · 2^r with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    'witness: for &w in WITNESSES.iter() {
        let mut x = BigInt::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = (&x * &x).mod_floor(n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}

/// Uniformly random scalar in `[1, n-1]`
pub fn random_scalar<R: RngCore + CryptoRng + ?Sized>(rng: &mut R, n: &BigInt) -> BigInt {
    rng.gen_bigint_range(&BigInt::one(), n)
}

pub fn to_jacobian(p: &Point) -> JacobianPoint {
    if p.is_identity() {
        return JacobianPoint::identity();
    }
    JacobianPoint::new(p.x.clone(), p.y.clone(), BigInt::one())
}

/// Convert back to affine coordinates, inverting Z modulo `prime`
pub fn from_jacobian(p: &JacobianPoint, prime: &BigInt) -> Point {
    if p.is_identity() {
        return Point::identity();
    }
    let z_inv = mod_inverse(&p.z, prime);
    let z_inv2 = (&z_inv * &z_inv).mod_floor(prime);
    let z_inv3 = (&z_inv2 * &z_inv).mod_floor(prime);
    Point::new(
        (&p.x * &z_inv2).mod_floor(prime),
        (&p.y * &z_inv3).mod_floor(prime),
    )
}

/// Point doubling in Jacobian coordinates
///
/// Returns the identity when `p.y = 0`.
pub fn jacobian_double(p: &JacobianPoint, a: &BigInt, prime: &BigInt) -> JacobianPoint {
    if p.is_identity() || p.y.is_zero() {
        return JacobianPoint::identity();
    }

    let ysq = (&p.y * &p.y).mod_floor(prime);
    let s = (BigInt::from(4u8) * &p.x * &ysq).mod_floor(prime);
    let z2 = (&p.z * &p.z).mod_floor(prime);
    let z4 = (&z2 * &z2).mod_floor(prime);
    let m = (BigInt::from(3u8) * &p.x * &p.x + a * z4).mod_floor(prime);

    let nx = (&m * &m - BigInt::from(2u8) * &s).mod_floor(prime);
    let ny = (&m * (&s - &nx) - BigInt::from(8u8) * &ysq * &ysq).mod_floor(prime);
    let nz = (BigInt::from(2u8) * &p.y * &p.z).mod_floor(prime);

    JacobianPoint::new(nx, ny, nz)
}

/// Point addition in Jacobian coordinates
pub fn jacobian_add(
    p: &JacobianPoint,
    q: &JacobianPoint,
    a: &BigInt,
    prime: &BigInt,
) -> JacobianPoint {
    if p.is_identity() {
        return q.clone();
    }
    if q.is_identity() {
        return p.clone();
    }

    let pz2 = (&p.z * &p.z).mod_floor(prime);
    let qz2 = (&q.z * &q.z).mod_floor(prime);
    let u1 = (&p.x * &qz2).mod_floor(prime);
    let u2 = (&q.x * &pz2).mod_floor(prime);
    let s1 = (&p.y * &qz2 * &q.z).mod_floor(prime);
    let s2 = (&q.y * &pz2 * &p.z).mod_floor(prime);

    if u1 == u2 {
        if s1 != s2 {
            return JacobianPoint::identity();
        }
        return jacobian_double(p, a, prime);
    }

    let h = &u2 - &u1;
    let r = &s2 - &s1;
    let h2 = (&h * &h).mod_floor(prime);
    let h3 = (&h * &h2).mod_floor(prime);
    let u1h2 = (&u1 * &h2).mod_floor(prime);

    let nx = (&r * &r - &h3 - BigInt::from(2u8) * &u1h2).mod_floor(prime);
    let ny = (&r * (&u1h2 - &nx) - &s1 * &h3).mod_floor(prime);
    let nz = (&h * &p.z * &q.z).mod_floor(prime);

    JacobianPoint::new(nx, ny, nz)
}

/// Double-and-add scalar multiplication in Jacobian coordinates
///
/// `n` is reduced modulo the group order first, so recursion depth is
/// bounded by the bit length of `order`.
pub fn jacobian_multiply(
    p: &JacobianPoint,
    n: &BigInt,
    order: &BigInt,
    a: &BigInt,
    prime: &BigInt,
) -> JacobianPoint {
    let n = n.mod_floor(order);
    if n.is_zero() || p.is_identity() {
        return JacobianPoint::identity();
    }
    if n.is_one() {
        return p.clone();
    }

    let half = jacobian_multiply(p, &(&n >> 1), order, a, prime);
    let doubled = jacobian_double(&half, a, prime);
    if n.is_even() {
        doubled
    } else {
        jacobian_add(&doubled, p, a, prime)
    }
}

/// Affine scalar multiplication `n·p`
pub fn multiply(p: &Point, n: &BigInt, order: &BigInt, a: &BigInt, prime: &BigInt) -> Point {
    from_jacobian(
        &jacobian_multiply(&to_jacobian(p), n, order, a, prime),
        prime,
    )
}

/// Affine point addition `p + q`
pub fn add(p: &Point, q: &Point, a: &BigInt, prime: &BigInt) -> Point {
    from_jacobian(
        &jacobian_add(&to_jacobian(p), &to_jacobian(q), a, prime),
        prime,
    )
}
