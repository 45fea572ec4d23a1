//! Dense univariate polynomials over Q.
//!
//! Coefficients are stored low → high with no trailing zeros, so the zero
//! polynomial is the empty vector and `==` is structural equality.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::interval::Interval;
use super::isolate::{isolate_roots, SturmChain};

/// Univariate polynomial with rational coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UPoly {
    coeffs: Vec<BigRational>,
}

impl UPoly {
    /// Build from low → high coefficients (trailing zeros are dropped).
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    #[inline]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    #[inline]
    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    #[inline]
    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    /// `c · t^k`
    pub fn monomial(c: BigRational, k: usize) -> Self {
        let mut coeffs = vec![BigRational::zero(); k + 1];
        coeffs[k] = c;
        Self::new(coeffs)
    }

    /// `t - r`, the defining polynomial of a rational value.
    pub fn linear_root(r: &BigRational) -> Self {
        Self::new(vec![-r.clone(), BigRational::one()])
    }

    #[inline]
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, `-1` for the zero polynomial.
    #[inline]
    pub fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    /// Non-negative degree (`0` for constants and for zero).
    #[inline]
    pub(crate) fn deg(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Coefficient of `t^i` (zero past the degree).
    pub fn coeff(&self, i: usize) -> BigRational {
        self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Leading coefficient (zero for the zero polynomial).
    pub fn lc(&self) -> BigRational {
        self.coeffs.last().cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn eval(&self, t: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * t + c;
        }
        acc
    }

    /// Sign of `p(t)`.
    pub fn sign_at(&self, t: &BigRational) -> Ordering {
        self.eval(t).cmp(&BigRational::zero())
    }

    /// Horner enclosure of the range of `p` over `iv`.
    pub fn eval_interval(&self, iv: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(iv).add(&Interval::point(c.clone()));
        }
        acc
    }

    pub fn scale(&self, c: &BigRational) -> UPoly {
        UPoly::new(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Multiply by `t^k`.
    pub fn shift(&self, k: usize) -> UPoly {
        if self.is_zero() {
            return UPoly::zero();
        }
        let mut coeffs = vec![BigRational::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        UPoly { coeffs }
    }

    pub fn pow(&self, mut e: usize) -> UPoly {
        let mut base = self.clone();
        let mut acc = UPoly::one();
        while e > 0 {
            if e & 1 == 1 {
                acc = &acc * &base;
            }
            e >>= 1;
            if e > 0 {
                base = &base * &base;
            }
        }
        acc
    }

    pub fn monic(&self) -> UPoly {
        if self.is_zero() {
            return UPoly::zero();
        }
        let inv = self.lc().recip();
        self.scale(&inv)
    }

    pub fn derivative(&self) -> UPoly {
        UPoly::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
                .collect(),
        )
    }

    /// Euclidean division `self = q·d + r` with `deg r < deg d`.
    ///
    /// Panics on division by the zero polynomial.
    pub fn div_rem(&self, d: &UPoly) -> (UPoly, UPoly) {
        assert!(!d.is_zero(), "polynomial division by zero");
        if self.coeffs.len() < d.coeffs.len() {
            return (UPoly::zero(), self.clone());
        }
        let dl = d.lc();
        let dn = d.deg();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![BigRational::zero(); self.coeffs.len() - dn];
        for k in (0..quot.len()).rev() {
            let c = &rem[k + dn] / &dl;
            if !c.is_zero() {
                for (j, dc) in d.coeffs.iter().enumerate() {
                    rem[k + j] -= &c * dc;
                }
            }
            quot[k] = c;
        }
        rem.truncate(dn);
        (UPoly::new(quot), UPoly::new(rem))
    }

    pub fn rem(&self, d: &UPoly) -> UPoly {
        self.div_rem(d).1
    }

    /// Quotient of an exact division, `None` if `d` does not divide `self`.
    pub fn exact_div(&self, d: &UPoly) -> Option<UPoly> {
        let (q, r) = self.div_rem(d);
        r.is_zero().then_some(q)
    }

    /// Monic greatest common divisor (zero iff both inputs are zero).
    pub fn gcd(a: &UPoly, b: &UPoly) -> UPoly {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Inverse of `self` modulo `m`, `None` if they share a factor.
    pub fn inverse_mod(&self, m: &UPoly) -> Option<UPoly> {
        // extended Euclid tracking only the cofactor of `self`
        let mut r0 = m.clone();
        let mut r1 = self.rem(m);
        let mut s0 = UPoly::zero();
        let mut s1 = UPoly::one();
        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            let s = &s0 - &(&q * &s1);
            r0 = r1;
            r1 = r;
            s0 = s1;
            s1 = s;
        }
        if r0.degree() != 0 {
            return None;
        }
        let inv = r0.lc().recip();
        Some(s0.scale(&inv).rem(m))
    }

    /// `p / gcd(p, p')`, monic; constants map to `1` and zero stays zero.
    pub fn square_free(&self) -> UPoly {
        if self.is_zero() {
            return UPoly::zero();
        }
        if self.is_constant() {
            return UPoly::one();
        }
        let g = UPoly::gcd(self, &self.derivative());
        self.exact_div(&g)
            .unwrap_or_else(|| unreachable!("gcd divides its argument"))
            .monic()
    }

    /// Sturm sequence `p, p', -rem(p, p'), …`.
    pub fn sturm_sequence(&self) -> Vec<UPoly> {
        let mut seq = vec![self.clone()];
        if self.is_constant() {
            return seq;
        }
        seq.push(self.derivative());
        loop {
            let n = seq.len();
            let r = seq[n - 2].rem(&seq[n - 1]);
            if r.is_zero() {
                break;
            }
            seq.push(-r);
        }
        seq
    }

    /// Cauchy bound: every root satisfies `|t| < bound`.
    pub fn root_bound(&self) -> BigRational {
        let lc = self.lc().abs();
        let mut m = BigRational::zero();
        for c in &self.coeffs[..self.deg()] {
            let v = c.abs() / &lc;
            if v > m {
                m = v;
            }
        }
        m + BigRational::one()
    }

    /// Disjoint isolating intervals of the distinct real roots, ascending.
    ///
    /// Each interval is either an exact root `[r, r]` or an open interval
    /// whose endpoints are not roots and which holds exactly one root.
    pub fn isolate_real_roots(&self) -> Vec<Interval> {
        if self.is_constant() {
            return Vec::new();
        }
        let sf = self.square_free();
        let chain = UChain::new(sf);
        let b = chain.poly.root_bound();
        isolate_roots(&chain, -b.clone(), b)
    }

    /// Render with a custom variable name.
    pub fn display_with<'a>(&'a self, var: &'a str) -> impl fmt::Display + 'a {
        DisplayWith { p: self, var }
    }
}

/// Sturm chain of a square-free rational polynomial.
pub(crate) struct UChain {
    pub(crate) poly: UPoly,
    seq: Vec<UPoly>,
}

impl UChain {
    pub(crate) fn new(poly: UPoly) -> Self {
        let seq = poly.sturm_sequence();
        Self { poly, seq }
    }
}

impl SturmChain for UChain {
    fn sign_at(&self, t: &BigRational) -> Ordering {
        self.poly.sign_at(t)
    }

    fn variations(&self, t: &BigRational) -> usize {
        sign_variations(self.seq.iter().map(|p| p.sign_at(t)))
    }
}

/// Sign changes in a sequence, zeros skipped.
pub(crate) fn sign_variations(signs: impl Iterator<Item = Ordering>) -> usize {
    let mut last = Ordering::Equal;
    let mut count = 0;
    for s in signs {
        if s == Ordering::Equal {
            continue;
        }
        if last != Ordering::Equal && s != last {
            count += 1;
        }
        last = s;
    }
    count
}

impl Add for &UPoly {
    type Output = UPoly;
    fn add(self, rhs: &UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::new((0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &UPoly {
    type Output = UPoly;
    fn sub(self, rhs: &UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::new((0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul for &UPoly {
    type Output = UPoly;
    fn mul(self, rhs: &UPoly) -> UPoly {
        if self.is_zero() || rhs.is_zero() {
            return UPoly::zero();
        }
        let mut out = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        UPoly::new(out)
    }
}

impl Neg for UPoly {
    type Output = UPoly;
    fn neg(self) -> UPoly {
        UPoly {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for &UPoly {
    type Output = UPoly;
    fn neg(self) -> UPoly {
        -self.clone()
    }
}

struct DisplayWith<'a> {
    p: &'a UPoly,
    var: &'a str,
}

impl fmt::Display for DisplayWith<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.p.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.p.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            write_term(f, c, &monomial_name(self.var, i), first)?;
            first = false;
        }
        Ok(())
    }
}

pub(crate) fn monomial_name(var: &str, k: usize) -> String {
    match k {
        0 => String::new(),
        1 => var.to_string(),
        _ => format!("{var}^{k}"),
    }
}

/// Write `± c·mono`, eliding unit coefficients.
pub(crate) fn write_term(
    f: &mut fmt::Formatter<'_>,
    c: &BigRational,
    mono: &str,
    first: bool,
) -> fmt::Result {
    let neg = c.is_negative();
    if first {
        if neg {
            write!(f, "-")?;
        }
    } else if neg {
        write!(f, " - ")?;
    } else {
        write!(f, " + ")?;
    }
    let a = c.abs();
    if mono.is_empty() {
        write!(f, "{a}")
    } else if a.is_one() {
        write!(f, "{mono}")
    } else {
        write!(f, "{a}*{mono}")
    }
}

impl fmt::Display for UPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with("x"))
    }
}
