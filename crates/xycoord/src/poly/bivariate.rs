//! Bivariate polynomials over Q, stored as polynomials in `y` whose
//! coefficients are `UPoly` in `x`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::interval::Interval;
use super::univariate::{monomial_name, write_term, UPoly};

/// `f(x, y) = Σ_i c_i(x) · y^i` with no trailing zero coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BPoly {
    coeffs: Vec<UPoly>,
}

impl BPoly {
    /// Build from the `y`-coefficients, low → high.
    pub fn new(mut coeffs: Vec<UPoly>) -> Self {
        while coeffs.last().is_some_and(UPoly::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Build from `(coefficient, x-exponent, y-exponent)` triples.
    pub fn from_terms(terms: &[(i64, usize, usize)]) -> Self {
        let mut out = BPoly::zero();
        for &(c, i, j) in terms {
            let c = BigRational::from_integer(BigInt::from(c));
            out = &out + &BPoly::monomial(c, i, j);
        }
        out
    }

    #[inline]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![UPoly::constant(c)])
    }

    /// `c · x^i · y^j`
    pub fn monomial(c: BigRational, i: usize, j: usize) -> Self {
        let mut coeffs = vec![UPoly::zero(); j + 1];
        coeffs[j] = UPoly::monomial(c, i);
        Self::new(coeffs)
    }

    /// Lift a polynomial in `x` (constant in `y`).
    pub fn from_x(p: &UPoly) -> Self {
        Self::new(vec![p.clone()])
    }

    /// Lift a polynomial in `y` (constant in `x`).
    pub fn from_y(p: &UPoly) -> Self {
        Self::new(p.coeffs().iter().map(|c| UPoly::constant(c.clone())).collect())
    }

    #[inline]
    pub fn coeffs(&self) -> &[UPoly] {
        &self.coeffs
    }

    /// Coefficient of `y^i` (a polynomial in `x`).
    pub fn coeff_y(&self, i: usize) -> UPoly {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    /// Leading coefficient in `y`.
    pub fn lc_y(&self) -> UPoly {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree in `y`, `-1` for zero.
    #[inline]
    pub fn degree_y(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    #[inline]
    fn deg_y(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Degree in `x` (`0` for zero).
    pub fn degree_x(&self) -> usize {
        self.coeffs.iter().map(UPoly::deg).max().unwrap_or(0)
    }

    /// Highest `i + j` over monomials `x^i y^j`, `-1` for zero.
    pub fn total_degree(&self) -> i32 {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(j, c)| c.degree() + j as i32)
            .max()
            .unwrap_or(-1)
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1 && self.coeffs.first().map_or(true, UPoly::is_constant)
    }

    /// `f(r, y)` as a polynomial in `y`.
    pub fn eval_x(&self, r: &BigRational) -> UPoly {
        UPoly::new(self.coeffs.iter().map(|c| c.eval(r)).collect())
    }

    /// `f(x, r)` as a polynomial in `x`.
    pub fn eval_y(&self, r: &BigRational) -> UPoly {
        let mut acc = UPoly::zero();
        for c in self.coeffs.iter().rev() {
            acc = &acc.scale(r) + c;
        }
        acc
    }

    /// Interval enclosure of `f` over the box `ix × iy`.
    pub fn eval_box(&self, ix: &Interval, iy: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(iy).add(&c.eval_interval(ix));
        }
        acc
    }

    /// Swap the roles of `x` and `y`.
    pub fn transpose(&self) -> BPoly {
        if self.is_zero() {
            return BPoly::zero();
        }
        let dx = self.degree_x();
        let out = (0..=dx)
            .map(|i| UPoly::new(self.coeffs.iter().map(|c| c.coeff(i)).collect()))
            .collect();
        BPoly::new(out)
    }

    pub fn derivative_y(&self) -> BPoly {
        BPoly::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(j, c)| c.scale(&BigRational::from_integer(BigInt::from(j))))
                .collect(),
        )
    }

    pub fn derivative_x(&self) -> BPoly {
        BPoly::new(self.coeffs.iter().map(UPoly::derivative).collect())
    }

    pub fn scale(&self, c: &BigRational) -> BPoly {
        BPoly::new(self.coeffs.iter().map(|p| p.scale(c)).collect())
    }

    /// Multiply by a polynomial in `x`.
    pub fn mul_x(&self, p: &UPoly) -> BPoly {
        BPoly::new(self.coeffs.iter().map(|c| c * p).collect())
    }

    /// Multiply by `y^k`.
    pub fn shift_y(&self, k: usize) -> BPoly {
        if self.is_zero() {
            return BPoly::zero();
        }
        let mut coeffs = vec![UPoly::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        BPoly { coeffs }
    }

    /// Monic gcd of the `y`-coefficients.
    pub fn content(&self) -> UPoly {
        self.coeffs
            .iter()
            .fold(UPoly::zero(), |g, c| UPoly::gcd(&g, c))
    }

    pub fn primitive_part(&self) -> BPoly {
        if self.is_zero() {
            return BPoly::zero();
        }
        let c = self.content();
        BPoly::new(
            self.coeffs
                .iter()
                .map(|p| {
                    p.exact_div(&c)
                        .unwrap_or_else(|| unreachable!("content divides every coefficient"))
                })
                .collect(),
        )
    }

    /// Pseudo-remainder in `y`: `lc(d)^(m-n+1) · self mod d`.
    pub fn pseudo_rem(&self, d: &BPoly) -> BPoly {
        assert!(!d.is_zero(), "pseudo-division by zero");
        let n = d.deg_y();
        if self.is_zero() || self.deg_y() < n {
            return self.clone();
        }
        let l = d.lc_y();
        let mut e = self.deg_y() - n + 1;
        let mut r = self.clone();
        while !r.is_zero() && r.deg_y() >= n {
            let k = r.deg_y() - n;
            let t = r.lc_y();
            r = &r.mul_x(&l) - &d.mul_x(&t).shift_y(k);
            e -= 1;
        }
        r.mul_x(&l.pow(e))
    }

    /// Greatest common divisor (primitive PRS), normalized.
    pub fn gcd(a: &BPoly, b: &BPoly) -> BPoly {
        if a.is_zero() {
            return b.normalized();
        }
        if b.is_zero() {
            return a.normalized();
        }
        let c = UPoly::gcd(&a.content(), &b.content());
        let mut p = a.primitive_part();
        let mut q = b.primitive_part();
        if p.deg_y() < q.deg_y() {
            std::mem::swap(&mut p, &mut q);
        }
        let g = loop {
            if q.deg_y() == 0 {
                break BPoly::one();
            }
            let r = p.pseudo_rem(&q);
            if r.is_zero() {
                break q;
            }
            p = q;
            q = r.primitive_part();
        };
        g.mul_x(&c).normalized()
    }

    /// Quotient of an exact division, `None` if `d` does not divide `self`.
    pub fn exact_div(&self, d: &BPoly) -> Option<BPoly> {
        assert!(!d.is_zero(), "polynomial division by zero");
        if self.is_zero() {
            return Some(BPoly::zero());
        }
        let n = d.deg_y();
        if self.deg_y() < n {
            return None;
        }
        let dl = d.lc_y();
        let mut q = vec![UPoly::zero(); self.deg_y() - n + 1];
        let mut r = self.clone();
        while !r.is_zero() {
            if r.deg_y() < n {
                return None;
            }
            let k = r.deg_y() - n;
            let t = r.lc_y().exact_div(&dl)?;
            r = &r - &d.mul_x(&t).shift_y(k);
            q[k] = t;
        }
        Some(BPoly::new(q))
    }

    /// Scale so that the leading coefficient of the leading `y`-coefficient is 1.
    pub fn normalized(&self) -> BPoly {
        if self.is_zero() {
            return BPoly::zero();
        }
        let lc = self.lc_y().lc();
        self.scale(&lc.recip())
    }

    /// Equal up to a non-zero rational factor.
    pub fn same_up_to_scalar(&self, other: &BPoly) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Add for &BPoly {
    type Output = BPoly;
    fn add(self, rhs: &BPoly) -> BPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        BPoly::new((0..n).map(|i| &self.coeff_y(i) + &rhs.coeff_y(i)).collect())
    }
}

impl Sub for &BPoly {
    type Output = BPoly;
    fn sub(self, rhs: &BPoly) -> BPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        BPoly::new((0..n).map(|i| &self.coeff_y(i) - &rhs.coeff_y(i)).collect())
    }
}

impl Mul for &BPoly {
    type Output = BPoly;
    fn mul(self, rhs: &BPoly) -> BPoly {
        if self.is_zero() || rhs.is_zero() {
            return BPoly::zero();
        }
        let mut out = vec![UPoly::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        BPoly::new(out)
    }
}

impl Neg for &BPoly {
    type Output = BPoly;
    fn neg(self) -> BPoly {
        BPoly::new(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl fmt::Display for BPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (j, c) in self.coeffs.iter().enumerate().rev() {
            for (i, a) in c.coeffs().iter().enumerate().rev() {
                if a.is_zero() {
                    continue;
                }
                let mono = match (monomial_name("x", i), monomial_name("y", j)) {
                    (mx, my) if mx.is_empty() => my,
                    (mx, my) if my.is_empty() => mx,
                    (mx, my) => format!("{mx}*{my}"),
                };
                write_term(f, a, &mono, first)?;
                first = false;
            }
        }
        Ok(())
    }
}
