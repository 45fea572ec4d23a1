//! Arithmetic in Q(α) for a real algebraic α, and polynomials in `y` over it.
//!
//! The defining polynomial of α is square-free but may be reducible. Zero
//! tests and inversions are decided exactly at α; whenever one of them
//! exposes a proper factor that still vanishes at α, α is narrowed to that
//! factor (dynamic evaluation). Element representatives stay valid because
//! reducing modulo a factor of the modulus is consistent.

use num_rational::BigRational;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use tracing::trace;

use super::Algebraic;
use crate::poly::isolate::SturmChain;
use crate::poly::univariate::sign_variations;
use crate::poly::{BPoly, Interval, UPoly};

/// The real number field Q(α); elements are `UPoly` in α.
#[derive(Clone, Debug)]
pub(crate) struct NumberField {
    alpha: Algebraic,
}

impl NumberField {
    pub(crate) fn new(alpha: Algebraic) -> Self {
        Self { alpha }
    }

    pub(crate) fn alpha(&self) -> &Algebraic {
        &self.alpha
    }

    fn modulus(&self) -> UPoly {
        self.alpha.polynomial()
    }

    pub(crate) fn reduce(&self, e: &UPoly) -> UPoly {
        e.rem(&self.modulus())
    }

    pub(crate) fn is_zero(&self, e: &UPoly) -> bool {
        let m = self.modulus();
        let r = e.rem(&m);
        if r.is_zero() {
            return true;
        }
        if !self.alpha.is_root_of(&r) {
            return false;
        }
        let g = UPoly::gcd(&r, &m);
        trace!(factor = %g, "zero divisor found, narrowing α");
        self.alpha.narrow(&g);
        true
    }

    pub(crate) fn sign(&self, e: &UPoly) -> Ordering {
        self.alpha.sign_of(e)
    }

    pub(crate) fn mul(&self, a: &UPoly, b: &UPoly) -> UPoly {
        self.reduce(&(a * b))
    }

    /// Multiplicative inverse; panics on zero.
    pub(crate) fn inv(&self, e: &UPoly) -> UPoly {
        assert!(!self.is_zero(e), "inverse of zero in Q(α)");
        loop {
            let m = self.modulus();
            if let Some(i) = e.inverse_mod(&m) {
                return i;
            }
            // α is no root of gcd(e, m) because e(α) != 0
            let g = UPoly::gcd(e, &m);
            let cofactor = m
                .exact_div(&g)
                .unwrap_or_else(|| unreachable!("gcd divides the modulus"));
            trace!(factor = %cofactor, "inversion hit a zero divisor, narrowing α");
            self.alpha.narrow(&cofactor);
        }
    }

    /// Interval enclosure of `e(α)` at α's current approximation.
    pub(crate) fn enclose(&self, e: &UPoly) -> Interval {
        e.eval_interval(&self.alpha.interval())
    }
}

/// Polynomial in `y` with coefficients in Q(α), low → high.
///
/// Trimmed polynomials have a leading coefficient that is non-zero at α.
#[derive(Clone, Debug, Default)]
pub(crate) struct FPoly {
    coeffs: Vec<UPoly>,
}

impl FPoly {
    /// `f(α, y)`.
    pub(crate) fn from_bpoly(field: &NumberField, f: &BPoly) -> Self {
        Self::trimmed(field, f.coeffs().iter().map(|c| field.reduce(c)).collect())
    }

    fn trimmed(field: &NumberField, mut coeffs: Vec<UPoly>) -> Self {
        while coeffs.last().is_some_and(|c| field.is_zero(c)) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    #[inline]
    pub(crate) fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[inline]
    pub(crate) fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    fn lc(&self) -> &UPoly {
        self.coeffs
            .last()
            .unwrap_or_else(|| panic!("leading coefficient of the zero polynomial"))
    }

    fn neg(&self) -> FPoly {
        FPoly {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    pub(crate) fn derivative(&self, field: &NumberField) -> FPoly {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c.scale(&BigRational::from_integer(i.into())))
            .collect();
        Self::trimmed(field, coeffs)
    }

    /// Euclidean division by a trimmed non-zero `d`.
    pub(crate) fn div_rem(&self, d: &FPoly, field: &NumberField) -> (FPoly, FPoly) {
        assert!(!d.is_zero(), "polynomial division by zero");
        let n = d.coeffs.len();
        if self.coeffs.len() < n {
            return (FPoly::default(), self.clone());
        }
        let inv = field.inv(d.lc());
        let mut rem = self.coeffs.clone();
        let mut quot = vec![UPoly::zero(); rem.len() - n + 1];
        while rem.len() >= n {
            let k = rem.len() - n;
            let c = field.mul(&rem[rem.len() - 1], &inv);
            for (j, dc) in d.coeffs.iter().enumerate() {
                rem[k + j] = field.reduce(&(&rem[k + j] - &(&c * dc)));
            }
            // the leading term cancels exactly at α
            rem.pop();
            quot[k] = c;
            while rem.last().is_some_and(|c| field.is_zero(c)) {
                rem.pop();
            }
        }
        (
            Self::trimmed(field, quot),
            Self::trimmed(field, rem),
        )
    }

    pub(crate) fn rem(&self, d: &FPoly, field: &NumberField) -> FPoly {
        self.div_rem(d, field).1
    }

    pub(crate) fn monic(&self, field: &NumberField) -> FPoly {
        if self.is_zero() {
            return FPoly::default();
        }
        let inv = field.inv(self.lc());
        let coeffs = self.coeffs.iter().map(|c| field.mul(c, &inv)).collect();
        Self::trimmed(field, coeffs)
    }

    pub(crate) fn gcd(a: &FPoly, b: &FPoly, field: &NumberField) -> FPoly {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(&b, field);
            a = b;
            b = r;
        }
        a.monic(field)
    }

    /// Same distinct roots, all simple.
    pub(crate) fn square_free(&self, field: &NumberField) -> FPoly {
        if self.degree() <= 0 {
            return self.clone();
        }
        let g = FPoly::gcd(self, &self.derivative(field), field);
        self.div_rem(&g, field).0.monic(field)
    }

    /// `p(α, t)` as an element of Q(α).
    pub(crate) fn eval(&self, field: &NumberField, t: &BigRational) -> UPoly {
        let mut acc = UPoly::zero();
        for c in self.coeffs.iter().rev() {
            acc = &acc.scale(t) + c;
        }
        field.reduce(&acc)
    }

    /// Cauchy bound on the absolute value of the real roots.
    pub(crate) fn root_bound(&self, field: &NumberField) -> BigRational {
        let lc = self.lc();
        let lc_min = loop {
            let e = field.enclose(lc);
            if !e.contains_zero() {
                break e.mignitude();
            }
            field.alpha().refine();
        };
        let top = self.coeffs[..self.coeffs.len() - 1]
            .iter()
            .map(|c| field.enclose(c).magnitude())
            .fold(BigRational::zero(), |m, v| if v > m { v } else { m });
        top / lc_min + BigRational::one()
    }
}

/// Sturm chain of a square-free `FPoly`, signs decided at α.
pub(crate) struct FChain {
    field: NumberField,
    seq: Vec<FPoly>,
}

impl FChain {
    pub(crate) fn new(field: NumberField, poly: FPoly) -> Self {
        let mut seq = vec![poly.clone()];
        if poly.degree() > 0 {
            seq.push(poly.derivative(&field));
            loop {
                let n = seq.len();
                let r = seq[n - 2].rem(&seq[n - 1], &field);
                if r.is_zero() {
                    break;
                }
                seq.push(r.neg());
            }
        }
        Self { field, seq }
    }

    pub(crate) fn poly(&self) -> &FPoly {
        &self.seq[0]
    }

    /// Isolating intervals of the distinct real roots, ascending.
    pub(crate) fn isolate(&self) -> Vec<Interval> {
        if self.poly().degree() <= 0 {
            return Vec::new();
        }
        let b = self.poly().root_bound(&self.field);
        crate::poly::isolate::isolate_roots(self, -b.clone(), b)
    }
}

impl SturmChain for FChain {
    fn sign_at(&self, t: &BigRational) -> Ordering {
        self.field.sign(&self.seq[0].eval(&self.field, t))
    }

    fn variations(&self, t: &BigRational) -> usize {
        sign_variations(
            self.seq
                .iter()
                .map(|p| self.field.sign(&p.eval(&self.field, t))),
        )
    }
}
