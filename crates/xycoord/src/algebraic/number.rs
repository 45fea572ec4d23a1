use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

use super::AlgebraicReal;
use crate::poly::isolate::{bisect, SturmChain};
use crate::poly::univariate::UChain;
use crate::poly::{Interval, UPoly};

/// Upper bound on bisections spent by `to_f64`.
const TO_F64_STEPS: usize = 1100;

/// Exact real algebraic number: a square-free polynomial plus an isolating
/// interval holding exactly one of its roots.
///
/// The interval is either a point `[r, r]` (the value is rational and known
/// exactly) or has endpoints that are not roots of the polynomial.
/// Clones share the representation; refinement through any clone is seen by
/// all of them.
#[derive(Clone)]
pub struct Algebraic(Rc<RefCell<Repr>>);

struct Repr {
    chain: Rc<UChain>,
    iv: Interval,
}

impl Algebraic {
    pub fn from_rational(r: BigRational) -> Self {
        let chain = Rc::new(UChain::new(UPoly::linear_root(&r)));
        Self(Rc::new(RefCell::new(Repr {
            chain,
            iv: Interval::point(r),
        })))
    }

    pub fn from_i64(n: i64) -> Self {
        Self::from_rational(BigRational::from_integer(n.into()))
    }

    /// All distinct real roots of `p`, ascending.
    ///
    /// Panics if `p` is the zero polynomial.
    pub fn real_roots(p: &UPoly) -> Vec<Algebraic> {
        assert!(!p.is_zero(), "real roots of the zero polynomial");
        if p.is_constant() {
            return Vec::new();
        }
        let chain = Rc::new(UChain::new(p.square_free()));
        let b = chain.poly.root_bound();
        crate::poly::isolate::isolate_roots(&*chain, -b.clone(), b)
            .into_iter()
            .map(|iv| Self::with_chain(chain.clone(), iv))
            .collect()
    }

    fn with_chain(chain: Rc<UChain>, iv: Interval) -> Self {
        if iv.is_point() {
            return Self::from_rational(iv.lo);
        }
        if chain.poly.degree() == 1 {
            let r = -chain.poly.coeff(0) / chain.poly.coeff(1);
            return Self::from_rational(r);
        }
        Self(Rc::new(RefCell::new(Repr { chain, iv })))
    }

    #[inline]
    pub fn lower(&self) -> BigRational {
        self.0.borrow().iv.lo.clone()
    }

    #[inline]
    pub fn upper(&self) -> BigRational {
        self.0.borrow().iv.hi.clone()
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.0.borrow().iv.clone()
    }

    pub fn polynomial(&self) -> UPoly {
        self.0.borrow().chain.poly.clone()
    }

    pub fn degree(&self) -> i32 {
        self.0.borrow().chain.poly.degree()
    }

    /// Exact rational value, if known.
    pub fn as_rational(&self) -> Option<BigRational> {
        let r = self.0.borrow();
        r.iv.is_point().then(|| r.iv.lo.clone())
    }

    #[inline]
    pub fn is_identical(&self, other: &Algebraic) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// One bisection step: the width halves or the value becomes exact.
    pub fn refine(&self) {
        let mut r = self.0.borrow_mut();
        if r.iv.is_point() {
            return;
        }
        let next = bisect(&*r.chain, &r.iv);
        if next.is_point() {
            r.chain = Rc::new(UChain::new(UPoly::linear_root(&next.lo)));
        }
        r.iv = next;
    }

    /// Refine until the interval is narrower than `bound`.
    pub fn refine_below(&self, bound: &BigRational) -> Interval {
        assert!(bound.is_positive(), "refinement bound must be positive");
        loop {
            let iv = self.interval();
            if &iv.width() < bound {
                return iv;
            }
            self.refine();
        }
    }

    pub fn compare(&self, other: &Algebraic) -> Ordering {
        if self.is_identical(other) {
            return Ordering::Equal;
        }
        let mut equality_decided = false;
        loop {
            let a = self.interval();
            let b = other.interval();
            if a.hi < b.lo {
                return Ordering::Less;
            }
            if b.hi < a.lo {
                return Ordering::Greater;
            }
            if !equality_decided {
                if self.shares_root_with(other, &a, &b) {
                    return Ordering::Equal;
                }
                equality_decided = true;
            }
            trace!(a = %a, b = %b, "separating algebraic numbers");
            if a.width() >= b.width() {
                self.refine();
            } else {
                other.refine();
            }
        }
    }

    /// Both isolating intervals overlap; decide whether they hold the same root.
    fn shares_root_with(&self, other: &Algebraic, a: &Interval, b: &Interval) -> bool {
        if a.is_point() {
            return other.0.borrow().chain.poly.eval(&a.lo).is_zero();
        }
        if b.is_point() {
            return self.0.borrow().chain.poly.eval(&b.lo).is_zero();
        }
        let g = UPoly::gcd(&self.polynomial(), &other.polynomial());
        if g.is_constant() {
            return false;
        }
        let lo = if a.lo > b.lo { &a.lo } else { &b.lo };
        let hi = if a.hi < b.hi { &a.hi } else { &b.hi };
        UChain::new(g).count_closed(lo, hi) > 0
    }

    pub fn is_zero(&self) -> bool {
        let r = self.0.borrow();
        let zero = BigRational::zero();
        r.iv.contains(&zero) && r.chain.poly.eval(&zero).is_zero()
    }

    pub fn is_root_of(&self, q: &UPoly) -> bool {
        if q.is_zero() {
            return true;
        }
        let r = self.0.borrow();
        if r.iv.is_point() {
            return q.eval(&r.iv.lo).is_zero();
        }
        let g = UPoly::gcd(&r.chain.poly, q);
        !g.is_constant() && UChain::new(g).count_closed(&r.iv.lo, &r.iv.hi) > 0
    }

    /// Sign of `q` at this number.
    pub fn sign_of(&self, q: &UPoly) -> Ordering {
        if self.is_root_of(q) {
            return Ordering::Equal;
        }
        loop {
            let e = q.eval_interval(&self.interval());
            if e.lo.is_positive() {
                return Ordering::Greater;
            }
            if e.hi.is_negative() {
                return Ordering::Less;
            }
            self.refine();
        }
    }

    /// Replace the defining polynomial by a factor that still vanishes here.
    pub(crate) fn narrow(&self, factor: &UPoly) {
        debug_assert!(self.is_root_of(factor), "narrowing to a non-vanishing factor");
        let mut r = self.0.borrow_mut();
        if r.iv.is_point() {
            return;
        }
        let factor = factor.monic();
        trace!(from = %r.chain.poly, to = %factor, "narrowing defining polynomial");
        if factor.degree() == 1 {
            let v = -factor.coeff(0);
            r.chain = Rc::new(UChain::new(factor));
            r.iv = Interval::point(v);
        } else {
            r.chain = Rc::new(UChain::new(factor));
        }
    }

    /// Nearest `f64`, refining until both bounds round to the same double.
    pub fn to_f64(&self) -> f64 {
        self.to_f64_with(TO_F64_STEPS)
    }

    pub(crate) fn to_f64_with(&self, max_steps: usize) -> f64 {
        for _ in 0..max_steps {
            let iv = self.interval();
            let lo = iv.lo.to_f64().unwrap_or(f64::NAN);
            if iv.is_point() || lo == iv.hi.to_f64().unwrap_or(f64::NAN) {
                return lo;
            }
            self.refine();
        }
        self.interval().midpoint().to_f64().unwrap_or(f64::NAN)
    }
}

impl AlgebraicReal for Algebraic {
    fn lower(&self) -> BigRational {
        Algebraic::lower(self)
    }

    fn upper(&self) -> BigRational {
        Algebraic::upper(self)
    }

    fn interval(&self) -> Interval {
        Algebraic::interval(self)
    }

    fn refine(&self) {
        Algebraic::refine(self)
    }

    fn compare(&self, other: &Self) -> Ordering {
        Algebraic::compare(self, other)
    }

    fn is_identical(&self, other: &Self) -> bool {
        Algebraic::is_identical(self, other)
    }

    fn is_zero(&self) -> bool {
        Algebraic::is_zero(self)
    }

    fn is_root_of(&self, p: &UPoly) -> bool {
        Algebraic::is_root_of(self, p)
    }

    fn polynomial(&self) -> UPoly {
        Algebraic::polynomial(self)
    }

    fn to_f64(&self) -> f64 {
        Algebraic::to_f64(self)
    }
}

impl fmt::Debug for Algebraic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0.borrow();
        f.debug_struct("Algebraic")
            .field("poly", &r.chain.poly.to_string())
            .field("interval", &r.iv.to_string())
            .finish()
    }
}

impl fmt::Display for Algebraic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0.borrow();
        if r.iv.is_point() {
            write!(f, "{}", r.iv.lo)
        } else {
            write!(f, "root of {} in {}", r.chain.poly, r.iv)
        }
    }
}
