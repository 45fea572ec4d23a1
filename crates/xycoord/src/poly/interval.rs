//! Closed rational intervals and the outward `f64` rounding used for boxes.

use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;

/// Closed interval `[lo, hi]` with exact rational endpoints.
///
/// Invariant: `lo <= hi`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lo: BigRational,
    pub hi: BigRational,
}

impl Interval {
    #[inline]
    pub fn new(lo: BigRational, hi: BigRational) -> Self {
        assert!(lo <= hi, "interval bounds out of order: [{lo}, {hi}]");
        Self { lo, hi }
    }

    #[inline]
    pub fn point(v: BigRational) -> Self {
        Self {
            lo: v.clone(),
            hi: v,
        }
    }

    #[inline]
    pub fn width(&self) -> BigRational {
        &self.hi - &self.lo
    }

    #[inline]
    pub fn midpoint(&self) -> BigRational {
        (&self.lo + &self.hi) / BigRational::from_integer(2.into())
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn contains(&self, v: &BigRational) -> bool {
        &self.lo <= v && v <= &self.hi
    }

    #[inline]
    pub fn contains_zero(&self) -> bool {
        !self.lo.is_positive() && !self.hi.is_negative()
    }

    /// Closed-interval overlap test.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Largest absolute value attained on the interval.
    pub fn magnitude(&self) -> BigRational {
        let a = self.lo.abs();
        let b = self.hi.abs();
        if a > b {
            a
        } else {
            b
        }
    }

    /// Smallest absolute value attained on the interval (zero if it straddles 0).
    pub fn mignitude(&self) -> BigRational {
        if self.contains_zero() {
            BigRational::zero()
        } else if self.lo.is_positive() {
            self.lo.clone()
        } else {
            self.hi.abs()
        }
    }

    pub fn add(&self, other: &Interval) -> Interval {
        Interval {
            lo: &self.lo + &other.lo,
            hi: &self.hi + &other.hi,
        }
    }

    pub fn mul(&self, other: &Interval) -> Interval {
        let products = [
            &self.lo * &other.lo,
            &self.lo * &other.hi,
            &self.hi * &other.lo,
            &self.hi * &other.hi,
        ];
        let mut lo = products[0].clone();
        let mut hi = products[0].clone();
        for p in &products[1..] {
            if *p < lo {
                lo = p.clone();
            }
            if *p > hi {
                hi = p.clone();
            }
        }
        Interval { lo, hi }
    }

    pub fn scale(&self, c: &BigRational) -> Interval {
        let a = &self.lo * c;
        let b = &self.hi * c;
        if a <= b {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    /// Smallest `f64` interval containing this one.
    pub fn to_f64_hull(&self) -> (f64, f64) {
        (round_down(&self.lo), round_up(&self.hi))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Nearest `f64` that does not exceed `r`.
pub fn round_down(r: &BigRational) -> f64 {
    let f = r.to_f64().unwrap_or(f64::NAN);
    if !f.is_finite() {
        return if r.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::MAX
        };
    }
    match BigRational::from_float(f) {
        Some(back) if &back > r => step_down(f),
        _ => f,
    }
}

/// Nearest `f64` that is not below `r`.
pub fn round_up(r: &BigRational) -> f64 {
    let f = r.to_f64().unwrap_or(f64::NAN);
    if !f.is_finite() {
        return if r.is_negative() {
            f64::MIN
        } else {
            f64::INFINITY
        };
    }
    match BigRational::from_float(f) {
        Some(back) if &back < r => step_up(f),
        _ => f,
    }
}

fn step_up(f: f64) -> f64 {
    if f == 0.0 {
        return f64::from_bits(1);
    }
    let bits = f.to_bits();
    if f > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn step_down(f: f64) -> f64 {
    -step_up(-f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    #[test]
    fn mul_handles_mixed_signs() {
        let a = Interval::new(q(-1, 1), q(2, 1));
        let b = Interval::new(q(-3, 1), q(1, 1));
        let c = a.mul(&b);
        assert_eq!(c.lo, q(-6, 1));
        assert_eq!(c.hi, q(3, 1));
    }

    #[test]
    fn outward_rounding_contains_third() {
        let third = q(1, 3);
        let lo = round_down(&third);
        let hi = round_up(&third);
        assert!(lo < hi);
        assert!(BigRational::from_float(lo).unwrap() <= third);
        assert!(BigRational::from_float(hi).unwrap() >= third);
        // exactly representable values round to themselves
        assert_eq!(round_down(&q(1, 4)), 0.25);
        assert_eq!(round_up(&q(1, 4)), 0.25);
    }

    #[test]
    fn overlap_is_closed() {
        let a = Interval::new(q(0, 1), q(1, 1));
        let b = Interval::new(q(1, 1), q(2, 1));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&Interval::point(q(3, 2))));
        assert_eq!(Interval::new(q(-2, 1), q(1, 1)).mignitude(), q(0, 1));
        assert_eq!(Interval::new(q(-2, 1), q(-1, 1)).mignitude(), q(1, 1));
    }
}
