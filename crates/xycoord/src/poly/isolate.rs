//! Sturm-based real root isolation and bisection refinement.
//!
//! Shared by rational polynomials and by polynomials over a real number
//! field; both only need exact signs at rational points.

use num_rational::BigRational;
use std::cmp::Ordering;

use super::interval::Interval;

/// Exact sign oracle plus Sturm sign variations of a square-free polynomial.
pub(crate) trait SturmChain {
    fn sign_at(&self, t: &BigRational) -> Ordering;
    fn variations(&self, t: &BigRational) -> usize;

    /// Number of distinct roots in `(a, b]`.
    fn count(&self, a: &BigRational, b: &BigRational) -> usize {
        self.variations(a).saturating_sub(self.variations(b))
    }

    /// Number of distinct roots in `[a, b]`.
    fn count_closed(&self, a: &BigRational, b: &BigRational) -> usize {
        let at_a = usize::from(self.sign_at(a) == Ordering::Equal);
        if a == b {
            return at_a;
        }
        self.count(a, b) + at_a
    }
}

/// Isolate all roots in `(lo, hi)`; `lo` and `hi` must not be roots.
pub(crate) fn isolate_roots<C: SturmChain + ?Sized>(
    chain: &C,
    lo: BigRational,
    hi: BigRational,
) -> Vec<Interval> {
    let mut out = Vec::new();
    let n = chain.count(&lo, &hi);
    isolate_into(chain, lo, hi, n, &mut out);
    out
}

fn isolate_into<C: SturmChain + ?Sized>(
    chain: &C,
    lo: BigRational,
    hi: BigRational,
    n: usize,
    out: &mut Vec<Interval>,
) {
    match n {
        0 => {}
        1 => out.push(Interval::new(lo, hi)),
        _ => {
            let mid = (&lo + &hi) / BigRational::from_integer(2.into());
            if chain.sign_at(&mid) == Ordering::Equal {
                let (l, r) = punch_out(chain, &lo, &mid, &hi);
                let nl = chain.count(&lo, &l);
                let nr = chain.count(&r, &hi);
                isolate_into(chain, lo, l, nl, out);
                out.push(Interval::point(mid));
                isolate_into(chain, r, hi, nr, out);
            } else {
                let nl = chain.count(&lo, &mid);
                isolate_into(chain, lo, mid.clone(), nl, out);
                isolate_into(chain, mid, hi, n - nl, out);
            }
        }
    }
}

/// Non-root points `l < mid < r` with `mid` the only root in `[l, r]`.
fn punch_out<C: SturmChain + ?Sized>(
    chain: &C,
    lo: &BigRational,
    mid: &BigRational,
    hi: &BigRational,
) -> (BigRational, BigRational) {
    let two = BigRational::from_integer(2.into());
    let left = mid - lo;
    let right = hi - mid;
    let narrow = if left < right { left } else { right };
    let mut d = narrow / &two;
    loop {
        let l = mid - &d;
        let r = mid + &d;
        if chain.sign_at(&l) != Ordering::Equal
            && chain.sign_at(&r) != Ordering::Equal
            && chain.count(&l, &r) == 1
        {
            return (l, r);
        }
        d = d / &two;
    }
}

/// One bisection step on an isolating interval; width at least halves.
pub(crate) fn bisect<C: SturmChain + ?Sized>(chain: &C, iv: &Interval) -> Interval {
    if iv.is_point() {
        return iv.clone();
    }
    let mid = iv.midpoint();
    let s_mid = chain.sign_at(&mid);
    if s_mid == Ordering::Equal {
        return Interval::point(mid);
    }
    if s_mid != chain.sign_at(&iv.lo) {
        Interval::new(iv.lo.clone(), mid)
    } else {
        Interval::new(mid, iv.hi.clone())
    }
}

/// Non-degenerate neighbourhood of the exact root `r` holding no other root,
/// with non-root endpoints, of radius at most `max_radius`.
pub(crate) fn widen_point<C: SturmChain + ?Sized>(
    chain: &C,
    r: &BigRational,
    max_radius: &BigRational,
) -> Interval {
    let two = BigRational::from_integer(2.into());
    let mut d = max_radius.clone();
    loop {
        let l = r - &d;
        let h = r + &d;
        if chain.sign_at(&l) != Ordering::Equal
            && chain.sign_at(&h) != Ordering::Equal
            && chain.count_closed(&l, &h) == 1
        {
            return Interval::new(l, h);
        }
        d = d / &two;
    }
}
