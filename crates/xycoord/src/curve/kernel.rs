use rustc_hash::FxHashMap;
use std::cell::RefCell;
use tracing::debug;

use super::{CurveError, CurveKernel, Decomposition, ExactCurve, ExactCurvePair};
use crate::algebraic::Algebraic;
use crate::poly::{BPoly, UPoly};

/// Exact curve kernel over Q.
///
/// Curves are interned by normalized polynomial, so equal polynomials (up
/// to a rational factor) always yield identical handles. Curve pairs are
/// cached by the ordered pair of polynomials.
#[derive(Default)]
pub struct ExactKernel {
    curves: RefCell<FxHashMap<BPoly, ExactCurve>>,
    pairs: RefCell<FxHashMap<(BPoly, BPoly), ExactCurvePair>>,
}

impl ExactKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The curve of `poly`, validated on first use.
    pub fn curve(&self, poly: &BPoly) -> Result<ExactCurve, CurveError> {
        let key = poly.normalized();
        if let Some(c) = self.curves.borrow().get(&key) {
            return Ok(c.clone());
        }
        let curve = ExactCurve::new(key.clone())?;
        self.curves.borrow_mut().insert(key, curve.clone());
        Ok(curve)
    }

    /// Number of distinct curves created so far.
    pub fn curve_count(&self) -> usize {
        self.curves.borrow().len()
    }

    /// Curve of a factor of a valid curve polynomial (always valid itself).
    fn factor_curve(&self, poly: &BPoly) -> ExactCurve {
        self.curve(poly)
            .unwrap_or_else(|e| panic!("factor {poly} of a valid curve was rejected: {e}"))
    }
}

impl CurveKernel for ExactKernel {
    type Curve = ExactCurve;
    type Pair = ExactCurvePair;

    fn curve_pair(&self, a: &ExactCurve, b: &ExactCurve) -> ExactCurvePair {
        let key = (a.polynomial().clone(), b.polynomial().clone());
        if let Some(p) = self.pairs.borrow().get(&key) {
            return p.clone();
        }
        let pair = ExactCurvePair::new(a.clone(), b.clone());
        self.pairs.borrow_mut().insert(key, pair.clone());
        pair
    }

    /// Split through the bivariate gcd `h`: `{f/h}`, `{g/h}`, `{h}`, where
    /// constant quotients contribute no part.
    fn decompose(&self, a: &ExactCurve, b: &ExactCurve) -> Option<Decomposition<ExactCurve>> {
        let (f, g) = (a.polynomial(), b.polynomial());
        let h = BPoly::gcd(f, g);
        if h.total_degree() <= 0 {
            return None;
        }
        let own_part = |p: &BPoly| -> Vec<ExactCurve> {
            let quotient = p
                .exact_div(&h)
                .unwrap_or_else(|| unreachable!("gcd divides both curves"));
            if quotient.is_constant() {
                Vec::new()
            } else {
                vec![self.factor_curve(&quotient)]
            }
        };
        let parts_of_first = own_part(f);
        let parts_of_second = own_part(g);
        if parts_of_first.is_empty() && parts_of_second.is_empty() {
            return None;
        }
        debug!(
            first = %f,
            second = %g,
            common = %h,
            "curves share a component"
        );
        Some(Decomposition {
            parts_of_first,
            parts_of_second,
            common: vec![self.factor_curve(&h)],
        })
    }

    fn real_roots(&self, p: &UPoly) -> Vec<Algebraic> {
        Algebraic::real_roots(p)
    }
}
