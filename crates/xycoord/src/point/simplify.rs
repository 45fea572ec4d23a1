//! Moving points onto lower-degree supports when two curves share a component.

use tracing::debug;

use super::Point;
use crate::curve::{CurveAnalysis, CurveKernel, CurvePairAnalysis, Fiber, PairFiber};
use crate::session::Session;

impl<K: CurveKernel> Session<K> {
    /// Rewrite `p` and `q` onto parts of their supports if the supports share
    /// a component. Returns whether a decomposition was found.
    ///
    /// Panics if the kernel reports a decomposition of unsupported shape.
    pub fn simplify(&self, p: &Point<K::Curve>, q: &Point<K::Curve>) -> bool {
        let Some(d) = self.kernel.decompose(&p.curve(), &q.curve()) else {
            return false;
        };
        assert!(
            (d.parts_of_first.len() == 1 || d.parts_of_second.len() == 1) && d.common.len() == 1,
            "unsupported decomposition: {} / {} own parts, {} common parts",
            d.parts_of_first.len(),
            d.parts_of_second.len(),
            d.common.len()
        );
        if let [own] = d.parts_of_first.as_slice() {
            p.simplify_by(&self.kernel.curve_pair(own, &d.common[0]));
        }
        if let [own] = d.parts_of_second.as_slice() {
            q.simplify_by(&self.kernel.curve_pair(own, &d.common[0]));
        }
        true
    }
}

impl<C: CurveAnalysis> Point<C> {
    /// Move the point onto whichever curve of `pair` carries it.
    ///
    /// `pair` must split the current support: the product of its curves
    /// equals the supporting polynomial up to a constant. If both curves pass
    /// through the point the one of lower total degree is taken (first on ties).
    pub fn simplify_by<P>(&self, pair: &P)
    where
        P: CurvePairAnalysis<Curve = C>,
    {
        let (a, b) = (pair.curve(0), pair.curve(1));
        let old = self.curve();
        debug_assert!(
            (a.polynomial() * b.polynomial()).same_up_to_scalar(old.polynomial()),
            "curve pair ({a}, {b}) does not split the support {old}"
        );
        let fiber = pair.fiber_at(self.x());
        debug_assert_eq!(
            fiber.event_count(),
            self.fiber().event_count(),
            "pair fiber and support fiber disagree on the event count"
        );
        let arc = self.arc();
        let (side, new_arc) = match fiber.curves_at_event(arc) {
            (Some(i), Some(j)) => {
                if a.total_degree() > b.total_degree() {
                    (1, j)
                } else {
                    (0, i)
                }
            }
            (Some(i), None) => (0, i),
            (None, Some(j)) => (1, j),
            (None, None) => panic!("event {arc} belongs to neither curve of the pair"),
        };
        let curve = pair.curve(side).clone();
        debug!(from = %old, to = %curve, arc, new_arc, "point simplified");
        self.replace_support(curve, new_arc);
    }
}
