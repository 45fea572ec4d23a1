//! Lexicographic (x, then y) order over points.

use std::cmp::Ordering;
use tracing::{debug, trace};

use super::Point;
use crate::algebraic::AlgebraicReal;
use crate::curve::{CurveAnalysis, CurveKernel, CurvePairAnalysis, PairFiber};
use crate::session::Session;

impl<K: CurveKernel> Session<K> {
    pub fn compare_x(&self, p: &Point<K::Curve>, q: &Point<K::Curve>) -> Ordering {
        if p.is_identical(q) {
            return Ordering::Equal;
        }
        p.x().compare(q.x())
    }

    /// Total order by x, then y. With `assume_equal_x` the caller vouches
    /// for equal x and only the covertical comparison runs.
    pub fn compare_xy(
        &self,
        p: &Point<K::Curve>,
        q: &Point<K::Curve>,
        assume_equal_x: bool,
    ) -> Ordering {
        if p.is_identical(q) {
            return Ordering::Equal;
        }
        let by_x = if assume_equal_x {
            Ordering::Equal
        } else {
            self.compare_x(p, q)
        };
        if by_x != Ordering::Equal {
            return by_x;
        }
        self.compare_y_at_x(p, q)
    }

    /// Order of two covertical points by y, without computing y.
    ///
    /// Panics if the x-coordinates differ.
    pub fn compare_y_at_x(&self, p: &Point<K::Curve>, q: &Point<K::Curve>) -> Ordering {
        assert_eq!(
            self.compare_x(p, q),
            Ordering::Equal,
            "covertical comparison of points with different x"
        );
        // every successful simplification lowers the degree of a support
        let budget = p.curve_degree().max(0) + q.curve_degree().max(0) + 1;
        for round in 0..budget {
            let (f, g) = (p.curve(), q.curve());
            if f.is_identical(&g) {
                return p.arc().cmp(&q.arc());
            }
            if self.simplify(p, q) {
                trace!(round, "supports simplified, comparing again");
                continue;
            }
            debug!(first = %f, second = %g, "comparing through a curve pair");
            let pair = self.kernel.curve_pair(&f, &g);
            let fiber = pair.fiber_at(p.x());
            return fiber
                .event_of_curve(p.arc(), 0)
                .cmp(&fiber.event_of_curve(q.arc(), 1));
        }
        panic!("covertical comparison did not settle after {budget} simplifications");
    }

    pub fn equal(&self, p: &Point<K::Curve>, q: &Point<K::Curve>) -> bool {
        self.compare_xy(p, q, false) == Ordering::Equal
    }

    pub fn less(&self, p: &Point<K::Curve>, q: &Point<K::Curve>) -> bool {
        self.compare_xy(p, q, false) == Ordering::Less
    }

    /// Sort ascending in (x, y).
    pub fn sort_points(&self, points: &mut [Point<K::Curve>]) {
        points.sort_by(|p, q| self.compare_xy(p, q, false));
    }
}
