//! Lazy y-coordinate: eliminate x, isolate, and keep the one candidate the
//! point's own y-interval agrees with.

use std::cmp::Ordering;
use tracing::{debug, trace};

use super::Point;
use crate::algebraic::AlgebraicReal;
use crate::curve::{CurveAnalysis, CurveKernel, Fiber};
use crate::poly::{resultant_x, BPoly, UPoly};
use crate::session::{AlgebraicOf, Session};

impl<K: CurveKernel> Session<K> {
    /// The y-coordinate of `p` as an algebraic number (computed once per point).
    pub fn y(&self, p: &Point<K::Curve>) -> AlgebraicOf<K> {
        let rep = p.rep();
        if let Some(y) = rep.y.get() {
            return y.clone();
        }
        let curve = p.curve();
        let critical = p.fiber().incident_branches(p.arc()) != (1, 1);
        let mut alive: Vec<AlgebraicOf<K>> = self
            .y_candidates(&curve, p.x(), critical)
            .into_iter()
            .filter(|c| c.interval().overlaps(&p.approx_y()))
            .collect();
        assert!(
            !alive.is_empty(),
            "no y-candidate overlaps the y-interval of {p}"
        );
        let mut rounds = 0;
        while alive.len() > 1 {
            assert!(
                rounds < self.cfg.max_refinements,
                "y-candidates of {p} not separated after {rounds} refinements"
            );
            p.refine_y();
            rounds += 1;
            let iy = p.approx_y();
            alive.retain(|c| c.interval().overlaps(&iy));
            trace!(rounds, alive = alive.len(), "separating y-candidates");
        }
        let y = alive.swap_remove(0);
        rep.y.get_or_init(|| y).clone()
    }

    /// Cached candidate list for the fiber of `curve` at `x`.
    fn y_candidates(
        &self,
        curve: &K::Curve,
        x: &AlgebraicOf<K>,
        critical: bool,
    ) -> Vec<AlgebraicOf<K>> {
        let f = curve.polynomial();
        if let Some(hit) = self.lookup_y_roots(f, x, critical) {
            return hit;
        }
        let poly = if critical {
            critical_y_polynomial(f).unwrap_or_else(|| regular_y_polynomial(f, &x.polynomial()))
        } else {
            regular_y_polynomial(f, &x.polynomial())
        };
        let roots = self.kernel.real_roots(&poly);
        debug!(
            curve = %f,
            critical,
            candidates = roots.len(),
            "y-candidates isolated"
        );
        self.store_y_roots(f, x, critical, roots)
    }

    fn lookup_y_roots(
        &self,
        f: &BPoly,
        x: &AlgebraicOf<K>,
        critical: bool,
    ) -> Option<Vec<AlgebraicOf<K>>> {
        let cache = self.y_roots.borrow();
        let (_, entry) = cache
            .get(f)?
            .iter()
            .find(|(x0, _)| x0.compare(x) == Ordering::Equal)?;
        if critical {
            entry.critical.clone()
        } else {
            entry.regular.clone()
        }
    }

    /// Insert-if-absent; returns the list that ends up cached.
    fn store_y_roots(
        &self,
        f: &BPoly,
        x: &AlgebraicOf<K>,
        critical: bool,
        roots: Vec<AlgebraicOf<K>>,
    ) -> Vec<AlgebraicOf<K>> {
        let mut cache = self.y_roots.borrow_mut();
        let fibers = cache.entry(f.clone()).or_default();
        let idx = match fibers
            .iter()
            .position(|(x0, _)| x0.compare(x) == Ordering::Equal)
        {
            Some(i) => i,
            None => {
                fibers.push((x.clone(), Default::default()));
                fibers.len() - 1
            }
        };
        let entry = &mut fibers[idx].1;
        let slot = if critical {
            &mut entry.critical
        } else {
            &mut entry.regular
        };
        slot.get_or_insert(roots).clone()
    }
}

/// Square-free `Res_x(f, ∂f/∂y)`: y-values of the singular and
/// vertical-tangent points. `None` when it carries no information.
fn critical_y_polynomial(f: &BPoly) -> Option<UPoly> {
    if f.degree_x() == 0 {
        return None;
    }
    let r = resultant_x(f, &f.derivative_y());
    (!r.is_constant()).then(|| r.square_free())
}

/// Square-free `Res_x(f, m)` for the defining polynomial `m` of x.
fn regular_y_polynomial(f: &BPoly, m: &UPoly) -> UPoly {
    resultant_x(f, &BPoly::from_x(m)).square_free()
}
