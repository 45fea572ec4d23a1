//! Exact points on algebraic curves.
//!
//! Purpose
//! - `Point` names a plane point by `(x, curve, arc)`: the arc-th y-root,
//!   counted from below, of the curve over the algebraic x.
//! - Ordering, simplification and y-solving live on `Session` (they need the
//!   kernel and shared caches); approximation and refinement live on `Point`.
//!
//! Why shared representation
//! - Copies of a point share one representation: identity is a pointer
//!   check, and caches (y, box) or a simplified support filled through one
//!   copy serve all of them. Points are `Rc`-based and stay on one thread;
//!   the in-place support rewrite is only sound there.
//!
//! Code cross-refs: `Session`, `CurveAnalysis`, `Fiber`, `BBox`.

mod approx;
mod compare;
mod simplify;
mod ysolve;

pub use approx::BBox;

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::algebraic::AlgebraicReal;
use crate::curve::{CurveAnalysis, CurveError, Fiber};

/// A point on an algebraic curve, or the sentinel.
///
/// The sentinel only answers `is_identical`, `is_sentinel` and
/// `curve_degree` (which is `-1`); everything else panics on it.
pub struct Point<C: CurveAnalysis> {
    rep: Option<Rc<PointRep<C>>>,
}

struct PointRep<C: CurveAnalysis> {
    x: C::Algebraic,
    support: RefCell<Support<C>>,
    y: OnceCell<C::Algebraic>,
    /// Last box handed out with the precision it was computed for.
    bbox: RefCell<Option<(f64, BBox)>>,
}

/// Supporting curve and arc; rewritten only toward lower degree.
struct Support<C> {
    curve: C,
    arc: usize,
}

impl<C: CurveAnalysis> Point<C> {
    /// Panics unless `arc < curve.fiber_at(x).event_count()`.
    pub fn new(x: C::Algebraic, curve: C, arc: usize) -> Self {
        match Self::try_new(x, curve, arc) {
            Ok(p) => p,
            Err(e) => panic!("invalid point: {e}"),
        }
    }

    pub fn try_new(x: C::Algebraic, curve: C, arc: usize) -> Result<Self, CurveError> {
        let events = curve.fiber_at(&x).event_count();
        if arc >= events {
            return Err(CurveError::ArcOutOfRange { arc, events });
        }
        Ok(Self {
            rep: Some(Rc::new(PointRep {
                x,
                support: RefCell::new(Support { curve, arc }),
                y: OnceCell::new(),
                bbox: RefCell::new(None),
            })),
        })
    }

    #[inline]
    pub fn sentinel() -> Self {
        Self { rep: None }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.rep.is_none()
    }

    fn rep(&self) -> &PointRep<C> {
        match &self.rep {
            Some(rep) => rep,
            None => panic!("operation on the sentinel point"),
        }
    }

    #[inline]
    pub fn x(&self) -> &C::Algebraic {
        &self.rep().x
    }

    /// Current supporting curve (may be a factor of the one given at construction).
    pub fn curve(&self) -> C {
        self.rep().support.borrow().curve.clone()
    }

    pub fn arc(&self) -> usize {
        self.rep().support.borrow().arc
    }

    /// Total degree of the supporting polynomial, `-1` for the sentinel.
    pub fn curve_degree(&self) -> i32 {
        match &self.rep {
            Some(rep) => rep.support.borrow().curve.total_degree(),
            None => -1,
        }
    }

    /// Same representation; two sentinels are identical.
    pub fn is_identical(&self, other: &Point<C>) -> bool {
        match (&self.rep, &other.rep) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Fiber of the current supporting curve at x.
    pub(crate) fn fiber(&self) -> C::Fiber {
        let rep = self.rep();
        let support = rep.support.borrow();
        support.curve.fiber_at(&rep.x)
    }

    fn replace_support(&self, curve: C, arc: usize) {
        *self.rep().support.borrow_mut() = Support { curve, arc };
        debug_assert!(
            arc < self.fiber().event_count(),
            "support rewrite left the arc out of range"
        );
    }
}

impl<C: CurveAnalysis> Clone for Point<C> {
    fn clone(&self) -> Self {
        Self {
            rep: self.rep.clone(),
        }
    }
}

impl<C: CurveAnalysis> Default for Point<C> {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl<C: CurveAnalysis> fmt::Display for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rep {
            None => write!(f, "[sentinel]"),
            Some(rep) => {
                let support = rep.support.borrow();
                write!(
                    f,
                    "[x-coord: {}; curve: {}; arcno: {}]",
                    rep.x.to_f64(),
                    support.curve.polynomial(),
                    support.arc
                )
            }
        }
    }
}

impl<C: CurveAnalysis> fmt::Debug for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rep {
            None => f.write_str("Point::sentinel"),
            Some(rep) => {
                let support = rep.support.borrow();
                f.debug_struct("Point")
                    .field("x", &rep.x)
                    .field("curve", &support.curve.polynomial().to_string())
                    .field("arc", &support.arc)
                    .finish()
            }
        }
    }
}
