use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;
use tracing::{debug, trace};

use super::{CurvePairAnalysis, ExactCurve, ExactFiber, PairFiber};
use crate::algebraic::field::{FChain, FPoly, NumberField};
use crate::algebraic::Algebraic;
use crate::poly::isolate::SturmChain;
use crate::poly::Interval;

/// Joint analysis of two exact curves.
#[derive(Clone)]
pub struct ExactCurvePair(Rc<PairRepr>);

struct PairRepr {
    curves: [ExactCurve; 2],
    fibers: RefCell<Vec<(Algebraic, ExactPairFiber)>>,
}

impl ExactCurvePair {
    pub fn new(a: ExactCurve, b: ExactCurve) -> Self {
        Self(Rc::new(PairRepr {
            curves: [a, b],
            fibers: RefCell::new(Vec::new()),
        }))
    }

    pub fn curve(&self, side: usize) -> &ExactCurve {
        assert!(side < 2, "curve pair side must be 0 or 1, got {side}");
        &self.0.curves[side]
    }

    /// Joint status line at `x`: both fibers merged by true y-order.
    pub fn fiber_at(&self, x: &Algebraic) -> ExactPairFiber {
        let cached = self
            .0
            .fibers
            .borrow()
            .iter()
            .find(|(x0, _)| x0.compare(x) == Ordering::Equal)
            .map(|(_, f)| f.clone());
        if let Some(fiber) = cached {
            return fiber;
        }
        let fiber = self.merge(x);
        self.0.fibers.borrow_mut().push((x.clone(), fiber.clone()));
        fiber
    }

    fn merge(&self, x: &Algebraic) -> ExactPairFiber {
        let [a, b] = &self.0.curves;
        let fa = a.fiber_at(x);
        let fb = b.fiber_at(x);
        let common = CommonRoots::new(a, b, x);
        let (na, nb) = (fa.event_count(), fb.event_count());
        let mut events = Vec::with_capacity(na + nb);
        let (mut i, mut j) = (0, 0);
        while i < na && j < nb {
            match common.compare_arcs(&fa, i, &fb, j) {
                Ordering::Less => {
                    events.push((Some(i), None));
                    i += 1;
                }
                Ordering::Greater => {
                    events.push((None, Some(j)));
                    j += 1;
                }
                Ordering::Equal => {
                    events.push((Some(i), Some(j)));
                    i += 1;
                    j += 1;
                }
            }
        }
        events.extend((i..na).map(|k| (Some(k), None)));
        events.extend((j..nb).map(|k| (None, Some(k))));
        debug!(x = %x, first = %a, second = %b, events = events.len(), "pair fiber merged");
        ExactPairFiber::from_events(events, na, nb)
    }
}

/// Common y-roots of both curves at x: `gcd(f(x, y), g(x, y))` over Q(x).
struct CommonRoots {
    chain: Option<FChain>,
}

impl CommonRoots {
    fn new(a: &ExactCurve, b: &ExactCurve, x: &Algebraic) -> Self {
        let field = NumberField::new(x.clone());
        let fa = FPoly::from_bpoly(&field, a.polynomial());
        let fb = FPoly::from_bpoly(&field, b.polynomial());
        let h = FPoly::gcd(&fa, &fb, &field).square_free(&field);
        let chain = (h.degree() > 0).then(|| FChain::new(field, h));
        Self { chain }
    }

    /// Order of arc `i` of `fa` against arc `j` of `fb`.
    fn compare_arcs(&self, fa: &ExactFiber, i: usize, fb: &ExactFiber, j: usize) -> Ordering {
        let mut equality_decided = false;
        loop {
            let p = fa.arc_bounds(i);
            let q = fb.arc_bounds(j);
            if p.hi < q.lo {
                return Ordering::Less;
            }
            if q.hi < p.lo {
                return Ordering::Greater;
            }
            if !equality_decided {
                if self.root_in_overlap(&p, &q) {
                    return Ordering::Equal;
                }
                equality_decided = true;
            }
            trace!(p = %p, q = %q, "separating arcs of a curve pair");
            if p.width() >= q.width() {
                fa.refine_arc(i);
            } else {
                fb.refine_arc(j);
            }
        }
    }

    /// Each interval holds exactly one root of its curve, so a common root
    /// in the overlap is that root for both.
    fn root_in_overlap(&self, p: &Interval, q: &Interval) -> bool {
        let Some(chain) = &self.chain else {
            return false;
        };
        let lo = if p.lo > q.lo { &p.lo } else { &q.lo };
        let hi = if p.hi < q.hi { &p.hi } else { &q.hi };
        chain.count_closed(lo, hi) > 0
    }
}

impl CurvePairAnalysis for ExactCurvePair {
    type Curve = ExactCurve;
    type Fiber = ExactPairFiber;

    fn curve(&self, side: usize) -> &ExactCurve {
        ExactCurvePair::curve(self, side)
    }

    fn fiber_at(&self, x: &Algebraic) -> ExactPairFiber {
        ExactCurvePair::fiber_at(self, x)
    }
}

/// Merged events of two fibers, ascending in y.
#[derive(Clone, Debug)]
pub struct ExactPairFiber(Rc<PairFiberRepr>);

#[derive(Debug)]
struct PairFiberRepr {
    events: Vec<(Option<usize>, Option<usize>)>,
    event_of_arc: [Vec<usize>; 2],
}

impl ExactPairFiber {
    fn from_events(events: Vec<(Option<usize>, Option<usize>)>, na: usize, nb: usize) -> Self {
        let mut event_of_arc = [vec![0; na], vec![0; nb]];
        for (e, &(a, b)) in events.iter().enumerate() {
            if let Some(a) = a {
                event_of_arc[0][a] = e;
            }
            if let Some(b) = b {
                event_of_arc[1][b] = e;
            }
        }
        Self(Rc::new(PairFiberRepr {
            events,
            event_of_arc,
        }))
    }

    pub fn event_count(&self) -> usize {
        self.0.events.len()
    }

    pub fn event_of_curve(&self, arc: usize, side: usize) -> usize {
        assert!(side < 2, "curve pair side must be 0 or 1, got {side}");
        let arcs = &self.0.event_of_arc[side];
        assert!(arc < arcs.len(), "arc {arc} out of range for curve {side}");
        arcs[arc]
    }

    pub fn curves_at_event(&self, event: usize) -> (Option<usize>, Option<usize>) {
        assert!(event < self.0.events.len(), "event {event} out of range");
        self.0.events[event]
    }
}

impl PairFiber for ExactPairFiber {
    fn event_count(&self) -> usize {
        ExactPairFiber::event_count(self)
    }

    fn event_of_curve(&self, arc: usize, side: usize) -> usize {
        ExactPairFiber::event_of_curve(self, arc, side)
    }

    fn curves_at_event(&self, event: usize) -> (Option<usize>, Option<usize>) {
        ExactPairFiber::curves_at_event(self, event)
    }
}
