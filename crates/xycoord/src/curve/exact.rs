use num_rational::BigRational;
use num_traits::One;
use std::cell::{OnceCell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

use super::{CurveAnalysis, CurveError, Fiber};
use crate::algebraic::field::{FChain, FPoly, NumberField};
use crate::algebraic::Algebraic;
use crate::poly::isolate::{bisect, widen_point, SturmChain};
use crate::poly::univariate::UChain;
use crate::poly::{resultant_y, BPoly, Interval, UPoly};

/// Exact analysis of a square-free curve without vertical line components.
///
/// Clones share the representation, including the per-x fiber cache.
#[derive(Clone)]
pub struct ExactCurve(Rc<CurveRepr>);

struct CurveRepr {
    poly: BPoly,
    critical: Rc<OnceCell<UPoly>>,
    fibers: RefCell<Vec<(Algebraic, ExactFiber)>>,
}

impl ExactCurve {
    /// Validate and wrap `poly` (stored normalized).
    pub fn new(poly: BPoly) -> Result<Self, CurveError> {
        if poly.degree_y() < 1 {
            return Err(CurveError::NoYDependence);
        }
        let content = poly.content();
        if !content.is_constant() {
            return Err(CurveError::NotPrimitive {
                content: content.to_string(),
            });
        }
        let g = BPoly::gcd(&poly, &poly.derivative_y());
        if g.degree_y() > 0 {
            return Err(CurveError::NotSquareFree {
                factor: g.to_string(),
            });
        }
        Ok(Self(Rc::new(CurveRepr {
            poly: poly.normalized(),
            critical: Rc::new(OnceCell::new()),
            fibers: RefCell::new(Vec::new()),
        })))
    }

    #[inline]
    pub fn polynomial(&self) -> &BPoly {
        &self.0.poly
    }

    #[inline]
    pub fn is_identical(&self, other: &ExactCurve) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Status line at `x`, computed once per value of `x`.
    pub fn fiber_at(&self, x: &Algebraic) -> ExactFiber {
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
        let fiber = ExactFiber::new(&self.0.poly, self.0.critical.clone(), x);
        self.0.fibers.borrow_mut().push((x.clone(), fiber.clone()));
        fiber
    }

    /// Square-free `lc_y(f) · Res_y(f, f_y)`: every x where the number or
    /// multiplicity of real y-roots can change.
    pub fn critical_polynomial(&self) -> UPoly {
        critical_of(&self.0.poly, &self.0.critical).clone()
    }
}

fn critical_of<'a>(poly: &BPoly, cell: &'a OnceCell<UPoly>) -> &'a UPoly {
    cell.get_or_init(|| {
        let disc = resultant_y(poly, &poly.derivative_y());
        (&poly.lc_y() * &disc).square_free()
    })
}

impl CurveAnalysis for ExactCurve {
    type Algebraic = Algebraic;
    type Fiber = ExactFiber;

    fn polynomial(&self) -> &BPoly {
        ExactCurve::polynomial(self)
    }

    fn fiber_at(&self, x: &Algebraic) -> ExactFiber {
        ExactCurve::fiber_at(self, x)
    }

    fn is_identical(&self, other: &Self) -> bool {
        ExactCurve::is_identical(self, other)
    }
}

impl fmt::Display for ExactCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.poly)
    }
}

impl fmt::Debug for ExactCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExactCurve")
            .field(&self.0.poly.to_string())
            .finish()
    }
}

/// Arcs of one curve over a fixed x, ascending in y.
#[derive(Clone)]
pub struct ExactFiber(Rc<FiberRepr>);

struct FiberRepr {
    x: Algebraic,
    poly: BPoly,
    critical: Rc<OnceCell<UPoly>>,
    chain: FChain,
    arcs: RefCell<Vec<Interval>>,
    branches: OnceCell<Vec<(usize, usize)>>,
}

impl ExactFiber {
    fn new(poly: &BPoly, critical: Rc<OnceCell<UPoly>>, x: &Algebraic) -> Self {
        let field = NumberField::new(x.clone());
        let fp = FPoly::from_bpoly(&field, poly).square_free(&field);
        let chain = FChain::new(field, fp);
        let arcs = chain.isolate();
        debug!(x = %x, curve = %poly, events = arcs.len(), "fiber computed");
        Self(Rc::new(FiberRepr {
            x: x.clone(),
            poly: poly.clone(),
            critical,
            chain,
            arcs: RefCell::new(arcs),
            branches: OnceCell::new(),
        }))
    }

    pub fn x(&self) -> &Algebraic {
        &self.0.x
    }

    #[inline]
    pub fn event_count(&self) -> usize {
        self.0.arcs.borrow().len()
    }

    pub fn arc_bounds(&self, arc: usize) -> Interval {
        let arcs = self.0.arcs.borrow();
        assert!(arc < arcs.len(), "arc {arc} out of range ({} events)", arcs.len());
        arcs[arc].clone()
    }

    pub fn refine_arc(&self, arc: usize) {
        let iv = self.arc_bounds(arc);
        let next = bisect(&self.0.chain, &iv);
        self.0.arcs.borrow_mut()[arc] = next;
    }

    pub fn incident_branches(&self, arc: usize) -> (usize, usize) {
        let all = self.0.branches.get_or_init(|| self.count_branches());
        assert!(arc < all.len(), "arc {arc} out of range ({} events)", all.len());
        all[arc]
    }

    /// Branch counts at rational `xl < x < xr` chosen so that no critical x
    /// and no crossing of an arc's strip boundary lies in `[xl, xr]` apart
    /// from x itself; the branches through each strip then meet its arc.
    fn count_branches(&self) -> Vec<(usize, usize)> {
        let arcs = self.0.arcs.borrow().clone();
        if arcs.is_empty() {
            return Vec::new();
        }
        let radius = BigRational::one();
        let strips: Vec<Interval> = arcs
            .iter()
            .map(|iv| {
                if iv.is_point() {
                    widen_point(&self.0.chain, &iv.lo, &radius)
                } else {
                    iv.clone()
                }
            })
            .collect();
        let f = &self.0.poly;
        let mut guard = critical_of(f, &self.0.critical).clone();
        for s in &strips {
            guard = &guard * &f.eval_y(&s.lo);
            guard = &guard * &f.eval_y(&s.hi);
        }
        let guard = UChain::new(guard.square_free());
        let (xl, xr) = self.isolating_strip(&guard);
        trace!(xl = %xl, xr = %xr, "branch counting strip");
        let left = UChain::new(f.eval_x(&xl).square_free());
        let right = UChain::new(f.eval_x(&xr).square_free());
        strips
            .iter()
            .map(|s| (left.count_closed(&s.lo, &s.hi), right.count_closed(&s.lo, &s.hi)))
            .collect()
    }

    /// Rational `[xl, xr]` around x whose only root of `guard` is (at most) x.
    fn isolating_strip(&self, guard: &UChain) -> (BigRational, BigRational) {
        let x = &self.0.x;
        let at_x = usize::from(x.is_root_of(&guard.poly));
        let two = BigRational::from_integer(2.into());
        loop {
            let iv = x.interval();
            if iv.is_point() {
                let mut d = BigRational::one();
                loop {
                    let l = &iv.lo - &d;
                    let h = &iv.lo + &d;
                    if guard.sign_at(&l) != Ordering::Equal
                        && guard.sign_at(&h) != Ordering::Equal
                        && guard.count_closed(&l, &h) == at_x
                    {
                        return (l, h);
                    }
                    d = d / &two;
                }
            }
            if guard.count_closed(&iv.lo, &iv.hi) == at_x {
                return (iv.lo, iv.hi);
            }
            x.refine();
        }
    }
}

impl Fiber for ExactFiber {
    fn event_count(&self) -> usize {
        ExactFiber::event_count(self)
    }

    fn incident_branches(&self, arc: usize) -> (usize, usize) {
        ExactFiber::incident_branches(self, arc)
    }

    fn arc_bounds(&self, arc: usize) -> Interval {
        ExactFiber::arc_bounds(self, arc)
    }

    fn refine_arc(&self, arc: usize) {
        ExactFiber::refine_arc(self, arc)
    }
}

impl fmt::Debug for ExactFiber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExactFiber")
            .field("x", &self.0.x)
            .field("arcs", &self.0.arcs.borrow())
            .finish()
    }
}
