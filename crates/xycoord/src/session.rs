//! Analysis session: the kernel, refinement limits and the y-root cache.
//!
//! Purpose
//! - Owns everything the comparator and the y-solver share across points,
//!   so cached work has an explicit owner and lifetime.
//!
//! Code cross-refs: `point::compare`, `point::simplify`, `point::ysolve`.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

use crate::curve::{CurveAnalysis, CurveKernel};
use crate::point::Point;
use crate::poly::BPoly;

/// Algebraic number type of a kernel's curves.
pub type AlgebraicOf<K> = <<K as CurveKernel>::Curve as CurveAnalysis>::Algebraic;

/// Refinement limits.
///
/// Every loop bounded here terminates on its own for valid input; hitting a
/// limit is a contract failure and panics.
#[derive(Clone, Copy, Debug)]
pub struct RefineCfg {
    /// Refinement steps spent separating y-candidates of one point.
    pub max_refinements: usize,
    /// Bisection steps spent rounding a coordinate to `f64`.
    pub to_f64_bits: usize,
}

impl Default for RefineCfg {
    fn default() -> Self {
        Self {
            max_refinements: 10_000,
            to_f64_bits: 1100,
        }
    }
}

/// y-candidates of one fiber, per path that produced them.
pub(crate) struct YRoots<A> {
    pub(crate) regular: Option<Vec<A>>,
    pub(crate) critical: Option<Vec<A>>,
}

impl<A> Default for YRoots<A> {
    fn default() -> Self {
        Self {
            regular: None,
            critical: None,
        }
    }
}

/// Shared state for ordering points and solving their y-coordinates.
///
/// Single-threaded: the kernel's handles and the caches are not `Sync`.
pub struct Session<K: CurveKernel> {
    pub(crate) kernel: K,
    pub(crate) cfg: RefineCfg,
    /// Keyed by curve polynomial, then by x value (linear scan with exact
    /// comparison). Entries are filled once and never overwritten.
    pub(crate) y_roots: RefCell<FxHashMap<BPoly, Vec<(AlgebraicOf<K>, YRoots<AlgebraicOf<K>>)>>>,
}

impl<K: CurveKernel> Session<K> {
    pub fn new(kernel: K) -> Self {
        Self::with_cfg(kernel, RefineCfg::default())
    }

    pub fn with_cfg(kernel: K, cfg: RefineCfg) -> Self {
        Self {
            kernel,
            cfg,
            y_roots: RefCell::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    #[inline]
    pub fn cfg(&self) -> &RefineCfg {
        &self.cfg
    }

    /// Point on arc `arc` of `curve` over `x`; panics if the arc does not exist.
    pub fn point(&self, x: AlgebraicOf<K>, curve: K::Curve, arc: usize) -> Point<K::Curve> {
        Point::new(x, curve, arc)
    }

    /// Number of fibers holding cached y-candidates.
    pub fn cached_fibers(&self) -> usize {
        self.y_roots.borrow().values().map(Vec::len).sum()
    }
}
