//! Curve analysis interfaces and the exact reference kernel.
//!
//! Purpose
//! - The point core only talks to curves through these traits: a curve
//!   exposes its polynomial and a fiber (status line) per x; a curve pair
//!   merges two fibers by true y-order; a kernel builds pairs, decomposes
//!   two curves into own and shared parts, and isolates univariate roots.
//! - `ExactKernel` implements all of it over the rationals.
//!
//! Arcs of a fiber are indexed by increasing y.

mod error;
mod exact;
mod kernel;
mod pair;

pub use error::CurveError;
pub use exact::{ExactCurve, ExactFiber};
pub use kernel::ExactKernel;
pub use pair::{ExactCurvePair, ExactPairFiber};

use std::fmt;

use crate::algebraic::AlgebraicReal;
use crate::poly::{BPoly, Interval, UPoly};

/// Status line of one curve at a fixed x.
pub trait Fiber {
    fn event_count(&self) -> usize;

    /// Branches entering the arc from the left and leaving to the right.
    fn incident_branches(&self, arc: usize) -> (usize, usize);

    /// Current isolating interval of the arc's y-value.
    fn arc_bounds(&self, arc: usize) -> Interval;

    /// Shrink the arc's interval; never widens it.
    fn refine_arc(&self, arc: usize);
}

/// Topological analysis of one bivariate polynomial.
pub trait CurveAnalysis: Clone + fmt::Display {
    type Algebraic: AlgebraicReal;
    type Fiber: Fiber;

    fn polynomial(&self) -> &BPoly;

    fn fiber_at(&self, x: &Self::Algebraic) -> Self::Fiber;

    fn is_identical(&self, other: &Self) -> bool;

    fn total_degree(&self) -> i32 {
        self.polynomial().total_degree()
    }
}

/// Joint status line of two curves at a fixed x.
pub trait PairFiber {
    fn event_count(&self) -> usize;

    /// Joint event holding arc `arc` of curve `side` (0 or 1).
    fn event_of_curve(&self, arc: usize, side: usize) -> usize;

    /// Arc index of each curve at `event`, `None` where the curve has no arc.
    fn curves_at_event(&self, event: usize) -> (Option<usize>, Option<usize>);
}

pub trait CurvePairAnalysis {
    type Curve: CurveAnalysis;
    type Fiber: PairFiber;

    fn curve(&self, side: usize) -> &Self::Curve;

    fn fiber_at(&self, x: &<Self::Curve as CurveAnalysis>::Algebraic) -> Self::Fiber;
}

/// Split of two curves into the parts unique to each side and the shared part.
#[derive(Clone, Debug)]
pub struct Decomposition<C> {
    pub parts_of_first: Vec<C>,
    pub parts_of_second: Vec<C>,
    pub common: Vec<C>,
}

/// Factory for curve pairs, decompositions and univariate roots.
pub trait CurveKernel {
    type Curve: CurveAnalysis;
    type Pair: CurvePairAnalysis<Curve = Self::Curve>;

    fn curve_pair(&self, a: &Self::Curve, b: &Self::Curve) -> Self::Pair;

    /// `None` unless the curves share a non-trivial component.
    fn decompose(&self, a: &Self::Curve, b: &Self::Curve) -> Option<Decomposition<Self::Curve>>;

    fn real_roots(&self, p: &UPoly) -> Vec<<Self::Curve as CurveAnalysis>::Algebraic>;
}

#[cfg(test)]
mod tests;
