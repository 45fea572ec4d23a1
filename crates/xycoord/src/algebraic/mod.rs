//! Real algebraic numbers.
//!
//! Purpose
//! - `AlgebraicReal` is the contract the point core consumes: rational
//!   bounds, in-place refinement, exact comparison and root tests.
//! - `Algebraic` is the exact implementation used by the reference kernel.
//! - `field` provides arithmetic in Q(α) for fibers at irrational x.
//!
//! Why shared handles
//! - Refinement mutates the isolating interval; every holder of a value
//!   (points, fibers, caches) profits from it. Handles are `Rc`-based and
//!   therefore confined to one thread.

pub(crate) mod field;
mod number;

pub use number::Algebraic;

use num_rational::BigRational;
use std::cmp::Ordering;
use std::fmt;

use crate::poly::{Interval, UPoly};

/// Isolated real root of a univariate polynomial.
pub trait AlgebraicReal: Clone + fmt::Debug + fmt::Display {
    fn lower(&self) -> BigRational;
    fn upper(&self) -> BigRational;

    /// Current isolating interval `[lower, upper]`.
    fn interval(&self) -> Interval {
        Interval::new(self.lower(), self.upper())
    }

    /// Shrink the isolating interval; never widens it.
    fn refine(&self);

    fn compare(&self, other: &Self) -> Ordering;

    /// Same underlying representation (no numeric work).
    fn is_identical(&self, other: &Self) -> bool;

    fn is_zero(&self) -> bool;

    /// `p(self) == 0`, decided exactly.
    fn is_root_of(&self, p: &UPoly) -> bool;

    /// Square-free defining polynomial.
    fn polynomial(&self) -> UPoly;

    fn to_f64(&self) -> f64;
}

#[cfg(test)]
mod tests;
