//! Curated surface for callers (unstable).
//!
//! - Prefer these re-exports over reaching into submodules.
//! - Breaking changes are allowed when they improve the design.

// Polynomials
pub use crate::poly::{parse_rational, resultant_x, resultant_y, BPoly, Interval, ParseError, UPoly};
// Algebraic numbers
pub use crate::algebraic::{Algebraic, AlgebraicReal};
// Curve analysis
pub use crate::curve::{
    CurveAnalysis, CurveError, CurveKernel, CurvePairAnalysis, Decomposition, ExactCurve,
    ExactCurvePair, ExactFiber, ExactKernel, ExactPairFiber, Fiber, PairFiber,
};
// Points
pub use crate::point::{BBox, Point};
pub use crate::session::{AlgebraicOf, RefineCfg, Session};
pub use crate::{exact_session, ExactSession};
