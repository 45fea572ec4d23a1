//! Exact points on real algebraic plane curves.
//!
//! A point is named by `(x, curve, arc)`: an algebraic x-coordinate, a
//! square-free curve through the point, and the index of the point among
//! the curve's real y-roots over x. Points are ordered lexicographically
//! without computing y; y is solved lazily when asked for.
//!
//! Layers (bottom-up)
//! - `poly`: exact univariate/bivariate polynomials over Q, Sturm
//!   isolation, resultants, parsing.
//! - `algebraic`: isolated real algebraic numbers and arithmetic in Q(α).
//! - `curve`: curve, fiber and curve-pair analysis behind traits, with the
//!   exact reference kernel `ExactKernel`.
//! - `point` + `session`: the point type, comparison, simplification,
//!   y-solving and approximation.
//!
//! API Policy
//! - The crate is young; interfaces change when the design improves.
//! - `api` collects the names callers normally need.

pub mod algebraic;
pub mod api;
pub mod curve;
pub mod point;
pub mod poly;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use point::{BBox, Point};
pub use session::{RefineCfg, Session};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algebraic::{Algebraic, AlgebraicReal};
    pub use crate::curve::{
        CurveAnalysis, CurveError, CurveKernel, CurvePairAnalysis, ExactCurve, ExactKernel, Fiber,
        PairFiber,
    };
    pub use crate::point::{BBox, Point};
    pub use crate::poly::{BPoly, Interval, UPoly};
    pub use crate::session::{RefineCfg, Session};
    pub use nalgebra::Vector2 as Vec2;
}

/// Exact session over the reference kernel.
pub type ExactSession = Session<curve::ExactKernel>;

/// Fresh session over a new `ExactKernel` with default limits.
pub fn exact_session() -> ExactSession {
    Session::new(curve::ExactKernel::new())
}
