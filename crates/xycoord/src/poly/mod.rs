//! Exact polynomial algebra over Q.
//!
//! Purpose
//! - Dense `UPoly` (one variable) and `BPoly` (x, y) with the operations the
//!   point core and the reference curve analysis need: gcd, square-free part,
//!   Sturm isolation, resultants, interval evaluation.
//!
//! Why dense and exact
//! - Curves handled here have small degree; dense vectors over `BigRational`
//!   keep every sign decision exact and the code short.
//!
//! Code cross-refs: `Interval`, `UPoly`, `BPoly`, `resultant_x`, `resultant_y`.

pub mod bivariate;
pub mod interval;
pub(crate) mod isolate;
mod parse;
pub mod resultant;
pub mod univariate;

pub use bivariate::BPoly;
pub use interval::Interval;
pub use parse::{parse_rational, ParseError};
pub use resultant::{resultant_x, resultant_y};
pub use univariate::UPoly;

#[cfg(test)]
mod tests;
