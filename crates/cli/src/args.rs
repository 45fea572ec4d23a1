//! Textual x-coordinates and points.
//!
//! - x: `3`, `-7/2`, `0.25`, or `POLY@K` for the K-th real root (from below)
//!   of a polynomial in x, e.g. `x^2 - 2@1` for the positive square root of 2.
//! - point: `X:CURVE:ARC`, e.g. `1/2:y^2 - x:1`.

use anyhow::{anyhow, bail, Context, Result};
use num_rational::BigRational;
use std::str::FromStr;
use xycoord::api::{parse_rational, Algebraic, BPoly, ExactCurve, ExactSession, Point, UPoly};

#[derive(Clone, Debug, PartialEq)]
pub enum XArg {
    Rational(BigRational),
    Root { poly: UPoly, index: usize },
}

impl XArg {
    pub fn to_algebraic(&self) -> Result<Algebraic> {
        match self {
            XArg::Rational(r) => Ok(Algebraic::from_rational(r.clone())),
            XArg::Root { poly, index } => {
                if poly.is_zero() {
                    bail!("the zero polynomial has no isolated roots");
                }
                let mut roots = Algebraic::real_roots(poly);
                let count = roots.len();
                if *index >= count {
                    bail!("{poly} has {count} real roots, no root #{index}");
                }
                Ok(roots.swap_remove(*index))
            }
        }
    }
}

impl FromStr for XArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('@') {
            Some((poly, index)) => {
                let poly: UPoly = poly
                    .parse()
                    .with_context(|| format!("x polynomial `{poly}`"))?;
                let index = index
                    .trim()
                    .parse()
                    .with_context(|| format!("root index `{index}`"))?;
                Ok(XArg::Root { poly, index })
            }
            None => parse_rational(s)
                .map(XArg::Rational)
                .with_context(|| format!("rational x `{s}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointArg {
    pub x: XArg,
    pub curve: BPoly,
    pub arc: usize,
}

impl PointArg {
    pub fn build(&self, s: &ExactSession) -> Result<Point<ExactCurve>> {
        let x = self.x.to_algebraic()?;
        let curve = s
            .kernel()
            .curve(&self.curve)
            .with_context(|| format!("curve `{}`", self.curve))?;
        Point::try_new(x, curve, self.arc).with_context(|| format!("arc {}", self.arc))
    }
}

impl FromStr for PointArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [x, curve, arc] = parts.as_slice() else {
            return Err(anyhow!("expected X:CURVE:ARC, got `{s}`"));
        };
        Ok(Self {
            x: x.parse()?,
            curve: curve
                .parse()
                .with_context(|| format!("curve polynomial `{curve}`"))?,
            arc: arc
                .trim()
                .parse()
                .with_context(|| format!("arc index `{arc}`"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;
    use xycoord::api::AlgebraicReal;

    #[test]
    fn parses_rational_and_root_x() {
        let half: XArg = "1/2".parse().unwrap();
        assert_eq!(half, XArg::Rational(BigRational::new(1.into(), 2.into())));
        let sqrt2: XArg = "x^2 - 2@1".parse().unwrap();
        let a = sqrt2.to_algebraic().unwrap();
        assert!(a.to_f64() > 1.414 && a.to_f64() < 1.415);
        assert!("x^2 + 1@0".parse::<XArg>().unwrap().to_algebraic().is_err());
        assert!("y - 1@0".parse::<XArg>().is_err());
    }

    #[test]
    fn parses_and_builds_points() {
        let s = xycoord::exact_session();
        let p: PointArg = "4:y^2 - x:1".parse().unwrap();
        assert_eq!(p.arc, 1);
        let point = p.build(&s).unwrap();
        assert_eq!(
            s.y(&point).compare(&Algebraic::from_i64(2)),
            Ordering::Equal
        );
        let bad: PointArg = "-1:y^2 - x:0".parse().unwrap();
        assert!(bad.build(&s).is_err());
        assert!("4:y^2 - x".parse::<PointArg>().is_err());
        assert!("4:(y - x)^2:0"
            .parse::<PointArg>()
            .unwrap()
            .build(&s)
            .is_err());
    }
}
