//! Interval approximation and refinement of both coordinates.
//!
//! y-bounds come from the arc's isolating interval in the supporting fiber,
//! not from a solved y, so they are available without elimination.

use nalgebra::Vector2;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::Point;
use crate::algebraic::AlgebraicReal;
use crate::curve::{CurveAnalysis, Fiber};
use crate::poly::{BPoly, Interval, UPoly};
use crate::session::RefineCfg;

/// Axis-aligned `f64` box, rounded outward from exact bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl BBox {
    pub fn from_intervals(ix: &Interval, iy: &Interval) -> Self {
        let (x0, x1) = ix.to_f64_hull();
        let (y0, y1) = iy.to_f64_hull();
        Self {
            min: Vector2::new(x0, y0),
            max: Vector2::new(x1, y1),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: &Vector2<f64>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

impl<C: CurveAnalysis> Point<C> {
    pub fn approx_x(&self) -> Interval {
        self.x().interval()
    }

    /// Refine x until its interval is narrower than `bound`.
    pub fn approx_x_within(&self, bound: &BigRational) -> Interval {
        assert!(bound.is_positive(), "approximation bound must be positive");
        loop {
            let iv = self.approx_x();
            if &iv.width() < bound {
                return iv;
            }
            self.refine_x();
        }
    }

    pub fn approx_y(&self) -> Interval {
        self.fiber().arc_bounds(self.arc())
    }

    /// Refine y until its interval is narrower than `bound`.
    pub fn approx_y_within(&self, bound: &BigRational) -> Interval {
        assert!(bound.is_positive(), "approximation bound must be positive");
        loop {
            let iv = self.approx_y();
            if &iv.width() < bound {
                return iv;
            }
            self.refine_y();
        }
    }

    #[inline]
    pub fn refine_x(&self) {
        self.x().refine();
    }

    pub fn refine_y(&self) {
        self.fiber().refine_arc(self.arc());
    }

    /// Box from the current approximations, no refinement.
    pub fn approximation_box(&self) -> BBox {
        BBox::from_intervals(&self.approx_x(), &self.approx_y())
    }

    /// Box whose exact widths are both below `b`.
    ///
    /// A box cached for a precision at most `b` is returned unchanged;
    /// otherwise the wider axis is refined until both fit.
    pub fn approximation_box_within(&self, b: f64) -> BBox {
        assert!(b > 0.0 && b.is_finite(), "box precision must be positive, got {b}");
        let rep = self.rep();
        if let Some((cached, bbox)) = *rep.bbox.borrow() {
            if cached <= b {
                return bbox;
            }
        }
        let Some(bound) = BigRational::from_float(b) else {
            panic!("box precision {b} is not representable");
        };
        let (ix, iy) = loop {
            let ix = self.approx_x();
            let iy = self.approx_y();
            let (wx, wy) = (ix.width(), iy.width());
            if wx < bound && wy < bound {
                break (ix, iy);
            }
            if wx >= wy {
                self.refine_x();
            } else {
                self.refine_y();
            }
        };
        let bbox = BBox::from_intervals(&ix, &iy);
        *rep.bbox.borrow_mut() = Some((b, bbox));
        bbox
    }

    pub fn is_x_zero(&self) -> bool {
        self.x().is_zero()
    }

    /// Exact test; the y-interval isolates the arc, so `f(x, 0) = 0` with 0
    /// inside it means y is 0.
    pub fn is_y_zero(&self) -> bool {
        if !self.approx_y().contains_zero() {
            return false;
        }
        let f = self.curve();
        self.x().is_root_of(&f.polynomial().coeff_y(0))
    }

    /// Doubles nearest to both coordinates.
    pub fn to_f64(&self) -> Vector2<f64> {
        self.to_f64_with(&RefineCfg::default())
    }

    pub fn to_f64_with(&self, cfg: &RefineCfg) -> Vector2<f64> {
        let x = self.x().to_f64();
        let iy = self.approx_y();
        let y = if iy.is_point() {
            to_f64_nearest(&iy.lo)
        } else if self.is_y_zero() {
            0.0
        } else {
            self.y_to_f64(cfg.to_f64_bits)
        };
        Vector2::new(x, y)
    }

    fn y_to_f64(&self, max_steps: usize) -> f64 {
        let mut iy = self.approx_y();
        // y != 0 here, so the interval eventually leaves zero
        while iy.contains_zero() && !iy.is_point() {
            self.refine_y();
            iy = self.approx_y();
        }
        for _ in 0..max_steps {
            let lo = to_f64_nearest(&iy.lo);
            if iy.is_point() || lo == to_f64_nearest(&iy.hi) {
                return lo;
            }
            self.refine_y();
            iy = self.approx_y();
        }
        to_f64_nearest(&iy.midpoint())
    }

    /// Enclosure of `p(x)` at the current x-approximation.
    pub fn interval_evaluate_1(&self, p: &UPoly) -> Interval {
        p.eval_interval(&self.approx_x())
    }

    /// Enclosure of `p(x, y)` at the current approximations.
    pub fn interval_evaluate_2(&self, p: &BPoly) -> Interval {
        p.eval_box(&self.approx_x(), &self.approx_y())
    }
}

fn to_f64_nearest(r: &BigRational) -> f64 {
    if r.is_zero() {
        return 0.0;
    }
    r.to_f64().unwrap_or(f64::NAN)
}
