use super::*;
use crate::algebraic::Algebraic;
use num_rational::BigRational;

fn poly(s: &str) -> BPoly {
    s.parse().unwrap()
}

fn contains(iv: &Interval, v: i64) -> bool {
    iv.contains(&BigRational::from_integer(v.into()))
}

#[test]
fn construction_rejects_invalid_polynomials() {
    assert_eq!(
        ExactCurve::new(poly("x^2 - 1")).unwrap_err(),
        CurveError::NoYDependence
    );
    assert!(matches!(
        ExactCurve::new(poly("(x - 1)*y")),
        Err(CurveError::NotPrimitive { .. })
    ));
    assert!(matches!(
        ExactCurve::new(poly("(y - x)^2*(y + 1)")),
        Err(CurveError::NotSquareFree { .. })
    ));
    assert!(ExactCurve::new(poly("y^2 - x")).is_ok());
}

#[test]
fn parabola_fibers() {
    let c = ExactCurve::new(poly("y^2 - x")).unwrap();
    let at4 = c.fiber_at(&Algebraic::from_i64(4));
    assert_eq!(at4.event_count(), 2);
    assert!(contains(&at4.arc_bounds(0), -2));
    assert!(contains(&at4.arc_bounds(1), 2));
    assert_eq!(at4.incident_branches(0), (1, 1));
    assert_eq!(at4.incident_branches(1), (1, 1));

    let at0 = c.fiber_at(&Algebraic::from_i64(0));
    assert_eq!(at0.event_count(), 1);
    assert_eq!(at0.incident_branches(0), (0, 2));

    assert_eq!(c.fiber_at(&Algebraic::from_i64(-1)).event_count(), 0);
}

#[test]
fn fibers_are_cached_per_value() {
    let c = ExactCurve::new(poly("y^2 - x")).unwrap();
    let a = c.fiber_at(&Algebraic::from_i64(4));
    a.refine_arc(1);
    let w = a.arc_bounds(1).width();
    let b = c.fiber_at(&Algebraic::from_i64(4));
    assert_eq!(b.arc_bounds(1).width(), w);
}

#[test]
fn circle_and_node_branches() {
    let circle = ExactCurve::new(poly("x^2 + y^2 - 1")).unwrap();
    let right = circle.fiber_at(&Algebraic::from_i64(1));
    assert_eq!(right.event_count(), 1);
    assert_eq!(right.incident_branches(0), (2, 0));
    let mid = circle.fiber_at(&Algebraic::from_i64(0));
    assert_eq!(mid.incident_branches(0), (1, 1));
    assert_eq!(mid.incident_branches(1), (1, 1));

    let node = ExactCurve::new(poly("y^2 - x^2 - x^3")).unwrap();
    let at0 = node.fiber_at(&Algebraic::from_i64(0));
    assert_eq!(at0.event_count(), 1);
    assert_eq!(at0.incident_branches(0), (2, 2));
}

#[test]
fn fiber_over_irrational_x() {
    let c = ExactCurve::new(poly("y^2 - x")).unwrap();
    let sqrt2 = Algebraic::real_roots(&UPoly::from_i64s(&[-2, 0, 1]))
        .pop()
        .unwrap();
    let fib = c.fiber_at(&sqrt2);
    assert_eq!(fib.event_count(), 2);
    assert_eq!(fib.incident_branches(1), (1, 1));
    for _ in 0..30 {
        fib.refine_arc(1);
    }
    let (lo, hi) = fib.arc_bounds(1).to_f64_hull();
    let r = 2f64.powf(0.25);
    assert!(lo <= r && r <= hi && hi - lo < 1e-6);
}

#[test]
fn pair_fiber_orders_both_curves() {
    let k = ExactKernel::new();
    let f = k.curve(&poly("y - x")).unwrap();
    let g = k.curve(&poly("y + x")).unwrap();
    let pair = k.curve_pair(&f, &g);

    let at0 = pair.fiber_at(&Algebraic::from_i64(0));
    assert_eq!(at0.event_count(), 1);
    assert_eq!(at0.curves_at_event(0), (Some(0), Some(0)));

    let at1 = pair.fiber_at(&Algebraic::from_i64(1));
    assert_eq!(at1.event_count(), 2);
    assert_eq!(at1.curves_at_event(0), (None, Some(0)));
    assert_eq!(at1.curves_at_event(1), (Some(0), None));
    assert_eq!(at1.event_of_curve(0, 0), 1);
    assert_eq!(at1.event_of_curve(0, 1), 0);
}

#[test]
fn kernel_interns_and_decomposes() {
    let k = ExactKernel::new();
    let f = k.curve(&poly("y^2 - x")).unwrap();
    let f2 = k.curve(&poly("3*y^2 - 3*x")).unwrap();
    assert!(f.is_identical(&f2));
    assert_eq!(k.curve_count(), 1);

    let g = k.curve(&poly("(y^2 - x)*(y - 1)")).unwrap();
    let d = k.decompose(&f, &g).unwrap();
    assert!(d.parts_of_first.is_empty());
    assert_eq!(d.parts_of_second.len(), 1);
    assert_eq!(d.parts_of_second[0].polynomial(), &poly("y - 1"));
    assert_eq!(d.common.len(), 1);
    assert!(d.common[0].is_identical(&f));

    let h = k.curve(&poly("y + x")).unwrap();
    assert!(k.decompose(&f, &h).is_none());
}
