use super::field::{FChain, FPoly, NumberField};
use super::*;
use crate::poly::BPoly;
use proptest::prelude::*;

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
}

fn sqrt2() -> Algebraic {
    Algebraic::real_roots(&UPoly::from_i64s(&[-2, 0, 1]))
        .pop()
        .unwrap()
}

#[test]
fn real_roots_are_sorted_and_rational_roots_exact() {
    // (x - 1/2)(x^2 - 2)
    let p = &UPoly::linear_root(&q(1, 2)) * &UPoly::from_i64s(&[-2, 0, 1]);
    let roots = Algebraic::real_roots(&p);
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0].compare(&roots[1]), Ordering::Less);
    assert_eq!(roots[1].compare(&roots[2]), Ordering::Less);
    assert_eq!(roots[1].as_rational(), Some(q(1, 2)));
    assert!((roots[2].to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
}

#[test]
fn equality_of_differently_defined_values() {
    // √2 as a root of x^2 - 2 and of (x^2 - 2)(x - 7)
    let a = sqrt2();
    let big = &UPoly::from_i64s(&[-2, 0, 1]) * &UPoly::from_i64s(&[-7, 1]);
    let b = Algebraic::real_roots(&big)[1].clone();
    assert_eq!(a.compare(&b), Ordering::Equal);
    assert_eq!(b.compare(&a), Ordering::Equal);
    let c = Algebraic::from_rational(q(141, 100));
    assert_eq!(c.compare(&a), Ordering::Less);
    assert_eq!(a.compare(&c), Ordering::Greater);
}

#[test]
fn refinement_never_widens() {
    let a = sqrt2();
    let mut w = a.interval().width();
    for _ in 0..40 {
        a.refine();
        let w2 = a.interval().width();
        assert!(w2 <= w);
        w = w2;
    }
    assert!(a.lower() > q(14142, 10_000) && a.upper() < q(14143, 10_000));
    assert!(a.refine_below(&q(1, 1_000_000)).width() < q(1, 1_000_000));
}

#[test]
fn root_and_sign_tests() {
    let a = sqrt2();
    assert!(a.is_root_of(&UPoly::from_i64s(&[-2, 0, 1])));
    assert!(!a.is_root_of(&UPoly::from_i64s(&[-3, 0, 1])));
    assert_eq!(a.sign_of(&UPoly::from_i64s(&[-3, 2])), Ordering::Less); // 2√2 - 3
    assert_eq!(a.sign_of(&UPoly::from_i64s(&[-2, 0, 1])), Ordering::Equal);
    assert!(Algebraic::from_i64(0).is_zero());
    assert!(!a.is_zero());
}

#[test]
fn inversion_narrows_reducible_modulus() {
    // α = √2 defined by (x^2 - 2)(x - 5); x - 5 is a zero divisor mod that product
    let m = &UPoly::from_i64s(&[-2, 0, 1]) * &UPoly::from_i64s(&[-5, 1]);
    let alpha = Algebraic::real_roots(&m)[1].clone();
    assert_eq!(alpha.degree(), 3);
    let field = NumberField::new(alpha.clone());
    let e = UPoly::from_i64s(&[-5, 1]);
    let inv = field.inv(&e);
    assert_eq!(alpha.polynomial(), UPoly::from_i64s(&[-2, 0, 1]));
    assert_eq!(field.mul(&e, &inv), UPoly::one());
}

#[test]
fn zero_test_narrows_to_vanishing_factor() {
    let m = &UPoly::from_i64s(&[-2, 0, 1]) * &UPoly::from_i64s(&[-3, 0, 1]);
    let alpha = Algebraic::real_roots(&m)[3].clone(); // √3
    let field = NumberField::new(alpha.clone());
    assert!(field.is_zero(&UPoly::from_i64s(&[-3, 0, 1])));
    assert_eq!(alpha.polynomial(), UPoly::from_i64s(&[-3, 0, 1]));
    assert!(!field.is_zero(&UPoly::from_i64s(&[-2, 0, 1])));
}

#[test]
fn fiber_roots_over_an_irrational_x() {
    // y^2 - x at x = √2: y = ±2^(1/4)
    let f = BPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]);
    let field = NumberField::new(sqrt2());
    let p = FPoly::from_bpoly(&field, &f).square_free(&field);
    assert_eq!(p.degree(), 2);
    let chain = FChain::new(field, p);
    let ivs = chain.isolate();
    assert_eq!(ivs.len(), 2);
    let r = 2f64.powf(0.25);
    let (lo, hi) = ivs[1].to_f64_hull();
    assert!(lo <= r && r <= hi);
    assert!(ivs[0].hi <= ivs[1].lo);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn compare_is_antisymmetric(a in -30i64..30, b in 1i64..30, c in -30i64..30) {
        // a/b against the positive root of x^2 - |c|
        let r = Algebraic::from_rational(q(a, b));
        let s = Algebraic::real_roots(&UPoly::from_i64s(&[-(c.abs() + 1), 0, 1]))
            .pop()
            .unwrap();
        prop_assert_eq!(r.compare(&s), s.compare(&r).reverse());
    }
}
