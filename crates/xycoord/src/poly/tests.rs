use super::*;
use num_rational::BigRational;
use proptest::prelude::*;

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
}

#[test]
fn gcd_and_square_free() {
    // (x - 1)^2 (x + 2)
    let p = &UPoly::from_i64s(&[-1, 1]).pow(2) * &UPoly::from_i64s(&[2, 1]);
    let sf = p.square_free();
    assert_eq!(sf, &UPoly::from_i64s(&[-1, 1]) * &UPoly::from_i64s(&[2, 1]));
    let g = UPoly::gcd(&p, &UPoly::from_i64s(&[-1, 0, 1]));
    assert_eq!(g, UPoly::from_i64s(&[-1, 1]));
    assert_eq!(UPoly::from_i64s(&[7]).square_free(), UPoly::one());
}

#[test]
fn inverse_mod_works_and_detects_zero_divisors() {
    let m = UPoly::from_i64s(&[-2, 0, 1]); // x^2 - 2
    let a = UPoly::from_i64s(&[1, 1]); // x + 1
    let inv = a.inverse_mod(&m).unwrap();
    assert_eq!((&a * &inv).rem(&m), UPoly::one());
    let zd = UPoly::from_i64s(&[-1, 1]);
    let m2 = UPoly::from_i64s(&[-1, 0, 1]); // x^2 - 1 = (x - 1)(x + 1)
    assert!(zd.inverse_mod(&m2).is_none());
}

#[test]
fn isolation_separates_close_roots() {
    // roots 1, 1 + 1/1000, -3 and the exact root 0
    let p = &(&UPoly::from_i64s(&[-1, 1]) * &UPoly::linear_root(&q(1001, 1000)))
        * &(&UPoly::from_i64s(&[3, 1]) * &UPoly::from_i64s(&[0, 1]));
    let ivs = p.isolate_real_roots();
    assert_eq!(ivs.len(), 4);
    for w in ivs.windows(2) {
        assert!(w[0].hi <= w[1].lo);
    }
    let expected = [q(-3, 1), q(0, 1), q(1, 1), q(1001, 1000)];
    for (iv, r) in ivs.iter().zip(expected.iter()) {
        assert!(iv.contains(r), "{iv} should contain {r}");
    }
}

#[test]
fn no_real_roots() {
    assert!(UPoly::from_i64s(&[1, 0, 1]).isolate_real_roots().is_empty());
    assert!(UPoly::from_i64s(&[5]).isolate_real_roots().is_empty());
}

#[test]
fn bivariate_gcd_finds_common_factor() {
    let f = BPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]); // y^2 - x
    let h = BPoly::from_terms(&[(1, 0, 1), (1, 1, 0), (-3, 0, 0)]); // y + x - 3
    let g = &f * &h;
    let k = BPoly::gcd(&f, &g);
    assert!(k.same_up_to_scalar(&f));
    assert_eq!(g.exact_div(&f), Some(h.clone()));
    assert!(f.exact_div(&h).is_none());
    assert_eq!(BPoly::gcd(&f, &h), BPoly::one());
}

#[test]
fn bivariate_gcd_handles_x_content() {
    // (x - 1)·(y - x) and (x - 1)·(y + 1)
    let xm1 = BPoly::from_terms(&[(1, 1, 0), (-1, 0, 0)]);
    let a = &xm1 * &BPoly::from_terms(&[(1, 0, 1), (-1, 1, 0)]);
    let b = &xm1 * &BPoly::from_terms(&[(1, 0, 1), (1, 0, 0)]);
    assert!(BPoly::gcd(&a, &b).same_up_to_scalar(&xm1));
}

#[test]
fn degrees_and_transpose() {
    let f = BPoly::from_terms(&[(3, 2, 1), (1, 0, 3), (-1, 0, 0)]); // 3x^2 y + y^3 - 1
    assert_eq!(f.degree_y(), 3);
    assert_eq!(f.degree_x(), 2);
    assert_eq!(f.total_degree(), 3);
    assert_eq!(BPoly::zero().total_degree(), -1);
    let t = f.transpose();
    assert_eq!(t, BPoly::from_terms(&[(3, 1, 2), (1, 3, 0), (-1, 0, 0)]));
    assert_eq!(t.transpose(), f);
}

#[test]
fn eval_box_encloses_values() {
    let f: BPoly = "x*y - y^2 + 2".parse().unwrap();
    let ix = Interval::new(q(1, 1), q(2, 1));
    let iy = Interval::new(q(-1, 1), q(1, 2));
    let enc = f.eval_box(&ix, &iy);
    for (a, b) in [(q(1, 1), q(-1, 1)), (q(2, 1), q(1, 2)), (q(3, 2), q(0, 1))] {
        let v = f.eval_x(&a).eval(&b);
        assert!(enc.contains(&v));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn root_counts_match_isolation(roots in prop::collection::vec(-20i64..20, 1..5)) {
        let mut p = UPoly::one();
        for &r in &roots {
            p = &p * &UPoly::linear_root(&q(r, 3));
        }
        let mut distinct = roots.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let ivs = p.isolate_real_roots();
        prop_assert_eq!(ivs.len(), distinct.len());
        for (iv, &r) in ivs.iter().zip(distinct.iter()) {
            prop_assert!(iv.contains(&q(r, 3)));
        }
    }
}
