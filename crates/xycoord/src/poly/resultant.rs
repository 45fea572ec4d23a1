//! Resultants of bivariate polynomials via the Sylvester matrix.
//!
//! The determinant is evaluated with fraction-free (Bareiss) elimination
//! over Q[t], so every intermediate division is exact.

use super::bivariate::BPoly;
use super::univariate::UPoly;

/// `Res_y(f, g)`, a polynomial in `x`.
pub fn resultant_y(f: &BPoly, g: &BPoly) -> UPoly {
    if f.is_zero() || g.is_zero() {
        return UPoly::zero();
    }
    let m = f.degree_y() as usize;
    let n = g.degree_y() as usize;
    if m == 0 && n == 0 {
        return UPoly::one();
    }
    if m == 0 {
        return f.coeff_y(0).pow(n);
    }
    if n == 0 {
        return g.coeff_y(0).pow(m);
    }
    let size = m + n;
    let mut rows: Vec<Vec<UPoly>> = Vec::with_capacity(size);
    // n shifted copies of f, then m shifted copies of g (highest degree first)
    for i in 0..n {
        rows.push(sylvester_row(f, i, size));
    }
    for i in 0..m {
        rows.push(sylvester_row(g, i, size));
    }
    bareiss_determinant(rows)
}

/// `Res_x(f, g)`, a polynomial in `y`.
pub fn resultant_x(f: &BPoly, g: &BPoly) -> UPoly {
    resultant_y(&f.transpose(), &g.transpose())
}

fn sylvester_row(p: &BPoly, offset: usize, size: usize) -> Vec<UPoly> {
    let d = p.degree_y() as usize;
    let mut row = vec![UPoly::zero(); size];
    for k in 0..=d {
        row[offset + k] = p.coeff_y(d - k);
    }
    row
}

fn bareiss_determinant(mut a: Vec<Vec<UPoly>>) -> UPoly {
    let n = a.len();
    let mut negate = false;
    let mut prev = UPoly::one();
    for k in 0..n {
        if a[k][k].is_zero() {
            let Some(swap) = (k + 1..n).find(|&i| !a[i][k].is_zero()) else {
                return UPoly::zero();
            };
            a.swap(k, swap);
            negate = !negate;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &(&a[i][j] * &a[k][k]) - &(&a[i][k] * &a[k][j]);
                a[i][j] = num
                    .exact_div(&prev)
                    .unwrap_or_else(|| unreachable!("Bareiss division is exact"));
            }
        }
        prev = a[k][k].clone();
    }
    let det = a[n - 1][n - 1].clone();
    if negate {
        -det
    } else {
        det
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resultant_of_lines_is_their_intersection_x() {
        // y - x and y + x - 2 meet at x = 1: Res_y = ±(2x - 2)
        let f = BPoly::from_terms(&[(1, 0, 1), (-1, 1, 0)]);
        let g = BPoly::from_terms(&[(1, 0, 1), (1, 1, 0), (-2, 0, 0)]);
        let r = resultant_y(&f, &g).monic();
        assert_eq!(r, UPoly::from_i64s(&[-1, 1]));
    }

    #[test]
    fn resultant_with_minimal_polynomial() {
        // f = y^2 - x, m(x) = x - 4  ⇒  Res_x(f, m) = ±(y^2 - 4)
        let f = BPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]);
        let m = BPoly::from_x(&UPoly::from_i64s(&[-4, 1]));
        let r = resultant_x(&f, &m).monic();
        assert_eq!(r, UPoly::from_i64s(&[-4, 0, 1]));
    }

    #[test]
    fn resultant_detects_discriminant() {
        // Res_y(y^2 - x, 2y) = -4x up to sign: zero exactly at the fold x = 0
        let f = BPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]);
        let r = resultant_y(&f, &f.derivative_y()).monic();
        assert_eq!(r, UPoly::from_i64s(&[0, 1]));
    }
}
