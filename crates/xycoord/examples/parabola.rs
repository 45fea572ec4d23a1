//! Walk the parabola y^2 = x and a line through a shared point.
//!
//! Usage:
//!   cargo run -p xycoord --example parabola
//!
//! Prints the points over x = 1 sorted by y, their y-coordinates and boxes.

use num_rational::BigRational;
use xycoord::prelude::*;

fn main() {
    let s = xycoord::exact_session();
    let parabola = s.kernel().curve(&"y^2 - x".parse().unwrap()).unwrap();
    let line = s.kernel().curve(&"y - x".parse().unwrap()).unwrap();
    let both = s
        .kernel()
        .curve(&"(y^2 - x)*(y + 2*x)".parse().unwrap())
        .unwrap();

    let x = Algebraic::from_rational(BigRational::from_integer(1.into()));
    let mut points = Vec::new();
    for c in [&parabola, &line, &both] {
        for arc in 0..c.fiber_at(&x).event_count() {
            points.push(s.point(x.clone(), c.clone(), arc));
        }
    }
    s.sort_points(&mut points);
    for p in &points {
        let y = s.y(p);
        let bbox = p.approximation_box_within(1e-6);
        println!(
            "{p}  y = {y}  box = [{:.7}, {:.7}] x [{:.7}, {:.7}]",
            bbox.min.x, bbox.max.x, bbox.min.y, bbox.max.y
        );
    }
    for w in points.windows(2) {
        if s.equal(&w[0], &w[1]) {
            println!("coincident: {} and {}", w[0], w[1]);
        }
    }
}
