use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use num_rational::BigRational;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;
use xycoord::api::{Algebraic, AlgebraicReal, BBox, BPoly, ExactCurve, ExactSession, Point};

mod args;
mod provenance;

use args::{PointArg, XArg};
use provenance::Provenance;

#[derive(Parser)]
#[command(name = "xycoord-cli")]
#[command(about = "Exact points on algebraic plane curves")]
struct Cmd {
    /// Log simplifications, cache fills and pair fallbacks
    #[arg(long, short)]
    verbose: bool,

    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Order two points lexicographically (x, then y)
    Compare { first: PointArg, second: PointArg },
    /// Solve y, test for zero coordinates and box a point
    Locate {
        point: PointArg,
        #[arg(long, default_value_t = 1e-6)]
        precision: f64,
    },
    /// List the arcs of a curve over an x-coordinate
    Fiber {
        #[arg(long)]
        curve: BPoly,
        #[arg(long)]
        x: XArg,
        #[arg(long, default_value_t = 1e-6)]
        precision: f64,
    },
    /// Sort points and mark coincident neighbours
    Sort {
        #[arg(required = true)]
        points: Vec<PointArg>,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let s = xycoord::exact_session();
    let (name, params, result) = match &cmd.action {
        Action::Compare { first, second } => (
            "compare",
            serde_json::json!({ "first": format!("{first:?}"), "second": format!("{second:?}") }),
            compare(&s, first, second)?,
        ),
        Action::Locate { point, precision } => (
            "locate",
            serde_json::json!({ "point": format!("{point:?}"), "precision": precision }),
            locate(&s, point, *precision)?,
        ),
        Action::Fiber {
            curve,
            x,
            precision,
        } => (
            "fiber",
            serde_json::json!({ "curve": curve.to_string(), "x": format!("{x:?}"), "precision": precision }),
            fiber(&s, curve, x, *precision)?,
        ),
        Action::Sort { points } => (
            "sort",
            serde_json::json!({ "points": points.len() }),
            sort(&s, points)?,
        ),
    };
    emit(&result, cmd.out.as_deref(), &Provenance::new(name, params))
}

/// Pretty JSON to stdout, or to `out` with a provenance sidecar.
fn emit(result: &Value, out: Option<&str>, provenance: &Provenance) -> Result<()> {
    let text = serde_json::to_string_pretty(result)?;
    let Some(out) = out else {
        println!("{text}");
        return Ok(());
    };
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, text).with_context(|| format!("writing {out}"))?;
    let sidecar = provenance.write_beside(out_path)?;
    tracing::info!(out, sidecar = %sidecar.display(), "result written");
    Ok(())
}

#[derive(Serialize)]
struct PointReport {
    text: String,
    curve: String,
    arc: usize,
    x: f64,
    y: f64,
}

impl PointReport {
    fn of(p: &Point<ExactCurve>) -> Self {
        let v = p.to_f64();
        Self {
            text: p.to_string(),
            curve: p.curve().polynomial().to_string(),
            arc: p.arc(),
            x: v.x,
            y: v.y,
        }
    }
}

#[derive(Serialize)]
struct AlgebraicReport {
    polynomial: String,
    lower: String,
    upper: String,
    approx: f64,
}

impl AlgebraicReport {
    fn of(a: &Algebraic, var: &str) -> Self {
        Self {
            polynomial: a.polynomial().display_with(var).to_string(),
            lower: a.lower().to_string(),
            upper: a.upper().to_string(),
            approx: a.to_f64(),
        }
    }
}

#[derive(Serialize)]
struct BoxReport {
    precision: f64,
    min: [f64; 2],
    max: [f64; 2],
}

impl BoxReport {
    fn of(b: &BBox, precision: f64) -> Self {
        Self {
            precision,
            min: [b.min.x, b.min.y],
            max: [b.max.x, b.max.y],
        }
    }
}

fn order_name(o: Ordering) -> &'static str {
    match o {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

fn precision_bound(precision: f64) -> Result<BigRational> {
    if !(precision > 0.0 && precision.is_finite()) {
        bail!("precision must be positive and finite, got {precision}");
    }
    BigRational::from_float(precision).context("precision is not representable")
}

fn compare(s: &ExactSession, first: &PointArg, second: &PointArg) -> Result<Value> {
    let p = first.build(s).context("first point")?;
    let q = second.build(s).context("second point")?;
    let order = s.compare_xy(&p, &q, false);
    tracing::info!(%p, %q, order = order_name(order), "compared");
    // supports reported after comparison: simplification may have moved them
    Ok(serde_json::json!({
        "order": order_name(order),
        "first": PointReport::of(&p),
        "second": PointReport::of(&q),
    }))
}

fn locate(s: &ExactSession, point: &PointArg, precision: f64) -> Result<Value> {
    precision_bound(precision)?;
    let p = point.build(s)?;
    let y = s.y(&p);
    let bbox = p.approximation_box_within(precision);
    let branches = p.curve().fiber_at(p.x()).incident_branches(p.arc());
    Ok(serde_json::json!({
        "point": PointReport::of(&p),
        "x": AlgebraicReport::of(p.x(), "x"),
        "y": AlgebraicReport::of(&y, "y"),
        "branches": branches,
        "is_x_zero": p.is_x_zero(),
        "is_y_zero": p.is_y_zero(),
        "bbox": BoxReport::of(&bbox, precision),
    }))
}

#[derive(Serialize)]
struct EventReport {
    arc: usize,
    lower: f64,
    upper: f64,
    branches: (usize, usize),
}

fn fiber(s: &ExactSession, curve: &BPoly, x: &XArg, precision: f64) -> Result<Value> {
    let bound = precision_bound(precision)?;
    let c = s.kernel().curve(curve)?;
    let x = x.to_algebraic()?;
    let fiber = c.fiber_at(&x);
    let events: Vec<EventReport> = (0..fiber.event_count())
        .map(|arc| {
            while fiber.arc_bounds(arc).width() >= bound {
                fiber.refine_arc(arc);
            }
            let (lower, upper) = fiber.arc_bounds(arc).to_f64_hull();
            EventReport {
                arc,
                lower,
                upper,
                branches: fiber.incident_branches(arc),
            }
        })
        .collect();
    tracing::debug!(curve = %c, events = events.len(), "fiber listed");
    Ok(serde_json::json!({
        "curve": c.polynomial().to_string(),
        "x": AlgebraicReport::of(&x, "x"),
        "events": events,
    }))
}

fn sort(s: &ExactSession, points: &[PointArg]) -> Result<Value> {
    let mut pts = points
        .iter()
        .enumerate()
        .map(|(i, a)| a.build(s).with_context(|| format!("point #{i}")))
        .collect::<Result<Vec<_>>>()?;
    s.sort_points(&mut pts);
    let mut out = Vec::with_capacity(pts.len());
    for (rank, p) in pts.iter().enumerate() {
        let coincident = rank > 0 && s.equal(&pts[rank - 1], p);
        out.push(serde_json::json!({
            "rank": rank,
            "coincident_with_previous": coincident,
            "point": PointReport::of(p),
        }));
    }
    Ok(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pt(s: &str) -> PointArg {
        s.parse().unwrap()
    }

    #[test]
    fn compare_reports_order_and_simplified_support() {
        let s = xycoord::exact_session();
        let v = compare(&s, &pt("1:y^2 - x:0"), &pt("1:(y^2 - x)*(y - 1):0")).unwrap();
        assert_eq!(v["order"], "equal");
        assert_eq!(v["second"]["curve"], "y^2 - x");
        let v = compare(&s, &pt("4:y^2 - x:0"), &pt("4:y - x:0")).unwrap();
        assert_eq!(v["order"], "less");
    }

    #[test]
    fn locate_reports_exact_y_and_box() {
        let s = xycoord::exact_session();
        let v = locate(&s, &pt("0:y - x:0"), 1e-3).unwrap();
        assert_eq!(v["is_y_zero"], true);
        assert_eq!(v["is_x_zero"], true);
        let v = locate(&s, &pt("x^2 - 2@1:y^2 - x:1"), 1e-6).unwrap();
        let y = v["y"]["approx"].as_f64().unwrap();
        assert!((y - 2f64.powf(0.25)).abs() < 1e-12);
        let lo = v["bbox"]["min"][1].as_f64().unwrap();
        let hi = v["bbox"]["max"][1].as_f64().unwrap();
        assert!(lo <= y && y <= hi && hi - lo < 1e-5);
        assert!(locate(&s, &pt("0:y - x:0"), 0.0).is_err());
    }

    #[test]
    fn fiber_lists_arcs_with_branches() {
        let s = xycoord::exact_session();
        let curve: BPoly = "y^2 - x^2 - x^3".parse().unwrap();
        let v = fiber(&s, &curve, &"0".parse().unwrap(), 1e-4).unwrap();
        let events = v["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["branches"], serde_json::json!([2, 2]));
        let v = fiber(&s, &curve, &"-2".parse().unwrap(), 1e-4).unwrap();
        assert!(v["events"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sort_marks_coincident_points() {
        let s = xycoord::exact_session();
        let pts = [pt("1:y + x - 2:0"), pt("0:y:0"), pt("1:y - x:0")];
        let v = sort(&s, &pts).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows[0]["point"]["x"], 0.0);
        assert_eq!(rows[1]["coincident_with_previous"], false);
        assert_eq!(rows[2]["coincident_with_previous"], true);
    }

    #[test]
    fn emit_writes_result_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("order.json");
        let prov = Provenance::new("compare", serde_json::json!({}));
        let result = serde_json::json!({ "order": "less" });
        emit(&result, out.to_str(), &prov).unwrap();
        let back: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(back, result);
        assert!(dir.path().join("runs").join("order.provenance.json").exists());
    }
}
