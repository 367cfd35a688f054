use crate::errors::{Result, SketchError};
use crate::style::Style;
use crate::types::{Angle, Point};

use super::{Curve, Shape, Transform};

/// A smooth curve through control points with strictly increasing x.
///
/// Degree 1 joins the points with straight pieces. Degree 3 fits a cubic
/// with the not-a-knot end condition; three points give the parabola
/// through them and two points give the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub(crate) curve: Curve,
    control: Vec<Point>,
    degree: u8,
    /// Per-interval coefficients `[a, b, c, d]` of
    /// `a + b·t + c·t² + d·t³` with `t = x - x_i`
    pieces: Vec<[f64; 4]>,
}

impl Spline {
    pub const DEFAULT_DEGREE: u8 = 3;
    pub const DEFAULT_RESOLUTION: usize = 500;

    pub fn new(points: Vec<Point>) -> Result<Self> {
        Spline::with_params(points, Spline::DEFAULT_DEGREE, Spline::DEFAULT_RESOLUTION)
    }

    /// Fit with an explicit degree and number of samples.
    ///
    /// `degree` must be 1 (piecewise linear) or 3 (cubic); other degrees
    /// fail with [`SketchError::InvalidConstruction`]. `resolution` is the
    /// number of evenly spaced samples and must be at least 2.
    pub fn with_params(points: Vec<Point>, degree: u8, resolution: usize) -> Result<Self> {
        if points.len() < 2 {
            return Err(SketchError::invalid("spline", "at least two control points are required"));
        }
        if degree != 1 && degree != 3 {
            return Err(SketchError::invalid(
                "spline",
                format!("degree must be 1 or 3, got {degree}"),
            ));
        }
        if resolution < 2 {
            return Err(SketchError::invalid("spline", "resolution must be at least 2"));
        }
        if let Some(w) = points.windows(2).find(|w| !(w[1].x > w[0].x)) {
            return Err(SketchError::invalid(
                "spline",
                format!("x must be strictly increasing, got {} then {}", w[0].x, w[1].x),
            ));
        }

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let pieces = if degree == 1 || points.len() == 2 {
            linear_pieces(&xs, &ys)
        } else if points.len() == 3 {
            parabola_pieces(&xs, &ys)
        } else {
            not_a_knot_pieces(&xs, &ys)?
        };

        let (x0, x1) = (xs[0], xs[xs.len() - 1]);
        let step = (x1 - x0) / (resolution - 1) as f64;
        let samples = (0..resolution)
            .map(|i| {
                // land exactly on the last knot
                let x = if i == resolution - 1 { x1 } else { x0 + step * i as f64 };
                Point::new(x, eval_pieces(&points, &pieces, x))
            })
            .collect();

        Ok(Spline {
            curve: Curve::from_parts(samples, Style::default()),
            control: points,
            degree,
            pieces,
        })
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    /// Evaluate the fitted function. Outside the control range the end
    /// pieces are extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        eval_pieces(&self.control, &self.pieces, x)
    }
}

fn eval_pieces(knots: &[Point], pieces: &[[f64; 4]], x: f64) -> f64 {
    let last = pieces.len() - 1;
    // interval whose left knot is the last interior knot <= x
    let i = knots[1..=last].partition_point(|p| p.x <= x);
    let [a, b, c, d] = pieces[i];
    let t = x - knots[i].x;
    a + t * (b + t * (c + t * d))
}

fn linear_pieces(xs: &[f64], ys: &[f64]) -> Vec<[f64; 4]> {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| [y[0], (y[1] - y[0]) / (x[1] - x[0]), 0.0, 0.0])
        .collect()
}

/// The single quadratic through three points, split at the middle knot
fn parabola_pieces(xs: &[f64], ys: &[f64]) -> Vec<[f64; 4]> {
    let (h0, h1) = (xs[1] - xs[0], xs[2] - xs[1]);
    let s0 = (ys[1] - ys[0]) / h0;
    let s1 = (ys[2] - ys[1]) / h1;
    let c = (s1 - s0) / (h0 + h1);
    let b0 = s0 - c * h0;
    let b1 = b0 + 2.0 * c * h0;
    vec![[ys[0], b0, c, 0.0], [ys[1], b1, c, 0.0]]
}

/// Cubic spline whose first two and last two pieces share a cubic term.
///
/// Solves for the second derivatives `m` at every knot.
fn not_a_knot_pieces(xs: &[f64], ys: &[f64]) -> Result<Vec<[f64; 4]>> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let mut a = vec![vec![0.0; n]; n];
    let mut rhs = vec![0.0; n];

    // equal third derivative across the second knot
    a[0][0] = h[1];
    a[0][1] = -(h[0] + h[1]);
    a[0][2] = h[0];
    for i in 1..n - 1 {
        a[i][i - 1] = h[i - 1];
        a[i][i] = 2.0 * (h[i - 1] + h[i]);
        a[i][i + 1] = h[i];
        rhs[i] = 6.0 * (slope[i] - slope[i - 1]);
    }
    // and across the second to last
    a[n - 1][n - 3] = h[n - 2];
    a[n - 1][n - 2] = -(h[n - 3] + h[n - 2]);
    a[n - 1][n - 1] = h[n - 3];

    let m = solve(a, rhs)?;

    Ok((0..n - 1)
        .map(|i| {
            let b = slope[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            [ys[i], b, m[i] / 2.0, (m[i + 1] - m[i]) / (6.0 * h[i])]
        })
        .collect())
}

/// Gaussian elimination with partial pivoting
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-300 {
            return Err(SketchError::invalid("spline", "control points give a singular system"));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let f = a[row][col] / a[col][col];
            if f == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= f * a[col][k];
            }
            b[row] -= f * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

impl Shape for Spline {
    fn curve(&self) -> &Curve {
        &self.curve
    }
}

/// A moved spline is no longer a function of x, so it becomes a curve.
impl Transform for Spline {
    type Output = Curve;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Curve {
        self.curve.rotate(angle, center)
    }

    fn translate(&self, vec: Point) -> Curve {
        self.curve.translate(vec)
    }

    fn scale(&self, factor: f64) -> Result<Curve> {
        self.curve.scale(factor)
    }
}
