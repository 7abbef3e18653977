//! Curve fitting: sampled sub-path → one cubic bezier.
//!
//! The endpoints are pinned to the first and last samples. The two
//! interior control points are found by least squares, pairing the
//! k-th input point with the curve evaluated at the k-th of `n`
//! evenly spaced parameters. This index pairing ignores arc length;
//! changing it changes which curve is "best", so keep it.

use kurbo::{CubicBez, Point};

use crate::error::FitError;
use crate::geom::{bernstein, first_non_finite, linspace};
use crate::optim::{Bfgs, BfgsOptions, Objective};

/// Fit a cubic bezier to `points`, holding the endpoints fixed.
///
/// The minimizer is seeded with the samples one third and two thirds
/// of the way through the index range. Non-convergence is not an
/// error: the best estimate is used as-is.
pub fn fit_bezier_curve(points: &[Point], options: &BfgsOptions) -> Result<CubicBez, FitError> {
    let (Some(&p0), Some(&p3)) = (points.first(), points.last()) else {
        return Err(FitError::Empty);
    };
    if let Some(i) = first_non_finite(points) {
        return Err(FitError::NonFinite(format!("input point {} is {:?}", i, points[i])));
    }

    let n = points.len();
    let seed1 = points[n / 3];
    let seed2 = points[2 * n / 3];
    let x0 = [seed1.x, seed1.y, seed2.x, seed2.y];

    let objective = ControlPointError::new(points);
    let min = Bfgs::new(*options).minimize(&objective, &x0);
    log::debug!(
        "fit {} points: {:?} after {} iterations, residual {:.6}",
        n,
        min.status,
        min.iterations,
        min.value
    );

    let p1 = Point::new(min.x[0], min.x[1]);
    let p2 = Point::new(min.x[2], min.x[3]);
    if !(p1.is_finite() && p2.is_finite()) {
        return Err(FitError::NonFinite(format!(
            "minimizer produced control points {:?}, {:?}",
            p1, p2
        )));
    }
    Ok(CubicBez::new(p0, p1, p2, p3))
}

/// Sum of squared distances between samples and the curve at matching
/// parameters, as a function of `[p1.x, p1.y, p2.x, p2.y]`.
struct ControlPointError<'a> {
    points: &'a [Point],
    p0: Point,
    p3: Point,
    weights: Vec<[f64; 4]>,
}

impl<'a> ControlPointError<'a> {
    fn new(points: &'a [Point]) -> Self {
        let weights = linspace(points.len()).into_iter().map(bernstein).collect();
        Self {
            points,
            p0: points[0],
            p3: points[points.len() - 1],
            weights,
        }
    }

    /// Per-sample residual `B(t_k) - points[k]`.
    fn residuals<'s>(&'s self, x: &'s [f64]) -> impl Iterator<Item = (f64, f64, &'s [f64; 4])> + 's {
        self.points.iter().zip(&self.weights).map(move |(q, w)| {
            let bx = w[0] * self.p0.x + w[1] * x[0] + w[2] * x[2] + w[3] * self.p3.x;
            let by = w[0] * self.p0.y + w[1] * x[1] + w[2] * x[3] + w[3] * self.p3.y;
            (bx - q.x, by - q.y, w)
        })
    }
}

impl Objective for ControlPointError<'_> {
    fn value(&self, x: &[f64]) -> f64 {
        self.residuals(x).map(|(rx, ry, _)| rx * rx + ry * ry).sum()
    }

    fn gradient(&self, x: &[f64], grad: &mut [f64]) {
        grad.fill(0.0);
        for (rx, ry, w) in self.residuals(x) {
            grad[0] += 2.0 * rx * w[1];
            grad[1] += 2.0 * ry * w[1];
            grad[2] += 2.0 * rx * w[2];
            grad[3] += 2.0 * ry * w[2];
        }
    }
}
