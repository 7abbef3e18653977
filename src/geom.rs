//! Shared geometry utilities.

use kurbo::Point;

/// `n` evenly spaced parameter values over `[0, 1]`, endpoints included.
///
/// A single sample sits at `t = 0`.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|k| k as f64 / last).collect()
        }
    }
}

/// Cubic Bernstein weights `(b0, b1, b2, b3)` at `t`.
pub fn bernstein(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t]
}

/// Index of the first point with a NaN or infinite coordinate.
pub fn first_non_finite(points: &[Point]) -> Option<usize> {
    points.iter().position(|p| !p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let t = linspace(5);
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1), vec![0.0]);
        assert!(linspace(0).is_empty());
    }

    #[test]
    fn bernstein_weights_partition_unity() {
        for &t in &[0.0, 0.3, 0.5, 0.9, 1.0] {
            let sum: f64 = bernstein(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "sum at t={} was {}", t, sum);
        }
    }

    #[test]
    fn finds_nan_point() {
        let pts = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert_eq!(first_non_finite(&pts), Some(1));
        assert_eq!(first_non_finite(&pts[..1]), None);
    }
}
