//! Snap a classified curve's interior control points to the ideal form
//! of its label.
//!
//! This is cosmetic, not a refit. Each rule reads the fitted control
//! points and never a previously regularized value. The endpoints are
//! never moved.

use kurbo::{CubicBez, Point, Vec2};

use crate::classify::ShapeLabel;
use crate::error::RegularizeError;

/// Regularize `curve` according to `label`.
///
/// - `Line`: P1 = P2 = chord midpoint.
/// - `CircleOrEllipse`: P1 = P2 = P1 pushed out from the chord midpoint
///   to `radius = (|P0 P3| + |P1 P2|) / 2`. Fails if P1 is the midpoint.
/// - `Rectangle`: P1 and P2 each rotated a quarter turn about the midpoint.
/// - `Unknown`: unchanged.
pub fn regularize_shape(curve: &CubicBez, label: ShapeLabel) -> Result<CubicBez, RegularizeError> {
    let CubicBez { p0, p1, p2, p3 } = *curve;
    let mid = p0.midpoint(p3);

    let (p1, p2) = match label {
        ShapeLabel::Line => (mid, mid),
        ShapeLabel::CircleOrEllipse => {
            let radius = (p0.distance(p3) + p1.distance(p2)) / 2.0;
            let offset = p1 - mid;
            let len = offset.hypot();
            if len == 0.0 {
                return Err(RegularizeError::DegenerateCircle);
            }
            let on_circle = mid + offset * (radius / len);
            (on_circle, on_circle)
        }
        ShapeLabel::Rectangle => (quarter_turn(p1, mid), quarter_turn(p2, mid)),
        ShapeLabel::Unknown => (p1, p2),
    };

    Ok(CubicBez::new(p0, p1, p2, p3))
}

/// Rotate `p` clockwise by 90° about `center`: `(dx, dy) → (dy, -dx)`.
fn quarter_turn(p: Point, center: Point) -> Point {
    let d = p - center;
    center + Vec2::new(d.y, -d.x)
}

#[cfg(test)]
mod tests {
    use crate::classify::identify_shape;
    use crate::config::Tolerance;

    use super::*;

    #[test]
    fn line_collapses_to_midpoint() {
        let curve = CubicBez::new((0.0, 0.0), (1.3, 0.0), (2.9, 0.0), (4.0, 0.0));
        let out = regularize_shape(&curve, ShapeLabel::Line).unwrap();
        assert_eq!(out.p1, Point::new(2.0, 0.0));
        assert_eq!(out.p2, Point::new(2.0, 0.0));
        assert_eq!(out.p0, curve.p0);
        assert_eq!(out.p3, curve.p3);
    }

    #[test]
    fn line_regularization_is_a_fixed_point() {
        let tol = Tolerance::default();
        let curve = CubicBez::new((1.0, 2.0), (2.0, 4.0), (4.0, 8.0), (5.0, 10.0));
        assert_eq!(identify_shape(&curve, &tol), ShapeLabel::Line);

        let once = regularize_shape(&curve, ShapeLabel::Line).unwrap();
        assert_eq!(identify_shape(&once, &tol), ShapeLabel::Line);
        let twice = regularize_shape(&once, ShapeLabel::Line).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn circle_pushes_p1_to_mean_radius() {
        let curve = CubicBez::new((1.0, 0.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, 0.0));
        let out = regularize_shape(&curve, ShapeLabel::CircleOrEllipse).unwrap();
        // chord 2, span 2 → radius 2 from the origin, along (1, 1).
        let expected = 2.0 / 2f64.sqrt();
        assert!((out.p1.x - expected).abs() < 1e-12);
        assert!((out.p1.y - expected).abs() < 1e-12);
        assert_eq!(out.p1, out.p2);
    }

    #[test]
    fn circle_with_p1_on_midpoint_fails() {
        let curve = CubicBez::new((1.0, 0.0), (0.0, 0.0), (-1.0, 1.0), (-1.0, 0.0));
        assert_eq!(
            regularize_shape(&curve, ShapeLabel::CircleOrEllipse),
            Err(RegularizeError::DegenerateCircle)
        );
    }

    #[test]
    fn rectangle_rotates_each_interior_point() {
        let curve = CubicBez::new((0.0, 0.0), (1.0, 3.0), (3.0, 1.0), (4.0, 0.0));
        let out = regularize_shape(&curve, ShapeLabel::Rectangle).unwrap();
        // mid = (2, 0)
        assert_eq!(out.p1, Point::new(2.0 + 3.0, 0.0 - (1.0 - 2.0)));
        assert_eq!(out.p2, Point::new(2.0 + 1.0, 0.0 - (3.0 - 2.0)));
    }

    #[test]
    fn two_quarter_turns_reflect_through_midpoint() {
        let mid = Point::new(2.5, -1.0);
        let p1 = Point::new(7.0, 3.5);
        let twice = quarter_turn(quarter_turn(p1, mid), mid);
        let reflected = Point::new(2.0 * mid.x - p1.x, 2.0 * mid.y - p1.y);
        assert!(twice.distance(reflected) < 1e-12, "{:?} vs {:?}", twice, reflected);
    }

    #[test]
    fn unknown_is_identity() {
        let curve = CubicBez::new((0.0, 0.0), (1.0, 3.0), (5.0, 2.0), (4.0, 0.0));
        assert_eq!(regularize_shape(&curve, ShapeLabel::Unknown).unwrap(), curve);
    }
}
