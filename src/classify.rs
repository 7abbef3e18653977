//! Coarse shape classification of a fitted cubic.
//!
//! The checks are heuristics on the control polygon, tried in a fixed
//! order where the first match wins:
//!
//! 1. [`ShapeLabel::Line`]: P1 and P2 both lie on the P0–P3 chord
//!    (cross products with the chord are zero).
//! 2. [`ShapeLabel::CircleOrEllipse`]: chord length `|P0 P3|` equals the
//!    interior span `|P1 P2|`.
//! 3. [`ShapeLabel::Rectangle`]: `(P1 - P0) · (P2 - P3)` is zero.
//! 4. [`ShapeLabel::Unknown`] otherwise.
//!
//! These admit false positives (plenty of quadrilaterals pass the
//! rectangle test). Reordering the checks changes results.

use std::fmt;

use kurbo::CubicBez;
use serde::{Deserialize, Serialize};

use crate::config::Tolerance;

/// The closed set of shapes a curve can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeLabel {
    Line,
    CircleOrEllipse,
    Rectangle,
    Unknown,
}

impl ShapeLabel {
    /// Every label, in classification order.
    pub const ALL: [ShapeLabel; 4] = [
        ShapeLabel::Line,
        ShapeLabel::CircleOrEllipse,
        ShapeLabel::Rectangle,
        ShapeLabel::Unknown,
    ];
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeLabel::Line => "Line",
            ShapeLabel::CircleOrEllipse => "Circle or Ellipse",
            ShapeLabel::Rectangle => "Rectangle",
            ShapeLabel::Unknown => "Unknown Shape",
        })
    }
}

/// Assign a shape label to a fitted curve.
pub fn identify_shape(curve: &CubicBez, tol: &Tolerance) -> ShapeLabel {
    if is_line(curve, tol) {
        ShapeLabel::Line
    } else if is_circle_or_ellipse(curve, tol) {
        ShapeLabel::CircleOrEllipse
    } else if is_rectangle(curve, tol) {
        ShapeLabel::Rectangle
    } else {
        ShapeLabel::Unknown
    }
}

fn is_line(c: &CubicBez, tol: &Tolerance) -> bool {
    let chord = c.p3 - c.p0;
    tol.is_zero(chord.cross(c.p1 - c.p0)) && tol.is_zero(chord.cross(c.p2 - c.p0))
}

fn is_circle_or_ellipse(c: &CubicBez, tol: &Tolerance) -> bool {
    tol.is_close(c.p0.distance(c.p3), c.p1.distance(c.p2))
}

fn is_rectangle(c: &CubicBez, tol: &Tolerance) -> bool {
    tol.is_zero((c.p1 - c.p0).dot(c.p2 - c.p3))
}
