//! Textual and JSON reports of classified shapes.

use std::fmt;

use kurbo::CubicBez;
use serde::ser::{SerializeSeq, Serializer};

use crate::classify::ShapeLabel;
use crate::error::ShapeError;
use crate::ClassifiedShape;

/// Report over the pipeline output, one line per shape plus label counts.
pub struct Report<'a> {
    pub shapes: &'a [ClassifiedShape],
}

impl<'a> Report<'a> {
    pub fn new(shapes: &'a [ClassifiedShape]) -> Self {
        Self { shapes }
    }

    /// Number of shapes carrying each label, in classification order.
    pub fn counts(&self) -> [(ShapeLabel, usize); 4] {
        ShapeLabel::ALL.map(|label| {
            (label, self.shapes.iter().filter(|s| s.label == label).count())
        })
    }

    pub fn to_json(&self) -> Result<String, ShapeError> {
        Ok(serde_json::to_string_pretty(self.shapes)?)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in self.shapes {
            let c = &shape.curve;
            writeln!(
                f,
                "Shape: {}, Bézier Curve Control Points: [[{}, {}], [{}, {}], [{}, {}], [{}, {}]]",
                shape.label, c.p0.x, c.p0.y, c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y,
            )?;
        }
        writeln!(f)?;
        let summary: Vec<String> = self
            .counts()
            .iter()
            .map(|(label, n)| format!("{} {}", n, label))
            .collect();
        writeln!(f, "{} shapes: {}", self.shapes.len(), summary.join(" \u{00b7} "))
    }
}

/// Serialize a cubic as `[[x0, y0], [x1, y1], [x2, y2], [x3, y3]]`.
pub(crate) fn serialize_curve<S: Serializer>(curve: &CubicBez, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(4))?;
    for p in [curve.p0, curve.p1, curve.p2, curve.p3] {
        seq.serialize_element(&[p.x, p.y])?;
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Vec<ClassifiedShape> {
        vec![
            ClassifiedShape {
                index: 0,
                path_id: 0.0,
                sub_path_id: 0.0,
                label: ShapeLabel::Line,
                curve: CubicBez::new((0.0, 0.0), (2.0, 0.0), (2.0, 0.0), (4.0, 0.0)),
            },
            ClassifiedShape {
                index: 1,
                path_id: 1.0,
                sub_path_id: 0.0,
                label: ShapeLabel::Unknown,
                curve: CubicBez::new((0.0, 0.0), (1.5, 3.0), (5.0, 2.0), (4.0, 0.0)),
            },
        ]
    }

    #[test]
    fn lists_label_and_control_points_per_shape() {
        let shapes = shapes();
        let text = Report::new(&shapes).to_string();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Shape: Line, Bézier Curve Control Points: [[0, 0], [2, 0], [2, 0], [4, 0]]")
        );
        assert_eq!(
            lines.next(),
            Some("Shape: Unknown Shape, Bézier Curve Control Points: [[0, 0], [1.5, 3], [5, 2], [4, 0]]")
        );
        assert!(text.contains("2 shapes: 1 Line"), "{}", text);
    }

    #[test]
    fn counts_follow_classification_order() {
        let shapes = shapes();
        let counts = Report::new(&shapes).counts();
        assert_eq!(counts[0], (ShapeLabel::Line, 1));
        assert_eq!(counts[2], (ShapeLabel::Rectangle, 0));
        assert_eq!(counts[3], (ShapeLabel::Unknown, 1));
    }

    #[test]
    fn json_has_label_and_point_pairs() {
        let shapes = shapes();
        let json = Report::new(&shapes).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["label"], "line");
        assert_eq!(value[1]["curve"][1][0], 1.5);
        assert_eq!(value[1]["curve"].as_array().map(Vec::len), Some(4));
    }
}
