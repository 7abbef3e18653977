//! Raster plots of input strokes (and optionally the fitted shapes).
//!
//! Paths are stroked via tiny-skia with equal x/y scaling, Y up, and
//! written as PNG.

use std::path::Path;

use kurbo::{BezPath, PathEl, Point, Rect};

use crate::error::ShapeError;
use crate::{ClassifiedShape, PathGroup};

/// Stroke colors, cycled by path index.
const PALETTE: [(u8, u8, u8); 5] = [
    (255, 0, 0),   // red
    (0, 128, 0),   // green
    (0, 0, 255),   // blue
    (255, 255, 0), // yellow
    (128, 0, 128), // purple
];

const PADDING: f64 = 20.0;
const STROKE_WIDTH: f32 = 2.0;
const SHAPE_STROKE_WIDTH: f32 = 1.0;

/// Render every sub-path as a polyline, colored by its path index.
pub fn plot_paths(groups: &[PathGroup], output: &Path, size: u32) -> Result<(), ShapeError> {
    let pixmap = draw(groups, &[], size)?;
    save(&pixmap, output)
}

/// Like [`plot_paths`], with the regularized curves drawn in black on top.
pub fn plot_shapes(
    groups: &[PathGroup],
    shapes: &[ClassifiedShape],
    output: &Path,
    size: u32,
) -> Result<(), ShapeError> {
    let pixmap = draw(groups, shapes, size)?;
    save(&pixmap, output)
}

fn draw(
    groups: &[PathGroup],
    shapes: &[ClassifiedShape],
    size: u32,
) -> Result<tiny_skia::Pixmap, ShapeError> {
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| ShapeError::Render(format!("invalid canvas size {}", size)))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let Some(bounds) = data_bounds(groups) else {
        return Ok(pixmap);
    };
    let transform = fit_transform(bounds, size);

    let mut stroke = tiny_skia::Stroke {
        width: STROKE_WIDTH,
        ..tiny_skia::Stroke::default()
    };
    stroke.line_join = tiny_skia::LineJoin::Round;

    for (i, group) in groups.iter().enumerate() {
        let (r, g, b) = PALETTE[i % PALETTE.len()];
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(r, g, b, 255);
        paint.anti_alias = true;

        for sub_path in &group.sub_paths {
            let Some(polyline) = polyline(&sub_path.points) else {
                continue;
            };
            if let Some(sk_path) = kurbo_to_tinyskia(&polyline, transform) {
                pixmap.stroke_path(&sk_path, &paint, &stroke, tiny_skia::Transform::identity(), None);
            }
        }
    }

    if !shapes.is_empty() {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::BLACK);
        paint.anti_alias = true;
        let stroke = tiny_skia::Stroke {
            width: SHAPE_STROKE_WIDTH,
            ..tiny_skia::Stroke::default()
        };
        let mut combined = BezPath::new();
        for shape in shapes {
            let c = shape.curve;
            combined.move_to(c.p0);
            combined.curve_to(c.p1, c.p2, c.p3);
        }
        if let Some(sk_path) = kurbo_to_tinyskia(&combined, transform) {
            pixmap.stroke_path(&sk_path, &paint, &stroke, tiny_skia::Transform::identity(), None);
        }
    }

    Ok(pixmap)
}

/// Bounding box of all finite input points.
fn data_bounds(groups: &[PathGroup]) -> Option<Rect> {
    groups
        .iter()
        .flat_map(|g| &g.sub_paths)
        .flat_map(|s| &s.points)
        .filter(|p| p.is_finite())
        .fold(None, |acc: Option<Rect>, &p| {
            Some(match acc {
                Some(r) => r.union_pt(p),
                None => Rect::from_points(p, p),
            })
        })
}

/// Uniform scale fitting `bounds` into the padded canvas, centered, Y flipped.
fn fit_transform(bounds: Rect, size: u32) -> tiny_skia::Transform {
    let content = (size as f64 - PADDING * 2.0).max(1.0);
    let extent = bounds.width().max(bounds.height());
    let s = if extent > 0.0 { content / extent } else { 1.0 };

    let center = bounds.center();
    let half = size as f64 / 2.0;
    tiny_skia::Transform {
        sx: s as f32,
        kx: 0.0,
        ky: 0.0,
        sy: -(s as f32), // flip Y
        tx: (half - s * center.x) as f32,
        ty: (half + s * center.y) as f32,
    }
}

/// Open polyline through `points`, or `None` if there is nothing to draw.
fn polyline(points: &[Point]) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    Some(path)
}

/// Convert a kurbo `BezPath` to a `tiny_skia::Path`.
fn kurbo_to_tinyskia(bezpath: &BezPath, transform: tiny_skia::Transform) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let (x, y) = transform_point(p, transform);
                pb.move_to(x, y);
            }
            PathEl::LineTo(p) => {
                let (x, y) = transform_point(p, transform);
                pb.line_to(x, y);
            }
            PathEl::QuadTo(c, p) => {
                let (cx, cy) = transform_point(c, transform);
                let (px, py) = transform_point(p, transform);
                pb.quad_to(cx, cy, px, py);
            }
            PathEl::CurveTo(c1, c2, p) => {
                let (c1x, c1y) = transform_point(c1, transform);
                let (c2x, c2y) = transform_point(c2, transform);
                let (px, py) = transform_point(p, transform);
                pb.cubic_to(c1x, c1y, c2x, c2y, px, py);
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Apply transform manually to a point (f64 → f32).
fn transform_point(p: Point, t: tiny_skia::Transform) -> (f32, f32) {
    let x = p.x as f32;
    let y = p.y as f32;
    (t.sx * x + t.kx * y + t.tx, t.ky * x + t.sy * y + t.ty)
}

fn save(pixmap: &tiny_skia::Pixmap, output: &Path) -> Result<(), ShapeError> {
    let png_data = encode_png(pixmap)?;
    std::fs::write(output, png_data).map_err(|source| ShapeError::Io {
        path: output.display().to_string(),
        source,
    })
}

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ShapeError> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| ShapeError::Render(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| ShapeError::Render(e.to_string()))?;
    drop(writer);
    Ok(buf)
}
