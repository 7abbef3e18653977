//! bezshape: hand-drawn polyline paths → idealized cubic bezier shapes.
//!
//! Each sampled sub-path is fitted with a single cubic bezier, the
//! cubic is classified as a line, circle/ellipse, rectangle, or
//! unknown shape, and its control points are snapped to that shape.
//!
//! # Example
//!
//! ```no_run
//! use bezshape::{load, process_paths, ShapeConfig};
//! use std::path::Path;
//!
//! let groups = load::read_path_groups(Path::new("strokes.csv"))?;
//! let shapes = process_paths(&groups, &ShapeConfig::default())?;
//! for shape in &shapes {
//!     println!("{}: {:?}", shape.label, shape.curve);
//! }
//! # Ok::<(), bezshape::ShapeError>(())
//! ```

#![forbid(unsafe_code)]

mod classify;
mod config;
mod fit;
mod geom;
mod regularize;

pub mod error;
pub mod load;
pub mod optim;
pub mod render;
pub mod report;

// Re-export kurbo so downstream users get the same version
// used by ClassifiedShape.curve.
pub use kurbo;

pub use classify::{identify_shape, ShapeLabel};
pub use config::{ShapeConfig, Tolerance};
pub use error::{FitError, RegularizeError, ShapeError};
pub use fit::fit_bezier_curve;
pub use regularize::regularize_shape;

use std::time::Instant;

use kurbo::{CubicBez, Point};
use rayon::prelude::*;
use serde::Serialize;

/// One continuous stroke: samples in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub id: f64,
    pub points: Vec<Point>,
}

/// Sub-paths sharing a path identifier, in ascending sub-path id order.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGroup {
    pub id: f64,
    pub sub_paths: Vec<SubPath>,
}

impl PathGroup {
    pub fn point_count(&self) -> usize {
        self.sub_paths.iter().map(|s| s.points.len()).sum()
    }
}

/// A regularized curve and the label it was regularized as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedShape {
    /// Position among all sub-paths, counting across groups.
    pub index: usize,
    pub path_id: f64,
    pub sub_path_id: f64,
    pub label: ShapeLabel,
    #[serde(serialize_with = "report::serialize_curve")]
    pub curve: CubicBez,
}

/// Fit, classify, and regularize every sub-path of every group.
///
/// Output has one entry per sub-path, in group order then sub-path
/// order, regardless of `config.parallel`.
pub fn process_paths(
    groups: &[PathGroup],
    config: &ShapeConfig,
) -> Result<Vec<ClassifiedShape>, ShapeError> {
    let t_start = Instant::now();

    let jobs: Vec<(usize, &PathGroup, &SubPath)> = groups
        .iter()
        .flat_map(|g| g.sub_paths.iter().map(move |s| (g, s)))
        .enumerate()
        .map(|(i, (g, s))| (i, g, s))
        .collect();

    // Fitting dominates; sub-paths share nothing, so they can go wide.
    let results: Vec<Result<ClassifiedShape, ShapeError>> = if config.parallel {
        jobs.par_iter()
            .map(|&(i, g, s)| process_one(i, g, s, config))
            .collect()
    } else {
        jobs.iter()
            .map(|&(i, g, s)| process_one(i, g, s, config))
            .collect()
    };
    let shapes = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "processed {} sub-paths in {} groups ({}ms)",
        shapes.len(),
        groups.len(),
        t_start.elapsed().as_millis()
    );
    Ok(shapes)
}

fn process_one(
    index: usize,
    group: &PathGroup,
    sub_path: &SubPath,
    config: &ShapeConfig,
) -> Result<ClassifiedShape, ShapeError> {
    let fitted = fit_bezier_curve(&sub_path.points, &config.optimizer).map_err(|e| match e {
        FitError::Empty => ShapeError::Fit {
            index,
            reason: FitError::Empty.to_string(),
        },
        FitError::NonFinite(what) => ShapeError::Numeric { index, what },
    })?;

    let (label, curve) = classify_and_regularize(index, &fitted, config)?;
    log::debug!("sub-path {}: {}", index, label);

    Ok(ClassifiedShape {
        index,
        path_id: group.id,
        sub_path_id: sub_path.id,
        label,
        curve,
    })
}

/// Label a fitted curve and snap it, applying the degenerate-circle policy.
fn classify_and_regularize(
    index: usize,
    fitted: &CubicBez,
    config: &ShapeConfig,
) -> Result<(ShapeLabel, CubicBez), ShapeError> {
    let label = identify_shape(fitted, &config.tolerance);
    match regularize_shape(fitted, label) {
        Ok(curve) => Ok((label, curve)),
        Err(source) if config.strict => Err(ShapeError::Regularize { index, source }),
        Err(source) => {
            log::warn!(
                "sub-path {}: {}; keeping fitted curve as {}",
                index,
                source,
                ShapeLabel::Unknown
            );
            Ok((ShapeLabel::Unknown, *fitted))
        }
    }
}
