//! Input table → nested point groups.
//!
//! Each row is `path_id, sub_path_id, x, y`. Rows sharing a path id form a
//! [`PathGroup`]; rows sharing both ids form a [`SubPath`] whose points
//! keep row order. Groups and sub-paths come out in ascending id order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use kurbo::Point;

use crate::error::ShapeError;
use crate::{PathGroup, SubPath};

/// Columns per row: path id, sub-path id, x, y.
const COLUMNS: usize = 4;

/// Read and group a comma-separated table from disk.
pub fn read_path_groups(path: &Path) -> Result<Vec<PathGroup>, ShapeError> {
    let file = File::open(path).map_err(|source| ShapeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_path_groups(file)
}

/// Parse and group a comma-separated table. No header row.
pub fn parse_path_groups<R: Read>(reader: R) -> Result<Vec<PathGroup>, ShapeError> {
    let mut rows = read_rows(reader)?;
    if rows.is_empty() {
        return Err(ShapeError::NoPaths);
    }

    // Stable, so points within a sub-path keep row order.
    rows.sort_by(|a, b| a.path.total_cmp(&b.path).then(a.sub_path.total_cmp(&b.sub_path)));

    let groups: Vec<PathGroup> = rows
        .chunk_by(|a, b| a.path.total_cmp(&b.path).is_eq())
        .map(|group_rows| PathGroup {
            id: group_rows[0].path,
            sub_paths: group_rows
                .chunk_by(|a, b| a.sub_path.total_cmp(&b.sub_path).is_eq())
                .map(|sub_rows| SubPath {
                    id: sub_rows[0].sub_path,
                    points: sub_rows.iter().map(|r| r.point).collect(),
                })
                .collect(),
        })
        .collect();

    log::info!(
        "loaded {} paths, {} sub-paths, {} points",
        groups.len(),
        groups.iter().map(|g| g.sub_paths.len()).sum::<usize>(),
        groups.iter().map(PathGroup::point_count).sum::<usize>()
    );
    Ok(groups)
}

struct Row {
    path: f64,
    sub_path: f64,
    point: Point,
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>, ShapeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ShapeError::Load {
            line: e.position().map_or(i as u64 + 1, |p| p.line()),
            message: e.to_string(),
        })?;
        let line = record.position().map_or(i as u64 + 1, |p| p.line());

        if record.len() != COLUMNS {
            return Err(ShapeError::Load {
                line,
                message: format!("expected {} columns, found {}", COLUMNS, record.len()),
            });
        }

        let mut values = [0.0; COLUMNS];
        for (col, (field, value)) in record.iter().zip(values.iter_mut()).enumerate() {
            *value = field.parse::<f64>().map_err(|e| ShapeError::Load {
                line,
                message: format!("column {}: {:?} is not a number ({})", col + 1, field, e),
            })?;
        }

        rows.push(Row {
            path: values[0],
            sub_path: values[1],
            point: Point::new(values[2], values[3]),
        });
    }
    Ok(rows)
}
