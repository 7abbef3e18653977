use thiserror::Error;

/// Errors that can occur while loading, fitting, or regularizing shapes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input at line {line}: {message}")]
    Load { line: u64, message: String },

    #[error("input contains no paths")]
    NoPaths,

    #[error("cannot fit sub-path {index}: {reason}")]
    Fit { index: usize, reason: String },

    #[error("cannot regularize sub-path {index}: {source}")]
    Regularize {
        index: usize,
        #[source]
        source: RegularizeError,
    },

    #[error("non-finite value in sub-path {index}: {what}")]
    Numeric { index: usize, what: String },

    #[error("render failed: {0}")]
    Render(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single regularization step, before it is tied to a sub-path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegularizeError {
    #[error("first control point coincides with the chord midpoint")]
    DegenerateCircle,
}

/// Failure of a single curve fit, before it is tied to a sub-path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error("sub-path has no points")]
    Empty,

    #[error("{0}")]
    NonFinite(String),
}
