use serde::{Deserialize, Serialize};

use crate::optim::BfgsOptions;

/// All processing parameters in one struct.
/// Serializable so a run can be reproduced from a saved preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    // -- Classification --
    /// Closeness test shared by all shape checks.
    pub tolerance: Tolerance,

    // -- Curve fitting --
    /// Minimizer settings for the control-point fit.
    pub optimizer: BfgsOptions,

    // -- Execution --
    /// Fit sub-paths on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Propagate regularization failures instead of falling back to `Unknown`.
    pub strict: bool,
}

/// Relative/absolute closeness, `|a - b| <= atol + rtol * |b|`.
///
/// Comparing against zero reduces to `|a| <= atol`, so `rtol` only
/// affects the chord/span comparison of the circle check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerance {
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    pub fn is_zero(&self, a: f64) -> bool {
        self.is_close(a, 0.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}
