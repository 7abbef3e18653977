//! Unconstrained minimization for the control-point fit.
//!
//! - [`Bfgs`] - dense quasi-Newton method with an inverse-Hessian estimate
//! - [`BacktrackingLineSearch`] - Armijo step-size selection used by [`Bfgs`]

mod bfgs;
mod line_search;

pub use bfgs::{Bfgs, BfgsOptions};
pub use line_search::BacktrackingLineSearch;

/// A smooth scalar function of a parameter vector.
pub trait Objective {
    /// f(x)
    fn value(&self, x: &[f64]) -> f64;

    /// Writes ∇f(x) into `grad`, which has the same length as `x`.
    fn gradient(&self, x: &[f64], grad: &mut [f64]);
}

/// How a minimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Gradient norm fell below tolerance.
    Converged,
    /// Reached the iteration limit.
    MaxIterations,
    /// Line search could not make progress.
    Stalled,
    /// Objective became NaN or infinite.
    NumericalError,
}

/// Best point found by a minimizer.
#[derive(Debug, Clone)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub status: ConvergenceStatus,
}

impl Minimum {
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |m, x| m.max(x.abs()))
}
