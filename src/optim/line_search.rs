use super::{dot, Objective};

/// Backtracking line search with the Armijo condition.
///
/// Starts at α = 1 and shrinks by `rho` until
///
/// ```text
/// f(x + α·d) ≤ f(x) + c₁·α·∇f(x)ᵀd
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingLineSearch {
    pub c1: f64,
    pub rho: f64,
    pub max_iter: usize,
}

impl Default for BacktrackingLineSearch {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            rho: 0.5,
            max_iter: 60,
        }
    }
}

impl BacktrackingLineSearch {
    /// Returns the accepted step and the objective value there, or `None`
    /// if no step satisfied the condition (or `d` is not a descent direction).
    pub fn search<O: Objective + ?Sized>(
        &self,
        objective: &O,
        x: &[f64],
        fx: f64,
        grad: &[f64],
        d: &[f64],
    ) -> Option<(f64, f64)> {
        let slope = dot(grad, d);
        if slope.is_nan() || slope >= 0.0 {
            return None;
        }

        let mut alpha = 1.0;
        let mut trial = vec![0.0; x.len()];
        for _ in 0..self.max_iter {
            for ((t, xi), di) in trial.iter_mut().zip(x).zip(d) {
                *t = xi + alpha * di;
            }
            let f_trial = objective.value(&trial);
            if f_trial.is_finite() && f_trial <= fx + self.c1 * alpha * slope {
                return Some((alpha, f_trial));
            }
            alpha *= self.rho;
        }
        None
    }
}
