//! Broyden–Fletcher–Goldfarb–Shanno (BFGS) minimizer.
//!
//! Keeps a dense n×n inverse-Hessian estimate. The fit only ever has
//! four free parameters, so the dense form is cheaper than a
//! limited-memory history.

use serde::{Deserialize, Serialize};

use super::line_search::BacktrackingLineSearch;
use super::{dot, inf_norm, ConvergenceStatus, Minimum, Objective};

/// Minimum curvature `yᵀs` for an inverse-Hessian update to be applied.
const MIN_CURVATURE: f64 = 1e-12;

/// Stopping criteria for [`Bfgs`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfgsOptions {
    /// Stop when the infinity norm of the gradient drops below this.
    pub gtol: f64,
    /// Iteration limit. `None` means `200 * n`.
    pub max_iter: Option<usize>,
}

impl Default for BfgsOptions {
    fn default() -> Self {
        Self {
            gtol: 1e-5,
            max_iter: None,
        }
    }
}

/// BFGS quasi-Newton minimizer.
///
/// # Algorithm
///
/// 1. d = -H·∇f(x)
/// 2. Backtracking line search for α along d
/// 3. s = α·d, y = ∇f(x + s) - ∇f(x)
/// 4. H ← (I - ρ s yᵀ) H (I - ρ y sᵀ) + ρ s sᵀ, with ρ = 1 / yᵀs
#[derive(Debug, Clone, Default)]
pub struct Bfgs {
    options: BfgsOptions,
    line_search: BacktrackingLineSearch,
}

impl Bfgs {
    pub fn new(options: BfgsOptions) -> Self {
        Self {
            options,
            line_search: BacktrackingLineSearch::default(),
        }
    }

    /// Minimize `objective` starting at `x0`.
    ///
    /// Never fails: when the run does not converge, the best point
    /// reached so far is returned along with the reason it stopped.
    pub fn minimize<O: Objective + ?Sized>(&self, objective: &O, x0: &[f64]) -> Minimum {
        let n = x0.len();
        let max_iter = self.options.max_iter.unwrap_or(200 * n);

        let mut x = x0.to_vec();
        let mut fx = objective.value(&x);
        let mut grad = vec![0.0; n];
        objective.gradient(&x, &mut grad);

        if !fx.is_finite() {
            return Minimum {
                x,
                value: fx,
                iterations: 0,
                status: ConvergenceStatus::NumericalError,
            };
        }

        let mut h = identity(n);
        let mut d = vec![0.0; n];
        let mut grad_new = vec![0.0; n];

        for iter in 0..max_iter {
            if inf_norm(&grad) <= self.options.gtol {
                return Minimum {
                    x,
                    value: fx,
                    iterations: iter,
                    status: ConvergenceStatus::Converged,
                };
            }

            mat_vec(&h, &grad, &mut d);
            d.iter_mut().for_each(|v| *v = -*v);
            if dot(&grad, &d) >= 0.0 {
                // Estimate lost positive definiteness: restart from steepest descent.
                h = identity(n);
                d.iter_mut().zip(&grad).for_each(|(di, gi)| *di = -gi);
            }

            let Some((alpha, f_new)) = self.line_search.search(objective, &x, fx, &grad, &d) else {
                return Minimum {
                    x,
                    value: fx,
                    iterations: iter,
                    status: ConvergenceStatus::Stalled,
                };
            };

            let s: Vec<f64> = d.iter().map(|di| alpha * di).collect();
            let x_new: Vec<f64> = x.iter().zip(&s).map(|(xi, si)| xi + si).collect();
            objective.gradient(&x_new, &mut grad_new);

            if grad_new.iter().any(|g| !g.is_finite()) {
                return Minimum {
                    x,
                    value: fx,
                    iterations: iter,
                    status: ConvergenceStatus::NumericalError,
                };
            }

            let y: Vec<f64> = grad_new.iter().zip(&grad).map(|(a, b)| a - b).collect();
            let ys = dot(&y, &s);
            if ys > MIN_CURVATURE {
                update_inverse_hessian(&mut h, &s, &y, ys);
            }

            x = x_new;
            fx = f_new;
            grad.copy_from_slice(&grad_new);
        }

        let status = if inf_norm(&grad) <= self.options.gtol {
            ConvergenceStatus::Converged
        } else {
            ConvergenceStatus::MaxIterations
        };
        Minimum {
            x,
            value: fx,
            iterations: max_iter,
            status,
        }
    }
}

fn identity(n: usize) -> Vec<f64> {
    let mut m = vec![0.0; n * n];
    for i in 0..n {
        m[i * n + i] = 1.0;
    }
    m
}

fn mat_vec(m: &[f64], v: &[f64], out: &mut [f64]) {
    let n = v.len();
    for (i, o) in out.iter_mut().enumerate() {
        *o = dot(&m[i * n..(i + 1) * n], v);
    }
}

/// Rank-two update, expanded for a symmetric `h`:
/// H += ρ(1 + ρ yᵀHy) s sᵀ - ρ (Hy sᵀ + s (Hy)ᵀ)
fn update_inverse_hessian(h: &mut [f64], s: &[f64], y: &[f64], ys: f64) {
    let n = s.len();
    let rho = 1.0 / ys;
    let mut hy = vec![0.0; n];
    mat_vec(h, y, &mut hy);
    let yhy = dot(y, &hy);
    let coeff = rho * (1.0 + rho * yhy);
    for i in 0..n {
        for j in 0..n {
            h[i * n + j] += coeff * s[i] * s[j] - rho * (hy[i] * s[j] + s[i] * hy[j]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// f(x) = Σ wᵢ (xᵢ - cᵢ)²
    struct Bowl {
        center: Vec<f64>,
        weights: Vec<f64>,
    }

    impl Objective for Bowl {
        fn value(&self, x: &[f64]) -> f64 {
            x.iter()
                .zip(&self.center)
                .zip(&self.weights)
                .map(|((xi, ci), wi)| wi * (xi - ci).powi(2))
                .sum()
        }
        fn gradient(&self, x: &[f64], grad: &mut [f64]) {
            for i in 0..x.len() {
                grad[i] = 2.0 * self.weights[i] * (x[i] - self.center[i]);
            }
        }
    }

    struct Rosenbrock;

    impl Objective for Rosenbrock {
        fn value(&self, x: &[f64]) -> f64 {
            (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
        }
        fn gradient(&self, x: &[f64], grad: &mut [f64]) {
            grad[0] = -2.0 * (1.0 - x[0]) - 400.0 * x[0] * (x[1] - x[0] * x[0]);
            grad[1] = 200.0 * (x[1] - x[0] * x[0]);
        }
    }

    #[test]
    fn minimizes_badly_scaled_quadratic() {
        let bowl = Bowl {
            center: vec![3.0, -2.0, 0.5, 10.0],
            weights: vec![1.0, 40.0, 0.2, 7.0],
        };
        let result = Bfgs::default().minimize(&bowl, &[0.0; 4]);
        assert!(result.converged(), "status: {:?}", result.status);
        for (xi, ci) in result.x.iter().zip(&bowl.center) {
            assert!((xi - ci).abs() < 1e-4, "got {:?}", result.x);
        }
    }

    #[test]
    fn minimizes_rosenbrock() {
        let result = Bfgs::default().minimize(&Rosenbrock, &[-1.2, 1.0]);
        assert!(result.converged(), "status: {:?}", result.status);
        assert!((result.x[0] - 1.0).abs() < 1e-3, "got {:?}", result.x);
        assert!((result.x[1] - 1.0).abs() < 1e-3, "got {:?}", result.x);
    }

    #[test]
    fn starting_at_minimum_takes_no_steps() {
        let bowl = Bowl {
            center: vec![1.0, 2.0],
            weights: vec![1.0, 1.0],
        };
        let result = Bfgs::default().minimize(&bowl, &[1.0, 2.0]);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.x, vec![1.0, 2.0]);
    }

    #[test]
    fn iteration_limit_returns_best_estimate() {
        let options = BfgsOptions {
            gtol: 1e-5,
            max_iter: Some(1),
        };
        let result = Bfgs::new(options).minimize(&Rosenbrock, &[-1.2, 1.0]);
        assert_eq!(result.status, ConvergenceStatus::MaxIterations);
        assert!(result.value < Rosenbrock.value(&[-1.2, 1.0]));
    }
}
