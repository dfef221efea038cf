//! Binary logistic regression with an L2 penalty, fitted by damped Newton steps.
//!
//! Inputs are used at their raw magnitudes. Budget features in the thousands sit next
//! to 0/1 match flags, so the solver works on the exact curvature instead of a fixed
//! step size. The objective is `0.5 * ||w||^2 + C * sum(log_loss)`; the intercept is
//! not penalized.

use crate::domain::model::{FeatureVector, TrainingSample};
use crate::utils::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};

/// Coefficients followed by the intercept.
const DIM: usize = FeatureVector::LEN + 1;

/// Fitted parameters. This is what gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub coefficients: [f64; FeatureVector::LEN],
    pub intercept: f64,
}

impl LogisticParams {
    fn from_theta(theta: &[f64; DIM]) -> Self {
        let mut coefficients = [0.0; FeatureVector::LEN];
        coefficients.copy_from_slice(&theta[..FeatureVector::LEN]);
        Self {
            coefficients,
            intercept: theta[FeatureVector::LEN],
        }
    }

    fn logit(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }

    /// Probability of class 1.
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.logit(features))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

fn augment(features: &FeatureVector) -> [f64; DIM] {
    let mut x = [1.0; DIM];
    x[..FeatureVector::LEN].copy_from_slice(features.as_slice());
    x
}

fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: [[f64; DIM]; DIM], mut b: [f64; DIM]) -> Option<[f64; DIM]> {
    for col in 0..DIM {
        let pivot = (col..DIM).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col] == 0.0 || !a[pivot][col].is_finite() {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..DIM {
            let factor = a[row][col] / a[col][col];
            for k in col..DIM {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; DIM];
    for row in (0..DIM).rev() {
        let tail: f64 = (row + 1..DIM).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegression {
    /// Inverse penalty strength; larger values fit the data more closely.
    regularization: f64,
    max_iter: usize,
    tol: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub const DEFAULT_REGULARIZATION: f64 = 1.0;
    pub const DEFAULT_MAX_ITER: usize = 100;
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;

    const MAX_HALVINGS: usize = 50;

    pub fn new() -> Self {
        Self {
            regularization: Self::DEFAULT_REGULARIZATION,
            max_iter: Self::DEFAULT_MAX_ITER,
            tol: Self::DEFAULT_TOLERANCE,
        }
    }

    pub fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    fn objective(&self, theta: &[f64; DIM], rows: &[([f64; DIM], f64)]) -> f64 {
        let penalty: f64 = theta[..FeatureVector::LEN].iter().map(|w| w * w).sum::<f64>() / 2.0;
        let loss: f64 = rows
            .iter()
            .map(|(x, y)| {
                let z = dot(theta, x);
                softplus(z) - y * z
            })
            .sum();
        penalty + self.regularization * loss
    }

    pub fn fit(&self, samples: &[TrainingSample]) -> Result<LogisticParams> {
        if samples.is_empty() {
            return Err(ScoringError::missing_data("cannot fit a classifier on zero samples"));
        }

        let rows: Vec<([f64; DIM], f64)> = samples
            .iter()
            .map(|s| (augment(&s.features), f64::from(s.label)))
            .collect();
        let c = self.regularization;
        let mut theta = [0.0; DIM];
        let mut current = self.objective(&theta, &rows);

        for iteration in 0..self.max_iter {
            let mut grad = [0.0; DIM];
            let mut hess = [[0.0; DIM]; DIM];

            for (x, y) in &rows {
                let p = sigmoid(dot(&theta, x));
                let weight = c * p * (1.0 - p);
                for j in 0..DIM {
                    grad[j] += c * (p - y) * x[j];
                    for k in 0..DIM {
                        hess[j][k] += weight * x[j] * x[k];
                    }
                }
            }
            for j in 0..FeatureVector::LEN {
                grad[j] += theta[j];
                hess[j][j] += 1.0;
            }

            let Some(step) = solve(hess, grad.map(|g| -g)) else {
                tracing::warn!("⚠️ Singular curvature after {} iterations, keeping current fit", iteration);
                break;
            };

            // Newton decrement: g' H^-1 g.
            let decrement = -dot(&grad, &step);
            if decrement / 2.0 < self.tol {
                tracing::debug!("Newton solver converged after {} iterations", iteration);
                break;
            }

            let mut t = 1.0;
            let mut accepted = None;
            for _ in 0..Self::MAX_HALVINGS {
                let mut candidate = theta;
                for (value, delta) in candidate.iter_mut().zip(&step) {
                    *value += t * delta;
                }
                let value = self.objective(&candidate, &rows);
                if value <= current - 0.25 * t * decrement {
                    accepted = Some((candidate, value));
                    break;
                }
                t /= 2.0;
            }

            match accepted {
                Some((candidate, value)) => {
                    theta = candidate;
                    current = value;
                }
                None => {
                    tracing::debug!("Line search stalled after {} iterations", iteration);
                    break;
                }
            }
        }

        Ok(LogisticParams::from_theta(&theta))
    }
}
