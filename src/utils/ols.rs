//! Ordinary Least Squares (OLS) fit of a series against its time index.
//!
//! Fits `y = alpha + beta * t` with `t = 0, 1, ..., n-1` and an explicit
//! intercept. Sums are centred on the means to keep the normal equations
//! well conditioned for long series.

use crate::error::{DriftError, Result};
use serde::{Deserialize, Serialize};

/// Intercept and slope of a fitted linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Intercept: the fitted value at `t = 0`.
    pub alpha: f64,
    /// Slope per time step.
    pub beta: f64,
}

impl LinearFit {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Value of the fitted line at index `t`.
    pub fn at(&self, t: f64) -> f64 {
        self.alpha + self.beta * t
    }

    /// Fitted line over `t = 0..n`.
    pub fn fitted(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| self.at(i as f64)).collect()
    }

    /// Residuals `y - y_hat` of a series against the fitted line.
    pub fn residuals(&self, series: &[f64]) -> Vec<f64> {
        series
            .iter()
            .enumerate()
            .map(|(i, &y)| y - self.at(i as f64))
            .collect()
    }
}

/// Fit a linear trend to a series indexed `0..n`.
///
/// # Errors
/// * [`DriftError::InsufficientData`] for fewer than two observations.
/// * [`DriftError::NonFiniteValue`] for NaN or infinite observations.
pub fn fit_linear_trend(series: &[f64]) -> Result<LinearFit> {
    let n = series.len();
    if n < 2 {
        return Err(DriftError::InsufficientData { needed: 2, got: n });
    }
    if let Some((index, &value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DriftError::NonFiniteValue { index, value });
    }

    let nf = n as f64;
    let mean_t = (nf - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / nf;

    let (s_ty, s_tt) = series
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(s_ty, s_tt), (i, &y)| {
            let dt = i as f64 - mean_t;
            (s_ty + dt * (y - mean_y), s_tt + dt * dt)
        });

    let beta = s_ty / s_tt;
    let alpha = mean_y - beta * mean_t;

    Ok(LinearFit { alpha, beta })
}
