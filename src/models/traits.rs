//! Forecaster trait defining the common interface for single-series models.

use crate::error::Result;

/// Common interface for models fitted to one series.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the historical values.
    fn fit(&mut self, series: &[f64]) -> Result<()>;

    /// Generate predictions for the `horizon` steps after the fitted series.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
