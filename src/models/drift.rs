//! Attenuated drift model.
//!
//! In-sample values follow the fitted line. Out of sample the slope decays
//! exponentially and compounds on the previous value:
//!
//! y\[P+j\] = y\[P+j-1\] + beta * exp(-decay * j),  j = 0, 1, ...
//!
//! where y\[P-1\] is the last fitted value. With `decay = 0` the forecast
//! continues the fitted line exactly.

use crate::config::validate_decay;
use crate::error::{DriftError, Result};
use crate::models::Forecaster;
use crate::utils::{fit_linear_trend, LinearFit};

/// Forecast values for the `horizon` years after `n_past` fitted years.
///
/// A negative `decay` grows the increment every year instead of shrinking
/// it; callers are responsible for passing a non-negative rate.
pub fn attenuated_forecast(fit: &LinearFit, n_past: usize, horizon: usize, decay: f64) -> Vec<f64> {
    let mut last = fit.at(n_past as f64 - 1.0);
    (0..horizon)
        .map(|j| {
            let current = last + fit.beta * (-decay * j as f64).exp();
            last = current;
            current
        })
        .collect()
}

/// Fitted line over `n_past` years followed by `n_forecast` attenuated years.
pub fn decayed_predictions(
    fit: &LinearFit,
    n_past: usize,
    n_forecast: usize,
    decay: f64,
) -> Vec<f64> {
    let mut predictions = fit.fitted(n_past);
    predictions.extend(attenuated_forecast(fit, n_past, n_forecast, decay));
    predictions
}

/// Single-series attenuated drift forecaster.
#[derive(Debug, Clone, Default)]
pub struct AttenuatedDrift {
    decay: f64,
    params: Option<LinearFit>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl AttenuatedDrift {
    /// Create a model with the given slope decay rate.
    ///
    /// `decay` must be finite. A negative rate is accepted and grows the
    /// forecast increments every step.
    pub fn new(decay: f64) -> Result<Self> {
        validate_decay(decay)?;
        Ok(Self {
            decay,
            ..Default::default()
        })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Get the fitted intercept and slope.
    pub fn params(&self) -> Option<LinearFit> {
        self.params
    }
}

impl Forecaster for AttenuatedDrift {
    fn fit(&mut self, series: &[f64]) -> Result<()> {
        let params = fit_linear_trend(series)?;
        self.fitted = Some(params.fitted(series.len()));
        self.residuals = Some(params.residuals(series));
        self.params = Some(params);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let params = self.params.ok_or(DriftError::FitRequired)?;
        let n_past = self.fitted.as_ref().ok_or(DriftError::FitRequired)?.len();
        Ok(attenuated_forecast(&params, n_past, horizon, self.decay))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "AttenuatedDrift"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn halving_decay_matches_worked_example() {
        let fit = LinearFit::new(1.0, 1.0);
        let preds = decayed_predictions(&fit, 3, 2, std::f64::consts::LN_2);

        let expected = [1.0, 2.0, 3.0, 4.0, 4.5];
        assert_eq!(preds.len(), expected.len());
        for (p, e) in preds.iter().zip(expected.iter()) {
            assert_relative_eq!(*p, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_decay_continues_the_line() {
        let fit = LinearFit::new(-0.3, 0.25);
        let preds = decayed_predictions(&fit, 5, 10, 0.0);

        for (i, p) in preds.iter().enumerate() {
            assert_relative_eq!(*p, fit.at(i as f64), epsilon = 1e-12);
        }
    }

    #[test]
    fn past_years_are_the_fit_line() {
        let fit = LinearFit::new(0.7, -0.2);
        let preds = decayed_predictions(&fit, 4, 3, 0.5);
        assert_eq!(&preds[..4], fit.fitted(4).as_slice());
    }

    #[test]
    fn increments_shrink_with_positive_decay() {
        let fit = LinearFit::new(0.0, 2.0);
        let preds = decayed_predictions(&fit, 3, 8, 0.3);

        let increments: Vec<f64> = preds[2..].windows(2).map(|w| w[1] - w[0]).collect();
        assert_relative_eq!(increments[0], 2.0, epsilon = 1e-12);
        assert!(increments.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn negative_decay_grows_increments() {
        let fit = LinearFit::new(0.0, 1.0);
        let preds = decayed_predictions(&fit, 2, 5, -0.1);

        let increments: Vec<f64> = preds[1..].windows(2).map(|w| w[1] - w[0]).collect();
        assert_relative_eq!(increments[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(increments[1], 0.1_f64.exp(), epsilon = 1e-12);
        assert!(increments.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn model_rejects_non_finite_decay() {
        assert!(matches!(
            AttenuatedDrift::new(f64::NAN),
            Err(DriftError::InvalidParameter(_))
        ));
        assert!(AttenuatedDrift::new(f64::INFINITY).is_err());
        assert_eq!(AttenuatedDrift::new(-0.5).unwrap().decay(), -0.5);
    }

    #[test]
    fn no_forecast_years_returns_fit_only() {
        let fit = LinearFit::new(1.0, 1.0);
        assert_eq!(decayed_predictions(&fit, 3, 0, 0.1), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn model_fits_and_extends_series() {
        let mut model = AttenuatedDrift::new(std::f64::consts::LN_2).unwrap();
        assert!(!model.is_fitted());
        assert_eq!(model.predict(2), Err(DriftError::FitRequired));

        model.fit(&[1.0, 2.0, 3.0]).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.name(), "AttenuatedDrift");

        let fitted = model.fitted_values().unwrap();
        assert_relative_eq!(fitted[2], 3.0, epsilon = 1e-12);
        assert!(model.residuals().unwrap().iter().all(|r| r.abs() < 1e-12));

        let forecast = model.predict(2).unwrap();
        assert_relative_eq!(forecast[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(forecast[1], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn model_rejects_short_series() {
        let mut model = AttenuatedDrift::new(0.1).unwrap();
        assert!(model.fit(&[1.0]).is_err());
        assert!(!model.is_fitted());
    }
}
