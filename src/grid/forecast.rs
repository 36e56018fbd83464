//! Attenuated-drift predictions for every demographic combination.

use crate::config::{validate_decay, DriftConfig};
use crate::core::{DemographicGrid, LabeledArray, YearRange, YEAR_ID};
use crate::error::{DriftError, Result};
use crate::grid::params::{fit_drift_params, DriftParams};
use crate::models::decayed_predictions;
use tracing::{debug, warn};

/// Decayed-drift forecaster over a labeled residual array.
///
/// Past years get the fitted line; forecast years get the slope attenuated
/// by `exp(-decay * j)` and accumulated year over year.
///
/// # Example
///
/// ```
/// use decayed_drift::core::{LabeledArray, YearRange};
/// use decayed_drift::grid::DecayedDrift;
///
/// let eps = LabeledArray::builder()
///     .dim("location_id", vec![6])
///     .dim("age_group_id", vec![22])
///     .dim("sex_id", vec![1])
///     .dim("year_id", vec![2000, 2001, 2002])
///     .values(vec![1.0, 2.0, 3.0])
///     .build()
///     .unwrap();
/// let years = YearRange::new(2000, 2003, 2004).unwrap();
///
/// let preds = DecayedDrift::new(years, std::f64::consts::LN_2)
///     .unwrap()
///     .predict(&eps)
///     .unwrap();
/// assert!((preds.values()[4] - 4.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedDrift {
    years: YearRange,
    decay: f64,
}

impl DecayedDrift {
    /// Create a forecaster.
    ///
    /// `decay` must be finite. Negative values are accepted and produce
    /// increments that grow every forecast year; keeping the rate
    /// non-negative is the caller's responsibility.
    pub fn new(years: YearRange, decay: f64) -> Result<Self> {
        validate_decay(decay)?;
        if decay < 0.0 {
            warn!(decay, "negative decay rate, forecast increments will grow");
        }
        Ok(Self { years, decay })
    }

    pub fn from_config(config: &DriftConfig) -> Result<Self> {
        Self::new(config.years.clone(), config.decay)
    }

    pub fn years(&self) -> &YearRange {
        &self.years
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Fit intercept and slope for every combination over the past years.
    pub fn fit(&self, eps: &LabeledArray) -> Result<DriftParams> {
        fit_drift_params(eps, &self.years)
    }

    /// Fit `eps` and predict every combination over all years.
    pub fn predict(&self, eps: &LabeledArray) -> Result<LabeledArray> {
        let params = self.fit(eps)?;
        self.predict_from_params(&params)
    }

    /// Predict from already fitted parameters.
    ///
    /// The output has the parameters' dimensions followed by `year_id`
    /// spanning past and forecast years.
    pub fn predict_from_params(&self, params: &DriftParams) -> Result<LabeledArray> {
        let n_past = self.years.past_years().len();
        let n_forecast = self.years.forecast_years().len();

        let mut predictions = params
            .alpha()
            .broadcast(YEAR_ID, self.years.years().to_vec(), f64::NAN)?;

        for (key, fit) in params.iter() {
            let sequence = decayed_predictions(&fit, n_past, n_forecast, self.decay);
            predictions.set_series(YEAR_ID, &key.selection(), &sequence)?;
        }

        debug!(
            combinations = params.len(),
            past_years = n_past,
            forecast_years = n_forecast,
            decay = self.decay,
            "generated decayed drift predictions"
        );

        Ok(predictions)
    }

    /// Residuals with their fitted drift removed over the past years.
    pub fn remove_drift(&self, eps: &LabeledArray) -> Result<LabeledArray> {
        let predictions = self.predict(eps)?;
        remove_drift(eps, &predictions)
    }
}

/// Predictions for every combination of `eps` over all of `years`.
pub fn decayed_drift_predictions(
    eps: &LabeledArray,
    years: &YearRange,
    decay: f64,
) -> Result<LabeledArray> {
    DecayedDrift::new(years.clone(), decay)?.predict(eps)
}

/// Subtract `predictions` from `eps` at every year `eps` carries.
///
/// `predictions` must cover the same combinations and at least the years of
/// `eps`; its extra forecast years are ignored.
pub fn remove_drift(eps: &LabeledArray, predictions: &LabeledArray) -> Result<LabeledArray> {
    let grid = DemographicGrid::from_array(eps)?;
    let years = eps
        .coords(YEAR_ID)
        .ok_or_else(|| DriftError::MissingDimension(YEAR_ID.to_string()))?;

    let mut detrended = eps.clone();
    for key in grid.iter() {
        for &year in years {
            let selection = key.selection_at(year);
            let value = eps.get(&selection)? - predictions.get(&selection)?;
            detrended.set(&selection, value)?;
        }
    }
    Ok(detrended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DemographicKey, AGE_GROUP_ID, LOCATION_ID, SEX_ID};
    use approx::assert_relative_eq;
    use std::f64::consts::LN_2;

    fn single_series(values: Vec<f64>) -> LabeledArray {
        let years = (2000..2000 + values.len() as i64).collect();
        LabeledArray::builder()
            .dim(LOCATION_ID, vec![6])
            .dim(AGE_GROUP_ID, vec![22])
            .dim(SEX_ID, vec![1])
            .dim(YEAR_ID, years)
            .values(values)
            .build()
            .unwrap()
    }

    #[test]
    fn worked_example_halves_each_forecast_step() {
        let eps = single_series(vec![1.0, 2.0, 3.0]);
        let years = YearRange::from_years(vec![2000, 2001, 2002], vec![2003, 2004]).unwrap();

        let preds = decayed_drift_predictions(&eps, &years, LN_2).unwrap();
        assert_eq!(preds.coords(YEAR_ID).unwrap(), &[2000, 2001, 2002, 2003, 2004]);

        let series = preds
            .series(YEAR_ID, &DemographicKey::new(6, 22, 1).selection())
            .unwrap();
        for (p, e) in series.iter().zip([1.0, 2.0, 3.0, 4.0, 4.5].iter()) {
            assert_relative_eq!(*p, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn output_keeps_non_year_dims_then_years() {
        let eps = LabeledArray::builder()
            .dim(YEAR_ID, vec![2000, 2001])
            .dim(SEX_ID, vec![1, 2])
            .dim(AGE_GROUP_ID, vec![22, 23, 24])
            .dim(LOCATION_ID, vec![6])
            .values((0..12).map(f64::from).collect())
            .build()
            .unwrap();
        let years = YearRange::new(2000, 2002, 2005).unwrap();

        let preds = decayed_drift_predictions(&eps, &years, 0.1).unwrap();
        assert_eq!(
            preds.dims().collect::<Vec<_>>(),
            vec![SEX_ID, AGE_GROUP_ID, LOCATION_ID, YEAR_ID]
        );
        assert_eq!(preds.shape(), vec![2, 3, 1, 6]);
        assert!(preds.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_grid_predicts_nothing() {
        let eps = LabeledArray::builder()
            .dim(LOCATION_ID, vec![6])
            .dim(AGE_GROUP_ID, vec![])
            .dim(SEX_ID, vec![1])
            .dim(YEAR_ID, vec![2000, 2001])
            .build()
            .unwrap();
        let years = YearRange::new(2000, 2002, 2010).unwrap();

        let preds = decayed_drift_predictions(&eps, &years, 0.1).unwrap();
        assert!(preds.is_empty());
        assert_eq!(preds.coords(YEAR_ID).unwrap().len(), 11);
    }

    #[test]
    fn removing_drift_leaves_mean_zero_residuals() {
        let eps = single_series(vec![0.3, 0.1, 0.6, 0.4, 0.9]);
        let years = YearRange::new(2000, 2005, 2010).unwrap();
        let model = DecayedDrift::new(years, 0.2).unwrap();

        let detrended = model.remove_drift(&eps).unwrap();
        assert_eq!(detrended.shape(), eps.shape());
        let sum: f64 = detrended.values().iter().sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-12);

        // exact line has nothing left after removal
        let line = single_series(vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        let residual = model.remove_drift(&line).unwrap();
        assert!(residual.values().iter().all(|r| r.abs() < 1e-12));
    }

    #[test]
    fn non_finite_decay_is_rejected() {
        let years = YearRange::new(2000, 2003, 2004).unwrap();
        assert!(matches!(
            DecayedDrift::new(years.clone(), f64::NAN),
            Err(DriftError::InvalidParameter(_))
        ));
        assert!(DecayedDrift::new(years, -0.5).is_ok());
    }

    #[test]
    fn negative_decay_grows_forecast_increments() {
        let eps = single_series(vec![1.0, 2.0, 3.0]);
        let years = YearRange::new(2000, 2003, 2008).unwrap();
        let preds = decayed_drift_predictions(&eps, &years, -0.2).unwrap();

        let increments: Vec<f64> = preds.values()[2..].windows(2).map(|w| w[1] - w[0]).collect();
        assert_relative_eq!(increments[0], 1.0, epsilon = 1e-12);
        assert!(increments.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn config_with_non_finite_decay_is_rejected() {
        let config =
            DriftConfig::new(YearRange::new(2000, 2003, 2004).unwrap()).with_decay(f64::INFINITY);
        assert!(matches!(
            DecayedDrift::from_config(&config),
            Err(DriftError::InvalidParameter(_))
        ));
    }

    #[test]
    fn builds_from_config() {
        let config = DriftConfig::new(YearRange::new(2000, 2003, 2004).unwrap()).with_decay(LN_2);
        let model = DecayedDrift::from_config(&config).unwrap();
        assert_eq!(model.decay(), LN_2);
        assert_eq!(model.years().forecast_years(), &[2003, 2004]);
    }

    #[test]
    fn mismatched_years_fail_before_fitting() {
        let eps = single_series(vec![1.0, 2.0, 3.0]);
        let years = YearRange::new(2000, 2004, 2006).unwrap();
        assert!(matches!(
            decayed_drift_predictions(&eps, &years, 0.1),
            Err(DriftError::YearMismatch { .. })
        ));
    }
}
