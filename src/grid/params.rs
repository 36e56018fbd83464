//! Per-combination drift parameters for a whole demographic grid.

use crate::core::{DemographicGrid, DemographicKey, LabeledArray, YearRange, YEAR_ID};
use crate::error::{DriftError, Result};
use crate::utils::{fit_linear_trend, LinearFit};
use tracing::{debug, trace};

/// Intercept and slope for every demographic combination.
///
/// `alpha` and `beta` carry the input's non-year dimensions in the input's
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftParams {
    grid: DemographicGrid,
    alpha: LabeledArray,
    beta: LabeledArray,
}

impl DriftParams {
    /// Intercepts keyed by demographic coordinates.
    pub fn alpha(&self) -> &LabeledArray {
        &self.alpha
    }

    /// Slopes keyed by demographic coordinates.
    pub fn beta(&self) -> &LabeledArray {
        &self.beta
    }

    pub fn grid(&self) -> &DemographicGrid {
        &self.grid
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Parameters of one combination, if it is in the grid.
    pub fn get(&self, key: &DemographicKey) -> Option<LinearFit> {
        let selection = key.selection();
        let alpha = self.alpha.get(&selection).ok()?;
        let beta = self.beta.get(&selection).ok()?;
        Some(LinearFit::new(alpha, beta))
    }

    /// Every combination with its parameters, in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (DemographicKey, LinearFit)> + '_ {
        self.grid
            .iter()
            .filter_map(move |key| self.get(&key).map(|fit| (key, fit)))
    }
}

/// Fit a linear trend to every demographic series of `da`.
///
/// Each series is fitted in ascending `year_id` order, whatever order the
/// array stores its year labels in, so the time index `t` always counts
/// years from the earliest. The input is only read.
pub fn fit_all_params(da: &LabeledArray) -> Result<DriftParams> {
    let grid = DemographicGrid::from_array(da)?;
    let mut alpha = da.filled_without(YEAR_ID, f64::NAN)?;
    let mut beta = alpha.clone();

    let year_labels = da
        .coords(YEAR_ID)
        .ok_or_else(|| DriftError::MissingDimension(YEAR_ID.to_string()))?;
    let mut order: Vec<usize> = (0..year_labels.len()).collect();
    order.sort_by_key(|&i| year_labels[i]);

    for key in grid.iter() {
        let selection = key.selection();
        let stored = da.series(YEAR_ID, &selection)?;
        let series: Vec<f64> = order.iter().map(|&i| stored[i]).collect();
        let fit = fit_linear_trend(&series).map_err(|e| e.for_key(key))?;
        trace!(%key, alpha = fit.alpha, beta = fit.beta, "fitted drift");
        alpha.set(&selection, fit.alpha)?;
        beta.set(&selection, fit.beta)?;
    }

    debug!(
        combinations = grid.len(),
        years = year_labels.len(),
        "fitted drift parameters"
    );

    Ok(DriftParams { grid, alpha, beta })
}

/// Fit drift parameters after checking `da` covers exactly the past years.
pub fn fit_drift_params(da: &LabeledArray, years: &YearRange) -> Result<DriftParams> {
    let observed = da
        .coords(YEAR_ID)
        .ok_or_else(|| DriftError::MissingDimension(YEAR_ID.to_string()))?;
    if observed != years.past_years() {
        return Err(DriftError::YearMismatch {
            expected: years.past_years().to_vec(),
            got: observed.to_vec(),
        });
    }
    fit_all_params(da)
}
