//! Fitting and forecasting across every demographic combination.

pub mod forecast;
pub mod params;

pub use forecast::{decayed_drift_predictions, remove_drift, DecayedDrift};
pub use params::{fit_all_params, fit_drift_params, DriftParams};
