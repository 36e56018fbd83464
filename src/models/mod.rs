//! Single-series drift models.

mod traits;

pub mod drift;

pub use drift::{attenuated_forecast, decayed_predictions, AttenuatedDrift};
pub use traits::Forecaster;
