//! Configuration for the decayed-drift forecaster.

use crate::core::YearRange;
use crate::error::{DriftError, Result};
use serde::{Deserialize, Serialize};

/// Settings for [`DecayedDrift`](crate::grid::DecayedDrift).
///
/// ```
/// use decayed_drift::config::DriftConfig;
///
/// let config: DriftConfig =
///     serde_json::from_str(r#"{"years": "1990:2017:2040", "decay": 0.1}"#).unwrap();
/// assert_eq!(config.years.forecast_start(), 2017);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Years to fit and forecast over.
    pub years: YearRange,
    /// Rate at which the slope decays once forecasts start.
    #[serde(default)]
    pub decay: f64,
}

impl DriftConfig {
    /// Create a configuration with no slope attenuation.
    pub fn new(years: YearRange) -> Self {
        Self { years, decay: 0.0 }
    }

    /// Set the slope decay rate.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Check the decay rate is usable.
    ///
    /// Negative rates pass: they give divergent forecasts but are well defined.
    pub fn validate(&self) -> Result<()> {
        validate_decay(self.decay)
    }
}

/// Reject decay rates that would turn every forecast into NaN or infinity.
pub(crate) fn validate_decay(decay: f64) -> Result<()> {
    if !decay.is_finite() {
        return Err(DriftError::InvalidParameter(format!(
            "decay must be finite, got {}",
            decay
        )));
    }
    Ok(())
}
