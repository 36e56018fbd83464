//! # decayed-drift
//!
//! Drift removal and attenuated-drift forecasting for demographic residual
//! time series.
//!
//! Residuals (epsilons) indexed by location, age group, sex and year get a
//! linear trend fitted per demographic combination over the past years. The
//! trend is then extrapolated into forecast years with a slope that decays
//! exponentially, so forecasts level off instead of growing without bound.
//!
//! ```
//! use decayed_drift::prelude::*;
//!
//! let eps = LabeledArray::builder()
//!     .dim("location_id", vec![6])
//!     .dim("age_group_id", vec![22])
//!     .dim("sex_id", vec![1, 2])
//!     .dim("year_id", vec![2000, 2001, 2002])
//!     .values(vec![1.0, 2.0, 3.0, 0.5, 0.4, 0.3])
//!     .build()?;
//! let years: YearRange = "2000:2003:2010".parse()?;
//!
//! let preds = DecayedDrift::new(years, 0.1)?.predict(&eps)?;
//! assert_eq!(preds.shape(), vec![1, 1, 2, 11]);
//! # Ok::<(), DriftError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod models;
pub mod utils;

pub use error::{DriftError, Result};

pub mod prelude {
    pub use crate::config::DriftConfig;
    pub use crate::core::{DemographicGrid, DemographicKey, LabeledArray, YearRange};
    pub use crate::error::{DriftError, Result};
    pub use crate::grid::{decayed_drift_predictions, fit_all_params, DecayedDrift, DriftParams};
    pub use crate::models::{AttenuatedDrift, Forecaster};
    pub use crate::utils::{fit_linear_trend, LinearFit};
}
