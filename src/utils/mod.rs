//! Numerical helpers shared by the drift models.

pub mod ols;

pub use ols::{fit_linear_trend, LinearFit};
