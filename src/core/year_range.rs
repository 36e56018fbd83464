//! Past/forecast split of a contiguous run of years.

use crate::core::Label;
use crate::error::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most years a single range may hold.
pub const MAX_YEARS: usize = 10_000;

/// An immutable partition of contiguous years into past and forecast years.
///
/// Past years are used for fitting, forecast years for extrapolation. Past
/// years are never empty; forecast years may be.
///
/// Serializes as `"past_start:forecast_start:forecast_end"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearRange {
    years: Vec<Label>,
    n_past: usize,
}

impl YearRange {
    /// Create a year range from its boundaries.
    ///
    /// Past years are `past_start..forecast_start`, forecast years are
    /// `forecast_start..=forecast_end`. `forecast_end == forecast_start - 1`
    /// gives a range with no forecast years. At most [`MAX_YEARS`] years are
    /// allowed in total.
    pub fn new(past_start: Label, forecast_start: Label, forecast_end: Label) -> Result<Self> {
        if past_start >= forecast_start {
            return Err(DriftError::InvalidYearRange(format!(
                "past start {} must precede forecast start {}",
                past_start, forecast_start
            )));
        }
        // forecast_start > past_start, so this cannot underflow
        let past_end = forecast_start - 1;
        if forecast_end < past_end {
            return Err(DriftError::InvalidYearRange(format!(
                "forecast end {} precedes forecast start {}",
                forecast_end, forecast_start
            )));
        }

        let n_years = forecast_end
            .checked_sub(past_start)
            .and_then(|span| usize::try_from(span).ok())
            .and_then(|span| span.checked_add(1))
            .filter(|&n| n <= MAX_YEARS)
            .ok_or_else(|| too_many_years(past_start, forecast_end))?;
        let n_past = n_years - (forecast_end - past_end) as usize;

        Ok(Self {
            years: (past_start..=forecast_end).collect(),
            n_past,
        })
    }

    /// Create a year range from explicit year lists.
    pub fn from_years(past_years: Vec<Label>, forecast_years: Vec<Label>) -> Result<Self> {
        if past_years.is_empty() {
            return Err(DriftError::InvalidYearRange(
                "past years must not be empty".to_string(),
            ));
        }
        let n_past = past_years.len();
        let mut years = past_years;
        years.extend(forecast_years);

        if years.len() > MAX_YEARS {
            return Err(too_many_years(years[0], years[years.len() - 1]));
        }
        if years[n_past - 1] == Label::MAX {
            return Err(DriftError::InvalidYearRange(format!(
                "last past year {} leaves no room for a forecast start",
                Label::MAX
            )));
        }
        if let Some(w) = years.windows(2).find(|w| w[0].checked_add(1) != Some(w[1])) {
            return Err(DriftError::InvalidYearRange(format!(
                "years must be contiguous and increasing, found {} followed by {}",
                w[0], w[1]
            )));
        }

        Ok(Self { years, n_past })
    }

    /// Historical years used for fitting.
    pub fn past_years(&self) -> &[Label] {
        &self.years[..self.n_past]
    }

    /// Future years to extrapolate over.
    pub fn forecast_years(&self) -> &[Label] {
        &self.years[self.n_past..]
    }

    /// Past years followed by forecast years.
    pub fn years(&self) -> &[Label] {
        &self.years
    }

    pub fn past_start(&self) -> Label {
        self.years[0]
    }

    pub fn past_end(&self) -> Label {
        self.years[self.n_past - 1]
    }

    pub fn forecast_start(&self) -> Label {
        self.past_end() + 1
    }

    pub fn forecast_end(&self) -> Label {
        self.years[self.years.len() - 1]
    }
}

fn too_many_years(first: Label, last: Label) -> DriftError {
    DriftError::InvalidYearRange(format!(
        "{}..={} spans more than {} years",
        first, last, MAX_YEARS
    ))
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.past_start(),
            self.forecast_start(),
            self.forecast_end()
        )
    }
}

impl FromStr for YearRange {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(DriftError::InvalidYearRange(format!(
                "expected 'past_start:forecast_start:forecast_end', got '{}'",
                s
            )));
        }
        let mut bounds: [Label; 3] = [0; 3];
        for (bound, part) in bounds.iter_mut().zip(&parts) {
            *bound = part.parse::<Label>().map_err(|_| {
                DriftError::InvalidYearRange(format!("'{}' is not a year", part))
            })?;
        }
        Self::new(bounds[0], bounds[1], bounds[2])
    }
}

impl TryFrom<String> for YearRange {
    type Error = DriftError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<YearRange> for String {
    fn from(years: YearRange) -> Self {
        years.to_string()
    }
}
