//! Core data structures: labeled arrays, year ranges and demographic keys.

mod demographic;
mod labeled_array;
mod year_range;

pub use demographic::{
    Combinations, DemographicGrid, DemographicKey, AGE_GROUP_ID, DEMOGRAPHIC_DIMS, LOCATION_ID,
    SEX_ID, YEAR_ID,
};
pub use labeled_array::{Label, LabeledArray, LabeledArrayBuilder, Selection};
pub use year_range::{YearRange, MAX_YEARS};
