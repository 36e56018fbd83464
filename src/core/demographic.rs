//! Demographic keys and the lazy enumeration of every combination.

use crate::core::{Label, LabeledArray, Selection};
use crate::error::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

pub const LOCATION_ID: &str = "location_id";
pub const AGE_GROUP_ID: &str = "age_group_id";
pub const SEX_ID: &str = "sex_id";
pub const YEAR_ID: &str = "year_id";

/// Non-year dimensions every residual array is decomposed by.
pub const DEMOGRAPHIC_DIMS: [&str; 3] = [LOCATION_ID, AGE_GROUP_ID, SEX_ID];

/// One (location, age group, sex) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DemographicKey {
    pub location_id: Label,
    pub age_group_id: Label,
    pub sex_id: Label,
}

impl DemographicKey {
    pub fn new(location_id: Label, age_group_id: Label, sex_id: Label) -> Self {
        Self {
            location_id,
            age_group_id,
            sex_id,
        }
    }

    /// Selection pinning the three demographic dimensions.
    pub fn selection(&self) -> [Selection<'static>; 3] {
        [
            (LOCATION_ID, self.location_id),
            (AGE_GROUP_ID, self.age_group_id),
            (SEX_ID, self.sex_id),
        ]
    }

    /// Selection pinning the demographic dimensions and one year.
    pub fn selection_at(&self, year: Label) -> [Selection<'static>; 4] {
        let [location, age, sex] = self.selection();
        [location, age, sex, (YEAR_ID, year)]
    }
}

impl fmt::Display for DemographicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "location_id={}, age_group_id={}, sex_id={}",
            self.location_id, self.age_group_id, self.sex_id
        )
    }
}

/// The label sets of the demographic dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemographicGrid {
    locations: Vec<Label>,
    age_groups: Vec<Label>,
    sexes: Vec<Label>,
}

impl DemographicGrid {
    pub fn new(locations: Vec<Label>, age_groups: Vec<Label>, sexes: Vec<Label>) -> Self {
        Self {
            locations,
            age_groups,
            sexes,
        }
    }

    /// Read the grid from an array's coordinates.
    ///
    /// The array must carry all three demographic dimensions and nothing
    /// else besides `year_id`.
    pub fn from_array(da: &LabeledArray) -> Result<Self> {
        if let Some(extra) = da
            .dims()
            .find(|d| *d != YEAR_ID && !DEMOGRAPHIC_DIMS.contains(d))
        {
            return Err(DriftError::UnexpectedDimension(extra.to_string()));
        }
        let coords = |dim: &str| {
            da.coords(dim)
                .map(<[Label]>::to_vec)
                .ok_or_else(|| DriftError::MissingDimension(dim.to_string()))
        };
        Ok(Self {
            locations: coords(LOCATION_ID)?,
            age_groups: coords(AGE_GROUP_ID)?,
            sexes: coords(SEX_ID)?,
        })
    }

    pub fn locations(&self) -> &[Label] {
        &self.locations
    }

    pub fn age_groups(&self) -> &[Label] {
        &self.age_groups
    }

    pub fn sexes(&self) -> &[Label] {
        &self.sexes
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.locations.len() * self.age_groups.len() * self.sexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &DemographicKey) -> bool {
        self.locations.contains(&key.location_id)
            && self.age_groups.contains(&key.age_group_id)
            && self.sexes.contains(&key.sex_id)
    }

    /// Lazily enumerate every combination: sex outermost, location innermost.
    pub fn iter(&self) -> Combinations<'_> {
        Combinations {
            grid: self,
            next: 0,
            total: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a DemographicGrid {
    type Item = DemographicKey;
    type IntoIter = Combinations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the Cartesian product of a [`DemographicGrid`].
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    grid: &'a DemographicGrid,
    next: usize,
    total: usize,
}

impl Iterator for Combinations<'_> {
    type Item = DemographicKey;

    fn next(&mut self) -> Option<DemographicKey> {
        if self.next >= self.total {
            return None;
        }
        let n_loc = self.grid.locations.len();
        let n_age = self.grid.age_groups.len();
        let i = self.next;
        self.next += 1;

        Some(DemographicKey {
            location_id: self.grid.locations[i % n_loc],
            age_group_id: self.grid.age_groups[(i / n_loc) % n_age],
            sex_id: self.grid.sexes[i / (n_loc * n_age)],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}
