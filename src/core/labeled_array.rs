//! Dense numeric arrays with named dimensions and integer coordinate labels.
//!
//! Cells are addressed by selections: a list of `(dimension, label)` pairs.
//! Reading through a selection never mutates the array.

use crate::error::{DriftError, Result};

/// Coordinate label type (location, age group, sex and year ids).
pub type Label = i64;

/// A `(dimension, label)` pair used to address cells.
pub type Selection<'a> = (&'a str, Label);

#[derive(Debug, Clone, PartialEq)]
struct Axis {
    name: String,
    labels: Vec<Label>,
}

impl Axis {
    fn position(&self, label: Label) -> Result<usize> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .ok_or_else(|| DriftError::UnknownLabel {
                dim: self.name.clone(),
                label,
            })
    }
}

/// A numeric array whose axes are named dimensions.
///
/// Values are stored row-major: the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    axes: Vec<Axis>,
    strides: Vec<usize>,
    values: Vec<f64>,
}

/// Builder for constructing a [`LabeledArray`] one dimension at a time.
#[derive(Debug, Clone, Default)]
pub struct LabeledArrayBuilder {
    axes: Vec<(String, Vec<Label>)>,
    values: Option<Vec<f64>>,
    fill: f64,
}

impl LabeledArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dimension with its coordinate labels.
    pub fn dim(mut self, name: impl Into<String>, labels: Vec<Label>) -> Self {
        self.axes.push((name.into(), labels));
        self
    }

    /// Set row-major values.
    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = Some(values);
        self
    }

    /// Fill every cell with a constant when no values are given.
    pub fn fill(mut self, value: f64) -> Self {
        self.fill = value;
        self
    }

    pub fn build(self) -> Result<LabeledArray> {
        match self.values {
            Some(values) => LabeledArray::new(self.axes, values),
            None => LabeledArray::filled(self.axes, self.fill),
        }
    }
}

impl LabeledArray {
    /// Create an array from `(dimension, labels)` pairs and row-major values.
    pub fn new<S: Into<String>>(axes: Vec<(S, Vec<Label>)>, values: Vec<f64>) -> Result<Self> {
        let mut checked: Vec<Axis> = Vec::with_capacity(axes.len());
        for (name, labels) in axes {
            let name = name.into();
            if checked.iter().any(|a| a.name == name) {
                return Err(DriftError::DuplicateDimension(name));
            }
            for (i, &label) in labels.iter().enumerate() {
                if labels[..i].contains(&label) {
                    return Err(DriftError::DuplicateLabel { dim: name, label });
                }
            }
            checked.push(Axis { name, labels });
        }

        let expected: usize = checked.iter().map(|a| a.labels.len()).product();
        if values.len() != expected {
            return Err(DriftError::ShapeMismatch {
                expected,
                got: values.len(),
            });
        }

        let mut strides = vec![1; checked.len()];
        for i in (0..checked.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * checked[i + 1].labels.len();
        }

        Ok(Self {
            axes: checked,
            strides,
            values,
        })
    }

    /// Create an array with every cell set to `value`.
    pub fn filled<S: Into<String>>(axes: Vec<(S, Vec<Label>)>, value: f64) -> Result<Self> {
        let axes: Vec<(String, Vec<Label>)> =
            axes.into_iter().map(|(n, l)| (n.into(), l)).collect();
        let size = axes.iter().map(|(_, l)| l.len()).product();
        Self::new(axes, vec![value; size])
    }

    pub fn builder() -> LabeledArrayBuilder {
        LabeledArrayBuilder::new()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Axis lengths in dimension order.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.labels.len()).collect()
    }

    /// Dimension names in order.
    pub fn dims(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.axis_index(dim).is_some()
    }

    /// Position of a dimension in the axis order.
    pub fn axis_index(&self, dim: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == dim)
    }

    /// Coordinate labels of a dimension.
    pub fn coords(&self, dim: &str) -> Option<&[Label]> {
        self.axes
            .iter()
            .find(|a| a.name == dim)
            .map(|a| a.labels.as_slice())
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Read the cell addressed by a selection pinning every dimension.
    pub fn get(&self, selection: &[Selection<'_>]) -> Result<f64> {
        let offset = self.offset(selection, None)?;
        Ok(self.values[offset])
    }

    /// Overwrite the cell addressed by a selection pinning every dimension.
    pub fn set(&mut self, selection: &[Selection<'_>], value: f64) -> Result<()> {
        let offset = self.offset(selection, None)?;
        self.values[offset] = value;
        Ok(())
    }

    /// Extract the 1-D series along `along`, in that dimension's label order.
    ///
    /// `fixed` must pin every other dimension.
    pub fn series(&self, along: &str, fixed: &[Selection<'_>]) -> Result<Vec<f64>> {
        let axis = self.require_axis(along)?;
        let base = self.offset(fixed, Some(axis))?;
        let stride = self.strides[axis];
        Ok((0..self.axes[axis].labels.len())
            .map(|i| self.values[base + i * stride])
            .collect())
    }

    /// Write a 1-D series along `along` into the slice pinned by `fixed`.
    pub fn set_series(&mut self, along: &str, fixed: &[Selection<'_>], series: &[f64]) -> Result<()> {
        let axis = self.require_axis(along)?;
        let expected = self.axes[axis].labels.len();
        if series.len() != expected {
            return Err(DriftError::ShapeMismatch {
                expected,
                got: series.len(),
            });
        }
        let base = self.offset(fixed, Some(axis))?;
        let stride = self.strides[axis];
        for (i, &value) in series.iter().enumerate() {
            self.values[base + i * stride] = value;
        }
        Ok(())
    }

    /// New array with `dim` removed and every cell set to `value`.
    pub fn filled_without(&self, dim: &str, value: f64) -> Result<LabeledArray> {
        self.require_axis(dim)?;
        let axes: Vec<(String, Vec<Label>)> = self
            .axes
            .iter()
            .filter(|a| a.name != dim)
            .map(|a| (a.name.clone(), a.labels.clone()))
            .collect();
        LabeledArray::filled(axes, value)
    }

    /// New array with `dim` appended as the last axis and every cell set to `value`.
    pub fn broadcast(&self, dim: &str, labels: Vec<Label>, value: f64) -> Result<LabeledArray> {
        if self.has_dim(dim) {
            return Err(DriftError::DuplicateDimension(dim.to_string()));
        }
        let mut axes: Vec<(String, Vec<Label>)> = self
            .axes
            .iter()
            .map(|a| (a.name.clone(), a.labels.clone()))
            .collect();
        axes.push((dim.to_string(), labels));
        LabeledArray::filled(axes, value)
    }

    fn require_axis(&self, dim: &str) -> Result<usize> {
        self.axis_index(dim)
            .ok_or_else(|| DriftError::MissingDimension(dim.to_string()))
    }

    /// Flat offset of a selection; `free` is the one axis left unpinned.
    fn offset(&self, selection: &[Selection<'_>], free: Option<usize>) -> Result<usize> {
        let mut pinned = vec![false; self.axes.len()];
        let mut offset = 0;

        for &(dim, label) in selection {
            let axis = self.require_axis(dim)?;
            if Some(axis) == free {
                return Err(DriftError::IncompleteSelection(format!(
                    "dimension '{}' is both selected and iterated",
                    dim
                )));
            }
            if pinned[axis] {
                return Err(DriftError::IncompleteSelection(format!(
                    "dimension '{}' selected more than once",
                    dim
                )));
            }
            pinned[axis] = true;
            offset += self.axes[axis].position(label)? * self.strides[axis];
        }

        if let Some(axis) = (0..self.axes.len()).find(|&i| !pinned[i] && Some(i) != free) {
            return Err(DriftError::IncompleteSelection(format!(
                "no label selected for '{}'",
                self.axes[axis].name
            )));
        }

        Ok(offset)
    }
}
