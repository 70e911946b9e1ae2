use super::domain::{Dimension, DimensionValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Allowed values per dimension. Dimensions left out fall back to every observed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Dimension, Vec<DimensionValue>>",
    into = "BTreeMap<Dimension, Vec<DimensionValue>>"
)]
pub struct FilterSelection {
    allowed: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict `dimension` to `values`. An empty iterator selects nothing.
    pub fn with<I, V>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DimensionValue>,
    {
        self.restrict(dimension, values);
        self
    }

    pub fn only(dimension: Dimension, value: impl Into<DimensionValue>) -> Self {
        Self::all().with(dimension, [value])
    }

    pub fn restrict<I, V>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<DimensionValue>,
    {
        let values = values
            .into_iter()
            .map(|value| dimension.normalize(value.into()))
            .collect();
        self.allowed.insert(dimension, values);
    }

    /// Explicit allowed set, `None` when the dimension is unrestricted.
    pub fn allowed(&self, dimension: Dimension) -> Option<&BTreeSet<DimensionValue>> {
        self.allowed.get(&dimension)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl From<BTreeMap<Dimension, Vec<DimensionValue>>> for FilterSelection {
    fn from(value: BTreeMap<Dimension, Vec<DimensionValue>>) -> Self {
        let mut selection = Self::all();
        for (dimension, values) in value {
            selection.restrict(dimension, values);
        }
        selection
    }
}

impl From<FilterSelection> for BTreeMap<Dimension, Vec<DimensionValue>> {
    fn from(value: FilterSelection) -> Self {
        value
            .allowed
            .into_iter()
            .map(|(dimension, values)| (dimension, values.into_iter().collect()))
            .collect()
    }
}
