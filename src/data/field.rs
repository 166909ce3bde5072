//! Field buckets: named arrays attached to points, cells or the whole grid.

use std::collections::BTreeMap;

use crate::data::array::DataArray;

/// Role an active array plays in its bucket.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ActiveRole {
    Scalars,
    Vectors,
    Tensors,
    GlobalIds,
}

/// Ordered collection of named arrays.
///
/// Adding an array whose name is already present replaces it in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldData {
    arrays: Vec<DataArray>,
    active: BTreeMap<ActiveRole, String>,
}

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_array(&mut self, array: DataArray) {
        match self.arrays.iter_mut().find(|a| a.name == array.name) {
            Some(slot) => *slot = array,
            None => self.arrays.push(array),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DataArray> {
        self.arrays.iter_mut().find(|a| a.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let idx = self.arrays.iter().position(|a| a.name == name)?;
        self.active.retain(|_, n| n != name);
        Some(self.arrays.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataArray> {
        self.arrays.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name.as_str())
    }

    /// Mark `name` as the active array for `role`.
    pub fn set_active(&mut self, role: ActiveRole, name: impl Into<String>) {
        self.active.insert(role, name.into());
    }

    /// Active array for `role`, if one is set and still present.
    pub fn active(&self, role: ActiveRole) -> Option<&DataArray> {
        self.active.get(&role).and_then(|name| self.get(name))
    }

    /// Build a bucket holding the selected tuples of every array.
    ///
    /// Arrays too short for the selection are left out.
    pub fn gather_tuples(&self, tuples: &[usize]) -> FieldData {
        let arrays: Vec<DataArray> = self
            .arrays
            .iter()
            .filter_map(|a| a.gather_tuples(tuples))
            .collect();
        let mut active = self.active.clone();
        active.retain(|_, name| arrays.iter().any(|a| &a.name == name));
        FieldData { arrays, active }
    }
}
