//! Append-only history of data model revisions.
//!
//! Iterative refinement produces a new [`DataModel`] snapshot per step. Versions
//! are numbered from 1 in insertion order; negative versions count back from
//! the newest snapshot (`-1` is the current model). Version `0` never exists.

use super::data_model::DataModel;
use super::errors::DataModelError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelHistory {
    snapshots: Vec<DataModel>,
}

impl ModelHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot and return its version number.
    pub fn push(&mut self, model: DataModel) -> usize {
        self.snapshots.push(model);
        self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current(&self) -> Result<&DataModel, DataModelError> {
        self.snapshots.last().ok_or(DataModelError::EmptyHistory)
    }

    pub fn get(&self, version: isize) -> Result<&DataModel, DataModelError> {
        let len = self.snapshots.len();
        let out_of_range = DataModelError::VersionOutOfRange { version, len };

        let index = match version {
            0 => return Err(out_of_range),
            v if v > 0 => v.unsigned_abs() - 1,
            v => match len.checked_sub(v.unsigned_abs()) {
                Some(index) => index,
                None => return Err(out_of_range),
            },
        };

        self.snapshots.get(index).ok_or(out_of_range)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataModel> {
        self.snapshots.iter()
    }
}
