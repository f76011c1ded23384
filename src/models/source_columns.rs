use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the implicit source used by elements that declare no `source_name`.
pub const DEFAULT_SOURCE_NAME: &str = "file";

/// Known source files and the columns each one provides.
///
/// Elements without a `source_name` resolve to the only file when exactly one
/// is known, and to [`DEFAULT_SOURCE_NAME`] otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceColumns {
    files: BTreeMap<String, Vec<String>>,
}

impl SourceColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns of a single implicit source file
    pub fn single(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut source = Self::new();
        source.insert(DEFAULT_SOURCE_NAME, columns);
        source
    }

    pub fn insert(
        &mut self,
        source_name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.files.insert(
            source_name.into(),
            columns.into_iter().map(Into::into).collect(),
        );
    }

    pub fn with_file(
        mut self,
        source_name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(source_name, columns);
        self
    }

    /// Sorted file names
    pub fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn contains_file(&self, source_name: &str) -> bool {
        self.files.contains_key(source_name)
    }

    pub fn is_multi_file(&self) -> bool {
        self.files.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Columns visible to an element declared with `source_name`.
    pub fn columns_for(&self, source_name: Option<&str>) -> Option<&[String]> {
        match source_name {
            Some(name) => self.files.get(name).map(Vec::as_slice),
            None if self.files.len() == 1 => self.files.values().next().map(Vec::as_slice),
            None => self.files.get(DEFAULT_SOURCE_NAME).map(Vec::as_slice),
        }
    }
}

impl<K, C> FromIterator<(K, C)> for SourceColumns
where
    K: Into<String>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut source = SourceColumns::new();
        for (name, columns) in iter {
            source.insert(name, columns);
        }
        source
    }
}
