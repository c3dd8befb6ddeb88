use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::table::Table;

/// Insertion-ordered string map used for the Header and Settings sections.
///
/// File order is significant when writing a sheet back out, so a plain
/// `BTreeMap` is not enough here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValues(Vec<(String, String)>);

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite, preserving the position of an existing key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key/value view that ignores insertion order, for section comparisons.
    pub fn as_map(&self) -> BTreeMap<&str, &str> {
        self.iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One row of the Data section, keyed by canonical column name.
pub type Sample = BTreeMap<String, String>;

/// The Data section: a fixed column set plus one [`Sample`] per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSection {
    pub columns: Vec<String>,
    pub rows: Vec<Sample>,
}

impl DataSection {
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a sample. The sample's key set must equal the column set fixed
    /// for this section; anything else is rejected.
    pub fn push_sample(&mut self, sample: Sample) -> Result<()> {
        let expected: BTreeSet<&str> = self.columns.iter().map(String::as_str).collect();
        let found: BTreeSet<&str> = sample.keys().map(String::as_str).collect();
        if expected != found {
            return Err(SheetError::SampleColumnMismatch {
                expected: self.columns.join(", "),
                found: found.into_iter().collect::<Vec<_>>().join(", "),
            });
        }
        self.rows.push(sample);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct values of one column, in sorted order.
    pub fn distinct(&self, column: &str) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(column).cloned())
            .collect()
    }
}

/// In-memory representation of a sample sheet.
///
/// Sections map one-to-one onto the file format: Header, Reads and Settings
/// are ordered key/value data, Data holds one [`Sample`] per physical sample,
/// and Bioinformatics/Contact are optional per-project tables. Unrecognized
/// bracketed sections encountered while parsing are kept in `extras` but are
/// not written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSheet {
    pub header: KeyValues,
    pub reads: Vec<u32>,
    pub settings: KeyValues,
    pub data: DataSection,
    pub bioinformatics: Option<Table>,
    pub contact: Option<Table>,
    pub extras: Vec<(String, KeyValues)>,
}

impl SampleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct `Sample_Project` values across the Data section.
    pub fn projects(&self) -> BTreeSet<String> {
        self.data.distinct("Sample_Project")
    }

    pub fn push_sample(&mut self, sample: Sample) -> Result<()> {
        self.data.push_sample(sample)
    }
}
