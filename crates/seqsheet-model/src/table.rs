use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A small column-oriented string table.
///
/// Used for the Bioinformatics and Contact sections (one row per project) and
/// as the wide input format consumed by the column remapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the table width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    pub fn column_values(&self, name: &str) -> Vec<&str> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row.get(idx).map_or("", String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct values of one column, in sorted order.
    pub fn distinct(&self, name: &str) -> BTreeSet<String> {
        self.column_values(name)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Add a column filled with `value`, or overwrite every cell of an
    /// existing one.
    pub fn set_column(&mut self, name: &str, value: &str) {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
    }

    /// Exact-string replacement over one column.
    pub fn replace_in_column(&mut self, name: &str, from: &str, to: &str) {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                if row[idx] == from {
                    row[idx] = to.to_string();
                }
            }
        }
    }

    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Keep only rows whose `column` value is contained in `keep`.
    pub fn retain_rows_where(&mut self, column: &str, keep: &BTreeSet<String>) {
        if let Some(idx) = self.column_index(column) {
            self.rows.retain(|row| keep.contains(&row[idx]));
        }
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in order.
    pub fn dedup_rows(&mut self) {
        let mut seen: BTreeSet<Vec<String>> = BTreeSet::new();
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Canonicalize boolean-typed columns in place.
    ///
    /// Case-insensitive `true`/`false` strings become the canonical `True` /
    /// `False`; canonical values pass through untouched. Anything else is left
    /// as-is and yields one message naming the unrecognized literal.
    pub fn normalize_boolean_columns(&mut self, columns: &[&str]) -> Vec<String> {
        let mut messages = Vec::new();
        for name in columns {
            let Some(idx) = self.column_index(name) else {
                continue;
            };
            for row in &mut self.rows {
                match row[idx].trim().to_ascii_lowercase().as_str() {
                    "true" => row[idx] = "True".to_string(),
                    "false" => row[idx] = "False".to_string(),
                    _ => messages.push(format!("'{}' is not 'True' or 'False'", row[idx])),
                }
            }
        }
        messages
    }
}
