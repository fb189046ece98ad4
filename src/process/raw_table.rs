// src/process/raw_table.rs

use std::collections::HashMap;

use crate::schema::ColumnRange;

/// A parsed history file: named numeric columns of equal length.
///
/// Built once by the reader; there is no public way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryTable {
    /// Column names in file order. Unique, see `utils::disambiguate_columns`.
    columns: Vec<String>,
    /// One vector per column, aligned with `columns`.
    values: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
    rows: usize,
    /// Name/value pairs from the preamble above the column header.
    metadata: Vec<(String, String)>,
}

impl HistoryTable {
    /// Transpose accepted rows into columns. Every row must have
    /// `columns.len()` values; the reader guarantees this.
    pub(crate) fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
        metadata: Vec<(String, String)>,
    ) -> Self {
        let mut values: Vec<Vec<f64>> = (0..columns.len())
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for row in &rows {
            debug_assert_eq!(row.len(), columns.len());
            for (col, v) in values.iter_mut().zip(row) {
                col.push(*v);
            }
        }

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            columns,
            values,
            index,
            rows: rows.len(),
            metadata,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index.get(name).map(|&i| self.values[i].as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Reassemble row `i` in column order.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        (i < self.rows).then(|| self.values.iter().map(|col| col[i]).collect())
    }

    /// Names from `required` that this table lacks, in the order given.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect()
    }

    /// `Ok` if every name in `required` is present, else the missing ones.
    pub fn require(&self, required: &[&str]) -> Result<(), Vec<String>> {
        let missing = self.missing(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing.into_iter().map(String::from).collect())
        }
    }

    pub fn range(&self, name: &str) -> Option<ColumnRange> {
        self.column(name).and_then(ColumnRange::of)
    }

    /// Up to the first `n` values of a column.
    pub fn head(&self, name: &str, n: usize) -> Option<&[f64]> {
        self.column(name).map(|col| &col[..n.min(col.len())])
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
