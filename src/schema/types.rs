// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Min/max of a column over its finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// `None` if `values` holds no finite number.
    pub fn of(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Like [`ColumnRange::of`], restricted to strictly positive values,
    /// as needed for a log axis.
    pub fn of_positive(values: &[f64]) -> Option<Self> {
        let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
        Self::of(&positive)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One column in a [`TableSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Absent when the column has no finite values.
    pub range: Option<ColumnRange>,
}

/// One global value from the file preamble, e.g. `initial_mass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub value: String,
}

/// Shape of a parsed history file, as written by `describe_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub rows: usize,
    pub dropped: usize,
    pub segments: usize,
    /// In file order.
    pub metadata: Vec<MetadataEntry>,
    pub columns: Vec<ColumnSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_skips_non_finite() {
        let r = ColumnRange::of(&[f64::NAN, 2.0, -1.0, f64::INFINITY, 5.0]).unwrap();
        assert_eq!(r, ColumnRange { min: -1.0, max: 5.0 });
        assert_eq!(r.span(), 6.0);
        assert!(ColumnRange::of(&[f64::NAN]).is_none());
        assert!(ColumnRange::of(&[]).is_none());
    }

    #[test]
    fn positive_range_ignores_zero_age() {
        let r = ColumnRange::of_positive(&[0.0, 1e3, 1e9]).unwrap();
        assert_eq!(r.min, 1e3);
        assert!(ColumnRange::of_positive(&[0.0, -1.0]).is_none());
    }
}
