pub mod types;

pub use types::{ColumnRange, ColumnSummary, MetadataEntry, TableSummary};

use crate::process::ParsedHistory;

/// Columns whose presence the reader always reports on.
pub const KEY_COLUMNS: [&str; 4] = ["model_number", "star_age", "log_Teff", "log_L"];

pub const LOG_TEFF: &str = "log_Teff";
pub const LOG_L: &str = "log_L";
pub const STAR_AGE: &str = "star_age";
pub const LOG_R: &str = "log_R";

/// Needed by both the HR diagram and the summary grid.
pub const HR_COLUMNS: [&str; 3] = [LOG_TEFF, LOG_L, STAR_AGE];

/// Metadata key MESA uses for the starting mass in solar masses.
pub const INITIAL_MASS: &str = "initial_mass";

/// Column-by-column summary of a parsed file.
pub fn summarize(parsed: &ParsedHistory) -> TableSummary {
    let table = &parsed.table;
    TableSummary {
        rows: table.row_count(),
        dropped: parsed.report.dropped,
        segments: parsed.report.segments,
        metadata: table
            .metadata()
            .iter()
            .map(|(name, value)| MetadataEntry {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        columns: table
            .columns()
            .iter()
            .map(|name| ColumnSummary {
                name: name.clone(),
                range: table.range(name),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{parse_history, ReadOptions};
    use anyhow::Result;

    #[test]
    fn summary_covers_every_column() -> Result<()> {
        let parsed = parse_history(
            "model_number star_age\n1 0\n2 nan\nbad\n",
            &ReadOptions::default(),
        )?;
        let summary = summarize(&parsed);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.segments, 1);
        assert_eq!(summary.columns.len(), 2);
        assert_eq!(
            summary.columns[0].range,
            Some(ColumnRange { min: 1.0, max: 2.0 })
        );
        assert_eq!(
            summary.columns[1].range,
            Some(ColumnRange { min: 0.0, max: 0.0 })
        );

        let yaml = serde_yaml::to_string(&summary)?;
        assert!(yaml.contains("name: star_age"));
        Ok(())
    }

    #[test]
    fn metadata_serializes_as_named_entries() -> Result<()> {
        let text = "  1  2\n  compiler  initial_mass\n  \"gfortran\"  1.0\n\n\
                    model_number star_age\n1 0\n";
        let summary = summarize(&parse_history(text, &ReadOptions::default())?);
        assert_eq!(
            summary.metadata[0],
            MetadataEntry {
                name: "compiler".into(),
                value: "gfortran".into(),
            }
        );

        let yaml = serde_yaml::to_string(&summary)?;
        assert!(yaml.contains("- name: compiler\n  value: gfortran\n"), "{}", yaml);
        Ok(())
    }
}
