// src/process/mod.rs
pub mod diagnostics;
pub mod error;
pub mod preamble;
pub mod raw_table;
pub mod utils;

use std::{fs, path::Path};
use tracing::{debug, info};

pub use diagnostics::{Diagnostic, DiagnosticKind, DropReason, ParseReport, Severity};
pub use error::ReadError;
pub use raw_table::HistoryTable;

use crate::schema::KEY_COLUMNS;
use utils::{disambiguate_columns, is_column_index, parse_numeric_row, tokenize};

/// The first line containing this substring is the column header.
pub const HEADER_SENTINEL: &str = "model_number";

/// What to do when the header line shows up again further down the file,
/// as it does when MESA restarts from a photo and appends to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SegmentPolicy {
    /// Keep reading rows into the same table; the repeated header is
    /// dropped and counted as a new segment.
    #[default]
    Append,
    /// Fail with [`ReadError::RepeatedHeader`].
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub segments: SegmentPolicy,
}

/// A table plus everything the reader noticed while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHistory {
    pub table: HistoryTable,
    pub report: ParseReport,
}

/// Read `path` and parse it as a MESA history file.
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn read_history<P: AsRef<Path>>(
    path: P,
    opts: &ReadOptions,
) -> Result<ParsedHistory, ReadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let buf = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&buf);
    info!(bytes = buf.len(), "read history file");

    parse_history(&text, opts)
}

/// Parse the text of a history file.
///
/// - The header is the first line containing [`HEADER_SENTINEL`].
/// - Every non-empty line after it must be all-numeric with exactly one
///   value per column; anything else is dropped and reported, never fatal.
/// - A line equal to the header starts a new segment (see [`SegmentPolicy`]).
///   The `1 2 ... N` numbering line directly above it is dropped too.
pub fn parse_history(text: &str, opts: &ReadOptions) -> Result<ParsedHistory, ReadError> {
    let lines: Vec<&str> = text.lines().collect();
    debug!(lines = lines.len(), "split input into lines");

    // 1) Locate the header: first match wins
    let header_idx = lines
        .iter()
        .position(|l| l.contains(HEADER_SENTINEL))
        .ok_or(ReadError::MissingHeader)?;
    let mut report = ParseReport {
        header_line: header_idx + 1,
        segments: 1,
        ..Default::default()
    };
    info!(line = header_idx + 1, "found header");

    // 2) Global metadata from the preamble, if it has the usual shape
    let metadata = match preamble::parse_preamble(&lines[..header_idx]) {
        Ok(meta) => meta,
        Err(reason) => {
            report.push(Diagnostic::new(
                Severity::Debug,
                None,
                DiagnosticKind::PreambleSkipped { reason },
            ));
            Vec::new()
        }
    };

    // 3) Column names
    let header_tokens = tokenize(lines[header_idx]);
    let (columns, renamed) = disambiguate_columns(&header_tokens);
    for (original, renamed) in renamed {
        report.push(Diagnostic::new(
            Severity::Warning,
            Some(header_idx + 1),
            DiagnosticKind::DuplicateColumn { original, renamed },
        ));
    }
    info!(columns = columns.len(), "parsed header");

    // 4) Data rows
    let body: Vec<(usize, &str)> = lines[header_idx + 1..]
        .iter()
        .enumerate()
        .map(|(offset, raw)| (header_idx + offset + 2, raw.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, &(line_no, line)) in body.iter().enumerate() {
        let tokens = tokenize(line);
        if tokens == header_tokens {
            match opts.segments {
                SegmentPolicy::Reject => {
                    return Err(ReadError::RepeatedHeader { line: line_no })
                }
                SegmentPolicy::Append => {
                    report.segments += 1;
                    report.drop_line(line_no, DropReason::RepeatedHeader, line);
                    continue;
                }
            }
        }

        // a restarted run rewrites the whole header block, numbering included
        let next_is_header = body
            .get(i + 1)
            .is_some_and(|&(_, next)| tokenize(next) == header_tokens);
        if next_is_header && is_column_index(&tokens, columns.len()) {
            report.drop_line(line_no, DropReason::IndexRow, line);
            continue;
        }

        match parse_numeric_row(&tokens) {
            Ok(row) if row.len() == columns.len() => {
                rows.push(row);
                report.accepted += 1;
            }
            Ok(row) => report.drop_line(
                line_no,
                DropReason::TokenCount {
                    expected: columns.len(),
                    found: row.len(),
                },
                line,
            ),
            Err(token) => report.drop_line(
                line_no,
                DropReason::NotNumeric {
                    token: token.to_string(),
                },
                line,
            ),
        }
    }

    if rows.is_empty() {
        return Err(ReadError::EmptyTable {
            dropped: report.dropped,
        });
    }
    info!(
        accepted = report.accepted,
        dropped = report.dropped,
        segments = report.segments,
        "parsed data rows"
    );

    // 5) Assemble, then 6) report which key columns made it
    let table = HistoryTable::from_rows(columns, rows, metadata);
    for column in KEY_COLUMNS {
        let present = table.has_column(column);
        report.push(Diagnostic::new(
            if present {
                Severity::Info
            } else {
                Severity::Warning
            },
            None,
            DiagnosticKind::ColumnPresence {
                column: column.to_string(),
                present,
            },
        ));
    }

    Ok(ParsedHistory { table, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,mesaplot::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const SMALL: &str = "model_number star_age log_Teff log_L
1 0.0 3.8 0.5
2 1.0e3 3.79 0.51
3 bad 3.7
";

    #[test]
    fn parses_the_small_example() -> Result<()> {
        init_test_logging();
        let parsed = parse_history(SMALL, &ReadOptions::default())?;
        let t = &parsed.table;

        assert_eq!(
            t.columns(),
            &["model_number", "star_age", "log_Teff", "log_L"]
        );
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column("log_Teff"), Some(&[3.8, 3.79][..]));
        assert_eq!(parsed.report.accepted, 2);
        assert_eq!(parsed.report.dropped, 1);
        assert_eq!(parsed.report.warnings().count(), 1);
        assert_eq!(parsed.report.header_line, 1);

        let (line, reason) = parsed.report.dropped_lines().next().unwrap();
        assert_eq!(line, 4);
        assert_eq!(
            reason,
            &DropReason::NotNumeric {
                token: "bad".into()
            }
        );
        Ok(())
    }

    #[test]
    fn mesa_layout_with_preamble() -> Result<()> {
        init_test_logging();
        let text = r#"                                         1                                         2                                         3
                                version_number                                  compiler                              initial_mass
                                    "r23.05.1"                                "gfortran"                     1.0000000000000000E+00

                                         1                                         2                                         3                                         4
                                  model_number                                  star_age                                  log_Teff                                     log_L
                                             1                    1.0000000000000000E-05                    3.6400000000000001E+00                   -2.0000000000000000E-01
                                             2                    2.2000000000000001E-05                    3.6410000000000000E+00                   -2.1000000000000000E-01
"#;
        let parsed = parse_history(text, &ReadOptions::default())?;
        assert_eq!(parsed.report.header_line, 6);
        assert_eq!(parsed.table.row_count(), 2);
        assert_eq!(parsed.table.column("star_age"), Some(&[1.0e-5, 2.2e-5][..]));
        assert_eq!(parsed.table.metadata_value("version_number"), Some("r23.05.1"));
        assert_eq!(
            parsed.table.metadata_value("initial_mass"),
            Some("1.0000000000000000E+00")
        );
        Ok(())
    }

    #[test]
    fn missing_sentinel_is_missing_header() {
        let err = parse_history("a b c\n1 2 3\n", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, ReadError::MissingHeader));
    }

    #[test]
    fn header_without_rows_is_empty_table() {
        let err = parse_history("model_number x\n\n1 2 3\nfoo bar\n", &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReadError::EmptyTable { dropped: 2 }));
    }

    #[test]
    fn first_header_wins() -> Result<()> {
        let text = "model_number a\n1 2\nmodel_number a b\n3 4\n";
        let parsed = parse_history(text, &ReadOptions::default())?;
        assert_eq!(parsed.table.columns(), &["model_number", "a"]);
        assert_eq!(parsed.table.row_count(), 2);
        // a non-identical later header is just a bad data line
        assert_eq!(parsed.report.segments, 1);
        assert_eq!(parsed.report.dropped, 1);
        Ok(())
    }

    #[test]
    fn repeated_header_appends_a_segment() -> Result<()> {
        let text = "model_number a\n1 2\n\n  model_number   a\n2 3\n";
        let parsed = parse_history(text, &ReadOptions::default())?;
        assert_eq!(parsed.table.column("model_number"), Some(&[1.0, 2.0][..]));
        assert_eq!(parsed.report.segments, 2);
        assert_eq!(parsed.report.dropped, 1);
        // a restart is not a warning
        assert!(parsed
            .report
            .warnings()
            .all(|d| !matches!(d.kind, DiagnosticKind::DroppedLine { .. })));
        Ok(())
    }

    #[test]
    fn restart_numbering_row_is_not_a_model() -> Result<()> {
        let text = "model_number a\n1 2\n1 2\nmodel_number a\n2 3\n";
        let parsed = parse_history(text, &ReadOptions::default())?;
        assert_eq!(parsed.table.column("model_number"), Some(&[1.0, 2.0][..]));
        assert_eq!(parsed.report.accepted, 2);
        assert_eq!(parsed.report.dropped, 2);
        assert_eq!(
            parsed.report.dropped_lines().map(|(l, _)| l).collect::<Vec<_>>(),
            vec![3, 4]
        );
        Ok(())
    }

    #[test]
    fn numbering_like_row_without_header_is_kept() -> Result<()> {
        let parsed = parse_history("model_number a\n1 2\n3 4\n", &ReadOptions::default())?;
        assert_eq!(parsed.table.row_count(), 2);
        assert_eq!(parsed.report.dropped, 0);
        Ok(())
    }

    #[test]
    fn repeated_header_can_be_rejected() {
        let text = "model_number a\n1 2\nmodel_number a\n2 3\n";
        let opts = ReadOptions {
            segments: SegmentPolicy::Reject,
        };
        let err = parse_history(text, &opts).unwrap_err();
        assert!(matches!(err, ReadError::RepeatedHeader { line: 3 }));
    }

    #[test]
    fn duplicate_header_names_are_renamed() -> Result<()> {
        let parsed = parse_history("model_number x x\n1 2 3\n", &ReadOptions::default())?;
        assert_eq!(parsed.table.columns(), &["model_number", "x", "x.1"]);
        assert_eq!(parsed.table.column("x.1"), Some(&[3.0][..]));
        assert!(parsed.report.diagnostics.iter().any(|d| matches!(
            &d.kind,
            DiagnosticKind::DuplicateColumn { renamed, .. } if renamed == "x.1"
        )));
        Ok(())
    }

    #[test]
    fn nan_and_zero_rows_are_accepted() -> Result<()> {
        let parsed = parse_history("model_number v\n0 0\n1 nan\n", &ReadOptions::default())?;
        let v = parsed.table.column("v").unwrap();
        assert_eq!(v[0], 0.0);
        assert!(v[1].is_nan());
        Ok(())
    }

    #[test]
    fn missing_key_columns_warn_but_do_not_fail() -> Result<()> {
        let parsed = parse_history("model_number v\n1 2\n", &ReadOptions::default())?;
        let missing: Vec<&str> = parsed
            .report
            .diagnostics
            .iter()
            .filter_map(|d| match &d.kind {
                DiagnosticKind::ColumnPresence {
                    column,
                    present: false,
                } => Some(column.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, vec!["star_age", "log_Teff", "log_L"]);
        Ok(())
    }

    #[test]
    fn crlf_input_parses() -> Result<()> {
        let parsed = parse_history("model_number v\r\n1 2\r\n", &ReadOptions::default())?;
        assert_eq!(parsed.table.row_count(), 1);
        Ok(())
    }

    #[test]
    fn read_history_from_disk() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(SMALL.as_bytes())?;

        let first = read_history(tmp.path(), &ReadOptions::default())?;
        let second = read_history(tmp.path(), &ReadOptions::default())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn read_history_missing_file() {
        let err = read_history("does/not/exist/history.data", &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReadError::MissingFile { .. }));
    }
}
