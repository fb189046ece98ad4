use std::path::PathBuf;
use thiserror::Error;

/// Fatal reader failures. Malformed data lines are not errors; they end up
/// in the `ParseReport` instead.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("history file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no header line containing \"{}\"", super::HEADER_SENTINEL)]
    MissingHeader,

    #[error("header found but no valid data rows ({dropped} lines dropped)")]
    EmptyTable { dropped: usize },

    #[error("repeated header at line {line}")]
    RepeatedHeader { line: usize },
}
