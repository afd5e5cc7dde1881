use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur when the
/// tool discovers, ingests, or emits delivery data.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the CSV writer implementation.
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// Raised when the input glob pattern cannot be constructed.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Raised when a directory entry cannot be inspected during discovery.
    #[error("file discovery error: {0}")]
    Discovery(#[from] glob::GlobError),

    /// Raised when the user provides an input directory that does not exist.
    #[error("input directory not found: {0}")]
    MissingInputDir(PathBuf),

    /// Raised when the input directory contains no workbooks to process.
    #[error("no .xlsx files found in {0}")]
    NoInputFiles(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
