// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for the load → split → chart pipeline.
// The web report matches on these to pick a log message;
// the CLI wraps them in anyhow with extra context.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a dataset or addressing its columns.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("file not found: '{}'", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// `line` is the 1-based line in the source file
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line:     usize,
        expected: usize,
        found:    usize,
    },

    /// A table built in memory with a row of the wrong width;
    /// `row` is the 1-based row position
    #[error("row {row}: expected {expected} values, found {found}")]
    RowWidth {
        row:      usize,
        expected: usize,
        found:    usize,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while partitioning a table.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),

    #[error("value '{value}' has only {count} member(s); stratification needs at least 2")]
    StratumTooSmall { value: String, count: usize },

    #[error("stratified split requires shuffling")]
    StratifyWithoutShuffle,

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Failures while drawing or encoding a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart drawing failed: {0}")]
    Draw(String),

    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Anything the report pipeline can hit.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl AnalysisError {
    /// Unwraps a split failure that was really a dataset failure,
    /// so a missing stratify column reports as a missing column.
    pub fn dataset(&self) -> Option<&DatasetError> {
        match self {
            AnalysisError::Dataset(e)                   => Some(e),
            AnalysisError::Split(SplitError::Dataset(e)) => Some(e),
            _                                           => None,
        }
    }
}
