// ============================================================
// Layer 4 — ARFF Loader
// ============================================================
// Reads an ARFF file from disk into a `Table`.
//
// The file is read line by line through a BufReader; bytes that
// are not valid UTF-8 are replaced rather than failing the load.
// The handle is dropped as soon as the read loop ends.
//
// Rows whose field count differs from the attribute count are
// handled by a `RaggedRowPolicy`:
//   Pad    → fill short rows with "" and cut long rows (default)
//   Drop   → leave the row out
//   Reject → fail the whole load on the first such row
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::data::arff::{ArffParser, ParsedArff, Record};
use crate::domain::error::DatasetError;
use crate::domain::table::Table;
use crate::domain::traits::TableSource;

/// What to do with a record whose width doesn't match the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRowPolicy {
    #[default]
    Pad,
    Drop,
    Reject,
}

/// Loads one ARFF file. Implements `TableSource`.
pub struct ArffLoader {
    path:   PathBuf,
    policy: RaggedRowPolicy,
}

impl ArffLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), policy: RaggedRowPolicy::default() }
    }

    pub fn with_policy(mut self, policy: RaggedRowPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl TableSource for ArffLoader {
    fn load(&self) -> Result<Table, DatasetError> {
        let parsed = read_arff(&self.path)?;

        tracing::debug!(
            "Parsed '{}': {} attributes, {} records",
            self.path.display(),
            parsed.attributes.len(),
            parsed.records.len()
        );

        build_table(parsed, self.policy)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn read_arff(path: &Path) -> Result<ParsedArff, DatasetError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = BufReader::new(file);

    let mut parser  = ArffParser::new();
    let mut buf     = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| io_error(path, e))?;
        if n == 0 {
            break;
        }
        line_no += 1;
        parser.feed(line_no, &String::from_utf8_lossy(&buf));
    }

    if !parser.in_data() {
        tracing::warn!("'{}' has no @DATA section", path.display());
    }

    Ok(parser.finish())
}

fn io_error(path: &Path, e: io::Error) -> DatasetError {
    if e.kind() == io::ErrorKind::NotFound {
        DatasetError::FileNotFound { path: path.to_path_buf() }
    } else {
        DatasetError::Io { path: path.to_path_buf(), source: e }
    }
}

/// Apply the ragged-row policy and assemble the table.
pub fn build_table(parsed: ParsedArff, policy: RaggedRowPolicy) -> Result<Table, DatasetError> {
    let width = parsed.attributes.len();
    let mut rows     = Vec::with_capacity(parsed.records.len());
    let mut adjusted = 0usize;

    for Record { line, mut fields } in parsed.records {
        if fields.len() != width {
            match policy {
                RaggedRowPolicy::Reject => {
                    return Err(DatasetError::RaggedRow {
                        line,
                        expected: width,
                        found:    fields.len(),
                    });
                }
                RaggedRowPolicy::Drop => {
                    adjusted += 1;
                    continue;
                }
                RaggedRowPolicy::Pad => {
                    adjusted += 1;
                    fields.resize(width, String::new());
                }
            }
        }
        rows.push(fields);
    }

    if adjusted > 0 {
        tracing::warn!(
            "{} record(s) did not have {} fields ({:?} policy applied)",
            adjusted,
            width,
            policy
        );
    }

    let table = Table::new(parsed.attributes, rows)?;
    Ok(match parsed.relation {
        Some(name) => table.with_relation(name),
        None       => table,
    })
}
