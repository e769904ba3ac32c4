// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks a `TableSource` for a table and
// never sees how the bytes were parsed.
//
// Implementations:
//   - ArffLoader → reads an ARFF file from disk

use crate::domain::error::DatasetError;
use crate::domain::table::Table;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can produce a full table.
///
/// Every call performs a fresh load; nothing is cached between calls.
pub trait TableSource {
    fn load(&self) -> Result<Table, DatasetError>;

    /// Human-readable origin used in log lines (e.g. the file path)
    fn describe(&self) -> String;
}
