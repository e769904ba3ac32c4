// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing what the system works with:
// a text table, frequency snapshots of one of its columns,
// and the error taxonomy shared by every other layer.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO charting or templating code
//   - Only plain Rust structs, enums, and traits

// Rows x named columns of raw text
pub mod table;

// Frequency counts of one column's distinct values
pub mod histogram;

// Per-column summary of a table
pub mod summary;

// FileNotFound / MissingColumn / split and chart failures
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
