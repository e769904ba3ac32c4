// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a raw .arff file to partitioned tables:
//
//   KDDTrain+.arff
//       │
//       ▼
//   ArffParser        → header directives + quote-aware records
//       │
//       ▼
//   ArffLoader        → applies the ragged-row policy, builds a Table
//       │
//       ▼
//   splitter          → train/test, stratified, or 60/20/20 partitions

/// Line-level ARFF parsing
pub mod arff;

/// Reads .arff files from disk into a Table
pub mod loader;

/// Seeded train/validation/test splitting
pub mod splitter;
