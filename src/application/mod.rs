// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates load → split → chart for the two presentation
// modes. No printing or HTTP here; results come back as plain
// structs for Layer 1 to show.
//
//   split_use_case   → script mode: charts and summary on disk
//   report_use_case  → web mode: one self-contained page model

use crate::data::splitter::Partitions;
use crate::domain::table::Table;

/// Settings shared by both use cases
pub mod config;

/// The script-mode workflow
pub mod split_use_case;

/// The web-page workflow
pub mod report_use_case;

/// The four tables charted on every run, in display order.
pub(crate) fn charted_sets<'a>(original: &'a Table, partitions: &'a Partitions) -> Vec<(&'static str, &'a Table)> {
    let mut sets = vec![("Original", original)];
    sets.extend(partitions.named());
    sets
}

/// Percentage of `part` in `whole`, 0 for an empty whole.
pub(crate) fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
