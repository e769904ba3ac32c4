// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting output concerns used by both presentation modes:
//
//   chart.rs  — per-chart drawing context: histogram bars into
//               an RGB buffer, then PNG / base64 encoding
//
//   output.rs — the `split` command's output directory: chart
//               files plus a JSON summary of the run

/// Histogram drawing and PNG/base64 encoding
pub mod chart;

/// Chart and summary files on disk
pub mod output;
