// ============================================================
// Layer 1 — Web Presentation
// ============================================================
// One page at `/`: load, split, chart and render on every GET.
// All work is delegated to `ReportUseCase`; this layer only
// hosts it (axum) and turns the result into HTML (minijinja).

/// axum router, handler and server loop
pub mod server;

/// HTML template for the report page
pub mod template;
