// ============================================================
// Layer 1 — Report HTTP Server
// ============================================================
// One route, `GET /`. Each request runs the whole report
// pipeline on the blocking pool and answers with the rendered
// page; the only shared state is the immutable config.
//
//   serve(addr, config)  → bind, serve, stop on Ctrl-C
//   router(config)       → the axum `Router`, usable in tests

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, extract::State, response::Html, routing::get};
use tokio::net::TcpListener;

use crate::application::config::AnalysisConfig;
use crate::application::report_use_case::{Report, ReportUseCase};
use crate::web::template::render_page;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalysisConfig>,
}

/// Build the application router.
///
/// # Arguments
/// * `config` - analysis settings shared by every request
pub fn router(config: Arc<AnalysisConfig>) -> Router {
    Router::new()
        .route("/", get(show_report))
        .with_state(AppState { config })
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Arguments
/// * `addr`   - socket address to listen on
/// * `config` - analysis settings for every request
///
/// Returns an error only if binding or the server loop itself fails.
pub async fn serve(addr: SocketAddr, config: AnalysisConfig) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;
    let bound = listener.local_addr()?;

    tracing::info!(
        "Serving report for '{}' on http://{}",
        config.dataset_path.display(),
        bound
    );

    axum::serve(listener, router(Arc::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Every request does a full load from disk on the blocking pool.
/// The page always renders, whatever went wrong.
#[tracing::instrument(skip_all)]
async fn show_report(State(state): State<AppState>) -> Html<String> {
    let config = state.config.clone();
    let report = tokio::task::spawn_blocking(move || ReportUseCase::new(&config).build())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Report task failed: {}", e);
            Report::failed(format!("UNEXPECTED ERROR: report task failed. Error: {e}"))
        });

    Html(render_page(&report))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn state(config: AnalysisConfig) -> State<AppState> {
        State(AppState { config: Arc::new(config) })
    }

    #[tokio::test]
    async fn test_missing_file_renders_not_loaded_page() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = AnalysisConfig::default().with_dataset(tmp.path().join("KDDTrain+.arff"));

        let Html(page) = show_report(state(cfg)).await;
        assert!(page.contains("Dataset not loaded"));
        assert!(page.contains("CRITICAL ERROR"));
        assert!(!page.contains("<img"));
    }

    #[tokio::test]
    async fn test_loaded_page_embeds_four_charts() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("KDDTrain+.arff");
        let mut contents = String::from("@attribute duration real\n@attribute protocol_type {tcp,udp,icmp}\n@data\n");
        for i in 0..20 {
            contents.push_str(&format!("{},{}\n", i, ["tcp", "udp", "icmp"][i % 3]));
        }
        std::fs::write(&path, contents).unwrap();

        let Html(page) = show_report(state(AnalysisConfig::default().with_dataset(path))).await;
        assert!(page.contains("Dataset loaded: 20 records."));
        assert_eq!(page.matches("data:image/png;base64,").count(), 4);
        assert!(page.contains("<th>duration</th>"));
    }
}
