// ============================================================
// Layer 2 — ReportUseCase
// ============================================================
// Builds everything the web page shows for one request:
// log lines, a preview of the first rows, and one base64 PNG
// histogram per table (Original, Training, Validation, Test).
//
// `build` never fails. Errors become log lines:
//   FileNotFound  → "CRITICAL ERROR" line + detail line
//   MissingColumn → column hint line
//   anything else → "UNEXPECTED ERROR" line
// and whatever was produced before the error is kept.

use serde::Serialize;

use crate::application::{charted_sets, config::AnalysisConfig, share};
use crate::data::loader::ArffLoader;
use crate::data::splitter::train_val_test_split;
use crate::domain::error::{AnalysisError, DatasetError};
use crate::domain::histogram::Histogram;
use crate::domain::table::Table;
use crate::domain::traits::TableSource;
use crate::infra::chart::histogram_base64;

pub const REPORT_TITLE: &str = "KDD Analysis and Partitioning";

/// Header plus the first rows of the loaded table
#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows:    Vec<Vec<String>>,
}

impl TablePreview {
    pub fn of(table: &Table, n: usize) -> Self {
        let head = table.head(n);
        Self {
            columns: head.columns().to_vec(),
            rows:    head.rows().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartImage {
    /// Original / Training / Validation / Test
    pub name:       String,
    pub column:     String,
    pub png_base64: String,
    pub bins:       Vec<(String, usize)>,
}

/// The page model handed to the template.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title:   String,
    pub loaded:  bool,
    pub logs:    Vec<String>,
    pub preview: Option<TablePreview>,
    pub charts:  Vec<ChartImage>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            title:   REPORT_TITLE.to_string(),
            loaded:  false,
            logs:    Vec::new(),
            preview: None,
            charts:  Vec::new(),
        }
    }

    /// A report holding a single log line and nothing else
    pub fn failed(message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.logs.push(message.into());
        report
    }

    fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }

    fn log_error(&mut self, err: &AnalysisError) {
        tracing::warn!("Report error: {}", err);
        match err.dataset() {
            Some(DatasetError::FileNotFound { .. }) => {
                self.log("CRITICAL ERROR: file not found. Check the dataset path and file name.");
                self.log(format!("Detail: {err}"));
            }
            Some(DatasetError::MissingColumn { column }) => {
                self.log(format!(
                    "ERROR: column not found. Check that '{column}' exists in the dataset. Error: {err}"
                ));
            }
            _ => {
                self.log(format!("UNEXPECTED ERROR: data or runtime failure. Error: {err}"));
            }
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ReportUseCase<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ReportUseCase<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Report {
        let cfg = self.config;
        let mut report = Report::new();

        let loader = ArffLoader::new(&cfg.dataset_path).with_policy(cfg.ragged);
        let table = match loader.load() {
            Ok(table) => table,
            Err(e) => {
                report.log_error(&AnalysisError::from(e));
                return report;
            }
        };

        report.loaded = true;
        report.log(format!("Dataset loaded: {} records.", table.len()));

        if let Err(e) = self.split_and_chart(&table, &mut report) {
            report.log_error(&e);
        }

        report.preview = Some(TablePreview::of(&table, cfg.preview_rows));
        report
    }

    fn split_and_chart(&self, table: &Table, report: &mut Report) -> Result<(), AnalysisError> {
        let cfg = self.config;
        let partitions = train_val_test_split(table, cfg.seed, cfg.shuffle)?;

        report.log("60/20/20 split completed:");
        for (name, set) in partitions.named() {
            report.log(format!(
                "  - {} Set: {} ({:.2}%)",
                name,
                set.len(),
                share(set.len(), table.len())
            ));
        }

        for (name, set) in charted_sets(table, &partitions) {
            let histogram = Histogram::of(set, &cfg.column)?;
            let png_base64 = histogram_base64(&histogram, cfg.chart_size)?;
            report.charts.push(ChartImage {
                name:   name.to_string(),
                column: cfg.column.clone(),
                png_base64,
                bins:   histogram.bins().to_vec(),
            });
        }

        tracing::debug!("Report built with {} charts", report.charts.len());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(contents: &str) -> (tempfile::TempDir, AnalysisConfig) {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("KDDTrain+.arff");
        fs::write(&path, contents).unwrap();
        let cfg = AnalysisConfig::default().with_dataset(path);
        (tmp, cfg)
    }

    fn dataset(rows: usize) -> String {
        let mut s = String::from("@attribute protocol_type {tcp,udp,icmp}\n@attribute class {normal,anomaly}\n@data\n");
        for i in 0..rows {
            s.push_str(["tcp,normal\n", "udp,anomaly\n", "icmp,normal\n"][i % 3]);
        }
        s
    }

    #[test]
    fn test_loaded_report() {
        let (_tmp, cfg) = config_for(&dataset(10));
        let report = ReportUseCase::new(&cfg).build();

        assert!(report.loaded);
        assert_eq!(report.logs[0], "Dataset loaded: 10 records.");
        assert!(report.logs.iter().any(|l| l == "  - Training Set: 6 (60.00%)"));
        assert!(report.logs.iter().any(|l| l == "  - Test Set: 2 (20.00%)"));

        let names: Vec<&str> = report.charts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Original", "Training", "Validation", "Test"]);
        assert!(report.charts.iter().all(|c| c.png_base64.starts_with("iVBORw0KGgo")));

        let preview = report.preview.unwrap();
        assert_eq!(preview.columns, vec!["protocol_type", "class"]);
        assert_eq!(preview.rows.len(), 5);
    }

    #[test]
    fn test_missing_file_is_not_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = AnalysisConfig::default().with_dataset(tmp.path().join("missing.arff"));
        let report = ReportUseCase::new(&cfg).build();

        assert!(!report.loaded);
        assert!(report.preview.is_none());
        assert!(report.charts.is_empty());
        assert!(report.logs[0].starts_with("CRITICAL ERROR"));
        assert!(report.logs[1].contains("missing.arff"));
    }

    #[test]
    fn test_missing_column_keeps_preview() {
        let (_tmp, mut cfg) = config_for(&dataset(10));
        cfg.column = "service".to_string();
        let report = ReportUseCase::new(&cfg).build();

        assert!(report.loaded);
        assert!(report.charts.is_empty());
        assert!(report.preview.is_some());
        assert!(report.logs.last().unwrap().contains("'service'"));
    }

    #[test]
    fn test_ragged_reject_is_unexpected_error() {
        let (_tmp, mut cfg) = config_for("@attribute a real\n@attribute b real\n@data\n1\n");
        cfg.ragged = crate::data::loader::RaggedRowPolicy::Reject;
        let report = ReportUseCase::new(&cfg).build();

        assert!(!report.loaded);
        assert!(report.logs[0].starts_with("UNEXPECTED ERROR"));
    }
}
