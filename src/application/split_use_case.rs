// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// Script mode, in order:
//
//   Step 1: Load the ARFF file             (Layer 4 - data)
//   Step 2: Summarise the columns          (Layer 3 - domain)
//   Step 3: Demonstration 60/40 splits     (Layer 4 - data)
//             shuffled, unshuffled, stratified on the chart column
//   Step 4: 60/20/20 split                 (Layer 4 - data)
//   Step 5: Histogram + PNG per table      (Layer 6 - infra)
//   Step 6: Write summary.json             (Layer 6 - infra)
//
// A missing dataset file is not an error here: it is reported
// back as `SplitOutcome::FileMissing` and nothing else runs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::application::{charted_sets, config::AnalysisConfig, share};
use crate::data::loader::ArffLoader;
use crate::data::splitter::{train_test_split, train_val_test_split, SplitOptions, HOLDOUT_FRACTION};
use crate::domain::error::DatasetError;
use crate::domain::histogram::Histogram;
use crate::domain::summary::TableInfo;
use crate::domain::table::Table;
use crate::domain::traits::TableSource;
use crate::infra::{chart::histogram_png, output::OutputDir};

#[derive(Debug)]
pub enum SplitOutcome {
    /// The dataset path did not exist; nothing was split or drawn
    FileMissing(PathBuf),
    Completed(RunSummary),
}

/// One of the 60/40 example splits.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSplit {
    pub name:  String,
    pub train: usize,
    pub test:  usize,
    /// Column overview of the training side; only kept for the shuffled split
    pub train_info: Option<TableInfo>,
    /// Set when the split could not be made (e.g. a rare category)
    pub error: Option<String>,
}

/// One charted table of the final 60/20/20 split.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionSummary {
    pub name:  String,
    pub rows:  usize,
    /// Percentage of the original row count
    pub share: f64,
    pub chart: PathBuf,
    pub bins:  Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config:     AnalysisConfig,
    pub relation:   Option<String>,
    pub info:       TableInfo,
    pub demos:      Vec<DemoSplit>,
    pub partitions: Vec<PartitionSummary>,
    pub summary:    PathBuf,
}

pub struct SplitUseCase {
    config:  AnalysisConfig,
    out_dir: PathBuf,
}

impl SplitUseCase {
    /// # Arguments
    /// * `config`  - dataset, column, seed and loader settings
    /// * `out_dir` - where the PNG charts and summary.json go
    pub fn new(config: AnalysisConfig, out_dir: impl Into<PathBuf>) -> Self {
        Self { config, out_dir: out_dir.into() }
    }

    /// Run every step in order.
    ///
    /// Returns `SplitOutcome::FileMissing` when the dataset path does not
    /// exist, otherwise the completed run. Any other failure is an error.
    pub fn execute(&self) -> Result<SplitOutcome> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let loader = ArffLoader::new(&cfg.dataset_path).with_policy(cfg.ragged);
        let table = match loader.load() {
            Ok(table) => table,
            Err(DatasetError::FileNotFound { path }) => {
                tracing::error!("Dataset file not found: '{}'", path.display());
                return Ok(SplitOutcome::FileMissing(path));
            }
            Err(e) => return Err(e).with_context(|| format!("Cannot load '{}'", loader.describe())),
        };
        let (rows, columns) = table.shape();
        tracing::info!("Loaded {} records x {} columns from '{}'", rows, columns, loader.describe());
        if table.is_empty() {
            tracing::warn!("'{}' has no data records", loader.describe());
        }

        // ── Step 2: Column summary ────────────────────────────────────────────
        let info = TableInfo::of(&table);

        // ── Step 3: Demonstration splits ──────────────────────────────────────
        let demos = self.demo_splits(&table);

        // ── Step 4: 60/20/20 ──────────────────────────────────────────────────
        let partitions = train_val_test_split(&table, cfg.seed, cfg.shuffle)
            .context("60/20/20 split failed")?;
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            partitions.train.len(),
            partitions.validation.len(),
            partitions.test.len()
        );

        // ── Step 5: Charts ────────────────────────────────────────────────────
        let out = OutputDir::create(&self.out_dir)?;
        let mut summaries = Vec::new();
        for (name, set) in charted_sets(&table, &partitions) {
            let histogram = Histogram::of(set, &cfg.column)
                .with_context(|| format!("Cannot chart the {} set", name))?;
            let png = histogram_png(&histogram, cfg.chart_size)
                .with_context(|| format!("Cannot draw the {} chart", name))?;
            let chart = out.save_chart(name, &png)?;

            summaries.push(PartitionSummary {
                name:  name.to_string(),
                rows:  set.len(),
                share: share(set.len(), table.len()),
                chart,
                bins:  histogram.bins().to_vec(),
            });
        }

        // ── Step 6: summary.json ──────────────────────────────────────────────
        let mut summary = RunSummary {
            config:     cfg.clone(),
            relation:   table.relation().map(str::to_string),
            info,
            demos,
            partitions: summaries,
            summary:    out.path().join("summary.json"),
        };
        summary.summary = out.save_summary(&summary)?;

        Ok(SplitOutcome::Completed(summary))
    }

    /// The 60/40 variants: shuffled, in file order, and stratified
    /// on the chart column. Failures are recorded, not raised.
    fn demo_splits(&self, table: &Table) -> Vec<DemoSplit> {
        let cfg  = &self.config;
        let base = SplitOptions::new(HOLDOUT_FRACTION).seed(cfg.seed);

        // (name, options, keep the training-side info)
        let variants = [
            ("60/40 shuffled", base.clone(), true),
            ("60/40 unshuffled", base.clone().shuffle(false), false),
            ("60/40 stratified", base.stratify(cfg.column.clone()), false),
        ];

        variants
            .into_iter()
            .map(|(name, opts, with_info)| match train_test_split(table, &opts) {
                Ok((train, test)) => DemoSplit {
                    name:       name.to_string(),
                    train:      train.len(),
                    test:       test.len(),
                    train_info: with_info.then(|| TableInfo::of(&train)),
                    error:      None,
                },
                Err(e) => {
                    tracing::warn!("{} split failed: {}", name, e);
                    DemoSplit {
                        name:       name.to_string(),
                        train:      0,
                        test:       0,
                        train_info: None,
                        error:      Some(e.to_string()),
                    }
                }
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &std::path::Path, rows: usize) -> PathBuf {
        let mut s = String::from(
            "@relation KDDTrain\n@attribute duration real\n@attribute protocol_type {tcp,udp,icmp}\n@attribute class {normal,anomaly}\n@data\n",
        );
        let protocols = ["tcp", "udp", "icmp"];
        for i in 0..rows {
            s.push_str(&format!("{},{},normal\n", i, protocols[i % 3]));
        }
        let path = dir.join("KDDTrain+.arff");
        fs::write(&path, s).unwrap();
        path
    }

    #[test]
    fn test_full_run_writes_charts_and_summary() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = write_dataset(tmp.path(), 10);
        let cfg  = AnalysisConfig::default().with_dataset(&path);

        let outcome = SplitUseCase::new(cfg, tmp.path().join("charts")).execute().unwrap();
        let summary = match outcome {
            SplitOutcome::Completed(s) => s,
            other => panic!("unexpected outcome: {other:?}"),
        };

        let sizes: Vec<usize> = summary.partitions.iter().map(|p| p.rows).collect();
        assert_eq!(sizes, vec![10, 6, 2, 2]);
        assert_eq!(summary.relation.as_deref(), Some("KDDTrain"));
        assert_eq!(summary.info.rows, 10);

        for p in &summary.partitions {
            assert!(p.chart.is_file());
            assert_eq!(p.bins.iter().map(|(_, c)| c).sum::<usize>(), p.rows);
        }
        assert!(summary.summary.is_file());

        assert_eq!(summary.demos.len(), 3);
        assert!(summary.demos.iter().all(|d| d.error.is_none()));
        assert_eq!((summary.demos[1].train, summary.demos[1].test), (6, 4));

        // the shuffled demo carries the training side's column overview
        let info = summary.demos[0].train_info.as_ref().unwrap();
        assert_eq!(info.rows, 6);
        assert_eq!(info.columns.len(), 3);
        assert!(summary.demos[1..].iter().all(|d| d.train_info.is_none()));
    }

    #[test]
    fn test_missing_file_stops_early() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = AnalysisConfig::default().with_dataset(tmp.path().join("nope.arff"));
        let out = tmp.path().join("charts");

        let outcome = SplitUseCase::new(cfg, &out).execute().unwrap();
        assert!(matches!(outcome, SplitOutcome::FileMissing(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_rare_category_only_fails_the_stratified_demo() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rare.arff");
        fs::write(
            &path,
            "@attribute protocol_type string\n@data\ntcp\ntcp\ntcp\nudp\nudp\nicmp\n",
        )
        .unwrap();

        let cfg = AnalysisConfig::default().with_dataset(&path);
        let outcome = SplitUseCase::new(cfg, tmp.path().join("charts")).execute().unwrap();
        let SplitOutcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };

        assert!(summary.demos[2].error.is_some());
        assert_eq!(summary.partitions[0].rows, 6);
    }

    #[test]
    fn test_missing_chart_column_is_an_error() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = write_dataset(tmp.path(), 10);
        let mut cfg = AnalysisConfig::default().with_dataset(&path);
        cfg.column = "service".to_string();

        let err = SplitUseCase::new(cfg, tmp.path().join("charts")).execute().unwrap_err();
        assert!(err.chain().any(|e| e.to_string().contains("service")));
    }
}
