// ============================================================
// Layer 2 — Analysis Configuration
// ============================================================
// Every knob of a load → split → chart run. Built from CLI
// arguments (or defaults) and recorded in `summary.json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::RaggedRowPolicy;
use crate::data::splitter::DEFAULT_SEED;
use crate::infra::chart::DEFAULT_SIZE;

pub const DEFAULT_DATASET_PATH: &str = "data/KDDTrain+.arff";
pub const DEFAULT_COLUMN: &str = "protocol_type";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub dataset_path: PathBuf,
    /// Categorical column charted per partition
    pub column:       String,
    pub seed:         u64,
    pub shuffle:      bool,
    pub ragged:       RaggedRowPolicy,
    /// Rows shown in the web page's table preview
    pub preview_rows: usize,
    /// Chart size in pixels (width, height)
    pub chart_size:   (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            column:       DEFAULT_COLUMN.to_string(),
            seed:         DEFAULT_SEED,
            shuffle:      true,
            ragged:       RaggedRowPolicy::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            chart_size:   DEFAULT_SIZE,
        }
    }
}

impl AnalysisConfig {
    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }
}
