// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   `split` — script mode: print sizes, write charts to disk
//   `serve` — web mode: one report page at `/`
//
// Dataset options are shared by both and can also be set through
// KDD_* environment variables.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Args, Subcommand, ValueEnum};

use crate::application::config::{
    AnalysisConfig, DEFAULT_COLUMN, DEFAULT_DATASET_PATH, DEFAULT_PREVIEW_ROWS,
};
use crate::data::loader::RaggedRowPolicy;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, split 60/20/20 and write one histogram per partition
    Split(SplitArgs),

    /// Serve the analysis as a web page
    Serve(ServeArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Path to the ARFF dataset (e.g. NSL-KDD KDDTrain+.arff)
    #[arg(long, env = "KDD_DATASET_PATH", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Categorical column to chart
    #[arg(long, env = "KDD_COLUMN", default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Seed for shuffling
    #[arg(long, env = "KDD_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Keep file order: first 60% train, next 20% validation, last 20% test
    #[arg(long)]
    pub no_shuffle: bool,

    /// What to do with rows whose field count differs from the header
    #[arg(long, value_enum, default_value_t = RaggedArg::Pad)]
    pub ragged: RaggedArg,

    /// Rows shown in the web page's table preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaggedArg {
    /// Fill short rows with empty values, cut long rows
    Pad,
    /// Skip mismatching rows
    Drop,
    /// Fail on the first mismatching row
    Reject,
}

impl From<RaggedArg> for RaggedRowPolicy {
    fn from(a: RaggedArg) -> Self {
        match a {
            RaggedArg::Pad    => RaggedRowPolicy::Pad,
            RaggedArg::Drop   => RaggedRowPolicy::Drop,
            RaggedArg::Reject => RaggedRowPolicy::Reject,
        }
    }
}

/// Convert CLI arguments into the application-layer config.
/// The application layer never sees clap types.
impl From<AnalysisArgs> for AnalysisConfig {
    fn from(a: AnalysisArgs) -> Self {
        AnalysisConfig {
            column:       a.column,
            seed:         a.seed,
            shuffle:      !a.no_shuffle,
            ragged:       a.ragged.into(),
            preview_rows: a.preview_rows,
            ..AnalysisConfig::default().with_dataset(a.dataset)
        }
    }
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Directory for the PNG charts and summary.json
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,

    /// Wait for Enter after each chart
    #[arg(long)]
    pub pause: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Address to listen on
    #[arg(long, env = "KDD_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,
}
