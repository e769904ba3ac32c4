// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands the work to Layer 2.
// Only this layer prints to stdout or reads stdin.
//
//   1. `split` — script mode
//   2. `serve` — web mode

pub mod commands;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, ServeArgs, SplitArgs};

use crate::application::config::AnalysisConfig;
use crate::application::split_use_case::{RunSummary, SplitOutcome, SplitUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "kdd-split",
    version,
    about = "Split the NSL-KDD dataset 60/20/20 and chart a categorical column per partition."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the chosen subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args) => run_split(args),
            Commands::Serve(args) => run_serve(args),
        }
    }
}

/// Handles the `split` subcommand.
///
/// A missing dataset file is reported on stderr and is not an error;
/// the process still exits normally.
fn run_split(args: SplitArgs) -> Result<()> {
    let config: AnalysisConfig = args.analysis.into();
    let use_case = SplitUseCase::new(config, &args.out_dir);

    match use_case.execute()? {
        SplitOutcome::FileMissing(path) => {
            eprintln!("ERROR: file not found at path: {}", path.display());
            eprintln!("Point --dataset (or KDD_DATASET_PATH) at KDDTrain+.arff.");
            Ok(())
        }
        SplitOutcome::Completed(summary) => {
            print_summary(&summary);
            show_charts(&summary, args.pause)
        }
    }
}

/// Handles the `serve` subcommand.
/// Blocks on a tokio runtime until the server stops.
fn run_serve(args: ServeArgs) -> Result<()> {
    let config: AnalysisConfig = args.analysis.into();
    let runtime = tokio::runtime::Runtime::new().context("Cannot start the async runtime")?;
    runtime.block_on(crate::web::server::serve(args.addr, config))
}

/// Loaded path, column overview, example splits and 60/20/20 sizes.
fn print_summary(s: &RunSummary) {
    println!("Dataset loaded from: {}", s.config.dataset_path.display());
    if let Some(relation) = &s.relation {
        println!("Relation: {}", relation);
    }
    println!("\n{}", s.info);

    println!("Example splits:");
    for demo in &s.demos {
        match &demo.error {
            None    => println!("  {:<18} train {:>7}  test {:>7}", demo.name, demo.train, demo.test),
            Some(e) => println!("  {:<18} failed: {}", demo.name, e),
        }
    }
    for demo in &s.demos {
        if let Some(info) = &demo.train_info {
            println!("\nTraining set of the {} split:\n{}", demo.name, info);
        }
    }

    println!("\n60/20/20 split:");
    for p in s.partitions.iter().skip(1) {
        println!("  {:<10} Set: {:>7} ({:.2}%)", p.name, p.rows, p.share);
    }
    println!("\nSummary written to {}", s.summary.display());
}

/// One chart at a time, optionally waiting for Enter in between.
fn show_charts(s: &RunSummary, pause: bool) -> Result<()> {
    let stdin = io::stdin();
    let total = s.partitions.len();

    for (i, p) in s.partitions.iter().enumerate() {
        println!(
            "\n{} Set - distribution of '{}': {}",
            p.name,
            s.config.column,
            p.chart.display()
        );
        let widest = p.bins.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
        for (value, count) in &p.bins {
            println!("  {:<width$}  {:>7}", value, count, width = widest);
        }

        if pause && i + 1 < total {
            print!("Press Enter for the next chart...");
            io::stdout().flush()?;
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
        }
    }
    Ok(())
}
