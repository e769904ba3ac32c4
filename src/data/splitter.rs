// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Partitions a table's rows into two disjoint tables:
//   - first output:  len - ceil(test_fraction * len) rows
//   - second output: ceil(test_fraction * len) rows
//
// Modes:
//   shuffle = false  → contiguous cut, original order kept
//   shuffle = true   → seeded permutation, then cut
//   stratify = col   → the cut is made inside every group of
//                      equal `col` values, so each output keeps
//                      roughly the input's value proportions
//
// The seed goes into a fresh `StdRng` on every call, so the same
// table, options and seed always produce the same partitions.
//
// `train_val_test_split` applies the split twice (0.4, then 0.5
// of the remainder) for nominal 60/20/20 partitions. It never
// stratifies: rare categories would make the second cut fail.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use std::collections::HashMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::SplitError;
use crate::domain::table::Table;

pub const DEFAULT_SEED: u64 = 42;

/// First cut of the three-way split: 40% held out
pub const HOLDOUT_FRACTION: f64 = 0.4;

/// Second cut: the holdout is halved into validation and test
pub const VALIDATION_TEST_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Share of rows that go to the second output, in (0, 1)
    pub test_fraction: f64,
    pub seed:          u64,
    pub shuffle:       bool,
    /// Column whose value proportions both outputs should keep
    pub stratify:      Option<String>,
}

impl SplitOptions {
    pub fn new(test_fraction: f64) -> Self {
        Self {
            test_fraction,
            seed:     DEFAULT_SEED,
            shuffle:  true,
            stratify: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn stratify(mut self, column: impl Into<String>) -> Self {
        self.stratify = Some(column.into());
        self
    }
}

/// Row indices of the two outputs of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test:  Vec<usize>,
}

/// The three partitions of a 60/20/20 split.
#[derive(Debug, Clone)]
pub struct Partitions {
    pub train:      Table,
    pub validation: Table,
    pub test:       Table,
}

impl Partitions {
    /// (name, table) pairs in display order
    pub fn named(&self) -> [(&'static str, &Table); 3] {
        [
            ("Training", &self.train),
            ("Validation", &self.validation),
            ("Test", &self.test),
        ]
    }
}

/// Number of rows sent to the second output.
pub fn test_count(n: usize, test_fraction: f64) -> usize {
    ((n as f64) * test_fraction).ceil().min(n as f64) as usize
}

/// Compute the split over `0..n`.
///
/// `strata` must hold one label per row when the options ask for
/// stratification; it is ignored otherwise.
pub fn split_indices(
    n:      usize,
    opts:   &SplitOptions,
    strata: Option<&[&str]>,
) -> Result<SplitIndices, SplitError> {
    let f = opts.test_fraction;
    if !(f > 0.0 && f < 1.0) {
        return Err(SplitError::InvalidFraction(f));
    }

    let mut rng = StdRng::seed_from_u64(opts.seed);

    if let Some(labels) = strata {
        if !opts.shuffle {
            return Err(SplitError::StratifyWithoutShuffle);
        }
        return stratified_indices(labels, f, &mut rng);
    }

    let n_test  = test_count(n, f);
    let n_train = n - n_test;

    if !opts.shuffle {
        return Ok(SplitIndices {
            train: (0..n_train).collect(),
            test:  (n_train..n).collect(),
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);

    // Permutation prefix becomes the held-out side
    let train = order.split_off(n_test);
    Ok(SplitIndices { train, test: order })
}

fn stratified_indices(
    labels: &[&str],
    f:      f64,
    rng:    &mut StdRng,
) -> Result<SplitIndices, SplitError> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();

    for (row, &label) in labels.iter().enumerate() {
        match positions.get(label) {
            Some(&pos) => groups[pos].1.push(row),
            None => {
                positions.insert(label, groups.len());
                groups.push((label, vec![row]));
            }
        }
    }

    if let Some((label, members)) = groups.iter().find(|(_, m)| m.len() < 2) {
        return Err(SplitError::StratumTooSmall {
            value: label.to_string(),
            count: members.len(),
        });
    }

    let mut train = Vec::with_capacity(labels.len());
    let mut test  = Vec::new();

    for (_, mut members) in groups {
        let g = members.len();
        members.shuffle(rng);
        let n_test = test_count(g, f).clamp(1, g - 1);
        train.extend_from_slice(&members[n_test..]);
        test.extend_from_slice(&members[..n_test]);
    }

    train.shuffle(rng);
    test.shuffle(rng);

    Ok(SplitIndices { train, test })
}

/// Split `table` into (train, test).
pub fn train_test_split(table: &Table, opts: &SplitOptions) -> Result<(Table, Table), SplitError> {
    let labels = match &opts.stratify {
        Some(column) => Some(table.column(column)?),
        None         => None,
    };

    let idx = split_indices(table.len(), opts, labels.as_deref())?;

    tracing::debug!(
        "Dataset split: {} / {} (test_fraction={}, shuffle={}, stratify={:?})",
        idx.train.len(),
        idx.test.len(),
        opts.test_fraction,
        opts.shuffle,
        opts.stratify,
    );

    Ok((table.take(&idx.train), table.take(&idx.test)))
}

/// 60/20/20 split into training, validation and test partitions.
pub fn train_val_test_split(table: &Table, seed: u64, shuffle: bool) -> Result<Partitions, SplitError> {
    let first = SplitOptions::new(HOLDOUT_FRACTION).seed(seed).shuffle(shuffle);
    let (train, holdout) = train_test_split(table, &first)?;

    let second = SplitOptions::new(VALIDATION_TEST_FRACTION).seed(seed).shuffle(shuffle);
    let (validation, test) = train_test_split(&holdout, &second)?;

    Ok(Partitions { train, validation, test })
}
