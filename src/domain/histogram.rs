// ============================================================
// Layer 3 — Histogram Snapshot
// ============================================================
// Frequency counts of one column's distinct values in one table.
// Bins keep the order in which values first appear, which is
// also the order they are drawn on the chart's x axis.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::error::DatasetError;
use crate::domain::table::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    column: String,
    bins:   Vec<(String, usize)>,
}

impl Histogram {
    /// Count the values of `column` in `table`.
    pub fn of(table: &Table, column: &str) -> Result<Self, DatasetError> {
        let values = table.column(column)?;

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut bins: Vec<(String, usize)> = Vec::new();

        for value in values {
            match positions.get(value) {
                Some(&pos) => bins[pos].1 += 1,
                None => {
                    positions.insert(value, bins.len());
                    bins.push((value.to_string(), 1));
                }
            }
        }

        Ok(Self { column: column.to_string(), bins })
    }

    pub fn bins(&self) -> &[(String, usize)] {
        &self.bins
    }

    /// Height of the tallest bin, 0 for an empty table
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(protocols: &[&str]) -> Table {
        Table::new(
            vec!["protocol_type".to_string()],
            protocols.iter().map(|p| vec![p.to_string()]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let h = Histogram::of(&table(&["udp", "tcp", "udp", "icmp", "tcp", "tcp"]), "protocol_type")
            .unwrap();
        assert_eq!(
            h.bins(),
            &[
                ("udp".to_string(), 2),
                ("tcp".to_string(), 3),
                ("icmp".to_string(), 1),
            ]
        );
        assert_eq!(h.bins().iter().map(|(_, c)| c).sum::<usize>(), 6);
        assert_eq!(h.max_count(), 3);
    }

    #[test]
    fn test_empty_table_has_no_bins() {
        let h = Histogram::of(&table(&[]), "protocol_type").unwrap();
        assert!(h.bins().is_empty());
        assert_eq!(h.max_count(), 0);
    }

    #[test]
    fn test_missing_column() {
        let err = Histogram::of(&table(&["tcp"]), "service").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { column } if column == "service"));
    }
}
