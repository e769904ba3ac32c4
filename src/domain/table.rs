// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// An immutable rows x named-columns table of raw text values.
// No typing beyond strings: ARFF nominal and numeric values are
// kept exactly as they appear in the file.
//
// Invariant: every row holds exactly `columns.len()` values,
// so every column has the same length. `Table::new` is the only
// way in and it enforces this.

use serde::Serialize;

use crate::domain::error::DatasetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Name from the `@RELATION` directive, if the source had one
    relation: Option<String>,
    columns:  Vec<String>,
    rows:     Vec<Vec<String>>,
}

impl Table {
    /// Build a table, rejecting any row whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DatasetError::RowWidth {
                row:      i + 1,
                expected: columns.len(),
                found:    row.len(),
            });
        }

        Ok(Self { relation: None, columns, rows })
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Shape as (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.width())
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::MissingColumn { column: name.to_string() })
    }

    /// All values of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, DatasetError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Copy the rows at `indices`, in that order, into a new table.
    /// Callers pass indices produced from `0..self.len()`.
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            relation: self.relation.clone(),
            columns:  self.columns.clone(),
            rows:     indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// The first `n` rows (or fewer if the table is shorter).
    pub fn head(&self, n: usize) -> Table {
        let n = n.min(self.len());
        let indices: Vec<usize> = (0..n).collect();
        self.take(&indices)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Table {
        Table::new(
            strings(&["duration", "protocol_type", "class"]),
            vec![
                strings(&["0", "tcp", "normal"]),
                strings(&["2", "udp", "anomaly"]),
                strings(&["0", "icmp", "normal"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_shape() {
        assert_eq!(sample().shape(), (3, 3));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Table::new(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3"])],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "row 2: expected 2 values, found 1");

        match err {
            DatasetError::RowWidth { row, expected, found } => {
                assert_eq!((row, expected, found), (2, 2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_lookup() {
        let t = sample();
        assert_eq!(t.column("protocol_type").unwrap(), vec!["tcp", "udp", "icmp"]);
        assert!(matches!(
            t.column("service"),
            Err(DatasetError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_take_keeps_order_and_header() {
        let t = sample().with_relation("KDDTrain");
        let sub = t.take(&[2, 0]);
        assert_eq!(sub.columns(), t.columns());
        assert_eq!(sub.relation(), Some("KDDTrain"));
        assert_eq!(sub.rows()[0][1], "icmp");
        assert_eq!(sub.rows()[1][1], "tcp");
    }

    #[test]
    fn test_head_clamps() {
        let t = sample();
        assert_eq!(t.head(2).len(), 2);
        assert_eq!(t.head(10).len(), 3);
    }
}
