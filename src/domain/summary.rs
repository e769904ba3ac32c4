// ============================================================
// Layer 3 — Table Summary
// ============================================================
// A per-column overview printed after loading and after each
// split: how many values are present and how many distinct.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::table::Table;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name:     String,
    /// Values that are not the empty string
    pub non_empty: usize,
    pub distinct: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub rows:    usize,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn of(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = table.rows().iter().map(|row| row[idx].as_str());
                let non_empty = values.clone().filter(|v| !v.is_empty()).count();
                let distinct  = values.collect::<HashSet<_>>().len();
                ColumnInfo { name: name.clone(), non_empty, distinct }
            })
            .collect();

        Self { rows: table.len(), columns }
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rows x {} columns", self.rows, self.columns.len())?;
        let width = self.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for (i, c) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}  {:<width$}  {:>8} non-empty  {:>6} distinct",
                i,
                c.name,
                c.non_empty,
                c.distinct,
                width = width,
            )?;
        }
        Ok(())
    }
}
