//! In-memory tabular data model.
//!
//! A [`Table`] is an ordered sequence of named columns over row-major text
//! cells. All values are text; the anonymizer hashes the canonical string
//! form of every cell, so no column typing happens anywhere in the core.

use serde::Serialize;

use tablemask_core::{Error, Result};

/// An ordered, column-aligned collection of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, validating that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::Csv(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a named column, in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rectangular_rows_required() {
        let ok = Table::new(
            names(&["a", "b"]),
            vec![names(&["1", "2"]), names(&["3", "4"])],
        );
        assert!(ok.is_ok());

        let ragged = Table::new(names(&["a", "b"]), vec![names(&["1"])]);
        assert!(ragged.is_err());
    }

    #[test]
    fn test_column_lookup() {
        let table = Table::new(
            names(&["name", "age"]),
            vec![names(&["Alice", "30"]), names(&["Bob", "25"])],
        )
        .unwrap();

        assert_eq!(table.column_index("age"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert_eq!(table.column_values("name"), Some(vec!["Alice", "Bob"]));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::empty();
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());
    }
}
