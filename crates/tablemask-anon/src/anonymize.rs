//! The anonymization transform: hash selected columns, keep the rest.

use tablemask_core::{Error, Result};

use crate::hasher::SaltedHasher;
use crate::table::Table;

/// Suffix distinguishing digest columns in the comparison table.
pub const HASHED_SUFFIX: &str = "_hashed";

/// The two artifacts of one anonymization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizeOutput {
    /// The source table with every selected column replaced by digests.
    pub anonymized: Table,
    /// Audit table: digest columns (`<col>_hashed`) followed by the original
    /// columns, both in selection order, row-aligned with the source.
    pub comparison: Table,
}

/// Replace the selected columns of `table` with salted digests.
///
/// The selection is validated up front: an unknown column name fails the
/// whole operation before any hashing happens. Duplicate names in the
/// selection collapse to their first occurrence. The source table is never
/// modified; an empty selection returns the table unchanged and an empty
/// comparison table.
pub fn anonymize(
    table: &Table,
    selection: &[String],
    hasher: &SaltedHasher,
) -> Result<AnonymizeOutput> {
    // Resolve the whole selection first: all-or-nothing on unknown names.
    let mut selected: Vec<(String, usize)> = Vec::new();
    for name in selection {
        let idx = table
            .column_index(name)
            .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
        if !selected.iter().any(|(n, _)| n == name) {
            selected.push((name.clone(), idx));
        }
    }

    if selected.is_empty() {
        return Ok(AnonymizeOutput {
            anonymized: table.clone(),
            comparison: Table::empty(),
        });
    }

    let mut anonymized = table.clone();
    for (_, idx) in &selected {
        for row in anonymized.rows_mut() {
            row[*idx] = hasher.hash(&row[*idx]);
        }
    }

    // Comparison: digests for all selected columns, then the originals.
    let mut columns = Vec::with_capacity(selected.len() * 2);
    for (name, _) in &selected {
        columns.push(format!("{}{}", name, HASHED_SUFFIX));
    }
    for (name, _) in &selected {
        columns.push(name.clone());
    }

    let mut rows = Vec::with_capacity(table.row_count());
    for i in 0..table.row_count() {
        let mut row = Vec::with_capacity(selected.len() * 2);
        for (_, idx) in &selected {
            row.push(anonymized.rows()[i][*idx].clone());
        }
        for (_, idx) in &selected {
            row.push(table.rows()[i][*idx].clone());
        }
        rows.push(row);
    }

    let comparison = Table::new(columns, rows)?;

    Ok(AnonymizeOutput {
        anonymized,
        comparison,
    })
}
