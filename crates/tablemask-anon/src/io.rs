//! CSV boundary: decode uploaded bytes into a [`Table`] and render tables
//! back to comma-separated text.

use tablemask_core::{Error, Result};

use crate::table::Table;

impl Table {
    /// Parse UTF-8 comma-separated text with a header line.
    ///
    /// Fully-empty rows (every field blank after trimming) are dropped —
    /// there is nothing in them to anonymize. Rows whose width differs from
    /// the header are rejected.
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(Error::Csv("missing header row".into()));
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::Csv(e.to_string()))?;
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            if record.len() != headers.len() {
                // Line number counts the header line.
                return Err(Error::Csv(format!(
                    "row {} has {} fields, expected {}",
                    i + 2,
                    record.len(),
                    headers.len()
                )));
            }
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Table::new(headers, rows)
    }

    /// Render as UTF-8 comma-separated text: header line plus one line per
    /// row. A table with no columns renders as an empty payload.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        if self.columns().is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.columns())
            .map_err(|e| Error::Csv(e.to_string()))?;
        for row in self.rows() {
            writer
                .write_record(row)
                .map_err(|e| Error::Csv(e.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| Error::Csv(e.to_string()))
    }
}
