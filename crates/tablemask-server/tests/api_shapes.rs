//! API shape and pipeline tests — validates the response shapes the
//! frontend expects and the CSV payloads the download routes serve.
//!
//! The server crate is a binary, so these tests exercise the same library
//! calls the handlers make rather than spinning up an HTTP listener.

use tablemask_anon::{anonymize, SaltedHasher, Table};
use tablemask_core::Salt;

fn hasher() -> SaltedHasher {
    SaltedHasher::new(Salt::new("pepper").unwrap())
}

/// Verify the upload response shape:
/// { filename, columns, rows }
#[test]
fn test_upload_response_shape() {
    let upload_json = serde_json::json!({
        "filename": "people.csv",
        "columns": ["name", "age"],
        "rows": 2,
    });

    assert!(upload_json["filename"].is_string());
    assert!(upload_json["columns"].is_array());
    assert!(upload_json["rows"].is_number());
}

/// Verify the status response shape:
/// { service, tableLoaded, resultReady }
#[test]
fn test_status_response_shape() {
    let status_json = serde_json::json!({
        "service": "tablemask",
        "tableLoaded": false,
        "resultReady": false,
    });

    assert_eq!(status_json["service"], "tablemask");
    assert!(status_json["tableLoaded"].is_boolean());
    assert!(status_json["resultReady"].is_boolean());
}

/// The payloads the download routes serve: upload → anonymize → render.
#[test]
fn test_download_payloads() {
    let table = Table::from_csv(b"name,age\nAlice,30\nBob,25\n").unwrap();
    let h = hasher();

    let output = anonymize(&table, &["name".to_string()], &h).unwrap();

    // input_hashed.csv: same shape as the source, name column digested.
    let hashed = String::from_utf8(output.anonymized.to_csv().unwrap()).unwrap();
    let mut lines = hashed.lines();
    assert_eq!(lines.next(), Some("name,age"));
    assert_eq!(lines.next(), Some(format!("{},30", h.hash("alice")).as_str()));
    assert_eq!(lines.next(), Some(format!("{},25", h.hash("bob")).as_str()));
    assert_eq!(lines.next(), None);

    // comparison.csv: digest columns first, then the originals.
    let comparison = String::from_utf8(output.comparison.to_csv().unwrap()).unwrap();
    let mut lines = comparison.lines();
    assert_eq!(lines.next(), Some("name_hashed,name"));
    assert_eq!(
        lines.next(),
        Some(format!("{},Alice", h.hash("alice")).as_str())
    );
    assert_eq!(lines.next(), Some(format!("{},Bob", h.hash("bob")).as_str()));
}

/// Empty rows in the uploaded file never reach the transform.
#[test]
fn test_upload_drops_empty_rows() {
    let table = Table::from_csv(b"name,age\nAlice,30\n,\nBob,25\n").unwrap();
    assert_eq!(table.row_count(), 2);
}

/// An unknown column in the selection fails without touching the table.
#[test]
fn test_anonymize_unknown_column_is_actionable() {
    let table = Table::from_csv(b"name,age\nAlice,30\nBob,25\n").unwrap();
    let err = anonymize(&table, &["email".to_string()], &hasher()).unwrap_err();
    assert!(err.to_string().contains("email"));
}
