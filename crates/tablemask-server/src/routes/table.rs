//! Table routes — upload, inspect, anonymize, download.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use tablemask_anon::{anonymize, Table};

use crate::state::{AppState, MaskResult, Session};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/table", get(table_summary))
        .route("/table/upload", post(upload_table))
        .route("/table/anonymize", post(anonymize_table))
        .route("/table/download/hashed", get(download_hashed))
        .route("/table/download/comparison", get(download_comparison))
}

// ---------------------------------------------------------------
// Request types
// ---------------------------------------------------------------

#[derive(serde::Deserialize)]
struct AnonymizeBody {
    columns: Vec<String>,
}

/// How many rows the summary endpoint previews.
const PREVIEW_ROWS: usize = 20;

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

/// POST /api/table/upload — upload a CSV (multipart), replacing any
/// previous session. A bad upload leaves the existing session untouched.
async fn upload_table(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        let filename = match field.file_name() {
            Some(name) => sanitize_filename(name),
            None => continue,
        };

        if !has_supported_extension(&filename) {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": format!("Unsupported file type: {} (expected .csv or .txt)", filename),
                })),
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": format!("Read failed: {}", e) })),
                );
            }
        };

        let table = match Table::from_csv(&bytes) {
            Ok(table) => table,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": e.to_string() })),
                );
            }
        };

        let columns = table.columns().to_vec();
        let rows = table.row_count();

        info!("Loaded {} ({} rows, {} columns)", filename, rows, columns.len());

        *state.session.write() = Some(Session {
            filename: filename.clone(),
            uploaded_at: chrono::Utc::now(),
            table,
            result: None,
        });

        return (
            StatusCode::OK,
            Json(serde_json::json!({
                "filename": filename,
                "columns": columns,
                "rows": rows,
            })),
        );
    }

    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "No file field in upload" })),
    )
}

/// GET /api/table — summary of the currently loaded table.
async fn table_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read();

    match session.as_ref() {
        Some(session) => {
            let preview: Vec<_> = session.table.rows().iter().take(PREVIEW_ROWS).collect();

            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "filename": session.filename,
                    "uploadedAt": session.uploaded_at.to_rfc3339(),
                    "columns": session.table.columns(),
                    "rows": session.table.row_count(),
                    "preview": preview,
                    "resultReady": session.result.is_some(),
                    "hashedColumns": session.result.as_ref().map(|r| r.selection.clone()),
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "No table loaded" })),
        ),
    }
}

/// POST /api/table/anonymize — hash the selected columns of the loaded
/// table and store both CSV artifacts in the session.
async fn anonymize_table(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnonymizeBody>,
) -> impl IntoResponse {
    let mut session = state.session.write();
    let session = match session.as_mut() {
        Some(session) => session,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "No table loaded" })),
            );
        }
    };

    // Degenerate tables carry nothing worth anonymizing.
    if session.table.row_count() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Table needs at least two rows" })),
        );
    }

    let output = match anonymize(&session.table, &body.columns, &state.hasher) {
        Ok(output) => output,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };

    let hashed_csv = match output.anonymized.to_csv() {
        Ok(csv) => csv,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };
    let comparison_csv = match output.comparison.to_csv() {
        Ok(csv) => csv,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };

    info!(
        "Anonymized {} columns over {} rows",
        body.columns.len(),
        session.table.row_count()
    );

    session.result = Some(MaskResult {
        selection: body.columns.clone(),
        hashed_csv,
        comparison_csv,
    });

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "hashedColumns": body.columns,
            "rows": session.table.row_count(),
            "downloads": {
                "hashed": "/api/table/download/hashed",
                "comparison": "/api/table/download/comparison",
            },
        })),
    )
}

/// GET /api/table/download/hashed — the anonymized table as
/// `input_hashed.csv`.
async fn download_hashed(State(state): State<Arc<AppState>>) -> Response {
    download(&state, "input_hashed.csv", |r| r.hashed_csv.clone())
}

/// GET /api/table/download/comparison — the audit table as
/// `comparison.csv`.
async fn download_comparison(State(state): State<Arc<AppState>>) -> Response {
    download(&state, "comparison.csv", |r| r.comparison_csv.clone())
}

fn download(state: &AppState, filename: &str, pick: impl Fn(&MaskResult) -> Vec<u8>) -> Response {
    let session = state.session.read();

    match session.as_ref().and_then(|s| s.result.as_ref()) {
        Some(result) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            pick(result),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "No anonymized data available" })),
        )
            .into_response(),
    }
}

// ---------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------

/// Strip any directory components from an uploaded filename.
fn sanitize_filename(name: &str) -> String {
    let name = name.replace('/', "").replace('\\', "").replace("..", "");

    std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

fn has_supported_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".txt")
}
