//! Shared application state.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use tablemask_anon::{SaltedHasher, Table};
use tablemask_core::MaskConfig;

/// One uploaded table and, once the transform has run, its results.
///
/// Uploading a new file replaces the whole session, dropping any previous
/// result with it.
pub struct Session {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub table: Table,
    pub result: Option<MaskResult>,
}

/// The rendered CSV artifacts of the last anonymization run.
pub struct MaskResult {
    pub selection: Vec<String>,
    pub hashed_csv: Vec<u8>,
    pub comparison_csv: Vec<u8>,
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: MaskConfig,
    pub hasher: SaltedHasher,
    pub session: RwLock<Option<Session>>,
}

impl AppState {
    pub fn new(config: MaskConfig) -> Self {
        let hasher = SaltedHasher::new(config.salt.clone());

        Self {
            config,
            hasher,
            session: RwLock::new(None),
        }
    }
}
