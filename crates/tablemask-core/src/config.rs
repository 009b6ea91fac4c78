//! Configuration and salt loading.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable that supplies the salt directly.
pub const SALT_ENV: &str = "TABLEMASK_SALT";

/// The process-wide secret mixed into every digest.
///
/// Loaded once at startup and never mutated afterwards. `Debug` redacts the
/// value so it cannot leak through logs or error messages.
#[derive(Clone)]
pub struct Salt(String);

impl Salt {
    /// Wrap a salt value. Empty salts are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::Config("salt must not be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

/// Shape of `secrets.json` in the data directory.
#[derive(Deserialize)]
struct SecretsFile {
    salt: String,
}

/// Top-level TableMask configuration.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// HTTP server port.
    pub port: u16,
    /// Secret salt for the hasher.
    pub salt: Salt,
}

impl MaskConfig {
    /// Create configuration from environment and the data directory.
    ///
    /// The salt comes from `TABLEMASK_SALT` if set, otherwise from the
    /// `"salt"` key of `<data_dir>/secrets.json`. A missing or empty salt is
    /// a hard configuration error — the service must not start without one.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8099);

        let salt = load_salt(data_dir.as_ref())?;

        Ok(Self { port, salt })
    }
}

fn load_salt(data_dir: &Path) -> Result<Salt> {
    if let Ok(value) = std::env::var(SALT_ENV) {
        return Salt::new(value);
    }

    let secrets_path = data_dir.join("secrets.json");
    if !secrets_path.exists() {
        return Err(Error::Config(format!(
            "no salt configured: set {} or provide {}",
            SALT_ENV,
            secrets_path.display()
        )));
    }

    let data = std::fs::read_to_string(&secrets_path)?;
    let secrets: SecretsFile = serde_json::from_str(&data)?;
    Salt::new(secrets.salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_salt_rejected() {
        assert!(Salt::new("").is_err());
        assert!(Salt::new("pepper").is_ok());
    }

    #[test]
    fn test_salt_debug_redacted() {
        let salt = Salt::new("pepper").unwrap();
        let printed = format!("{:?}", salt);
        assert!(!printed.contains("pepper"));
    }

    #[test]
    fn test_salt_from_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("secrets.json"),
            r#"{ "salt": "pepper" }"#,
        )
        .unwrap();

        let salt = load_salt(dir.path()).unwrap();
        assert_eq!(salt.as_str(), "pepper");
    }

    #[test]
    fn test_missing_salt_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_salt(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
