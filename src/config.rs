// Runtime configuration
// Filesystem locations come from the environment; the header reference
// file is re-read on every validating request so edits take effect
// immediately, at the cost of repeated I/O.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the header reference file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read header reference file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse header reference file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reference values for header comparisons, persisted as JSON
///
/// The file holds `{"referer": "<string>"}` and is the source of truth for
/// the referer guard and the `/headers/` route. There is no in-memory copy.
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderReferenceConfig {
    pub referer: String,
}

/// Loads the header reference file
///
/// Called on every request that needs it. A missing or corrupt file is not
/// recoverable here - the error propagates to the caller and surfaces as a
/// server error.
pub fn load_reference(path: &Path) -> Result<HeaderReferenceConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Shared application state passed to every handler
///
/// Holds filesystem locations only; no mutable in-process state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Path of the header reference JSON file
    pub settings_path: PathBuf,
    /// Directory served by the file download route
    pub public_dir: PathBuf,
    /// Directory receiving uploaded files
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Builds state from environment variables, with defaults
    ///
    /// * `SETTINGS_PATH` - header reference file (default `settings/headers.json`)
    /// * `PUBLIC_DIR` - download directory (default `public`)
    /// * `UPLOAD_DIR` - upload directory (default `uploads`)
    pub fn from_env() -> Self {
        Self {
            settings_path: env_path("SETTINGS_PATH", "settings/headers.json"),
            public_dir: env_path("PUBLIC_DIR", "public"),
            upload_dir: env_path("UPLOAD_DIR", "uploads"),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| {
        tracing::warn!("{} not set, using default {}", var, default);
        PathBuf::from(default)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("headers-{}.json", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_referer_value() {
        let path = temp_file(r#"{"referer": "https://example.com"}"#);
        let config = load_reference(&path).unwrap();
        assert_eq!(config.referer, "https://example.com");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("does-not-exist-headers.json");
        let err = load_reference(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let path = temp_file("not json at all");
        let err = load_reference(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn edits_are_visible_on_next_load() {
        let path = temp_file(r#"{"referer": "first"}"#);
        assert_eq!(load_reference(&path).unwrap().referer, "first");

        fs::write(&path, r#"{"referer": "second"}"#).unwrap();
        assert_eq!(load_reference(&path).unwrap().referer, "second");
        fs::remove_file(path).unwrap();
    }
}
