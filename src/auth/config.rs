//! Persisted JSON configuration, the single source of truth for all
//! authorization state.
//!
//! The document lives at `<installDir>/Spotr/config.json`. A missing file
//! is an empty mapping, never an error. Every mutation goes through
//! [`ConfigStore::set`] and is flushed with [`ConfigStore::persist`]; there
//! is no in-memory-only staging.

use std::path::{Path, PathBuf};

use log::error;
use serde_json::{Map, Value};

use super::error::AuthError;

/// Current bearer access token for Spotify requests.
pub const KEY_ACCESS_TOKEN: &str = "key";
/// Long-lived Spotify refresh token.
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
/// Cached Basic-auth credential blob (base64 of `client_id:client_secret`).
pub const KEY_BASIC_CREDENTIALS: &str = "base_64";
/// Static Genius access token pasted by the user.
pub const KEY_GENIUS_TOKEN: &str = "genius_access_token";

/// String-keyed configuration document with write-through persistence.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl ConfigStore {
    /// Load the configuration at `path`. A missing file yields an empty
    /// store; an unreadable or unparsable file is an error rather than a
    /// silently discarded document.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(key.to_string(), Value::String(value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flush the full document to disk as pretty-printed JSON, overwriting
    /// the file. Failures are logged and swallowed; authorization steps do
    /// not abort on a write error.
    pub fn persist(&self) {
        if let Err(err) = self.try_persist() {
            error!(
                "failed to write config to {}: {err}",
                self.path.display()
            );
        }
    }

    fn try_persist(&self) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AuthError::Io(e.to_string()))?;
        }
        let serialized = serde_json::to_string_pretty(&Value::Object(self.values.clone()))?;
        std::fs::write(&self.path, serialized).map_err(|e| AuthError::Io(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::load(dir.path().join("config.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn set_persist_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Spotr").join("config.json");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set(KEY_ACCESS_TOKEN, "tok");
        store.set(KEY_REFRESH_TOKEN, "ref");
        store.persist();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.get(KEY_ACCESS_TOKEN), Some("tok"));
        assert_eq!(reloaded.get(KEY_REFRESH_TOKEN), Some("ref"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            ConfigStore::load(&path),
            Err(AuthError::Serialization(_))
        ));
    }
}
