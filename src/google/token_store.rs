//! Persists the Google credential record as a single JSON file.
//!
//! The file uses the same shape as Google's "authorized user" files
//! so it can be inspected or reused by other tooling:
//!
//! ```json
//! {"token": "...", "refresh_token": "...", "token_uri": "...",
//!  "client_id": "...", "client_secret": "...", "scopes": ["..."],
//!  "expiry": "2026-02-15T19:00:00Z"}
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("No credentials stored at {0}")]
    NotFound(PathBuf),
    #[error("Credentials at {path} could not be parsed: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to access credentials at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "token")]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(rename = "token_uri")]
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(rename = "scopes", default)]
    pub granted_scopes: BTreeSet<String>,
    /// When the access token stops working. Records without one are
    /// treated as unexpired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| Utc::now() >= expiry)
    }

    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.is_expired()
    }
}

#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CredentialRecord, TokenStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(TokenStoreError::NotFound(self.path.clone()));
            }
            Err(source) => {
                return Err(TokenStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| TokenStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the stored record. Each save writes its own temp file
    /// next to the target and renames it into place, so readers never
    /// see a partial file and concurrent saves resolve to last write wins.
    pub fn save(&self, record: &CredentialRecord) -> Result<(), TokenStoreError> {
        let io_err = |source| TokenStoreError::Io {
            path: self.path.clone(),
            source,
        };

        let contents = serde_json::to_string_pretty(record)
            .map_err(|err| io_err(io::Error::other(err)))?;

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        // Created owner-only (0600 on unix) since the file holds OAuth tokens
        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(contents.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;

        tmp.persist(&self.path).map_err(|err| io_err(err.error))?;
        Ok(())
    }

    pub fn delete(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
