//! Persistence facade: config-file location, async load/save, and the
//! latest-load-wins guard.
//!
//! The engine is optimistic: in-memory state is updated first and persistence
//! follows. Saves that fail propagate to the caller and never roll anything
//! back. Loads are tagged with a monotonically increasing request id so that
//! rapid directory switching cannot let a stale completion overwrite state
//! written by a more recent one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::CatalogDocument;

/// Default document filename when the configured path names none.
pub const DEFAULT_CONFIG_FILENAME: &str = "image_categories.json";

/// Errors from the persistence facade.
#[derive(Debug, Error)]
pub enum SyncError {
    /// I/O error reading or writing the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the document for a browsed directory lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Directory holding the document.
    pub directory: String,
    /// Filename within `directory`; `None` falls back to
    /// [`DEFAULT_CONFIG_FILENAME`].
    pub filename: Option<String>,
}

impl ConfigLocation {
    /// Derive the document location from a user-configured path.
    ///
    /// Backslashes are normalized to forward slashes first. An empty value
    /// means "default file in the browsed directory"; a value without any
    /// slash is a bare filename within the browsed directory; otherwise the
    /// value splits at its last slash, with the directory part falling back
    /// to the browsed directory when it is empty or `.`, and the filename
    /// part left unset when it is empty (trailing slash).
    pub fn derive(configured: &str, browse_dir: &str) -> Self {
        let normalized = configured.replace('\\', "/");
        if normalized.is_empty() {
            return Self {
                directory: browse_dir.to_string(),
                filename: None,
            };
        }
        match normalized.rsplit_once('/') {
            None => Self {
                directory: browse_dir.to_string(),
                filename: Some(normalized),
            },
            Some((prefix, suffix)) => {
                let directory = if prefix.is_empty() || prefix == "." {
                    browse_dir.to_string()
                } else {
                    prefix.to_string()
                };
                let filename = if suffix.is_empty() {
                    None
                } else {
                    Some(suffix.to_string())
                };
                Self {
                    directory,
                    filename,
                }
            }
        }
    }

    /// Full path of the document file.
    pub fn file_path(&self) -> PathBuf {
        Path::new(&self.directory)
            .join(self.filename.as_deref().unwrap_or(DEFAULT_CONFIG_FILENAME))
    }
}

/// Load/save calls plus the request-id guard for out-of-order completions.
#[derive(Debug, Default)]
pub struct ConfigSync {
    next_request: u64,
    applied_request: u64,
}

impl ConfigSync {
    /// Create a facade with no loads issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request id for a load about to start.
    pub fn begin_load(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    /// Whether a completed load may be applied. A request older than the
    /// newest applied one is stale and must be discarded.
    pub fn try_apply(&mut self, request: u64) -> bool {
        if request <= self.applied_request {
            log::debug!(
                "Discarding stale load completion {} (newest applied: {})",
                request,
                self.applied_request
            );
            return false;
        }
        self.applied_request = request;
        true
    }

    /// Read the document at `location`.
    ///
    /// A missing file is not an error: it loads as `Ok(None)`, meaning "no
    /// assignments yet". I/O and parse failures are logged and propagated;
    /// the caller reports them and in-memory state stays as-is.
    pub async fn load(&self, location: &ConfigLocation) -> Result<Option<CatalogDocument>, SyncError> {
        let path = location.file_path();
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No category document at {:?}", path);
                return Ok(None);
            }
            Err(e) => {
                log::error!("Failed to read category document {:?}: {}", path, e);
                return Err(e.into());
            }
        };
        match serde_json::from_str(&json) {
            Ok(document) => {
                log::info!("Loaded category document from {:?}", path);
                Ok(Some(document))
            }
            Err(e) => {
                log::error!("Failed to parse category document {:?}: {}", path, e);
                Err(e.into())
            }
        }
    }

    /// Write the document at `location`, creating the directory if needed.
    pub async fn save(
        &self,
        location: &ConfigLocation,
        document: &CatalogDocument,
    ) -> Result<(), SyncError> {
        let path = location.file_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&path, json).await?;
        log::debug!("Saved category document to {:?}", path);
        Ok(())
    }
}
