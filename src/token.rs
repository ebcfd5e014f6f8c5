use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Access and refresh token pair as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new<A: ToString, R: ToString>(access_token: A, refresh_token: R) -> Self {
        Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        }
    }

    /// Get the auth header for the token
    ///
    /// # Example
    ///
    /// `Bearer 1POdFZRZbvb...qqillRxMr2z`
    pub fn to_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// JSON file holding the single [`TokenPair`] of this process.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached token pair. A missing or unreadable file is not an error, the
    /// service just starts unauthenticated.
    pub fn load(&self) -> Option<TokenPair> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                log::info!("No cached token at {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(err) => {
                log::warn!("Failed to load cached token from {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Overwrite the cached token pair.
    ///
    /// The content goes to a sibling temp file first and is renamed over the target so
    /// a crash never leaves a half written file behind.
    pub fn save(&self, token: &TokenPair) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, serde_json::to_string_pretty(token)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
