// ABOUTME: Persisted client state for the command-line client
// ABOUTME: Session, theme and display language stored as one JSON document

use serde::{Deserialize, Serialize};
use sleep_core::User;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientStateError {
    #[error("Failed to access client state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize client state: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(rename = "projectSleepUser", default, skip_serializing_if = "Option::is_none")]
    pub session: Option<User>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            session: None,
            theme: Theme::default(),
            language: default_language(),
        }
    }
}

impl ClientState {
    /// Load state from `path`. A missing file is a fresh client; an
    /// unreadable document is discarded with a warning.
    pub fn load(path: &Path) -> Result<Self, ClientStateError> {
        if !path.exists() {
            debug!("No client state at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ClientStateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!("Ignoring corrupt client state {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientStateError> {
        let io_err = |source| ClientStateError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)?;
        debug!("Saved client state to {}", path.display());
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn logout(&mut self) -> Option<User> {
        self.session.take()
    }
}
