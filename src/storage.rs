use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::angles::{GeoPoint, Satellite};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What survives a restart: the last observer and the user's own satellites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub observer: Option<GeoPoint>,
    #[serde(default)]
    pub custom_satellites: Vec<Satellite>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        StateStore { path }
    }

    /// Missing file means a fresh session.
    pub fn load(&self) -> Result<SessionState, StorageError> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Written through a sibling temp file, then renamed into place.
    pub fn save(&self, state: &SessionState) -> Result<SessionState, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut stamped = state.clone();
        stamped.saved_at = Some(Utc::now());

        let tmp = temp_path(&self.path);
        std::fs::write(&tmp, serde_json::to_string_pretty(&stamped)?)?;
        std::fs::rename(&tmp, &self.path)?;

        log::debug!("Saved session state to {}", self.path.display());
        Ok(stamped)
    }
}

/// `state.json` -> `state.json.tmp`; never collides with the target.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
