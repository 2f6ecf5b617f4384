//! JSON files read and written by the CLI
//!
//! The resource configuration file holds the attributes the user wants.
//! The state file holds what the last operation observed in AWS; it is
//! removed when the resource no longer exists.

use awsconfig_common::{ConfigRecorderConfig, ConfigRecorderState};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failure reading or writing one of the CLI's JSON files
#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize state")]
    Serialize(#[from] serde_json::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StateFileError> {
    let content = fs::read_to_string(path).map_err(|source| StateFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StateFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the desired resource configuration
pub fn load_resource_config(path: &Path) -> Result<ConfigRecorderConfig, StateFileError> {
    read_json(path)
}

/// Load the recorded state. A missing file means no resource is tracked.
pub fn load_state(path: &Path) -> Result<Option<ConfigRecorderState>, StateFileError> {
    if !path.exists() {
        debug!(path = %path.display(), "No state file");
        return Ok(None);
    }
    read_json(path).map(Some)
}

/// Identifier of the tracked resource, or `None` when the state file is
/// missing or records no identifier. Nothing remote is ever touched for an
/// untracked resource.
pub fn tracked_id(path: &Path) -> Result<Option<String>, StateFileError> {
    Ok(load_state(path)?
        .map(|state| state.id)
        .filter(|id| !id.is_empty()))
}

/// Save the recorded state, or remove the file when there is none.
pub fn save_state(path: &Path, state: Option<&ConfigRecorderState>) -> Result<(), StateFileError> {
    let write_err = |source| StateFileError::Write {
        path: path.to_path_buf(),
        source,
    };

    match state {
        Some(state) => {
            let json = serde_json::to_string_pretty(state)?;
            fs::write(path, json + "\n").map_err(write_err)?;
            debug!(path = %path.display(), id = %state.id, "State saved");
        }
        None => match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "State removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(write_err(e)),
        },
    }
    Ok(())
}
