//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crm_storage::EntityStore;

use crate::{CrmError, CrmResult};

/// Which earlier writes a batch's email-uniqueness pre-check can see.
///
/// Either way two items of one batch never both persist with the same
/// email; the mode only decides where the second one is stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchEmailVisibility {
    /// Check against the store and against items accepted earlier in the
    /// same batch. A repeated email is rejected during validation.
    #[default]
    IncludeAccepted,
    /// Check against the store only. A repeated email passes validation and
    /// is rejected by the store's unique constraint at write time.
    CommittedOnly,
}

impl fmt::Display for BatchEmailVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatchEmailVisibility::IncludeAccepted => "include-accepted",
            BatchEmailVisibility::CommittedOnly => "committed-only",
        })
    }
}

impl FromStr for BatchEmailVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "include-accepted" => Ok(BatchEmailVisibility::IncludeAccepted),
            "committed-only" => Ok(BatchEmailVisibility::CommittedOnly),
            other => Err(format!(
                "unknown batch visibility {other:?} (expected include-accepted or committed-only)"
            )),
        }
    }
}

/// Configuration for a [`crate::CrmSchema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    /// SQLite database file. `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,
    pub batch_email_visibility: BatchEmailVisibility,
}

impl CrmConfig {
    /// Loads a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> CrmResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CrmError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CrmResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Opens the store this config points at.
    pub fn open_store(&self) -> CrmResult<EntityStore> {
        let store = match &self.database_path {
            Some(path) => EntityStore::open(path)?,
            None => EntityStore::open_in_memory()?,
        };
        Ok(store)
    }
}
