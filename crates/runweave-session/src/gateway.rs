//! The session's I/O boundary: persistence, export delivery and the
//! destructive-action confirmation prompt all arrive through the traits
//! here, so the session itself never touches a filesystem or a user.

use std::path::{Path, PathBuf};

use thiserror::Error;

use runweave_engine::snapshot::{Snapshot, SnapshotError};

/// Persistence or export failure at the gateway. Never fatal: the
/// session reports it and keeps editing in memory.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Where the working document is kept between runs.
pub trait PersistenceGateway {
    /// The persisted snapshot, or `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<Snapshot>, GatewayError>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), GatewayError>;
}

/// Hands a finished export to the host for delivery, in whatever way
/// the host delivers files.
pub trait ExportGateway {
    fn trigger_download(
        &mut self,
        filename: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError>;
}

/// Asks the user before a destructive action goes ahead.
pub trait ConfirmationGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// In-memory persistence, one JSON slot. The stand-in for browser local
/// storage, and the store tests run against.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `json`, as if a previous run had saved.
    pub fn seeded(json: &str) -> Self {
        Self {
            slot: Some(json.to_string()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl PersistenceGateway for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, GatewayError> {
        match self.slot.as_deref() {
            Some(json) => Ok(Some(Snapshot::from_json(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), GatewayError> {
        self.slot = Some(snapshot.to_json()?);
        Ok(())
    }
}

/// Snapshot persistence in a single JSON file, created on first save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceGateway for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, GatewayError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(Some(Snapshot::from_json(&contents)?))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot).map_err(SnapshotError::from)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
