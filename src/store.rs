//! Snapshot persistence contract with in-memory and JSON-directory implementations.

use crate::models::{Tournament, TournamentError, TournamentId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Where tournament snapshots live between calls.
///
/// `save` replaces the whole snapshot; readers never observe a partial update.
pub trait SnapshotStore {
    /// `Ok(None)` when no tournament is stored under `id`.
    fn load(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError>;
    fn save(&self, tournament: &Tournament) -> Result<(), TournamentError>;
}

/// In-memory state: tournaments by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, TournamentError> {
        let g = self.tournaments.read().map_err(|_| lock_error())?;
        Ok(g.len())
    }

    pub fn is_empty(&self) -> Result<bool, TournamentError> {
        Ok(self.len()? == 0)
    }
}

fn lock_error() -> TournamentError {
    TournamentError::Storage("lock error".to_string())
}

fn storage_error(e: impl std::fmt::Display) -> TournamentError {
    TournamentError::Storage(e.to_string())
}

impl SnapshotStore for MemoryStore {
    fn load(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        let g = self.tournaments.read().map_err(|_| lock_error())?;
        Ok(g.get(&id).cloned())
    }

    fn save(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        let mut g = self.tournaments.write().map_err(|_| lock_error())?;
        g.insert(tournament.id, tournament.clone());
        Ok(())
    }
}

/// Snapshots stored as `<dir>/<id>.json`, replaced via write-then-rename.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl SnapshotStore for JsonDirStore {
    fn load(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        match std::fs::read_to_string(self.path(id)) {
            Ok(text) => serde_json::from_str(&text).map(Some).map_err(storage_error),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    fn save(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        std::fs::create_dir_all(&self.dir).map_err(storage_error)?;
        let path = self.path(tournament.id);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(tournament).map_err(storage_error)?;
        std::fs::write(&tmp, text).map_err(storage_error)?;
        std::fs::rename(&tmp, &path).map_err(storage_error)
    }
}
