//! Garment persistence gateway.
//!
//! Storage is a single JSON file holding the whole garment collection as an
//! array, read-modify-written as a unit on every save. There is no
//! concurrency control: concurrent saves to the same id are last-write-wins,
//! which is a documented limitation of this store, not a bug.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::garment::Garment;

/// Failure talking to the garment store. Recoverable: surface to the user as
/// a retryable notification.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not read the garments database")]
    Read(#[source] io::Error),

    #[error("could not write to the garments database")]
    Write(#[source] io::Error),

    #[error("the garments database is corrupted")]
    Corrupted(#[from] serde_json::Error),
}

/// Load/save access to garments by identifier.
pub trait GarmentRepository {
    /// Fetches a garment by id, `None` when no record exists.
    fn get(&self, id: &str) -> Result<Option<Garment>, RepositoryError>;

    /// Lists every stored garment.
    fn list(&self) -> Result<Vec<Garment>, RepositoryError>;

    /// Persists a garment. A garment whose id is not in the store (drafts
    /// included) is assigned a fresh permanent id; an existing id is
    /// replaced in place. Returns the record as stored.
    fn save(&self, garment: Garment) -> Result<Garment, RepositoryError>;
}

/// File-backed repository: one JSON array of garment records.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection. A missing file materializes as an empty
    /// collection and is created on the spot.
    fn read_all(&self) -> Result<Vec<Garment>, RepositoryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.write_all(&[])?;
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(path = %self.path.display(), %err, "failed to read garments database");
                return Err(RepositoryError::Read(err));
            }
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, garments: &[Garment]) -> Result<(), RepositoryError> {
        let data = serde_json::to_string_pretty(garments)?;
        fs::write(&self.path, data).map_err(|err| {
            error!(path = %self.path.display(), %err, "failed to write garments database");
            RepositoryError::Write(err)
        })
    }
}

impl GarmentRepository for JsonFileRepository {
    fn get(&self, id: &str) -> Result<Option<Garment>, RepositoryError> {
        Ok(self.read_all()?.into_iter().find(|g| g.id == id))
    }

    fn list(&self) -> Result<Vec<Garment>, RepositoryError> {
        self.read_all()
    }

    fn save(&self, mut garment: Garment) -> Result<Garment, RepositoryError> {
        let mut garments = self.read_all()?;
        match garments.iter_mut().find(|g| g.id == garment.id) {
            Some(existing) => *existing = garment.clone(),
            None => {
                garment.id = Uuid::new_v4().to_string();
                garments.push(garment.clone());
            }
        }
        self.write_all(&garments)?;
        Ok(garment)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn repo_in(dir: &tempfile::TempDir) -> JsonFileRepository {
        JsonFileRepository::new(dir.path().join("garments.json"))
    }

    #[test]
    fn missing_file_materializes_as_empty_collection() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);

        assert_eq!(repo.list().unwrap(), vec![]);
        // The file is created so subsequent writes can read-modify-write it.
        assert!(repo.path().exists());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
    }

    #[test]
    fn first_save_assigns_permanent_id() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);

        let draft = Garment::draft();
        let saved = repo.save(draft.clone()).unwrap();

        assert!(!saved.is_draft());
        assert_ne!(saved.id, draft.id);
        assert_eq!(saved.name, draft.name);
        assert_eq!(repo.get(&saved.id).unwrap(), Some(saved));
    }

    #[test]
    fn save_with_known_id_replaces_in_place() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);

        let saved = repo.save(Garment::draft()).unwrap();
        let mut edited = saved.clone();
        edited.name = "Velvet Leotard".into();
        edited.base_price = 35.0;

        let resaved = repo.save(edited.clone()).unwrap();
        assert_eq!(resaved.id, saved.id);
        assert_eq!(repo.list().unwrap(), vec![edited]);
    }

    #[test]
    fn unknown_id_is_treated_as_new_record() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);

        let mut garment = Garment::new("never-stored", "Import", 10.0);
        garment = repo.save(garment).unwrap();
        assert_ne!(garment.id, "never-stored");
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);
        assert_eq!(repo.get("nope").unwrap(), None);
    }

    #[test]
    fn corrupted_database_reports_error() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);
        fs::write(repo.path(), "{ not json").unwrap();

        assert!(matches!(repo.list(), Err(RepositoryError::Corrupted(_))));
    }

    #[test]
    fn collection_survives_multiple_saves() {
        let dir = tempdir().unwrap();
        let repo = repo_in(&dir);

        let a = repo.save(Garment::new(crate::garment::DRAFT_ID, "A", 10.0)).unwrap();
        let b = repo.save(Garment::new(crate::garment::DRAFT_ID, "B", 12.0)).unwrap();
        assert_ne!(a.id, b.id);

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
