use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adapters::stores::memory_store::{MemoryEntityStore, StoredEntity, Tables};
use crate::core::errors::{Result, TrackerError};
use crate::core::traits::entity_store::Collection;

/// Entity store persisted as a single JSON document.
///
/// Rows live in a `MemoryEntityStore`; after every successful mutation the
/// whole document is rewritten through a temp file and renamed into place,
/// so a crash never leaves a half-written `data.json`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryEntityStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self> {
        let tables = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Tables::default()
            } else {
                serde_json::from_str(&content).map_err(|e| TrackerError::StoreError {
                    detail: format!("Malformed data file {}: {e}", path.display()),
                })?
            }
        } else {
            Tables::default()
        };

        Ok(Self {
            path,
            inner: MemoryEntityStore::from_tables(tables),
        })
    }

    fn persist(&self) -> Result<()> {
        write_atomic(&self.path, &self.inner.tables()).map_err(|e| TrackerError::StoreError {
            detail: format!("Cannot write {}: {e}", self.path.display()),
        })
    }
}

/// Serialize `value` as pretty JSON and move it into `path` in one rename.
pub(crate) fn write_atomic<T: serde::Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    writeln!(tmp, "{json}")?;
    tmp.persist(path)?;
    Ok(())
}

impl<T: StoredEntity> Collection<T> for JsonFileStore {
    fn create(&self, fields: T) -> Result<T> {
        let created = Collection::<T>::create(&self.inner, fields)?;
        self.persist()?;
        Ok(created)
    }

    fn update(&self, id: &str, fields: T) -> Result<Option<T>> {
        let updated = Collection::<T>::update(&self.inner, id, fields)?;
        if updated.is_some() {
            self.persist()?;
        }
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let deleted = Collection::<T>::delete(&self.inner, id)?;
        if deleted {
            self.persist()?;
        }
        Ok(deleted)
    }

    fn get(&self, id: &str) -> Result<Option<T>> {
        Collection::<T>::get(&self.inner, id)
    }

    fn list(&self) -> Result<Vec<T>> {
        Collection::<T>::list(&self.inner)
    }
}
