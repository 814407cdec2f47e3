//! Résumé storage — one policy core over pluggable backends.
//!
//! `Storage<B>` enforces the uniqueness/existence rules once. A `Backend` only
//! knows how to locate, read, write and enumerate records on its medium.
//!
//! Consumers hold an `Arc<dyn ResumeStorage>` built once at startup by `build_storage`.

pub mod array;
pub mod file;
pub mod list;
pub mod map;
pub mod postgres;
pub mod serializer;
pub mod sorted_array;

#[cfg(test)]
mod contract_tests;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::{Config, StorageFormat, StorageKind};
use crate::errors::StorageError;
use crate::models::Resume;

pub use array::{ArrayBackend, MAX_SIZE};
pub use file::FileBackend;
pub use list::ListBackend;
pub use map::MapBackend;
pub use postgres::PostgresBackend;
pub use serializer::{DataStreamSerializer, JsonSerializer, Serializer};
pub use sorted_array::SortedArrayBackend;

pub type StorageResult<T> = Result<T, StorageError>;

// ────────────────────────────────────────────────────────────────────────────
// Contract consumed by callers
// ────────────────────────────────────────────────────────────────────────────

/// The operation set every storage instance offers, independent of backend.
pub trait ResumeStorage: Send + Sync {
    /// Stores a résumé whose id is not present yet.
    fn save(&self, resume: Resume) -> StorageResult<()>;

    fn get(&self, id: &str) -> StorageResult<Resume>;

    /// Replaces the whole stored value for `resume.id()`.
    fn update(&self, resume: Resume) -> StorageResult<()>;

    fn delete(&self, id: &str) -> StorageResult<()>;

    /// Every stored résumé, in no particular order.
    fn get_all(&self) -> StorageResult<Vec<Resume>>;

    /// Every stored résumé ordered by full name, then id.
    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>>;

    fn size(&self) -> StorageResult<usize>;

    fn clear(&self) -> StorageResult<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// Hooks supplied by each backend
// ────────────────────────────────────────────────────────────────────────────

/// Medium-specific primitives. `Key` never leaves the storage module.
///
/// The policy core guarantees `read_at`, `write_at` and `delete_at` only see
/// keys for which `key_exists` returned true, and `insert_at` only keys for
/// which it returned false.
pub trait Backend: Send {
    type Key;

    /// Pure key resolution. Absence is expressed through the key, never an error.
    fn resolve_key(&self, id: &str) -> Self::Key;

    fn key_exists(&self, key: &Self::Key) -> StorageResult<bool>;

    fn read_at(&self, key: &Self::Key) -> StorageResult<Resume>;

    /// Inserts a record for a fresh id. Capacity limits are enforced here.
    fn insert_at(&mut self, key: Self::Key, resume: Resume) -> StorageResult<()>;

    /// Overwrites the record at an existing key.
    fn write_at(&mut self, key: &Self::Key, resume: Resume) -> StorageResult<()>;

    fn delete_at(&mut self, key: Self::Key) -> StorageResult<()>;

    fn enumerate_all(&self) -> StorageResult<Vec<Resume>>;

    fn count(&self) -> StorageResult<usize>;

    fn clear_all(&mut self) -> StorageResult<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// Policy core
// ────────────────────────────────────────────────────────────────────────────

/// Generic policy layer over a backend.
///
/// The backend sits behind one mutex held for the whole operation, so two
/// concurrent `save` calls for the same id cannot both pass the absence check.
pub struct Storage<B> {
    backend: Mutex<B>,
}

impl<B: Backend> Storage<B> {
    pub fn new(backend: B) -> Self {
        Storage {
            backend: Mutex::new(backend),
        }
    }
}

fn absent_key<B: Backend>(backend: &B, id: &str) -> StorageResult<B::Key> {
    let key = backend.resolve_key(id);
    if backend.key_exists(&key)? {
        warn!(id, "resume already exists");
        return Err(StorageError::AlreadyExists(id.to_string()));
    }
    Ok(key)
}

fn existing_key<B: Backend>(backend: &B, id: &str) -> StorageResult<B::Key> {
    let key = backend.resolve_key(id);
    if !backend.key_exists(&key)? {
        warn!(id, "resume not found");
        return Err(StorageError::NotFound(id.to_string()));
    }
    Ok(key)
}

impl<B: Backend> ResumeStorage for Storage<B> {
    fn save(&self, resume: Resume) -> StorageResult<()> {
        let mut backend = self.backend.lock();
        let key = absent_key(&*backend, resume.id())?;
        debug!(id = resume.id(), "saving resume");
        backend.insert_at(key, resume)
    }

    fn get(&self, id: &str) -> StorageResult<Resume> {
        let backend = self.backend.lock();
        let key = existing_key(&*backend, id)?;
        backend.read_at(&key)
    }

    fn update(&self, resume: Resume) -> StorageResult<()> {
        let mut backend = self.backend.lock();
        let key = existing_key(&*backend, resume.id())?;
        debug!(id = resume.id(), "updating resume");
        backend.write_at(&key, resume)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut backend = self.backend.lock();
        let key = existing_key(&*backend, id)?;
        debug!(id, "deleting resume");
        backend.delete_at(key)
    }

    fn get_all(&self) -> StorageResult<Vec<Resume>> {
        self.backend.lock().enumerate_all()
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        let mut resumes = self.backend.lock().enumerate_all()?;
        resumes.sort_unstable();
        Ok(resumes)
    }

    fn size(&self) -> StorageResult<usize> {
        self.backend.lock().count()
    }

    fn clear(&self) -> StorageResult<()> {
        debug!("clearing storage");
        self.backend.lock().clear_all()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Startup wiring
// ────────────────────────────────────────────────────────────────────────────

/// Constructs the configured backend once. Invalid setup is a `Configuration`
/// error and the caller must not continue without storage.
pub fn build_storage(config: &Config) -> StorageResult<Arc<dyn ResumeStorage>> {
    info!("Initializing {} storage", config.storage_kind);

    let storage: Arc<dyn ResumeStorage> = match config.storage_kind {
        StorageKind::Array => Arc::new(Storage::new(ArrayBackend::new())),
        StorageKind::SortedArray => Arc::new(Storage::new(SortedArrayBackend::new())),
        StorageKind::List => Arc::new(Storage::new(ListBackend::new())),
        StorageKind::Map => Arc::new(Storage::new(MapBackend::new())),
        StorageKind::File => {
            let dir = config.storage_dir.as_ref().ok_or_else(|| {
                StorageError::Configuration("file storage needs a directory".to_string())
            })?;
            match config.storage_format {
                StorageFormat::Json => {
                    Arc::new(Storage::new(FileBackend::new(dir, JsonSerializer)?))
                }
                StorageFormat::Data => {
                    Arc::new(Storage::new(FileBackend::new(dir, DataStreamSerializer)?))
                }
            }
        }
        StorageKind::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                StorageError::Configuration("postgres storage needs a database url".to_string())
            })?;
            Arc::new(Storage::new(PostgresBackend::connect(url)?))
        }
    };

    Ok(storage)
}
