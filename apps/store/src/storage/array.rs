use crate::errors::StorageError;
use crate::models::Resume;
use crate::storage::{Backend, StorageResult};

/// Default capacity of the array backends.
pub const MAX_SIZE: usize = 10_000;

/// Position of an id in an index-addressed backend, or `None` when absent.
#[derive(Debug, Clone)]
pub struct Slot {
    id: String,
    index: Option<usize>,
}

impl Slot {
    pub(crate) fn new(id: &str, index: Option<usize>) -> Self {
        Slot {
            id: id.to_string(),
            index,
        }
    }

    /// The resolved index, or `NotFound` for a key that resolved to nothing.
    pub(crate) fn index(&self) -> StorageResult<usize> {
        self.index
            .ok_or_else(|| StorageError::NotFound(self.id.clone()))
    }
}

/// Fixed-capacity, unordered array storage.
///
/// Lookup is a linear scan. Delete moves the last element into the hole, so it
/// never shifts the tail.
pub struct ArrayBackend {
    resumes: Vec<Resume>,
    capacity: usize,
}

impl ArrayBackend {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArrayBackend {
            resumes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ArrayBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ArrayBackend {
    type Key = Slot;

    fn resolve_key(&self, id: &str) -> Slot {
        Slot::new(id, self.resumes.iter().position(|r| r.id() == id))
    }

    fn key_exists(&self, key: &Slot) -> StorageResult<bool> {
        Ok(key.index.is_some())
    }

    fn read_at(&self, key: &Slot) -> StorageResult<Resume> {
        Ok(self.resumes[key.index()?].clone())
    }

    fn insert_at(&mut self, _key: Slot, resume: Resume) -> StorageResult<()> {
        if self.resumes.len() >= self.capacity {
            return Err(StorageError::StorageFull {
                capacity: self.capacity,
            });
        }
        self.resumes.push(resume);
        Ok(())
    }

    fn write_at(&mut self, key: &Slot, resume: Resume) -> StorageResult<()> {
        let index = key.index()?;
        self.resumes[index] = resume;
        Ok(())
    }

    fn delete_at(&mut self, key: Slot) -> StorageResult<()> {
        self.resumes.swap_remove(key.index()?);
        Ok(())
    }

    fn enumerate_all(&self) -> StorageResult<Vec<Resume>> {
        Ok(self.resumes.clone())
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.resumes.len())
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.resumes.clear();
        Ok(())
    }
}
