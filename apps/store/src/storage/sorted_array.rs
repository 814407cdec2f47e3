use crate::errors::StorageError;
use crate::models::Resume;
use crate::storage::array::MAX_SIZE;
use crate::storage::{Backend, StorageResult};

/// Binary-search result for an id: `Ok(index)` when present, `Err(insertion point)` otherwise.
#[derive(Debug, Clone)]
pub struct SearchKey {
    id: String,
    found: Result<usize, usize>,
}

impl SearchKey {
    fn index(&self) -> StorageResult<usize> {
        self.found
            .map_err(|_| StorageError::NotFound(self.id.clone()))
    }
}

/// Fixed-capacity array kept sorted by id.
/// O(log n) lookup; insert and delete shift the tail.
pub struct SortedArrayBackend {
    resumes: Vec<Resume>,
    capacity: usize,
}

impl SortedArrayBackend {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SortedArrayBackend {
            resumes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SortedArrayBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SortedArrayBackend {
    type Key = SearchKey;

    fn resolve_key(&self, id: &str) -> SearchKey {
        SearchKey {
            id: id.to_string(),
            found: self.resumes.binary_search_by(|r| r.id().cmp(id)),
        }
    }

    fn key_exists(&self, key: &SearchKey) -> StorageResult<bool> {
        Ok(key.found.is_ok())
    }

    fn read_at(&self, key: &SearchKey) -> StorageResult<Resume> {
        Ok(self.resumes[key.index()?].clone())
    }

    fn insert_at(&mut self, key: SearchKey, resume: Resume) -> StorageResult<()> {
        if self.resumes.len() >= self.capacity {
            return Err(StorageError::StorageFull {
                capacity: self.capacity,
            });
        }
        match key.found {
            Err(pos) => {
                self.resumes.insert(pos, resume);
                Ok(())
            }
            Ok(_) => Err(StorageError::AlreadyExists(key.id)),
        }
    }

    fn write_at(&mut self, key: &SearchKey, resume: Resume) -> StorageResult<()> {
        let index = key.index()?;
        self.resumes[index] = resume;
        Ok(())
    }

    fn delete_at(&mut self, key: SearchKey) -> StorageResult<()> {
        self.resumes.remove(key.index()?);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ResumeStorage, Storage};

    #[test]
    fn test_records_stay_sorted_by_id() {
        let storage = Storage::new(SortedArrayBackend::with_capacity(8));
        for id in ["m", "c", "x", "a"] {
            storage.save(Resume::with_id(id, "Same Name")).unwrap();
        }
        storage.delete("c").unwrap();
        let ids: Vec<_> = storage
            .get_all()
            .unwrap()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["a", "m", "x"]);
    }

    #[test]
    fn test_resolve_key_insertion_point() {
        let mut backend = SortedArrayBackend::with_capacity(4);
        let key = backend.resolve_key("b");
        backend.insert_at(key, Resume::with_id("b", "B")).unwrap();
        let key = backend.resolve_key("a");
        assert!(matches!(key.found, Err(0)));
        let key = backend.resolve_key("c");
        assert!(matches!(key.found, Err(1)));
        let key = backend.resolve_key("b");
        assert!(matches!(key.found, Ok(0)));
    }
}
