use std::collections::HashMap;

use crate::errors::StorageError;
use crate::models::Resume;
use crate::storage::{Backend, StorageResult};

/// Hash map storage keyed directly by id.
#[derive(Default)]
pub struct MapBackend {
    resumes: HashMap<String, Resume>,
}

impl MapBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MapBackend {
    type Key = String;

    fn resolve_key(&self, id: &str) -> String {
        id.to_string()
    }

    fn key_exists(&self, key: &String) -> StorageResult<bool> {
        Ok(self.resumes.contains_key(key))
    }

    fn read_at(&self, key: &String) -> StorageResult<Resume> {
        self.resumes
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }

    fn insert_at(&mut self, key: String, resume: Resume) -> StorageResult<()> {
        self.resumes.insert(key, resume);
        Ok(())
    }

    fn write_at(&mut self, key: &String, resume: Resume) -> StorageResult<()> {
        self.resumes.insert(key.clone(), resume);
        Ok(())
    }

    fn delete_at(&mut self, key: String) -> StorageResult<()> {
        self.resumes
            .remove(&key)
            .map(|_| ())
            .ok_or(StorageError::NotFound(key))
    }

    fn enumerate_all(&self) -> StorageResult<Vec<Resume>> {
        Ok(self.resumes.values().cloned().collect())
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.resumes.len())
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.resumes.clear();
        Ok(())
    }
}
