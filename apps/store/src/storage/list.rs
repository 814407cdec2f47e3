use crate::models::Resume;
use crate::storage::array::Slot;
use crate::storage::{Backend, StorageResult};

/// Unbounded list storage addressed by index.
#[derive(Default)]
pub struct ListBackend {
    resumes: Vec<Resume>,
}

impl ListBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for ListBackend {
    type Key = Slot;

    fn resolve_key(&self, id: &str) -> Slot {
        Slot::new(id, self.resumes.iter().position(|r| r.id() == id))
    }

    fn key_exists(&self, key: &Slot) -> StorageResult<bool> {
        Ok(key.index().is_ok())
    }

    fn read_at(&self, key: &Slot) -> StorageResult<Resume> {
        Ok(self.resumes[key.index()?].clone())
    }

    fn insert_at(&mut self, _key: Slot, resume: Resume) -> StorageResult<()> {
        self.resumes.push(resume);
        Ok(())
    }

    fn write_at(&mut self, key: &Slot, resume: Resume) -> StorageResult<()> {
        let index = key.index()?;
        self.resumes[index] = resume;
        Ok(())
    }

    fn delete_at(&mut self, key: Slot) -> StorageResult<()> {
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
