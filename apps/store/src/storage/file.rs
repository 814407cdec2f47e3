use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use crate::errors::StorageError;
use crate::models::Resume;
use crate::storage::serializer::Serializer;
use crate::storage::{Backend, StorageResult};

/// Prefix of the staging files a write goes through before it is renamed into place.
const STAGING_PREFIX: &str = ".staging-";

/// Location of a résumé file. `plain` is false when the id is not a single
/// file name inside the storage directory; such a key never names a record.
#[derive(Debug, Clone)]
pub struct RecordPath {
    path: PathBuf,
    plain: bool,
}

impl RecordPath {
    fn checked(&self) -> StorageResult<&Path> {
        if self.plain {
            Ok(&self.path)
        } else {
            Err(StorageError::io(
                &self.path,
                io::Error::new(io::ErrorKind::InvalidInput, "resume id is not a plain file name"),
            ))
        }
    }
}

/// True when `id` is exactly one normal path component, e.g. not `..`, `a/b` or `""`.
fn is_plain_file_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    let single = matches!(components.next(), Some(Component::Normal(name)) if name == id)
        && components.next().is_none();
    single && !id.starts_with(STAGING_PREFIX)
}

/// One file per résumé inside `directory`. The file name is the id.
///
/// Writes are staged in a temporary file in the same directory and renamed
/// over the target only once complete, so a failed save or update leaves the
/// store as it was. Every file handle is dropped before the primitive returns.
pub struct FileBackend<S> {
    directory: PathBuf,
    serializer: S,
}

impl<S: Serializer> FileBackend<S> {
    /// Validates that `directory` exists, is a directory, and can be listed and written.
    pub fn new(directory: impl Into<PathBuf>, serializer: S) -> StorageResult<Self> {
        let directory = directory.into();
        let shown = directory.display();

        let metadata = fs::metadata(&directory)
            .map_err(|e| StorageError::Configuration(format!("{shown} is not accessible: {e}")))?;
        if !metadata.is_dir() {
            return Err(StorageError::Configuration(format!("{shown} is not a directory")));
        }
        fs::read_dir(&directory)
            .map_err(|e| StorageError::Configuration(format!("{shown} is not readable: {e}")))?;
        tempfile::tempfile_in(&directory)
            .map_err(|e| StorageError::Configuration(format!("{shown} is not writable: {e}")))?;

        info!("File storage ready at {shown}");
        Ok(FileBackend {
            directory,
            serializer,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Serializes `resume` into a staging file next to `target`.
    fn stage(&self, target: &Path, resume: &Resume) -> StorageResult<NamedTempFile> {
        let mut staged = Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.directory)
            .map_err(|e| StorageError::io(&self.directory, e))?;

        let mut writer = BufWriter::new(staged.as_file_mut());
        let written = self
            .serializer
            .write(resume, &mut writer)
            .and_then(|_| writer.flush());
        drop(writer);
        written.map_err(|e| StorageError::io(target, e))?;

        Ok(staged)
    }

    fn read_file(&self, path: &Path) -> StorageResult<Resume> {
        let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
        let mut reader = BufReader::new(file);
        self.serializer
            .read(&mut reader)
            .map_err(|e| StorageError::io(path, e))
    }

    /// Paths of every record file in the directory.
    fn entries(&self) -> StorageResult<Vec<PathBuf>> {
        let io_err = |e| StorageError::io(&self.directory, e);
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let staging = entry
                .file_name()
                .to_string_lossy()
                .starts_with(STAGING_PREFIX);
            if !staging && entry.file_type().map_err(io_err)?.is_file() {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }

    fn remove(path: &Path) -> StorageResult<()> {
        fs::remove_file(path).map_err(|e| StorageError::io(path, e))
    }

    /// Removes `paths` in order, stopping at the first failure.
    fn remove_all(paths: &[PathBuf]) -> StorageResult<()> {
        for path in paths {
            Self::remove(path)?;
        }
        Ok(())
    }
}

impl<S: Serializer> Backend for FileBackend<S> {
    type Key = RecordPath;

    fn resolve_key(&self, id: &str) -> RecordPath {
        RecordPath {
            path: self.directory.join(id),
            plain: is_plain_file_name(id),
        }
    }

    fn key_exists(&self, key: &RecordPath) -> StorageResult<bool> {
        if !key.plain {
            return Ok(false);
        }
        match fs::metadata(&key.path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(&key.path, e)),
        }
    }

    fn read_at(&self, key: &RecordPath) -> StorageResult<Resume> {
        self.read_file(key.checked()?)
    }

    fn insert_at(&mut self, key: RecordPath, resume: Resume) -> StorageResult<()> {
        let path = key.checked()?;
        let staged = self.stage(path, &resume)?;
        staged
            .persist_noclobber(path)
            .map_err(|e| StorageError::io(path, e.error))?;
        debug!("Wrote new resume file {}", path.display());
        Ok(())
    }

    fn write_at(&mut self, key: &RecordPath, resume: Resume) -> StorageResult<()> {
        let path = key.checked()?;
        let staged = self.stage(path, &resume)?;
        staged
            .persist(path)
            .map_err(|e| StorageError::io(path, e.error))?;
        Ok(())
    }

    fn delete_at(&mut self, key: RecordPath) -> StorageResult<()> {
        Self::remove(key.checked()?)
    }

    fn enumerate_all(&self) -> StorageResult<Vec<Resume>> {
        self.entries()?
            .iter()
            .map(|path| self.read_file(path))
            .collect()
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.entries()?.len())
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        Self::remove_all(&self.entries()?)
    }
}
