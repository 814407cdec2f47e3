pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod storage;

pub use errors::StorageError;
pub use models::{ContactType, Resume};
pub use storage::{build_storage, ResumeStorage, Storage};
