use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Which backend `build_storage` constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Array,
    SortedArray,
    List,
    Map,
    File,
    Postgres,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(StorageKind::Array),
            "sorted_array" => Ok(StorageKind::SortedArray),
            "list" => Ok(StorageKind::List),
            "map" => Ok(StorageKind::Map),
            "file" => Ok(StorageKind::File),
            "postgres" => Ok(StorageKind::Postgres),
            other => Err(anyhow!("unknown storage kind '{other}'")),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageKind::Array => "array",
            StorageKind::SortedArray => "sorted_array",
            StorageKind::List => "list",
            StorageKind::Map => "map",
            StorageKind::File => "file",
            StorageKind::Postgres => "postgres",
        };
        f.write_str(s)
    }
}

/// On-disk format used by the file backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFormat {
    Json,
    Data,
}

impl FromStr for StorageFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "data" => Ok(StorageFormat::Data),
            other => Err(anyhow!("unknown storage format '{other}'")),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Backend-specific variables are only required for the backend that needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_kind: StorageKind,
    pub storage_dir: Option<PathBuf>,
    pub storage_format: StorageFormat,
    pub database_url: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so parsing can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_kind = match lookup("STORAGE_KIND") {
            Some(v) => v.parse::<StorageKind>().context("STORAGE_KIND is invalid")?,
            None => StorageKind::Map,
        };
        let storage_format = match lookup("STORAGE_FORMAT") {
            Some(v) => v.parse::<StorageFormat>().context("STORAGE_FORMAT is invalid")?,
            None => StorageFormat::Json,
        };

        let storage_dir = lookup("STORAGE_DIR").map(PathBuf::from);
        let database_url = lookup("DATABASE_URL");

        if storage_kind == StorageKind::File {
            require(&storage_dir, "STORAGE_DIR", storage_kind)?;
        }
        if storage_kind == StorageKind::Postgres {
            require(&database_url, "DATABASE_URL", storage_kind)?;
        }

        Ok(Config {
            storage_kind,
            storage_dir,
            storage_format,
            database_url,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<T>(value: &Option<T>, key: &str, kind: StorageKind) -> Result<()> {
    value
        .as_ref()
        .map(|_| ())
        .with_context(|| format!("Environment variable '{key}' is required for {kind} storage"))
}
