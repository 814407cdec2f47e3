use sqlx::types::Json;
use sqlx::PgPool;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::db::create_pool;
use crate::errors::StorageError;
use crate::models::resume::ResumeRow;
use crate::models::Resume;
use crate::storage::{Backend, StorageResult};

/// PostgreSQL storage over the `resume` table.
///
/// Hooks are synchronous; each query is driven to completion on a private
/// current-thread runtime. Do not call from inside another tokio runtime.
pub struct PostgresBackend {
    runtime: Runtime,
    pool: PgPool,
}

impl PostgresBackend {
    pub fn connect(database_url: &str) -> StorageResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                StorageError::Configuration(format!("Failed to start database runtime: {e}"))
            })?;
        let pool = runtime
            .block_on(create_pool(database_url))
            .map_err(|e| {
                StorageError::Configuration(format!("Failed to connect to database: {e:#}"))
            })?;

        info!("Postgres storage ready");
        Ok(PostgresBackend { runtime, pool })
    }
}

impl Backend for PostgresBackend {
    type Key = String;

    fn resolve_key(&self, id: &str) -> String {
        id.to_string()
    }

    fn key_exists(&self, key: &String) -> StorageResult<bool> {
        let exists: bool = self.runtime.block_on(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM resume WHERE id = $1)")
                .bind(key)
                .fetch_one(&self.pool),
        )?;
        Ok(exists)
    }

    fn read_at(&self, key: &String) -> StorageResult<Resume> {
        let row: Option<ResumeRow> = self.runtime.block_on(
            sqlx::query_as::<_, ResumeRow>(
                "SELECT id, full_name, contacts FROM resume WHERE id = $1",
            )
            .bind(key)
            .fetch_optional(&self.pool),
        )?;
        row.map(Resume::from)
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }

    fn insert_at(&mut self, key: String, resume: Resume) -> StorageResult<()> {
        // Plain INSERT: a row created behind our back surfaces as a unique violation.
        self.runtime.block_on(
            sqlx::query("INSERT INTO resume (id, full_name, contacts) VALUES ($1, $2, $3)")
                .bind(&key)
                .bind(resume.full_name())
                .bind(Json(resume.contacts()))
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn write_at(&mut self, key: &String, resume: Resume) -> StorageResult<()> {
        let result = self.runtime.block_on(
            sqlx::query("UPDATE resume SET full_name = $2, contacts = $3 WHERE id = $1")
                .bind(key)
                .bind(resume.full_name())
                .bind(Json(resume.contacts()))
                .execute(&self.pool),
        )?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(key.clone()));
        }
        Ok(())
    }

    fn delete_at(&mut self, key: String) -> StorageResult<()> {
        let result = self.runtime.block_on(
            sqlx::query("DELETE FROM resume WHERE id = $1")
                .bind(&key)
                .execute(&self.pool),
        )?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(key));
        }
        Ok(())
    }

    fn enumerate_all(&self) -> StorageResult<Vec<Resume>> {
        let rows: Vec<ResumeRow> = self.runtime.block_on(
            sqlx::query_as::<_, ResumeRow>("SELECT id, full_name, contacts FROM resume")
                .fetch_all(&self.pool),
        )?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    fn count(&self) -> StorageResult<usize> {
        let count: i64 = self.runtime.block_on(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resume").fetch_one(&self.pool),
        )?;
        usize::try_from(count).map_err(|e| StorageError::Database(sqlx::Error::Decode(Box::new(e))))
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.runtime
            .block_on(sqlx::query("DELETE FROM resume").execute(&self.pool))?;
        Ok(())
    }
}
