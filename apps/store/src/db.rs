use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS resume (
    id        TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    contacts  JSONB NOT NULL DEFAULT '{}'::jsonb
)
"#;

/// Creates a PostgreSQL connection pool and makes sure the `resume` table exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::query(SCHEMA).execute(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
