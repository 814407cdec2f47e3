use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_store::config::Config;
use resume_store::storage::build_storage;

fn main() -> Result<()> {
    // Load configuration first (fails on missing backend settings)
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the listing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_store={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-store v{}", env!("CARGO_PKG_VERSION"));

    let storage = build_storage(&config).context("Failed to initialize storage")?;
    info!(
        "{} storage holds {} resumes",
        config.storage_kind,
        storage.size()?
    );

    let resumes = storage.get_all_sorted()?;
    println!("{}", serde_json::to_string_pretty(&resumes)?);

    Ok(())
}
