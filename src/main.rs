// ghmeta entry point.
// Syncs configured repositories into the document store and loads them back through the cache.

use std::process::ExitCode;

use ghmeta::config::Config;
use ghmeta::state::ProjectStore;
use ghmeta::{Context, Result, sync};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ghmeta=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = Config::path();
    let config = Config::load(&path).await?;
    let ctx = Context::new(config)?;
    let documents = ctx.documents();

    info!(root = %documents.root().display(), "Using document store");

    let report = sync::sync_products(&ctx.github, &documents, &ctx.config.products).await;
    if !report.is_clean() {
        warn!(failed = report.failures.len(), "Some repositories failed to sync");
    }

    let mut store = ProjectStore::new(documents);
    let projects = store.fetch_projects().await?;
    info!(
        synced = report.synced,
        projects = projects.len(),
        "Done"
    );

    let rate_limit = ctx.github.rate_limit();
    info!(remaining = rate_limit.remaining, limit = rate_limit.limit, "GitHub rate limit");

    Ok(())
}
