//! `quill-backfill`: rebuild the contributors table from revision history.
//!
//! Reads `DATABASE_URL` from the environment (or `.env`). Exits 0 once every
//! window has been rebuilt.

use anyhow::Context;
use clap::Parser;
use quill_worker::backfill::{self, BackfillOptions, DEFAULT_BATCH_SIZE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Backfill command line arguments.
#[derive(Parser, Debug)]
#[command(name = "quill-backfill")]
#[command(about = "Populate the contributors table from the revision history")]
struct Args {
    /// Page ids per window (one transaction each)
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: i64,

    /// Resume from this page id (a window boundary from a previous run's log)
    #[arg(long, value_name = "PAGE_ID")]
    start_page: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_worker=debug,quill_backfill=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = quill_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    quill_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let summary = backfill::rebuild_all(
        &pool,
        BackfillOptions {
            batch_size: args.batch_size,
            start_page: args.start_page,
        },
    )
    .await?;

    tracing::info!(
        windows = summary.windows,
        last_page = ?summary.last_page,
        "Backfill complete"
    );
    Ok(())
}
