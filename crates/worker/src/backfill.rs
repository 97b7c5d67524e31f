//! Rebuild the contributors table from the authoritative revision history.
//!
//! Walks the history in contiguous page-id windows. Each window is rebuilt in
//! its own transaction with absolute values, so the job can be interrupted at
//! any point and resumed from the last logged window boundary, and re-running
//! it over unchanged history leaves the table untouched.

use quill_core::types::DbId;
use quill_db::repositories::{ContributorRepo, RevisionRepo};
use sqlx::PgPool;

/// Page ids per window when none is given.
pub const DEFAULT_BATCH_SIZE: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    #[error("Batch size must be at least 1, got {0}")]
    InvalidBatchSize(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Parameters for a backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillOptions {
    /// Page ids per window (and per transaction).
    pub batch_size: i64,
    /// Resume point. Windows start here instead of at the lowest page id.
    pub start_page: Option<DbId>,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            start_page: None,
        }
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub windows: u64,
    pub rows_written: u64,
    pub rows_removed: u64,
    /// Last page id covered, if any window ran.
    pub last_page: Option<DbId>,
}

/// Rebuild every contributor tally from history.
///
/// Windows span every page id found in either the history or the
/// contributors table. Returns an empty summary when both are empty.
pub async fn rebuild_all(
    pool: &PgPool,
    opts: BackfillOptions,
) -> Result<BackfillSummary, BackfillError> {
    if opts.batch_size < 1 {
        return Err(BackfillError::InvalidBatchSize(opts.batch_size));
    }

    // Tally rows on pages with no history at all still need a window, or
    // their stale rows would never be swept.
    let history = RevisionRepo::page_id_range(pool).await?;
    let tallies = ContributorRepo::page_id_range(pool).await?;
    let Some((min_page, max_page)) = span(history, tallies) else {
        tracing::info!("Revision history and contributors table are empty, nothing to do");
        return Ok(BackfillSummary::default());
    };

    let mut block_start = opts.start_page.map_or(min_page, |p| p.max(min_page));
    tracing::info!(
        from_page = block_start,
        to_page = max_page,
        batch_size = opts.batch_size,
        "Rebuilding contributors table"
    );

    let mut summary = BackfillSummary::default();
    while block_start <= max_page {
        let block_end = block_start.saturating_add(opts.batch_size - 1);
        let rebuilt = ContributorRepo::rebuild_page_range(pool, block_start, block_end).await?;

        summary.windows += 1;
        summary.rows_written += rebuilt.rows_written;
        summary.rows_removed += rebuilt.rows_removed;
        summary.last_page = Some(block_end.min(max_page));

        tracing::info!(
            block_start,
            block_end,
            rows_written = rebuilt.rows_written,
            rows_removed = rebuilt.rows_removed,
            "Window rebuilt"
        );

        match block_end.checked_add(1) {
            Some(next) => block_start = next,
            None => break,
        }
    }

    tracing::info!(
        windows = summary.windows,
        rows_written = summary.rows_written,
        rows_removed = summary.rows_removed,
        "Contributors rebuild finished"
    );
    Ok(summary)
}

/// Smallest page-id range covering both inputs.
fn span(a: Option<(DbId, DbId)>, b: Option<(DbId, DbId)>) -> Option<(DbId, DbId)> {
    match (a, b) {
        (Some((a_min, a_max)), Some((b_min, b_max))) => Some((a_min.min(b_min), a_max.max(b_max))),
        (one, None) | (None, one) => one,
    }
}
