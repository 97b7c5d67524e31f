//! Edit ingestion: one committed edit bumps one tally row.

use quill_core::error::CoreError;
use quill_core::types::{DbId, Timestamp};
use quill_db::models::contributor::{Contributor, ContributorKey};
use quill_db::repositories::{ContributorRepo, PageRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Host event: an edit was committed.
///
/// Delivered exactly once per edit. Nothing here deduplicates.
#[derive(Debug, Clone, Deserialize)]
pub struct EditCommitted {
    pub page_id: DbId,
    /// 0 for anonymous edits.
    pub user_id: DbId,
    /// Editor name at the time of the edit.
    pub user_text: String,
    pub timestamp: Timestamp,
}

/// Record a committed edit against the editor's tally for the page.
pub async fn record_edit(pool: &PgPool, event: &EditCommitted) -> AppResult<Contributor> {
    if event.user_text.trim().is_empty() {
        return Err(CoreError::Validation("user_text must not be empty".into()).into());
    }
    if event.user_id < 0 {
        return Err(CoreError::Validation("user_id must not be negative".into()).into());
    }

    PageRepo::find_by_id(pool, event.page_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Page",
            id: event.page_id,
        })?;

    let key = ContributorKey::new(event.page_id, event.user_id, event.user_text.as_str());
    let row = ContributorRepo::upsert_increment(pool, &key, event.timestamp).await?;

    tracing::debug!(
        page_id = row.page_id,
        user_id = row.user_id,
        revision_count = row.revision_count,
        "Edit recorded",
    );

    Ok(row)
}
