//! Visibility repair: keep tallies in step with which editor identities are
//! currently visible.
//!
//! Each affected revision is looked up in the history table and applied as a
//! separate relative adjustment, so a failure part-way through leaves the
//! revisions already processed committed and the rest untouched. Replaying
//! the same event would apply its deltas twice.

use quill_core::types::DbId;
use quill_core::visibility::{self, IdentityChange};
use quill_db::models::contributor::{AdjustOutcome, ContributorKey};
use quill_db::repositories::{ContributorRepo, RevisionRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppResult;

/// Host event: visibility bits changed on a set of revisions of one page.
#[derive(Debug, Clone, Deserialize)]
pub struct RevisionVisibilityChanged {
    pub page_id: DbId,
    pub revisions: Vec<RevisionVisibility>,
}

/// One revision's before/after visibility bits.
///
/// The editor identity here is informational; the stored identity in the
/// history table is what gets adjusted.
#[derive(Debug, Clone, Deserialize)]
pub struct RevisionVisibility {
    pub revision_id: DbId,
    #[serde(default)]
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub user_text: Option<String>,
    pub old_bits: i16,
    pub new_bits: i16,
}

/// What a repair run did, per revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    pub decremented: u32,
    pub incremented: u32,
    /// Identity bit unchanged, or a decrement with no row to apply to.
    pub unchanged: u32,
    /// Revision not found in history.
    pub skipped: u32,
}

/// Apply a visibility change to the contributor tallies.
///
/// Missing revisions are logged and skipped. Any storage failure aborts the
/// remaining revisions and is returned.
pub async fn repair_visibility(
    pool: &PgPool,
    event: &RevisionVisibilityChanged,
) -> AppResult<RepairSummary> {
    let mut summary = RepairSummary::default();

    for item in &event.revisions {
        let change = IdentityChange::between(item.old_bits, item.new_bits);
        if change == IdentityChange::Unchanged {
            summary.unchanged += 1;
            continue;
        }

        let Some(revision) = RevisionRepo::find_by_id(pool, item.revision_id).await? else {
            tracing::warn!(
                revision_id = item.revision_id,
                page_id = event.page_id,
                "Revision missing from history, skipping visibility repair",
            );
            summary.skipped += 1;
            continue;
        };

        let identity_differs = item.user_id.is_some_and(|id| id != revision.user_id)
            || item
                .user_text
                .as_deref()
                .is_some_and(|text| text != revision.user_text);
        let bits_differ = revision.user_visible() != visibility::user_visible(item.new_bits);
        if identity_differs || bits_differ || revision.page_id != event.page_id {
            tracing::debug!(
                revision_id = revision.id,
                event_page_id = event.page_id,
                stored_page_id = revision.page_id,
                stored_user_id = revision.user_id,
                stored_bits = revision.deleted,
                new_bits = item.new_bits,
                "Event differs from stored revision, using stored identity",
            );
        }

        let key = ContributorKey::new(revision.page_id, revision.user_id, revision.user_text);
        let outcome =
            ContributorRepo::adjust_count(pool, &key, change.delta(), Some(revision.rev_timestamp))
                .await?;

        match outcome {
            AdjustOutcome::Decremented | AdjustOutcome::Deleted => summary.decremented += 1,
            AdjustOutcome::Created | AdjustOutcome::Incremented => summary.incremented += 1,
            AdjustOutcome::Absent => {
                tracing::warn!(
                    revision_id = revision.id,
                    page_id = key.page_id,
                    user_id = key.user_id,
                    "No contributor row to decrement",
                );
                summary.unchanged += 1;
            }
            AdjustOutcome::Unchanged => summary.unchanged += 1,
        }
    }

    tracing::info!(
        page_id = event.page_id,
        decremented = summary.decremented,
        incremented = summary.incremented,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        "Visibility repair applied",
    );

    Ok(summary)
}
