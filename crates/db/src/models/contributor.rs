//! Contributor tally model (`contributors` table).

use quill_core::contributors::ContributorRow;
use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contributors` table, or a per-editor rollup of several.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Contributor {
    pub page_id: DbId,
    pub user_id: DbId,
    pub user_text: String,
    pub revision_count: i32,
    pub first_edit: Timestamp,
    pub last_edit: Timestamp,
}

impl From<Contributor> for ContributorRow {
    fn from(c: Contributor) -> Self {
        ContributorRow {
            page_id: c.page_id,
            user_id: c.user_id,
            user_text: c.user_text,
            revision_count: c.revision_count,
            first_edit: c.first_edit,
            last_edit: c.last_edit,
        }
    }
}

/// Identity of a tally row: the unique (page, editor id, editor name) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContributorKey {
    pub page_id: DbId,
    pub user_id: DbId,
    pub user_text: String,
}

impl ContributorKey {
    pub fn new(page_id: DbId, user_id: DbId, user_text: impl Into<String>) -> Self {
        Self {
            page_id,
            user_id,
            user_text: user_text.into(),
        }
    }
}

/// What [`ContributorRepo::adjust_count`](crate::repositories::ContributorRepo::adjust_count)
/// did to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// No row existed; one was inserted.
    Created,
    Incremented,
    Decremented,
    /// The count would have reached zero; the row was removed.
    Deleted,
    /// A decrement found no row to apply to.
    Absent,
    /// Delta was zero.
    Unchanged,
}

/// Rows touched by one backfill window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeRebuild {
    pub rows_written: u64,
    pub rows_removed: u64,
}
