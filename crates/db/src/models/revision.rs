//! Revision model (host-owned `revisions` table).
//!
//! This is the authoritative edit history the contributor tallies are derived
//! from. Reads here bypass visibility suppression: `user_id` and `user_text`
//! are the raw stored identity even when `deleted` hides it from readers.

use quill_core::types::{DbId, Timestamp};
use quill_core::visibility;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub page_id: DbId,
    pub user_id: DbId,
    pub user_text: String,
    pub rev_timestamp: Timestamp,
    pub deleted: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Revision {
    pub fn user_visible(&self) -> bool {
        visibility::user_visible(self.deleted)
    }
}

/// DTO for recording a revision in the history table.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRevision {
    pub page_id: DbId,
    pub user_id: DbId,
    pub user_text: String,
    pub rev_timestamp: Timestamp,
    #[serde(default)]
    pub deleted: i16,
}
