//! Repository for the host's `revisions` table (authoritative edit history).
//!
//! All reads return the raw stored editor identity regardless of visibility
//! bits; callers decide what is visible.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::revision::{CreateRevision, Revision};

/// Column list for revisions queries.
const COLUMNS: &str =
    "id, page_id, user_id, user_text, rev_timestamp, deleted, created_at, updated_at";

/// History lookups for visibility repair and backfill.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Find a revision by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE id = $1");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Smallest and largest page id with any history, or `None` if the
    /// history is empty.
    pub async fn page_id_range(pool: &PgPool) -> Result<Option<(DbId, DbId)>, sqlx::Error> {
        let row: (Option<DbId>, Option<DbId>) =
            sqlx::query_as("SELECT MIN(page_id), MAX(page_id) FROM revisions")
                .fetch_one(pool)
                .await?;

        Ok(match row {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    /// Record a revision in the history table.
    pub async fn create(pool: &PgPool, input: &CreateRevision) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (page_id, user_id, user_text, rev_timestamp, deleted)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(input.page_id)
            .bind(input.user_id)
            .bind(&input.user_text)
            .bind(input.rev_timestamp)
            .bind(input.deleted)
            .fetch_one(pool)
            .await
    }

    /// Overwrite a revision's visibility bits. Returns the previous bits, or
    /// `None` if the revision does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        bits: i16,
    ) -> Result<Option<i16>, sqlx::Error> {
        let old: Option<(i16,)> = sqlx::query_as(
            "UPDATE revisions r SET deleted = $2
             FROM (SELECT id, deleted FROM revisions WHERE id = $1 FOR UPDATE) old
             WHERE r.id = old.id
             RETURNING old.deleted",
        )
        .bind(id)
        .bind(bits)
        .fetch_optional(pool)
        .await?;

        Ok(old.map(|(bits,)| bits))
    }
}
