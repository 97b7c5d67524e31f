//! Repository for the `contributors` tally table.
//!
//! Every write here is a single atomic statement or a short row-locking
//! transaction, so concurrent edits and visibility changes to the same
//! (page, editor) key serialize instead of overwriting each other. Writes that
//! still lose a race are replayed through [`with_write_retry`].

use chrono::Utc;
use quill_core::types::{DbId, Timestamp};
use quill_core::visibility::DELETED_USER;
use sqlx::PgPool;

use crate::models::contributor::{AdjustOutcome, Contributor, ContributorKey, RangeRebuild};
use crate::retry::with_write_retry;

/// Column list for contributors queries.
const COLUMNS: &str = "page_id, user_id, user_text, revision_count, first_edit, last_edit";

/// Provides the tally store operations.
pub struct ContributorRepo;

impl ContributorRepo {
    // ── Reads ─────────────────────────────────────────────────────────

    /// Find the tally row for one key.
    pub async fn find(
        pool: &PgPool,
        key: &ContributorKey,
    ) -> Result<Option<Contributor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributors
             WHERE page_id = $1 AND user_id = $2 AND user_text = $3"
        );
        sqlx::query_as::<_, Contributor>(&query)
            .bind(key.page_id)
            .bind(key.user_id)
            .bind(&key.user_text)
            .fetch_optional(pool)
            .await
    }

    /// All tally rows for one page, highest count first.
    ///
    /// When `filter_anonymous` is set, rows with `user_id = 0` are excluded.
    pub async fn list_for_page(
        pool: &PgPool,
        page_id: DbId,
        filter_anonymous: bool,
    ) -> Result<Vec<Contributor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributors
             WHERE page_id = $1 AND ($2 = FALSE OR user_id <> 0)
             ORDER BY revision_count DESC, user_text ASC"
        );
        sqlx::query_as::<_, Contributor>(&query)
            .bind(page_id)
            .bind(filter_anonymous)
            .fetch_all(pool)
            .await
    }

    /// Per-editor rollup across every page whose title matches `title_pattern`
    /// (a `LIKE` pattern), highest count first.
    ///
    /// Counts are summed and first/last edits widened across pages. Every
    /// returned row carries `root_page_id` as its page id.
    pub async fn list_for_prefix(
        pool: &PgPool,
        root_page_id: DbId,
        title_pattern: &str,
        filter_anonymous: bool,
    ) -> Result<Vec<Contributor>, sqlx::Error> {
        sqlx::query_as::<_, Contributor>(
            "SELECT $1::BIGINT AS page_id, c.user_id, c.user_text,
                    SUM(c.revision_count)::INTEGER AS revision_count,
                    MIN(c.first_edit) AS first_edit,
                    MAX(c.last_edit) AS last_edit
             FROM contributors c
             JOIN pages p ON p.id = c.page_id
             WHERE p.title LIKE $2 AND ($3 = FALSE OR c.user_id <> 0)
             GROUP BY c.user_id, c.user_text
             ORDER BY revision_count DESC, user_text ASC",
        )
        .bind(root_page_id)
        .bind(title_pattern)
        .bind(filter_anonymous)
        .fetch_all(pool)
        .await
    }

    /// Lowest and highest page id holding a tally row, or `None` when the
    /// table is empty.
    pub async fn page_id_range(pool: &PgPool) -> Result<Option<(DbId, DbId)>, sqlx::Error> {
        let row: (Option<DbId>, Option<DbId>) =
            sqlx::query_as("SELECT MIN(page_id), MAX(page_id) FROM contributors")
                .fetch_one(pool)
                .await?;

        Ok(match row {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    // ── Live writes ───────────────────────────────────────────────────

    /// Record one committed edit.
    ///
    /// Inserts `count = 1, first = last = edit_time` for a new key, otherwise
    /// adds one and widens the first/last edit window to include `edit_time`.
    pub async fn upsert_increment(
        pool: &PgPool,
        key: &ContributorKey,
        edit_time: Timestamp,
    ) -> Result<Contributor, sqlx::Error> {
        let query = format!(
            "INSERT INTO contributors
                 (page_id, user_id, user_text, revision_count, first_edit, last_edit)
             VALUES ($1, $2, $3, 1, $4, $4)
             ON CONFLICT (page_id, user_id, user_text) DO UPDATE
             SET revision_count = contributors.revision_count + 1,
                 first_edit = LEAST(contributors.first_edit, EXCLUDED.first_edit),
                 last_edit = GREATEST(contributors.last_edit, EXCLUDED.last_edit)
             RETURNING {COLUMNS}"
        );
        let query = query.as_str();

        with_write_retry("upsert_increment", move || {
            sqlx::query_as::<_, Contributor>(query)
                .bind(key.page_id)
                .bind(key.user_id)
                .bind(&key.user_text)
                .bind(edit_time)
                .fetch_one(pool)
        })
        .await
    }

    /// Apply a relative change to one key's count.
    ///
    /// A positive `delta` inserts the row (count = `delta`, first = last =
    /// `edit_time_for_create`) or adds to it, widening the edit window. A
    /// negative `delta` locks the row, then either subtracts or deletes it
    /// when the count would drop to zero or below. A missing row is left
    /// missing.
    pub async fn adjust_count(
        pool: &PgPool,
        key: &ContributorKey,
        delta: i32,
        edit_time_for_create: Option<Timestamp>,
    ) -> Result<AdjustOutcome, sqlx::Error> {
        if delta == 0 {
            return Ok(AdjustOutcome::Unchanged);
        }
        if delta > 0 {
            let edit_time = edit_time_for_create.unwrap_or_else(|| {
                tracing::warn!(
                    page_id = key.page_id,
                    user_id = key.user_id,
                    "No edit time for recreated contributor row, using now"
                );
                Utc::now()
            });
            return Self::add(pool, key, delta, edit_time).await;
        }

        with_write_retry("adjust_count", move || Self::subtract(pool, key, -delta)).await
    }

    async fn add(
        pool: &PgPool,
        key: &ContributorKey,
        amount: i32,
        edit_time: Timestamp,
    ) -> Result<AdjustOutcome, sqlx::Error> {
        let inserted = with_write_retry("adjust_count", move || {
            sqlx::query_as::<_, (bool,)>(
                "INSERT INTO contributors
                     (page_id, user_id, user_text, revision_count, first_edit, last_edit)
                 VALUES ($1, $2, $3, $4, $5, $5)
                 ON CONFLICT (page_id, user_id, user_text) DO UPDATE
                 SET revision_count = contributors.revision_count + EXCLUDED.revision_count,
                     first_edit = LEAST(contributors.first_edit, EXCLUDED.first_edit),
                     last_edit = GREATEST(contributors.last_edit, EXCLUDED.last_edit)
                 RETURNING (xmax = 0) AS inserted",
            )
            .bind(key.page_id)
            .bind(key.user_id)
            .bind(&key.user_text)
            .bind(amount)
            .bind(edit_time)
            .fetch_one(pool)
        })
        .await?;

        Ok(if inserted.0 {
            AdjustOutcome::Created
        } else {
            AdjustOutcome::Incremented
        })
    }

    async fn subtract(
        pool: &PgPool,
        key: &ContributorKey,
        amount: i32,
    ) -> Result<AdjustOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(i32,)> = sqlx::query_as(
            "SELECT revision_count FROM contributors
             WHERE page_id = $1 AND user_id = $2 AND user_text = $3
             FOR UPDATE",
        )
        .bind(key.page_id)
        .bind(key.user_id)
        .bind(&key.user_text)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match current {
            None => AdjustOutcome::Absent,
            Some((count,)) if count <= amount => {
                sqlx::query(
                    "DELETE FROM contributors
                     WHERE page_id = $1 AND user_id = $2 AND user_text = $3",
                )
                .bind(key.page_id)
                .bind(key.user_id)
                .bind(&key.user_text)
                .execute(&mut *tx)
                .await?;
                AdjustOutcome::Deleted
            }
            Some(_) => {
                sqlx::query(
                    "UPDATE contributors SET revision_count = revision_count - $4
                     WHERE page_id = $1 AND user_id = $2 AND user_text = $3",
                )
                .bind(key.page_id)
                .bind(key.user_id)
                .bind(&key.user_text)
                .bind(amount)
                .execute(&mut *tx)
                .await?;
                AdjustOutcome::Decremented
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    // ── Backfill ──────────────────────────────────────────────────────

    /// Rebuild every tally row for pages `start..=end` from the history table,
    /// in one transaction.
    ///
    /// Visible revisions are grouped per key and written with absolute values.
    /// Rows already holding those values are not touched. Rows in the range
    /// with no visible history left are removed.
    pub async fn rebuild_page_range(
        pool: &PgPool,
        start: DbId,
        end: DbId,
    ) -> Result<RangeRebuild, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let written = sqlx::query(
            "INSERT INTO contributors
                 (page_id, user_id, user_text, revision_count, first_edit, last_edit)
             SELECT page_id, user_id, user_text, COUNT(*)::INTEGER,
                    MIN(rev_timestamp), MAX(rev_timestamp)
             FROM revisions
             WHERE page_id BETWEEN $1 AND $2 AND deleted & $3 = 0
             GROUP BY page_id, user_id, user_text
             ON CONFLICT (page_id, user_id, user_text) DO UPDATE
             SET revision_count = EXCLUDED.revision_count,
                 first_edit = EXCLUDED.first_edit,
                 last_edit = EXCLUDED.last_edit
             WHERE (contributors.revision_count, contributors.first_edit, contributors.last_edit)
                   IS DISTINCT FROM
                   (EXCLUDED.revision_count, EXCLUDED.first_edit, EXCLUDED.last_edit)",
        )
        .bind(start)
        .bind(end)
        .bind(DELETED_USER)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let removed = sqlx::query(
            "DELETE FROM contributors c
             WHERE c.page_id BETWEEN $1 AND $2
               AND NOT EXISTS (
                   SELECT 1 FROM revisions r
                   WHERE r.page_id = c.page_id
                     AND r.user_id = c.user_id
                     AND r.user_text = c.user_text
                     AND r.deleted & $3 = 0
               )",
        )
        .bind(start)
        .bind(end)
        .bind(DELETED_USER)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        Ok(RangeRebuild {
            rows_written: written,
            rows_removed: removed,
        })
    }
}
