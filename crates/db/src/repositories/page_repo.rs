//! Repository for the host's `pages` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::Page;

/// Column list for pages queries.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Page lookups used to resolve request targets.
pub struct PageRepo;

impl PageRepo {
    /// Find a page by its db-key title.
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE title = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a page. The title must already be in db-key form.
    pub async fn create(pool: &PgPool, title: &str) -> Result<Page, sqlx::Error> {
        let query = format!("INSERT INTO pages (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Page>(&query)
            .bind(title)
            .fetch_one(pool)
            .await
    }
}
