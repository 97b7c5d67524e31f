//! Read path: resolve a page title, fetch tally rows, and select what to show.

use quill_core::contributors::{self, ContributorRow, ContributorsResult};
use quill_core::error::CoreError;
use quill_core::options::QueryOptions;
use quill_core::title::PageTitle;
use quill_core::types::DbId;
use quill_db::models::page::Page;
use quill_db::repositories::{ContributorRepo, PageRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// A page a listing was computed for.
#[derive(Debug, Clone, Serialize)]
pub struct PageRef {
    pub id: DbId,
    /// Human-readable title (spaces, not underscores).
    pub title: String,
}

/// A resolved target page together with its parsed title.
#[derive(Debug, Clone)]
pub struct Target {
    pub title: PageTitle,
    pub page: Page,
}

impl Target {
    pub fn page_ref(&self) -> PageRef {
        PageRef {
            id: self.page.id,
            title: self.title.text(),
        }
    }
}

/// Parse `raw_title` and look the page up.
///
/// Fails with [`CoreError::InvalidTitle`] before touching the database when
/// the title does not parse, and with [`CoreError::NoSuchPage`] when no page
/// carries it.
pub async fn resolve_target(pool: &PgPool, raw_title: &str) -> AppResult<Target> {
    let title = PageTitle::parse(raw_title)?;

    let page = PageRepo::find_by_title(pool, title.db_key())
        .await?
        .ok_or_else(|| CoreError::NoSuchPage(title.text()))?;

    Ok(Target { title, page })
}

/// Tally rows for the target, honouring the anonymous and prefix filters.
pub async fn fetch_rows(
    pool: &PgPool,
    target: &Target,
    opts: &QueryOptions,
) -> AppResult<Vec<ContributorRow>> {
    let rows = if opts.page_prefix {
        ContributorRepo::list_for_prefix(
            pool,
            target.page.id,
            &target.title.like_prefix_pattern(),
            opts.filter_anonymous,
        )
        .await?
    } else {
        ContributorRepo::list_for_page(pool, target.page.id, opts.filter_anonymous).await?
    };

    Ok(rows.into_iter().map(ContributorRow::from).collect())
}

/// Full read path: resolve, fetch, sort and cut.
pub async fn get_contributors(
    pool: &PgPool,
    raw_title: &str,
    opts: &QueryOptions,
) -> AppResult<(Target, ContributorsResult)> {
    opts.validate()?;

    let target = resolve_target(pool, raw_title).await?;
    let rows = fetch_rows(pool, &target, opts).await?;
    let result = contributors::select_contributors(rows, opts);

    tracing::debug!(
        page_id = target.page.id,
        prefix = opts.page_prefix,
        shown = result.contributors.len(),
        others = result.others,
        "Contributors selected",
    );

    Ok((target, result))
}

/// Display names of the shown contributors plus the "others" count.
pub async fn get_contributor_names(
    pool: &PgPool,
    raw_title: &str,
    opts: &QueryOptions,
) -> AppResult<(Vec<String>, i64)> {
    let (_, result) = get_contributors(pool, raw_title, opts).await?;
    Ok((result.names(), result.others))
}

/// Plain-text export: every visible contributor, no threshold.
pub async fn get_raw_export(
    pool: &PgPool,
    raw_title: &str,
    opts: &QueryOptions,
) -> AppResult<String> {
    let (_, result) = get_contributors(pool, raw_title, &opts.unthresholded()).await?;
    Ok(contributors::format_raw_list(&result.contributors))
}
