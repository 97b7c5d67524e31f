//! Handlers for page contributor listings.
//!
//! Three views of the same selection: the thresholded JSON listing, the
//! names-only summary, and the unthresholded plain-text export.

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quill_core::contributors::ContributorRow;
use quill_core::options::{ContributorsConfig, QueryOptions, SortBy};
use quill_core::pagination::{self, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::engine::listing::{self, PageRef};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters shared by every listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ContributorsParams {
    /// Exclude anonymous editors.
    #[serde(default)]
    pub filter_anon: bool,
    /// Roll up every page whose title starts with this one.
    #[serde(default)]
    pub prefix: bool,
    #[serde(default)]
    pub sort: SortBy,
    /// Reverse the sorted list.
    #[serde(default)]
    pub asc: bool,
    pub limit: Option<i64>,
    pub threshold: Option<i64>,
    /// First shown row to return (JSON listing only).
    pub offset: Option<i64>,
    /// Rows per screen (JSON listing only).
    pub page_size: Option<i64>,
}

impl ContributorsParams {
    /// Typed options, with missing cutoffs taken from `config`.
    pub fn to_options(&self, config: &ContributorsConfig) -> QueryOptions {
        QueryOptions {
            filter_anonymous: self.filter_anon,
            page_prefix: self.prefix,
            sort_by: self.sort,
            ascending: self.asc,
            limit: self.limit.unwrap_or(config.limit),
            threshold: self.threshold.unwrap_or(config.threshold),
            ..QueryOptions::from_config(config)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContributorsListing {
    pub page: PageRef,
    /// The requested screen of shown rows.
    pub contributors: Vec<ContributorRow>,
    /// Shown rows across all screens.
    pub shown: usize,
    pub offset: i64,
    pub page_size: i64,
    pub others: i64,
}

#[derive(Debug, Serialize)]
pub struct ContributorNames {
    pub names: Vec<String>,
    pub others: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pages/{title}/contributors
///
/// Thresholded listing: the top `limit` contributors plus anyone after them
/// with at least `threshold` edits, and how many were left out. The shown
/// rows are returned a screen at a time via `offset` / `page_size`.
pub async fn list_contributors(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<ContributorsParams>,
) -> AppResult<impl IntoResponse> {
    let opts = params.to_options(&state.config.contributors);
    let offset = pagination::clamp_offset(params.offset);
    let page_size =
        pagination::clamp_page_size(params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let (target, result) = listing::get_contributors(&state.pool, &title, &opts).await?;

    Ok(Json(DataResponse {
        data: ContributorsListing {
            page: target.page_ref(),
            shown: result.contributors.len(),
            contributors: pagination::page_of(result.contributors, offset, page_size),
            offset,
            page_size,
            others: result.others,
        },
    }))
}

/// GET /api/v1/pages/{title}/contributors/names
pub async fn list_contributor_names(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<ContributorsParams>,
) -> AppResult<impl IntoResponse> {
    let opts = params.to_options(&state.config.contributors);
    let (names, others) = listing::get_contributor_names(&state.pool, &title, &opts).await?;

    Ok(Json(DataResponse {
        data: ContributorNames { names, others },
    }))
}

/// GET /api/v1/pages/{title}/contributors/raw
///
/// One `name = count` line per visible contributor, no threshold. Errors are
/// plain text too, with the same status codes as the JSON endpoints.
pub async fn raw_contributors(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<ContributorsParams>,
) -> Response {
    let opts = params.to_options(&state.config.contributors);

    match listing::get_raw_export(&state.pool, &title, &opts).await {
        Ok(body) => ([(CONTENT_TYPE, TEXT_PLAIN)], body).into_response(),
        Err(err) => {
            let (status, _code, message) = err.parts();
            (status, [(CONTENT_TYPE, TEXT_PLAIN)], message).into_response()
        }
    }
}
