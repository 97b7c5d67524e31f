pub mod contributors;
pub mod health;
pub mod hooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages/{title}/contributors                  thresholded listing
/// /pages/{title}/contributors/names            names + others
/// /pages/{title}/contributors/raw              plain-text export
///
/// /hooks/edit-committed                        edit ingestion
/// /hooks/revision-visibility                   visibility repair
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", contributors::router())
        .nest("/hooks", hooks::router())
}
