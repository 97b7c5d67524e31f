//! Route definitions for page contributor listings, mounted at `/pages`.

use axum::routing::get;
use axum::Router;

use crate::handlers::contributors;
use crate::state::AppState;

/// ```text
/// GET /{title}/contributors         -> list_contributors
/// GET /{title}/contributors/names   -> list_contributor_names
/// GET /{title}/contributors/raw     -> raw_contributors
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{title}/contributors", get(contributors::list_contributors))
        .route(
            "/{title}/contributors/names",
            get(contributors::list_contributor_names),
        )
        .route("/{title}/contributors/raw", get(contributors::raw_contributors))
}
