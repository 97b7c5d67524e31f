//! Host event hooks, mounted at `/hooks`.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// ```text
/// POST /edit-committed         -> edit_committed (204)
/// POST /revision-visibility    -> revision_visibility
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/edit-committed", post(hooks::edit_committed))
        .route("/revision-visibility", post(hooks::revision_visibility))
}
