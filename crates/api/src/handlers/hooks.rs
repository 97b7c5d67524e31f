//! Handlers for host event hooks.
//!
//! The host calls these after committing an edit or changing revision
//! visibility. Both write to the contributor tallies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::engine::ingest::{self, EditCommitted};
use crate::engine::repair::{self, RevisionVisibilityChanged};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/hooks/edit-committed
pub async fn edit_committed(
    State(state): State<AppState>,
    Json(event): Json<EditCommitted>,
) -> AppResult<impl IntoResponse> {
    ingest::record_edit(&state.pool, &event).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/hooks/revision-visibility
///
/// Responds with a per-revision tally of what the repair did.
pub async fn revision_visibility(
    State(state): State<AppState>,
    Json(event): Json<RevisionVisibilityChanged>,
) -> AppResult<impl IntoResponse> {
    let summary = repair::repair_visibility(&state.pool, &event).await?;

    Ok(Json(DataResponse { data: summary }))
}
