//! Handlers for the read-only `/violations` resource.

use assetwatch_core::error::CoreError;
use assetwatch_core::types::DbId;
use assetwatch_db::models::violation::ViolationListParams;
use assetwatch_db::repositories::ViolationRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::response::Page;
use crate::state::AppState;

/// GET /api/v1/violations
///
/// List violations newest first. Filters: `type`, `asset`.
pub async fn list_violations(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ViolationListParams>,
) -> AppResult<impl IntoResponse> {
    let violations = ViolationRepo::list(&state.pool, &params).await?;
    let count = ViolationRepo::count(&state.pool, &params).await?;

    Ok(Json(Page::new(
        count,
        params.limit,
        params.offset,
        violations,
    )))
}

/// GET /api/v1/violations/{id}
pub async fn get_violation(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let violation = ViolationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Violation",
            id,
        }))?;

    Ok(Json(violation))
}
