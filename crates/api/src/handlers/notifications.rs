//! Handlers for the read-only `/notifications` resource.

use assetwatch_core::error::CoreError;
use assetwatch_core::types::DbId;
use assetwatch_db::models::notification::NotificationListParams;
use assetwatch_db::repositories::NotificationRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::response::Page;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// List notifications newest first. Filters: `type`, `asset`.
pub async fn list_notifications(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NotificationListParams>,
) -> AppResult<impl IntoResponse> {
    let notifications = NotificationRepo::list(&state.pool, &params).await?;
    let count = NotificationRepo::count(&state.pool, &params).await?;

    Ok(Json(Page::new(
        count,
        params.limit,
        params.offset,
        notifications,
    )))
}

/// GET /api/v1/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    Ok(Json(notification))
}
