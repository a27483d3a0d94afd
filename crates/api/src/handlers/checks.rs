//! Handler for the check engine trigger.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::checks;
use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/run-checks
///
/// Evaluate every unserviced asset and report the notifications and
/// violations this run created. Safe to call repeatedly.
pub async fn run_checks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = checks::run_checks(&state.pool, Utc::now(), state.config.reminder_window()).await?;
    Ok(Json(report))
}
