//! Handlers for the `/assets` resource.
//!
//! Every asset in a response carries the derived `is_expired` and
//! `is_service_overdue` flags, evaluated at request time.

use assetwatch_core::assets::validation::{
    validate_create, validate_update, AssetPayload, UpdateMode,
};
use assetwatch_core::error::CoreError;
use assetwatch_core::types::DbId;
use assetwatch_db::models::asset::{AssetListParams, AssetWithStatus};
use assetwatch_db::repositories::AssetRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::Page;
use crate::state::AppState;

/// Response body of `POST /assets/{id}/mark_serviced`.
#[derive(Debug, Serialize)]
pub struct MarkServicedResponse {
    pub message: String,
    pub asset: AssetWithStatus,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Asset",
        id,
    })
}

/// GET /api/v1/assets
///
/// List assets newest first, optionally filtered by `is_serviced`.
pub async fn list_assets(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AssetListParams>,
) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list(&state.pool, &params).await?;
    let count = AssetRepo::count(&state.pool, &params).await?;

    let now = Utc::now();
    let results: Vec<_> = assets.into_iter().map(|a| a.with_status(now)).collect();

    Ok(Json(Page::new(count, params.limit, params.offset, results)))
}

/// POST /api/v1/assets
pub async fn create_asset(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AssetPayload>,
) -> AppResult<impl IntoResponse> {
    let fields = validate_create(payload)?;
    let asset = AssetRepo::create(&state.pool, &fields).await?;

    tracing::info!(asset_id = asset.id, name = %asset.name, "Asset created");

    Ok((StatusCode::CREATED, Json(asset.with_status(Utc::now()))))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(asset.with_status(Utc::now())))
}

/// PUT /api/v1/assets/{id}
///
/// Full update: `name`, `service_time` and `expiration_time` are required.
pub async fn update_asset(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(payload): AppJson<AssetPayload>,
) -> AppResult<impl IntoResponse> {
    apply_update(&state, id, payload, UpdateMode::Full).await
}

/// PATCH /api/v1/assets/{id}
///
/// Partial update: omitted fields keep their stored values.
pub async fn patch_asset(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(payload): AppJson<AssetPayload>,
) -> AppResult<impl IntoResponse> {
    apply_update(&state, id, payload, UpdateMode::Partial).await
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    payload: AssetPayload,
    mode: UpdateMode,
) -> AppResult<Json<AssetWithStatus>> {
    let current = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let fields = validate_update(payload, &current.fields(), mode)?;
    let asset = AssetRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(asset_id = id, ?mode, "Asset updated");

    Ok(Json(asset.with_status(Utc::now())))
}

/// DELETE /api/v1/assets/{id}
///
/// Removes the asset together with its notifications and violations.
pub async fn delete_asset(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AssetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(asset_id = id, "Asset deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/assets/{id}/mark_serviced
///
/// Idempotent. Existing notifications and violations are left untouched.
pub async fn mark_serviced(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::mark_serviced(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(asset_id = id, "Asset marked as serviced");

    Ok(Json(MarkServicedResponse {
        message: format!("Asset {} marked as serviced", asset.name),
        asset: asset.with_status(Utc::now()),
    }))
}
