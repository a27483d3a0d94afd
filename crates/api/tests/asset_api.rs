//! HTTP-level integration tests for the `/assets` endpoints.
//!
//! Uses tower's `ServiceExt::oneshot` to send requests directly to the app
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_asset, delete, get, patch_json, post, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_asset_returns_201_with_status_flags(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/assets/",
        json!({
            "name": "Fire extinguisher",
            "description": "Lobby, ground floor",
            "service_time": "2999-01-01T10:00:00Z",
            "expiration_time": "2999-06-01T10:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Fire extinguisher");
    assert_eq!(json["description"], "Lobby, ground floor");
    assert_eq!(json["service_time"], "2999-01-01T10:00:00Z");
    assert_eq!(json["is_serviced"], false);
    assert_eq!(json["is_expired"], false);
    assert_eq!(json["is_service_overdue"], false);
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_normalizes_offsets_to_utc(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/assets",
        json!({
            "name": "Generator",
            "service_time": "2999-01-01T12:00:00+02:00",
            "expiration_time": "2999-01-02T12:00:00+02:00",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["service_time"], "2999-01-01T10:00:00Z");
    assert!(json["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_service_not_before_expiration(pool: PgPool) {
    for (service, expiration) in [
        ("2999-01-02T00:00:00Z", "2999-01-01T00:00:00Z"),
        ("2999-01-01T00:00:00Z", "2999-01-01T00:00:00Z"),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/assets",
            json!({"name": "Bad", "service_time": service, "expiration_time": expiration}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fields"]["non_field_errors"][0]["code"], "invalid_order");
    }

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/api/v1/assets").await).await;
    assert_eq!(list["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_reports_every_missing_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assets", json!({"description": "only"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    for field in ["name", "service_time", "expiration_time"] {
        assert_eq!(json["fields"][field][0]["code"], "required", "field {field}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_bad_datetime_and_long_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/assets",
        json!({
            "name": "x".repeat(201),
            "service_time": "tomorrow",
            "expiration_time": "2999-01-01T00:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["service_time"][0]["code"], "invalid");
    assert_eq!(json["fields"]["name"][0]["code"], "length");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/assets")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_asset_by_id(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Boiler", now - Duration::hours(1), now + Duration::days(1)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/assets/{id}/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Boiler");
    assert_eq!(json["is_service_overdue"], true);
    assert_eq!(json["is_expired"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_asset_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Asset with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_with_non_numeric_id_returns_400(pool: PgPool) {
    for uri in ["/api/v1/assets/abc", "/api/v1/assets/abc/", "/api/v1/violations/abc"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_assets_newest_first_with_pagination(pool: PgPool) {
    let now = Utc::now();
    for name in ["First", "Second", "Third"] {
        create_asset(&pool, name, now + Duration::days(1), now + Duration::days(2)).await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/assets").await).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["limit"], 50);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["results"][0]["name"], "Third");
    assert_eq!(json["results"][2]["name"], "First");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/assets?limit=1&offset=1").await).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["limit"], 1);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["results"][0]["name"], "Second");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_assets_filters_by_serviced_flag(pool: PgPool) {
    let now = Utc::now();
    let a = create_asset(&pool, "Done", now + Duration::days(1), now + Duration::days(2)).await;
    create_asset(&pool, "Pending", now + Duration::days(1), now + Duration::days(2)).await;

    let id = a["id"].as_i64().unwrap();
    post(common::build_test_app(pool.clone()), &format!("/api/v1/assets/{id}/mark_serviced")).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/assets?is_serviced=true").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["name"], "Done");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/assets?is_serviced=false").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["name"], "Pending");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_replaces_asset(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Original", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/assets/{id}/"),
        json!({
            "name": "Renamed",
            "service_time": "2999-03-01T08:00:00Z",
            "expiration_time": "2999-04-01T08:00:00Z",
            "is_serviced": true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["service_time"], "2999-03-01T08:00:00Z");
    assert_eq!(json["is_serviced"], true);
    assert_eq!(json["description"], "Original description");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_requires_all_core_fields(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Original", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/assets/{id}"), json!({"name": "Only name"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["service_time"][0]["code"], "required");
    assert_eq!(json["fields"]["expiration_time"][0]["code"], "required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_updates_only_given_fields(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Pump", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({"description": "Moved to basement"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Pump");
    assert_eq!(json["description"], "Moved to basement");
    assert_eq!(json["service_time"], created["service_time"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_checks_order_against_stored_values(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Pump", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({"service_time": (now + Duration::days(3)).to_rfc3339()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["non_field_errors"][0]["code"], "invalid_order");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_null_description_clears_it_on_put_and_patch(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Pump", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], "Pump description");

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({"description": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["description"].is_null());
    assert_eq!(json["name"], "Pump");

    let app = common::build_test_app(pool.clone());
    patch_json(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({"description": "Restored"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({
            "name": "Pump",
            "description": null,
            "service_time": created["service_time"],
            "expiration_time": created["expiration_time"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["description"].is_null());

    let app = common::build_test_app(pool);
    let stored = body_json(get(app, &format!("/api/v1/assets/{id}")).await).await;
    assert!(stored["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_asset_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(app, "/api/v1/assets/999999", json!({"name": "Ghost"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_asset_returns_204_then_404(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Temp", now + Duration::days(1), now + Duration::days(2)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/assets/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/assets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/assets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Mark serviced
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_serviced_returns_message_and_asset(pool: PgPool) {
    let now = Utc::now();
    let created = create_asset(&pool, "Boiler", now - Duration::hours(1), now + Duration::days(1)).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["is_service_overdue"], true);

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post(app, &format!("/api/v1/assets/{id}/mark_serviced/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Asset Boiler marked as serviced");
        assert_eq!(json["asset"]["id"], id);
        assert_eq!(json["asset"]["is_serviced"], true);
        assert_eq!(json["asset"]["is_service_overdue"], false);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_serviced_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post(app, "/api/v1/assets/999999/mark_serviced").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
