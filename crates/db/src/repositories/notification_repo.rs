//! Repository for the `notifications` table.
//!
//! Rows are only ever inserted by the check engine; there is no update or
//! delete path.

use assetwatch_core::checks::NotificationType;
use assetwatch_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use assetwatch_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::notification::{Notification, NotificationListParams};

/// Column list for `notifications` queries joined with `assets a`.
const COLUMNS: &str =
    "n.id, n.asset_id, a.name AS asset_name, n.notification_type, n.message, n.sent_at";

/// Provides read access and idempotent creation for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification unless one of the same type already exists for
    /// the asset.
    ///
    /// Returns the new row's ID, or `None` when the `(asset_id,
    /// notification_type)` pair was already present.
    pub async fn create_if_absent(
        conn: &mut PgConnection,
        asset_id: DbId,
        kind: NotificationType,
        message: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (asset_id, notification_type, message) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (asset_id, notification_type) DO NOTHING \
             RETURNING id",
        )
        .bind(asset_id)
        .bind(kind.as_str())
        .bind(message)
        .fetch_optional(conn)
        .await
    }

    /// Find a notification by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications n \
             JOIN assets a ON a.id = n.asset_id \
             WHERE n.id = $1"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notifications with optional filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &NotificationListParams,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);
        let (where_clause, bind_idx) = where_clause(params);

        let query = format!(
            "SELECT {COLUMNS} FROM notifications n \
             JOIN assets a ON a.id = n.asset_id \
             {where_clause} \
             ORDER BY n.sent_at DESC, n.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Notification>(&query);
        if let Some(kind) = params.notification_type {
            q = q.bind(kind.as_str());
        }
        if let Some(asset_id) = params.asset_id {
            q = q.bind(asset_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count notifications matching the list filters (ignores pagination).
    pub async fn count(pool: &PgPool, params: &NotificationListParams) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(params);
        let query = format!("SELECT COUNT(*) FROM notifications n {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(kind) = params.notification_type {
            q = q.bind(kind.as_str());
        }
        if let Some(asset_id) = params.asset_id {
            q = q.bind(asset_id);
        }
        q.fetch_one(pool).await
    }
}

/// Build the `WHERE` clause for the list filters.
///
/// Returns the clause and the next free bind index. Binds must be applied in
/// the same order: type, then asset.
fn where_clause(params: &NotificationListParams) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if params.notification_type.is_some() {
        conditions.push(format!("n.notification_type = ${bind_idx}"));
        bind_idx += 1;
    }
    if params.asset_id.is_some() {
        conditions.push(format!("n.asset_id = ${bind_idx}"));
        bind_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, bind_idx)
}
