//! Notification models.

use assetwatch_core::checks::NotificationType;
use assetwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table, joined with its asset's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    #[serde(rename = "asset")]
    pub asset_id: DbId,
    pub asset_name: String,
    pub notification_type: String,
    pub message: String,
    pub sent_at: Timestamp,
}

/// Query parameters for listing notifications (`?type=&asset=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListParams {
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
    #[serde(rename = "asset", alias = "asset_id")]
    pub asset_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
