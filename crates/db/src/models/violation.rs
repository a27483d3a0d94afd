//! Violation models.

use assetwatch_core::checks::ViolationType;
use assetwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `violations` table, joined with its asset's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Violation {
    pub id: DbId,
    #[serde(rename = "asset")]
    pub asset_id: DbId,
    pub asset_name: String,
    pub violation_type: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// Query parameters for listing violations (`?type=&asset=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViolationListParams {
    #[serde(rename = "type")]
    pub violation_type: Option<ViolationType>,
    #[serde(rename = "asset", alias = "asset_id")]
    pub asset_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
