//! Asset models.

use assetwatch_core::assets::status::{evaluate_status, AssetStatus};
use assetwatch_core::assets::validation::AssetFields;
use assetwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub service_time: Timestamp,
    pub expiration_time: Timestamp,
    pub is_serviced: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    /// The writable fields of this row, as the base for an update.
    pub fn fields(&self) -> AssetFields {
        AssetFields {
            name: self.name.clone(),
            description: self.description.clone(),
            service_time: self.service_time,
            expiration_time: self.expiration_time,
            is_serviced: self.is_serviced,
        }
    }

    /// Attach the derived status flags computed at `now`.
    pub fn with_status(self, now: Timestamp) -> AssetWithStatus {
        let status = evaluate_status(
            self.service_time,
            self.expiration_time,
            self.is_serviced,
            now,
        );
        AssetWithStatus {
            asset: self,
            status,
        }
    }
}

/// Asset as returned by the API: the stored row plus `is_expired` and
/// `is_service_overdue`.
#[derive(Debug, Clone, Serialize)]
pub struct AssetWithStatus {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(flatten)]
    pub status: AssetStatus,
}

/// Query parameters for listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetListParams {
    /// Filter by the serviced flag.
    pub is_serviced: Option<bool>,
    /// Maximum results (default 50, max 100).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}
