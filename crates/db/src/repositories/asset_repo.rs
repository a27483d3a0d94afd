//! Repository for the `assets` table.

use assetwatch_core::assets::validation::AssetFields;
use assetwatch_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use assetwatch_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::asset::{Asset, AssetListParams};

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    id, name, description, service_time, expiration_time, \
    is_serviced, created_at, updated_at";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset from validated fields.
    pub async fn create(pool: &PgPool, input: &AssetFields) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (name, description, service_time, expiration_time, is_serviced) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.service_time)
            .bind(input.expiration_time)
            .bind(input.is_serviced)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets, newest first.
    pub async fn list(pool: &PgPool, params: &AssetListParams) -> Result<Vec<Asset>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE ($1::BOOLEAN IS NULL OR is_serviced = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(params.is_serviced)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count assets matching the list filters (ignores pagination).
    pub async fn count(pool: &PgPool, params: &AssetListParams) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM assets \
             WHERE ($1::BOOLEAN IS NULL OR is_serviced = $1)",
        )
        .bind(params.is_serviced)
        .fetch_one(pool)
        .await
    }

    /// Overwrite every writable field of an asset.
    ///
    /// Returns `None` if no row with the given ID exists. `updated_at` is
    /// refreshed by the `trg_assets_updated_at` trigger.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AssetFields,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                name = $2, \
                description = $3, \
                service_time = $4, \
                expiration_time = $5, \
                is_serviced = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.service_time)
            .bind(input.expiration_time)
            .bind(input.is_serviced)
            .fetch_optional(pool)
            .await
    }

    /// Set `is_serviced = true`. Idempotent.
    pub async fn mark_serviced(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET is_serviced = true \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset by ID. Returns true if a row was deleted.
    ///
    /// Notifications and violations referencing the asset are removed by
    /// `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All assets not yet serviced, in ID order, for a check run.
    ///
    /// Takes a connection so the scan shares the check run's transaction.
    pub async fn list_unserviced(conn: &mut PgConnection) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE is_serviced = false \
             ORDER BY id"
        );
        sqlx::query_as::<_, Asset>(&query).fetch_all(conn).await
    }
}
