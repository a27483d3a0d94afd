//! Repository for the `violations` table.
//!
//! Rows are only ever inserted by the check engine; there is no update or
//! delete path.

use assetwatch_core::checks::ViolationType;
use assetwatch_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use assetwatch_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::violation::{Violation, ViolationListParams};

/// Column list for `violations` queries joined with `assets a`.
const COLUMNS: &str =
    "v.id, v.asset_id, a.name AS asset_name, v.violation_type, v.description, v.created_at";

/// Provides read access and idempotent creation for violations.
pub struct ViolationRepo;

impl ViolationRepo {
    /// Insert a violation unless one of the same type already exists for
    /// the asset.
    ///
    /// Returns the new row's ID, or `None` when the `(asset_id,
    /// violation_type)` pair was already present.
    pub async fn create_if_absent(
        conn: &mut PgConnection,
        asset_id: DbId,
        kind: ViolationType,
        description: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO violations (asset_id, violation_type, description) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (asset_id, violation_type) DO NOTHING \
             RETURNING id",
        )
        .bind(asset_id)
        .bind(kind.as_str())
        .bind(description)
        .fetch_optional(conn)
        .await
    }

    /// Find a violation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Violation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM violations v \
             JOIN assets a ON a.id = v.asset_id \
             WHERE v.id = $1"
        );
        sqlx::query_as::<_, Violation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List violations with optional filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &ViolationListParams,
    ) -> Result<Vec<Violation>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);
        let (where_clause, bind_idx) = where_clause(params);

        let query = format!(
            "SELECT {COLUMNS} FROM violations v \
             JOIN assets a ON a.id = v.asset_id \
             {where_clause} \
             ORDER BY v.created_at DESC, v.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Violation>(&query);
        if let Some(kind) = params.violation_type {
            q = q.bind(kind.as_str());
        }
        if let Some(asset_id) = params.asset_id {
            q = q.bind(asset_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count violations matching the list filters (ignores pagination).
    pub async fn count(pool: &PgPool, params: &ViolationListParams) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(params);
        let query = format!("SELECT COUNT(*) FROM violations v {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(kind) = params.violation_type {
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
fn where_clause(params: &ViolationListParams) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if params.violation_type.is_some() {
        conditions.push(format!("v.violation_type = ${bind_idx}"));
        bind_idx += 1;
    }
    if params.asset_id.is_some() {
        conditions.push(format!("v.asset_id = ${bind_idx}"));
        bind_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, bind_idx)
}
